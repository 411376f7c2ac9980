//! Error types for the triangulation drivers.

use thiserror::Error;

/// Errors surfaced by [`Triangulation::build`](crate::Triangulation::build)
/// and [`Triangulation::build_parallel`](crate::Triangulation::build_parallel).
///
/// All failures are structural properties of the input or of worker-process
/// failure; none are transient or retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriangulationError {
    /// Fewer than 2 distinct input points; no triangulation is meaningful.
    ///
    /// Note that 2 distinct points, or any number of collinear points, are
    /// *not* degenerate: they produce a valid path-only triangulation.
    #[error("need at least 2 distinct points to triangulate, got {0}")]
    DegenerateInput(usize),

    /// A parallel worker failed; the whole computation is aborted.
    ///
    /// There is no retry: the computation is defined by the split across
    /// workers and cannot partially recover.
    #[error("worker {0} failed: {1}")]
    WorkerFailure(usize, String),
}
