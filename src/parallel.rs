//! The message-passing parallel driver.
//!
//! The coordinator scatters contiguous runs of 3-point groups to worker
//! threads over typed channels. Each worker triangulates its run locally
//! with 0-based vertex indices and sends the result back tagged with its
//! slot. The coordinator gathers by slot, rebases every local arena into one
//! global arena, and reduces the parts pairwise in original left-to-right
//! order.
//!
//! That order is load-bearing: merging respects the sorted-order boundary
//! between adjacent runs, so the reduction performs exactly the merges the
//! sequential driver would, and the resulting edge set is identical.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Instant;

use crate::eds::edge_data_structure::EdgeDataStructure;
use crate::error::TriangulationError;
use crate::merge::{merge, Part};
use crate::point::Point;
use crate::primitives::build_primitive;
use crate::triangulation::{check_distinct, Triangulation};
use crate::utils::point_order::lexicographic_sort;
use crate::utils::split::groups_of_3;
use log::trace;

enum WorkerRequest {
    /// A contiguous run of sorted point groups to triangulate.
    Assign { groups: Vec<Vec<Point>> },
}

enum WorkerReply {
    Result { slot: usize, local: LocalTriangulation },
}

/// A worker's triangulation of its run, with vertex indices local to the run.
struct LocalTriangulation {
    eds: EdgeDataStructure,
    part: Part,
    num_points: usize,
}

fn run_worker(slot: usize, requests: Receiver<WorkerRequest>, replies: Sender<WorkerReply>) {
    for WorkerRequest::Assign { groups } in requests {
        let local = triangulate_groups(&groups);
        if replies.send(WorkerReply::Result { slot, local }).is_err() {
            // Coordinator is gone, nothing left to do.
            return;
        }
    }
}

/// Triangulate a run of groups: one primitive per group, then an ordered
/// pairwise reduction.
fn triangulate_groups(groups: &[Vec<Point>]) -> LocalTriangulation {
    let points: Vec<Point> = groups.iter().flatten().copied().collect();
    let mut eds = EdgeDataStructure::new();

    let mut parts = Vec::with_capacity(groups.len());
    let mut lo = 0;
    for group in groups {
        let hi = lo + group.len();
        parts.push(build_primitive(&mut eds, &points, lo, hi));
        lo = hi;
    }

    let part = reduce(&mut eds, &points, parts);
    LocalTriangulation {
        eds,
        part,
        num_points: points.len(),
    }
}

/// Reduce laterally adjacent parts to one by rounds of pairwise merges.
///
/// Adjacency is positional: parts are merged with their immediate neighbor
/// in sorted order, an odd leftover is carried into the next round.
pub(crate) fn reduce(
    eds: &mut EdgeDataStructure,
    points: &[Point],
    mut parts: Vec<Part>,
) -> Part {
    while parts.len() > 1 {
        let mut next = Vec::with_capacity(parts.len().div_ceil(2));
        let mut pairs = parts.into_iter();
        while let Some(left) = pairs.next() {
            match pairs.next() {
                Some(right) => next.push(merge(eds, points, left, right)),
                None => next.push(left),
            }
        }
        parts = next;
    }
    parts[0]
}

/// Shift a part's identifiers from a local arena into the global one.
const fn rebase_part(part: Part, edge_offset: usize, vertex_offset: usize) -> Part {
    match part {
        Part::Vertex(v) => Part::Vertex(v + vertex_offset),
        Part::Hull { le, re } => Part::Hull {
            le: le + edge_offset,
            re: re + edge_offset,
        },
    }
}

impl Triangulation {
    /// Triangulate a set of points on `num_workers` threads.
    ///
    /// Produces the exact same triangulation as [`Triangulation::build`] for
    /// the same input. The worker count is clamped to the number of 3-point
    /// groups; a failing worker surfaces as
    /// [`TriangulationError::WorkerFailure`] and is not retried.
    pub fn build_parallel(
        input: &[Point],
        num_workers: usize,
    ) -> Result<Self, TriangulationError> {
        let now = Instant::now();

        let mut points = input.to_vec();
        lexicographic_sort(&mut points);
        check_distinct(&points)?;

        let groups = groups_of_3(&points);
        let num_workers = num_workers.clamp(1, groups.len());
        let run_len = groups.len().div_ceil(num_workers);

        // Scatter: one request channel per worker, one shared reply channel.
        let (reply_tx, reply_rx) = channel();
        let mut handles = Vec::with_capacity(num_workers);
        for (slot, run) in groups.chunks(run_len).enumerate() {
            let (request_tx, request_rx) = channel();
            let replies = reply_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("dita-worker-{slot}"))
                .spawn(move || run_worker(slot, request_rx, replies))
                .map_err(|e| TriangulationError::WorkerFailure(slot, e.to_string()))?;
            handles.push(handle);

            request_tx
                .send(WorkerRequest::Assign {
                    groups: run.to_vec(),
                })
                .map_err(|_| {
                    TriangulationError::WorkerFailure(slot, "worker hung up".to_string())
                })?;
            // Dropping the sender here closes the worker's inbox, so it
            // exits after this one assignment.
        }
        drop(reply_tx);

        // Gather by slot; arrival order does not matter.
        let mut locals: Vec<Option<LocalTriangulation>> =
            (0..handles.len()).map(|_| None).collect();
        for WorkerReply::Result { slot, local } in reply_rx {
            locals[slot] = Some(local);
        }
        for (slot, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() {
                return Err(TriangulationError::WorkerFailure(
                    slot,
                    "worker panicked".to_string(),
                ));
            }
        }

        // Rebase the local arenas into one, in original left-to-right order.
        let mut eds = EdgeDataStructure::new();
        let mut parts = Vec::with_capacity(locals.len());
        let mut vertex_offset = 0;
        for (slot, local) in locals.into_iter().enumerate() {
            let Some(local) = local else {
                return Err(TriangulationError::WorkerFailure(
                    slot,
                    "no result received".to_string(),
                ));
            };
            let num_points = local.num_points;
            let edge_offset = eds.absorb(local.eds, vertex_offset);
            parts.push(rebase_part(local.part, edge_offset, vertex_offset));
            vertex_offset += num_points;
        }
        reduce(&mut eds, &points, parts);

        let triangulation = Self::from_parts(points, eds);
        trace!(
            "built triangulation of {} vertices on {} workers in {:.2?}",
            vertex_offset,
            num_workers,
            now.elapsed()
        );
        Ok(triangulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eds::edge_iterator::EdgeIterator;
    use crate::point::points_from_vertices;
    use crate::utils::types::Vertex2;
    use dita_test_utils::sample_vertices_2d;

    fn build(vertices: &[Vertex2]) -> Result<Triangulation, TriangulationError> {
        Triangulation::build(&points_from_vertices(vertices))
    }

    fn build_parallel(
        vertices: &[Vertex2],
        num_workers: usize,
    ) -> Result<Triangulation, TriangulationError> {
        Triangulation::build_parallel(&points_from_vertices(vertices), num_workers)
    }

    fn active_edge_set(triangulation: &Triangulation) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = triangulation
            .edges()
            .filter(EdgeIterator::is_canonical)
            .map(|e| {
                let (o, d) = (e.org(), e.dest());
                (o.min(d), o.max(d))
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    #[test]
    fn test_square_matches_sequential() {
        let vertices = vec![[0.0, 0.0], [10.0, 0.0], [0.0, 10.0], [10.0, 10.0]];
        let sequential = build(&vertices).unwrap();
        let parallel = build_parallel(&vertices, 2).unwrap();
        assert_eq!(active_edge_set(&parallel), active_edge_set(&sequential));
        assert!(parallel.is_sound());
    }

    #[test]
    fn test_worker_counts_match_sequential() {
        let vertices = sample_vertices_2d(60, Some(-50.0..=50.0));
        let sequential = build(&vertices).unwrap();
        for num_workers in [1, 2, 4] {
            let parallel = build_parallel(&vertices, num_workers).unwrap();
            assert_eq!(
                active_edge_set(&parallel),
                active_edge_set(&sequential),
                "edge sets diverge for {num_workers} workers"
            );
            assert_eq!(parallel.is_delaunay_p(), 1.0);
            assert!(parallel.is_sound());
        }
    }

    #[test]
    fn test_collinear_input() {
        let vertices: Vec<Vertex2> = (0..10).map(|i| [f64::from(i), 0.0]).collect();
        let parallel = build_parallel(&vertices, 4).unwrap();
        assert_eq!(parallel.num_active_edges(), 9);
        assert!(parallel.triangle_faces().is_empty());
    }

    #[test]
    fn test_worker_count_is_clamped() {
        // 5 points make 2 groups, so at most 2 workers can be used; 16 must
        // not spawn idle workers or fail.
        let vertices = sample_vertices_2d(5, None);
        let sequential = build(&vertices).unwrap();
        let parallel = build_parallel(&vertices, 16).unwrap();
        assert_eq!(active_edge_set(&parallel), active_edge_set(&sequential));

        // Zero also clamps, to a single worker.
        let parallel = build_parallel(&vertices, 0).unwrap();
        assert_eq!(active_edge_set(&parallel), active_edge_set(&sequential));
    }

    #[test]
    fn test_degenerate_input_is_rejected() {
        assert!(matches!(
            build_parallel(&[[1.0, 2.0]], 4),
            Err(TriangulationError::DegenerateInput(1))
        ));
    }
}
