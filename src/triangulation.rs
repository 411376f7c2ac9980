//! The sequential divide-and-conquer driver and the query surface.

use std::time::Instant;

use crate::eds::edge_data_structure::EdgeDataStructure;
use crate::eds::edge_iterator::EdgeIterator;
use crate::error::TriangulationError;
use crate::merge::{merge, Part};
use crate::point::Point;
use crate::predicates::{in_circle, orient_2d};
use crate::primitives::build_primitive;
use crate::utils::point_order::lexicographic_sort;
use crate::utils::types::{EdgeIdx, VertexIdx};
use log::trace;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// A 2D Delaunay triangulation built by divide and conquer.
///
/// ```
/// use dita::point::points_from_vertices;
/// use dita::Triangulation;
///
/// let vertices = vec![
///     [0.0, 0.0],
///     [-0.5, 1.0],
///     [0.0, 2.5],
///     [2.0, 3.0],
///     [4.0, 2.5],
///     [5.0, 1.5],
///     [4.5, 0.5],
///     [2.5, -0.5],
///     [1.5, 1.5],
///     [3.0, 1.0],
/// ];
///
/// let points = points_from_vertices(&vertices);
/// let triangulation = Triangulation::build(&points).unwrap();
///
/// assert_eq!(triangulation.is_delaunay(), 1.0);
/// ```
#[derive(Debug)]
pub struct Triangulation {
    /// The points, in the lexicographic order the edges refer to.
    points: Vec<Point>,
    eds: EdgeDataStructure,
    /// One active edge per vertex, to start ring walks; `None` for vertices
    /// that ended up without edges (duplicates).
    first_edges: Vec<Option<EdgeIdx>>,
}

impl Triangulation {
    /// Triangulate a set of points sequentially.
    ///
    /// Duplicate coordinates are kept as distinct point identities and end
    /// up tied to their twin by a zero-length edge; at least 2 distinct
    /// coordinates are required.
    pub fn build(input: &[Point]) -> Result<Self, TriangulationError> {
        let now = Instant::now();

        let mut points = input.to_vec();
        lexicographic_sort(&mut points);
        check_distinct(&points)?;

        let mut eds = EdgeDataStructure::new();
        let n = points.len();
        delaunay(&mut eds, &points, 0, n);

        let triangulation = Self::from_parts(points, eds);
        trace!(
            "built triangulation of {} vertices in {:.2?}",
            n,
            now.elapsed()
        );
        Ok(triangulation)
    }

    pub(crate) fn from_parts(points: Vec<Point>, eds: EdgeDataStructure) -> Self {
        let mut first_edges = vec![None; points.len()];
        for e in 0..eds.num_edges() {
            if eds.is_active(e) && first_edges[eds.org(e)].is_none() {
                first_edges[eds.org(e)] = Some(e);
            }
        }
        Self {
            points,
            eds,
            first_edges,
        }
    }

    /// The points in triangulation order; `Point::index` recovers the input
    /// position.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub const fn eds(&self) -> &EdgeDataStructure {
        &self.eds
    }

    /// The number of undirected edges in the triangulation.
    #[must_use]
    pub fn num_active_edges(&self) -> usize {
        self.eds.num_active_edges() / 2
    }

    /// Iterate over the active directed edges.
    pub fn edges(&self) -> impl Iterator<Item = EdgeIterator<'_>> {
        (0..self.eds.num_edges())
            .filter(|&e| self.eds.is_active(e))
            .map(|e| EdgeIterator::new(&self.eds, e))
    }

    /// The neighboring vertices of `v`, ascending and without duplicates.
    ///
    /// Returns an empty vector for a vertex without edges.
    #[must_use]
    pub fn neighbors_of(&self, v: VertexIdx) -> Vec<VertexIdx> {
        let Some(start) = self.first_edges[v] else {
            return Vec::new();
        };
        let mut neighbors = Vec::new();
        let mut e = start;
        loop {
            neighbors.push(self.eds.dest(e));
            e = self.eds.onext(e);
            if e == start {
                break;
            }
        }
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// The neighborhoods of all vertices, indexed like [`Self::points`].
    #[must_use]
    pub fn neighborhoods(&self) -> Vec<Vec<VertexIdx>> {
        (0..self.points.len())
            .map(|v| self.neighbors_of(v))
            .collect()
    }

    /// The triangle faces as counter-clockwise vertex triples.
    ///
    /// Each inner face is reported once, from its lowest-indexed directed
    /// edge; the outer face fails the orientation test and is skipped.
    #[must_use]
    pub fn triangle_faces(&self) -> Vec<[VertexIdx; 3]> {
        let mut faces = Vec::new();
        for e in 0..self.eds.num_edges() {
            if !self.eds.is_active(e) {
                continue;
            }
            let e1 = self.eds.lnext(e);
            let e2 = self.eds.lnext(e1);
            if self.eds.lnext(e2) != e || e >= e1 || e >= e2 {
                continue;
            }
            let face = [self.eds.org(e), self.eds.org(e1), self.eds.org(e2)];
            if orient_2d(
                &self.points[face[0]].vertex(),
                &self.points[face[1]].vertex(),
                &self.points[face[2]].vertex(),
            ) > 0.0
            {
                faces.push(face);
            }
        }
        faces
    }

    /// Check the Delaunay property over all faces against all points by brute
    /// force. Returns the fraction of faces with an empty circumcircle, so
    /// `1.0` means Delaunay.
    #[must_use]
    pub fn is_delaunay(&self) -> f64 {
        let faces = self.triangle_faces();
        if faces.is_empty() {
            return 1.0;
        }
        let num_delaunay = faces
            .iter()
            .filter(|face| self.has_empty_circumcircle(face))
            .count();
        num_delaunay as f64 / faces.len() as f64
    }

    /// Parallel version of [`Self::is_delaunay`].
    #[must_use]
    pub fn is_delaunay_p(&self) -> f64 {
        let faces = self.triangle_faces();
        if faces.is_empty() {
            return 1.0;
        }
        let num_faces = faces.len();
        let num_delaunay = faces
            .into_par_iter()
            .filter(|face| self.has_empty_circumcircle(face))
            .count();
        num_delaunay as f64 / num_faces as f64
    }

    fn has_empty_circumcircle(&self, face: &[VertexIdx; 3]) -> bool {
        let (a, b, c) = (
            self.points[face[0]].vertex(),
            self.points[face[1]].vertex(),
            self.points[face[2]].vertex(),
        );
        self.points
            .iter()
            .all(|p| in_circle(&a, &b, &c, &p.vertex()) <= 0.0)
    }

    /// Check if the underlying edge structure is sound.
    #[must_use]
    pub fn is_sound(&self) -> bool {
        self.eds.is_sound()
    }
}

/// Reject inputs with fewer than 2 distinct points. Expects sorted points,
/// so duplicates are adjacent.
pub(crate) fn check_distinct(points: &[Point]) -> Result<(), TriangulationError> {
    let num_duplicates = points
        .windows(2)
        .filter(|w| w[0].coincides_with(&w[1]))
        .count();
    let num_distinct = points.len() - num_duplicates;
    if num_distinct < 2 {
        return Err(TriangulationError::DegenerateInput(num_distinct));
    }
    Ok(())
}

/// Recursively triangulate the sorted range `points[lo..hi]`.
pub(crate) fn delaunay(
    eds: &mut EdgeDataStructure,
    points: &[Point],
    lo: usize,
    hi: usize,
) -> Part {
    let n = hi - lo;
    if n <= 3 {
        return build_primitive(eds, points, lo, hi);
    }
    let mid = lo + n.div_ceil(2);
    let left = delaunay(eds, points, lo, mid);
    let right = delaunay(eds, points, mid, hi);
    merge(eds, points, left, right)
}
