use crate::utils::types::Vertex2;
use core::fmt;

/// A located entity in the plane.
///
/// Carries the stable `index` assigned by the producing collaborator, used to
/// correlate neighbor lists and rendering output with the input sequence.
/// The triangulation engine never mutates points.
///
/// Stationary entities (obstacles) take part in the triangulation like any
/// other point; the flag is carried for collaborators that treat them
/// differently (e.g. steering rules), it is never read by this crate.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// The stable original index of this point.
    pub index: usize,
    /// Whether this point is stationary (an obstacle) or mobile.
    pub stationary: bool,
}

impl Point {
    /// Create a mobile point.
    pub const fn new(index: usize, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            index,
            stationary: false,
        }
    }

    /// Create a stationary point (an obstacle).
    pub const fn stationary(index: usize, x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            index,
            stationary: true,
        }
    }

    /// The coordinates as a plain vertex, for the geometric predicates.
    pub const fn vertex(&self) -> Vertex2 {
        [self.x, self.y]
    }

    /// Check for exact coordinate coincidence (a duplicate point).
    pub fn coincides_with(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point {}: [{}, {}]", self.index, self.x, self.y)
    }
}

/// Wrap raw coordinate pairs into [Point]s, assigning indices in input order.
pub fn points_from_vertices(vertices: &[Vertex2]) -> Vec<Point> {
    vertices
        .iter()
        .enumerate()
        .map(|(index, v)| Point::new(index, v[0], v[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vertices_keeps_input_order() {
        let points = points_from_vertices(&[[2.0, 0.0], [0.0, 1.0]]);
        assert_eq!(points[0].index, 0);
        assert_eq!(points[0].vertex(), [2.0, 0.0]);
        assert_eq!(points[1].index, 1);
        assert!(!points[0].stationary);
    }

    #[test]
    fn test_coincidence() {
        let a = Point::new(0, 1.0, 2.0);
        let b = Point::stationary(7, 1.0, 2.0);
        let c = Point::new(1, 1.0, 2.5);
        assert!(a.coincides_with(&b));
        assert!(!a.coincides_with(&c));
        assert!(b.stationary);
    }
}
