//! Geometric predicates, exact and sign-normalized.
//!
//! All orientation and in-circle decisions of the whole crate go through this
//! module, backed by the adaptive-precision [robust] crate, so degenerate and
//! near-degenerate configurations are classified identically everywhere.
//!
//! Tie resolution is uniform: an exact zero always means "not strictly".
//! A collinear point is not strictly left or right of a line, and a
//! cocircular point is not strictly inside a circle. Callers compare against
//! `> 0.0` and thereby inherit this rule. Coincident inputs (zero-length
//! edges arising from duplicate points) are short-circuited to `0.0` before
//! reaching the determinant.

use crate::utils::types::Vertex2;
use robust::{incircle, orient2d, Coord};

#[inline]
const fn coord(p: &Vertex2) -> Coord<f64> {
    Coord { x: p[0], y: p[1] }
}

/// Normalize predicate result to sign: -1.0, 0.0, or 1.0 so that `==` compares signs.
#[inline]
fn sign_f64(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Orientation of the triple `(a, b, c)`.
///
/// Returns `1.0` if the triple winds counter-clockwise, `-1.0` if clockwise,
/// and `0.0` if collinear or if any two inputs coincide.
pub fn orient_2d(a: &Vertex2, b: &Vertex2, c: &Vertex2) -> f64 {
    if a == b || a == c || b == c {
        return 0.0;
    }
    sign_f64(orient2d(coord(a), coord(b), coord(c)))
}

/// In-circle test for `p` against the circle through `a`, `b`, `c`.
///
/// Returns `1.0` if `p` lies strictly inside the circle (with `(a, b, c)`
/// counter-clockwise), `-1.0` if strictly outside, and `0.0` if cocircular
/// or if any two inputs coincide.
pub fn in_circle(a: &Vertex2, b: &Vertex2, c: &Vertex2, p: &Vertex2) -> f64 {
    if a == b || a == c || b == c || p == a || p == b || p == c {
        return 0.0;
    }
    sign_f64(incircle(coord(a), coord(b), coord(c), coord(p)))
}
