//! Direct triangulations of 1, 2 and 3 points.
//!
//! These are the base cases of the divide-and-conquer recursion and the
//! per-group seeds of the parallel driver. Points are assumed sorted, so
//! `lo` is the leftmost and `hi - 1` the rightmost vertex of the range.

use crate::eds::edge_data_structure::EdgeDataStructure;
use crate::merge::Part;
use crate::point::Point;
use crate::predicates::orient_2d;

/// Triangulate the sorted range `points[lo..hi]` of at most 3 points.
///
/// For a single point no edges exist yet, so the result is a bare vertex
/// handle; the merge machinery attaches it later. For two points the result
/// is one edge, for three either a counter-clockwise triangle or, if the
/// points are collinear, a two-edge chain.
pub(crate) fn build_primitive(
    eds: &mut EdgeDataStructure,
    points: &[Point],
    lo: usize,
    hi: usize,
) -> Part {
    match hi - lo {
        1 => Part::Vertex(lo),
        2 => {
            let a = eds.make_edge(lo, lo + 1);
            Part::Hull {
                le: a,
                re: eds.sym(a),
            }
        }
        3 => {
            let a = eds.make_edge(lo, lo + 1);
            let b = eds.make_edge(lo + 1, lo + 2);
            let sym_a = eds.sym(a);
            eds.splice(sym_a, b);

            let orientation = orient_2d(
                &points[lo].vertex(),
                &points[lo + 1].vertex(),
                &points[lo + 2].vertex(),
            );
            if orientation > 0.0 {
                // Counter-clockwise: close the triangle, hull handles stay
                // on a and b.
                eds.connect(b, a);
                Part::Hull {
                    le: a,
                    re: eds.sym(b),
                }
            } else if orientation < 0.0 {
                // Clockwise: close the triangle, hull handles sit on the
                // closing edge.
                let c = eds.connect(b, a);
                Part::Hull {
                    le: eds.sym(c),
                    re: c,
                }
            } else {
                // Collinear: leave the chain open.
                Part::Hull {
                    le: a,
                    re: eds.sym(b),
                }
            }
        }
        _ => unreachable!("primitive ranges hold 1 to 3 points"),
    }
}
