//! Merging two laterally adjacent triangulations into one.
//!
//! This implements the divide-and-conquer merge step: find the lower common
//! tangent of the two convex hulls, bridge it, then "rise" towards the upper
//! tangent, connecting cross edges and deleting edges whose circumcircle
//! would contain a point of the other side.

use crate::eds::edge_data_structure::EdgeDataStructure;
use crate::point::Point;
use crate::predicates::{in_circle, orient_2d};
use crate::utils::types::{EdgeIdx, VertexIdx};

/// A triangulated piece of the point set, addressed by its hull.
///
/// `le` is a counter-clockwise convex hull edge out of the leftmost vertex,
/// `re` the clockwise hull edge out of the rightmost vertex. A single point
/// has no edges yet and is carried as a bare vertex until its first merge.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Part {
    Vertex(VertexIdx),
    Hull { le: EdgeIdx, re: EdgeIdx },
}

fn left_of(eds: &EdgeDataStructure, points: &[Point], p: VertexIdx, e: EdgeIdx) -> bool {
    orient_2d(
        &points[p].vertex(),
        &points[eds.org(e)].vertex(),
        &points[eds.dest(e)].vertex(),
    ) > 0.0
}

fn right_of(eds: &EdgeDataStructure, points: &[Point], p: VertexIdx, e: EdgeIdx) -> bool {
    orient_2d(
        &points[p].vertex(),
        &points[eds.dest(e)].vertex(),
        &points[eds.org(e)].vertex(),
    ) > 0.0
}

/// A candidate edge takes part in the merge as long as its destination lies
/// strictly right of (i.e. above) the current base edge.
fn valid(eds: &EdgeDataStructure, points: &[Point], e: EdgeIdx, base: EdgeIdx) -> bool {
    right_of(eds, points, eds.dest(e), base)
}

fn in_circle_idx(
    points: &[Point],
    a: VertexIdx,
    b: VertexIdx,
    c: VertexIdx,
    p: VertexIdx,
) -> bool {
    in_circle(
        &points[a].vertex(),
        &points[b].vertex(),
        &points[c].vertex(),
        &points[p].vertex(),
    ) > 0.0
}

/// Merge two laterally adjacent parts; every vertex of `left` precedes every
/// vertex of `right` in the sorted order.
pub(crate) fn merge(
    eds: &mut EdgeDataStructure,
    points: &[Point],
    left: Part,
    right: Part,
) -> Part {
    match (left, right) {
        (Part::Vertex(l), Part::Vertex(r)) => {
            let e = eds.make_edge(l, r);
            Part::Hull {
                le: e,
                re: eds.sym(e),
            }
        }
        (Part::Hull { le: ldo, re: ldi }, Part::Vertex(p)) => {
            // Walk the right hull chain of the left part down to the tangent
            // point seen from the lone vertex.
            let mut ldi = ldi;
            while left_of(eds, points, p, ldi) {
                ldi = eds.lnext(ldi);
            }
            let base = eds.make_edge(p, eds.org(ldi));
            let sym_base = eds.sym(base);
            eds.splice(sym_base, ldi);
            let le = if eds.org(ldi) == eds.org(ldo) {
                eds.sym(base)
            } else {
                ldo
            };
            rise(eds, points, base);
            Part::Hull { le, re: base }
        }
        (Part::Vertex(p), Part::Hull { le: rdi, re: rdo }) => {
            let mut rdi = rdi;
            while right_of(eds, points, p, rdi) {
                rdi = eds.rprev(rdi);
            }
            let base = eds.make_edge(eds.org(rdi), p);
            let target = eds.oprev(rdi);
            eds.splice(base, target);
            let re = if eds.org(rdi) == eds.org(rdo) {
                base
            } else {
                rdo
            };
            rise(eds, points, base);
            Part::Hull {
                le: eds.sym(base),
                re,
            }
        }
        (Part::Hull { le: ldo, re: ldi }, Part::Hull { le: rdi, re: rdo }) => {
            let (mut ldo, mut ldi, mut rdi, mut rdo) = (ldo, ldi, rdi, rdo);

            // Descend both hulls to the lower common tangent.
            loop {
                if left_of(eds, points, eds.org(rdi), ldi) {
                    ldi = eds.lnext(ldi);
                } else if right_of(eds, points, eds.org(ldi), rdi) {
                    rdi = eds.rprev(rdi);
                } else {
                    break;
                }
            }

            // Bridge the tangent; the base edge runs right-to-left.
            let sym_rdi = eds.sym(rdi);
            let base = eds.connect(sym_rdi, ldi);
            if eds.org(ldi) == eds.org(ldo) {
                ldo = eds.sym(base);
            }
            if eds.org(rdi) == eds.org(rdo) {
                rdo = base;
            }

            rise(eds, points, base);
            Part::Hull { le: ldo, re: rdo }
        }
    }
}

/// Zip the seam shut from the base edge up to the upper common tangent.
///
/// At each step the candidate edges of both sides are thinned: an edge whose
/// circumcircle with the base strictly contains the next candidate's
/// destination cannot be Delaunay and is deleted. Then the surviving
/// candidate whose destination wins the in-circle comparison is connected to
/// the base. A tie picks the left candidate; exact cocircularity never
/// deletes.
fn rise(eds: &mut EdgeDataStructure, points: &[Point], mut base: EdgeIdx) {
    loop {
        let sym_base = eds.sym(base);
        let mut lcand = eds.onext(sym_base);
        if valid(eds, points, lcand, base) {
            while in_circle_idx(
                points,
                eds.dest(base),
                eds.org(base),
                eds.dest(lcand),
                eds.dest(eds.onext(lcand)),
            ) {
                let next = eds.onext(lcand);
                eds.deactivate(lcand);
                lcand = next;
            }
        }

        let mut rcand = eds.oprev(base);
        if valid(eds, points, rcand, base) {
            while in_circle_idx(
                points,
                eds.dest(base),
                eds.org(base),
                eds.dest(rcand),
                eds.dest(eds.oprev(rcand)),
            ) {
                let prev = eds.oprev(rcand);
                eds.deactivate(rcand);
                rcand = prev;
            }
        }

        let l_valid = valid(eds, points, lcand, base);
        let r_valid = valid(eds, points, rcand, base);
        // Both candidates below the base: the base is the upper tangent.
        if !l_valid && !r_valid {
            break;
        }

        if !l_valid
            || (r_valid
                && in_circle_idx(
                    points,
                    eds.dest(lcand),
                    eds.org(lcand),
                    eds.org(rcand),
                    eds.dest(rcand),
                ))
        {
            let sym_base = eds.sym(base);
            base = eds.connect(rcand, sym_base);
        } else {
            let (sym_base, sym_lcand) = (eds.sym(base), eds.sym(lcand));
            base = eds.connect(sym_base, sym_lcand);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::points_from_vertices;
    use crate::primitives::build_primitive;

    fn active_edge_set(eds: &EdgeDataStructure) -> Vec<(usize, usize)> {
        let mut edges: Vec<(usize, usize)> = (0..eds.num_edges())
            .step_by(2)
            .filter(|&e| eds.is_active(e))
            .map(|e| {
                let (o, d) = (eds.org(e), eds.dest(e));
                (o.min(d), o.max(d))
            })
            .collect();
        edges.sort_unstable();
        edges
    }

    #[test]
    fn test_merge_two_vertices() {
        let mut eds = EdgeDataStructure::new();
        let points = points_from_vertices(&[[0.0, 0.0], [1.0, 0.0]]);
        let part = merge(&mut eds, &points, Part::Vertex(0), Part::Vertex(1));
        assert_eq!(eds.num_active_edges(), 2);
        let Part::Hull { le, re } = part else {
            panic!("expected a hull part");
        };
        assert_eq!(eds.org(le), 0);
        assert_eq!(eds.org(re), 1);
    }

    #[test]
    fn test_merge_segment_and_vertex() {
        let mut eds = EdgeDataStructure::new();
        let points = points_from_vertices(&[[0.0, 0.0], [5.0, 10.0], [10.0, 0.0]]);
        let left = build_primitive(&mut eds, &points, 0, 2);
        let right = build_primitive(&mut eds, &points, 2, 3);
        let part = merge(&mut eds, &points, left, right);
        // The lone vertex closes a triangle.
        assert_eq!(active_edge_set(&eds), vec![(0, 1), (0, 2), (1, 2)]);
        assert!(eds.is_sound());
        let Part::Hull { le, re } = part else {
            panic!("expected a hull part");
        };
        assert_eq!(eds.org(le), 0);
        assert_eq!(eds.org(re), 2);
    }

    #[test]
    fn test_merge_vertex_and_segment() {
        let mut eds = EdgeDataStructure::new();
        let points = points_from_vertices(&[[0.0, 0.0], [5.0, 10.0], [10.0, 0.0]]);
        let left = build_primitive(&mut eds, &points, 0, 1);
        let right = build_primitive(&mut eds, &points, 1, 3);
        let part = merge(&mut eds, &points, left, right);
        assert_eq!(active_edge_set(&eds), vec![(0, 1), (0, 2), (1, 2)]);
        assert!(eds.is_sound());
        let Part::Hull { le, re } = part else {
            panic!("expected a hull part");
        };
        assert_eq!(eds.org(le), 0);
        assert_eq!(eds.org(re), 2);
    }

    #[test]
    fn test_merge_two_segments_into_square() {
        let mut eds = EdgeDataStructure::new();
        // Sorted: 0 = (0,0), 1 = (0,10), 2 = (10,0), 3 = (10,10).
        let points =
            points_from_vertices(&[[0.0, 0.0], [0.0, 10.0], [10.0, 0.0], [10.0, 10.0]]);
        let left = build_primitive(&mut eds, &points, 0, 2);
        let right = build_primitive(&mut eds, &points, 2, 4);
        merge(&mut eds, &points, left, right);
        // Four hull edges plus one diagonal.
        assert_eq!(
            active_edge_set(&eds),
            vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]
        );
        assert!(eds.is_sound());
    }

    #[test]
    fn test_merge_collinear_chains() {
        let mut eds = EdgeDataStructure::new();
        let points = points_from_vertices(&[
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [3.0, 0.0],
        ]);
        let left = build_primitive(&mut eds, &points, 0, 2);
        let right = build_primitive(&mut eds, &points, 2, 4);
        let part = merge(&mut eds, &points, left, right);
        // Collinear input merges into a longer chain without faces.
        assert_eq!(active_edge_set(&eds), vec![(0, 1), (1, 2), (2, 3)]);
        assert!(eds.is_sound());
        let Part::Hull { le, re } = part else {
            panic!("expected a hull part");
        };
        assert_eq!(eds.org(le), 0);
        assert_eq!(eds.org(re), 3);
    }
}
