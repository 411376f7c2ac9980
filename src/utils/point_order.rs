use crate::point::Point;

/// Sorts points lexicographically by `(x, then y)`.
///
/// The sort is stable, so duplicate coordinates keep their input order and
/// the result is deterministic for identical input. Duplicates are *not*
/// removed here; they are handled downstream by the primitives.
///
/// The divide-and-conquer drivers rely on this order: every split produces
/// two laterally adjacent halves, which is what makes the hull merge valid.
pub fn lexicographic_sort(points: &mut [Point]) {
    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
}
