use crate::point::Point;

/// Split sorted points into fixed-size groups of 3, preserving order.
///
/// The last group may hold 1 or 2 points. These groups are the scatter unit
/// of the parallel driver: workers receive contiguous runs of groups and
/// build a primitive triangulation per group.
pub fn groups_of_3(points: &[Point]) -> Vec<Vec<Point>> {
    points.chunks(3).map(<[Point]>::to_vec).collect()
}
