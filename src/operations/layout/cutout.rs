use crate::geometry::{Bounds, Polygon};
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::polygon_2d::{bounds_2d, Location};
use crate::math::Point2;

/// Bounds of `piece` with the interior of `hole` removed, or `None` if the
/// hole swallows the whole piece.
///
/// The extremes of `piece \ hole` are attained at arrangement vertices: the
/// vertices of `piece` outside the hole, the vertices of `hole` inside
/// `piece`, and the crossings of their edges.
pub fn bounds_outside(piece: &Polygon, hole: &Polygon) -> Option<Bounds> {
    let mut extremes: Vec<Point2> = piece
        .points()
        .iter()
        .filter(|p| hole.locate(p) != Location::Inside)
        .copied()
        .collect();
    extremes.extend(
        hole.points()
            .iter()
            .filter(|p| piece.locate(p) != Location::Outside)
            .copied(),
    );
    for (a0, a1) in piece.edges() {
        for (b0, b1) in hole.edges() {
            if let Some((pt, _, _)) = segment_segment_intersect_2d(&a0, &a1, &b0, &b1) {
                extremes.push(pt);
            }
        }
    }
    bounds_2d(&extremes).map(|(x_min, y_min, x_max, y_max)| Bounds {
        x_min,
        y_min,
        x_max,
        y_max,
    })
}
