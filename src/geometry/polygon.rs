use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::intersect_2d::{line_line_intersect_2d, segment_segment_intersect_2d};
use crate::math::polygon_2d::{
    bounds_2d, is_convex_ring, is_simple_ring, locate_point, rings_equal_cyclic, signed_area_2d, Location,
};
use crate::math::transform_2d::Transform2;
use crate::math::{points_approx_eq, Point2, TOLERANCE};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Returns the bounds as `(x_min, y_min, x_max, y_max)`.
    #[must_use]
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

/// A closed polygon given by its ordered vertices.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point2>,
}

impl Polygon {
    /// Creates a polygon from an ordered point sequence.
    ///
    /// A repeated closing vertex is dropped.
    #[must_use]
    pub fn new(mut points: Vec<Point2>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    /// Creates a polygon and checks that it is a simple ring.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateCycle` if fewer than three distinct
    /// vertices are given, or `GeometryError::NonSimplePolygon` if the
    /// boundary touches or crosses itself.
    pub fn try_simple(points: Vec<Point2>) -> Result<Self> {
        let polygon = Self::new(points);
        let mut distinct: Vec<Point2> = Vec::with_capacity(polygon.points.len());
        for pt in &polygon.points {
            if !distinct.iter().any(|d| points_approx_eq(d, pt)) {
                distinct.push(*pt);
            }
        }
        if distinct.len() < 3 {
            return Err(GeometryError::DegenerateCycle(format!(
                "{} distinct vertices",
                distinct.len()
            ))
            .into());
        }
        if !polygon.is_simple() || polygon.area() < TOLERANCE {
            return Err(GeometryError::NonSimplePolygon(format!(
                "{} vertices starting at ({}, {})",
                polygon.points.len(),
                polygon.points[0].x,
                polygon.points[0].y
            ))
            .into());
        }
        Ok(polygon)
    }

    /// Creates the axis-aligned rectangle `[x0, x1] x [y0, y1]`, counter-clockwise.
    #[must_use]
    pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            points: vec![
                Point2::new(x0, y0),
                Point2::new(x1, y0),
                Point2::new(x1, y1),
                Point2::new(x0, y1),
            ],
        }
    }

    /// Returns the ordered vertices.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Returns `true` if the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Returns the bounding box, or `None` for an empty polygon.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        bounds_2d(&self.points).map(|(x_min, y_min, x_max, y_max)| Bounds {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Signed area, positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Unsigned area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Returns `true` if the boundary neither touches nor crosses itself.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        is_simple_ring(&self.points)
    }

    /// Returns `true` if the polygon is simple and has no reflex corner.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        is_convex_ring(&self.points)
    }

    /// Locates a point relative to this polygon.
    #[must_use]
    pub fn locate(&self, point: &Point2) -> Location {
        locate_point(point, &self.points)
    }

    /// Returns the polygon with every vertex mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Transform2) -> Self {
        Self {
            points: self.points.iter().map(|p| transform.apply(p)).collect(),
        }
    }

    /// Intersects this polygon with a convex `window` (Sutherland-Hodgman).
    ///
    /// The subject may be concave; in that case disjoint pieces are joined by
    /// zero-width bridges along the window boundary, which leaves the bounds of
    /// the result exact. Returns an empty polygon if nothing overlaps.
    #[must_use]
    pub fn intersection(&self, window: &Polygon) -> Polygon {
        let orientation = window.signed_area().signum();
        let mut output = self.points.clone();
        for (c0, c1) in window.edges() {
            if output.is_empty() {
                break;
            }
            let edge = c1 - c0;
            let slack = TOLERANCE * edge.norm();
            let inside = |p: &Point2| orientation * edge.perp(&(p - c0)) >= -slack;
            let input = std::mem::take(&mut output);
            let n = input.len();
            for i in 0..n {
                let cur = &input[i];
                let prev = &input[(i + n - 1) % n];
                match (inside(prev), inside(cur)) {
                    (true, true) => output.push(*cur),
                    (true, false) => output.extend(clip_crossing(prev, cur, &c0, &edge)),
                    (false, true) => {
                        output.extend(clip_crossing(prev, cur, &c0, &edge));
                        output.push(*cur);
                    }
                    (false, false) => {}
                }
            }
        }
        Polygon { points: output }
    }

    /// Returns `true` if every point of `other` lies inside or on the
    /// boundary of `self`.
    ///
    /// Each edge of `other` is split wherever it meets the boundary of `self`
    /// and every piece is sampled at its midpoint, so edges that leave `self`
    /// through a vertex are detected.
    #[must_use]
    pub fn covers(&self, other: &Polygon) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        if other
            .points
            .iter()
            .any(|p| self.locate(p) == Location::Outside)
        {
            return false;
        }
        for (a, b) in other.edges() {
            let mut params = vec![0.0, 1.0];
            for (p0, p1) in self.edges() {
                if point_to_segment_dist(&p0, &a, &b) <= TOLERANCE {
                    params.push(crate::math::distance_2d::project_onto_segment(&p0, &a, &b));
                }
                if let Some((_, t, _)) = segment_segment_intersect_2d(&a, &b, &p0, &p1) {
                    params.push(t);
                }
            }
            params.sort_by(f64::total_cmp);
            for pair in params.windows(2) {
                if pair[1] - pair[0] < 1e-9 {
                    continue;
                }
                let mid = a + (b - a) * (0.5 * (pair[0] + pair[1]));
                if self.locate(&mid) == Location::Outside {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if the two polygons describe the same region: identical
    /// vertex rings up to cyclic rotation, or mutual coverage.
    #[must_use]
    pub fn equals(&self, other: &Polygon) -> bool {
        rings_equal_cyclic(&self.points, &other.points)
            || (self.covers(other) && other.covers(self))
    }

    /// Returns `true` if `self` covers `other` and the two are not equal.
    ///
    /// Shared boundary is allowed; the contained polygon must be a proper
    /// subset.
    #[must_use]
    pub fn contains_polygon(&self, other: &Polygon) -> bool {
        self.covers(other) && !other.covers(self)
    }
}

/// Intersection of the subject edge `prev -> cur` with the clip line through
/// `c0` along `edge`.
fn clip_crossing(
    prev: &Point2,
    cur: &Point2,
    c0: &Point2,
    edge: &crate::math::Vector2,
) -> Option<Point2> {
    let d = cur - prev;
    line_line_intersect_2d(prev, &d, c0, edge).map(|(t, _)| prev + d * t.clamp(0.0, 1.0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn poly(pts: &[(f64, f64)]) -> Polygon {
        Polygon::new(pts.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[test]
    fn closing_vertex_dropped() {
        let p = poly(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(p.points().len(), 3);
    }

    #[test]
    fn bounds_and_area() {
        let p = poly(&[(0.0, 0.0), (10.8, 0.0), (5.4, 6.15)]);
        let b = p.bounds().unwrap();
        assert_eq!(b.as_tuple(), (0.0, 0.0, 10.8, 6.15));
        assert_abs_diff_eq!(p.area(), 0.5 * 10.8 * 6.15, epsilon = 1e-9);
        assert!(Polygon::default().bounds().is_none());
    }

    #[test]
    fn clip_triangle_to_rectangle() {
        let tri = poly(&[(0.0, 0.0), (10.8, 0.0), (5.4, 6.15)]);
        let rect = Polygon::rectangle(0.0, 0.0, 1.2, 8.0);
        let b = tri.intersection(&rect).bounds().unwrap();
        assert_abs_diff_eq!(b.x_min, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.x_max, 1.2, epsilon = 1e-9);
        assert_abs_diff_eq!(b.y_max, 1.2 * 6.15 / 5.4, epsilon = 1e-9);
    }

    #[test]
    fn clip_disjoint_is_empty() {
        let sq = Polygon::rectangle(0.0, 0.0, 1.0, 1.0);
        let far = Polygon::rectangle(5.0, 5.0, 6.0, 6.0);
        assert!(sq.intersection(&far).is_empty());
    }

    #[test]
    fn clip_concave_keeps_both_lobes_in_bounds() {
        // U shape opening upwards; the window spans both arms above the notch.
        let u = poly(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        let window = Polygon::rectangle(0.5, 2.0, 2.5, 4.0);
        let b = u.intersection(&window).bounds().unwrap();
        assert_abs_diff_eq!(b.x_min, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(b.x_max, 2.5, epsilon = 1e-9);
        assert_abs_diff_eq!(b.y_min, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.y_max, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn containment_with_shared_boundary() {
        let square = Polygon::rectangle(0.0, 0.0, 2.0, 2.0);
        let half = poly(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]);
        assert!(square.covers(&half));
        assert!(square.contains_polygon(&half));
        assert!(!half.contains_polygon(&square));
    }

    #[test]
    fn containment_samples_edges_between_boundary_contacts() {
        // L shape; the hypotenuse touches the reflex vertex but stays inside.
        let l = poly(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let tri = poly(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]);
        assert!(l.covers(&poly(&[(0.0, 0.0), (2.0, 0.0), (1.0, 1.0)])));
        assert!(l.covers(&tri));
        let outside = poly(&[(0.0, 0.0), (2.0, 1.0), (1.0, 2.0)]);
        assert!(!l.covers(&outside));
    }

    #[test]
    fn equality_up_to_rotation() {
        let a = poly(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let b = poly(&[(1.0, 1.0), (0.0, 0.0), (1.0, 0.0)]);
        assert!(a.equals(&b));
        assert!(!a.contains_polygon(&b));
    }

    #[test]
    fn try_simple_errors() {
        let err = Polygon::try_simple(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(matches!(
            err,
            Err(crate::error::RoofError::Geometry(GeometryError::DegenerateCycle(_)))
        ));
        let bow = Polygon::try_simple(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]);
        assert!(matches!(
            bow,
            Err(crate::error::RoofError::Geometry(GeometryError::NonSimplePolygon(_)))
        ));
    }
}
