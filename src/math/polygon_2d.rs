use super::distance_2d::point_to_segment_dist;
use super::intersect_2d::{segments_cross_properly, segments_overlap_collinear};
use super::{points_approx_eq, Point2, TOLERANCE};

/// Position of a point relative to a closed polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Inside,
    Boundary,
    Outside,
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `(x_min, y_min, x_max, y_max)` of a point set, or `None` if empty.
#[must_use]
pub fn bounds_2d(points: &[Point2]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    let mut b = (first.x, first.y, first.x, first.y);
    for pt in &points[1..] {
        b.0 = b.0.min(pt.x);
        b.1 = b.1.min(pt.y);
        b.2 = b.2.max(pt.x);
        b.3 = b.3.max(pt.y);
    }
    Some(b)
}

/// Locates `point` relative to the closed polygon `ring`.
///
/// Points within [`TOLERANCE`] of an edge are on the boundary; the rest are
/// classified by even-odd ray casting.
#[must_use]
pub fn locate_point(point: &Point2, ring: &[Point2]) -> Location {
    let n = ring.len();
    if n == 0 {
        return Location::Outside;
    }
    for i in 0..n {
        let a = &ring[i];
        let b = &ring[(i + 1) % n];
        if point_to_segment_dist(point, a, b) <= TOLERANCE {
            return Location::Boundary;
        }
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&ring[i], &ring[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = pj.x + (point.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    if inside {
        Location::Inside
    } else {
        Location::Outside
    }
}

/// Returns `true` if the closed ring does not touch or cross itself.
///
/// Consecutive edges may only share their common vertex; non-adjacent edges
/// may not meet at all.
#[must_use]
pub fn is_simple_ring(ring: &[Point2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if points_approx_eq(&ring[i], &ring[j]) {
                return false;
            }
        }
    }
    for i in 0..n {
        let (a0, a1) = (&ring[i], &ring[(i + 1) % n]);
        for j in (i + 1)..n {
            let (b0, b1) = (&ring[j], &ring[(j + 1) % n]);
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                if segments_overlap_collinear(a0, a1, b0, b1) {
                    return false;
                }
                continue;
            }
            if segments_cross_properly(a0, a1, b0, b1)
                || segments_overlap_collinear(a0, a1, b0, b1)
                || point_to_segment_dist(b0, a0, a1) <= TOLERANCE
                || point_to_segment_dist(b1, a0, a1) <= TOLERANCE
                || point_to_segment_dist(a0, b0, b1) <= TOLERANCE
                || point_to_segment_dist(a1, b0, b1) <= TOLERANCE
            {
                return false;
            }
        }
    }
    true
}

/// Returns `true` if the ring is simple and every corner turns the same
/// way. Collinear corners are allowed.
#[must_use]
pub fn is_convex_ring(ring: &[Point2]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let (mut left, mut right) = (false, false);
    for i in 0..n {
        let (a, b, c) = (ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
        let turn = (b - a).perp(&(c - b));
        left |= turn > TOLERANCE;
        right |= turn < -TOLERANCE;
    }
    !(left && right) && is_simple_ring(ring)
}

/// Returns `true` if the two rings list the same vertices in the same cyclic
/// order, in either direction, up to [`TOLERANCE`].
#[must_use]
pub fn rings_equal_cyclic(a: &[Point2], b: &[Point2]) -> bool {
    let n = a.len();
    if n != b.len() {
        return false;
    }
    if n == 0 {
        return true;
    }
    let reversed: Vec<Point2> = b.iter().rev().copied().collect();
    (0..n).any(|shift| {
        let forward = (0..n).all(|i| points_approx_eq(&a[i], &b[(i + shift) % n]));
        forward || (0..n).all(|i| points_approx_eq(&a[i], &reversed[(i + shift) % n]))
    })
}
