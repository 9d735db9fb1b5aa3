use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() < 1e-12 {
        return None;
    }
    let dp = p2 - p1;
    let t = dp.perp(d2) / cross;
    let u = dp.perp(d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Parallel and collinear segments report no intersection.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Parameter slack scaled so endpoints within TOLERANCE count as touching.
    let eps_a = TOLERANCE / da.norm().max(TOLERANCE);
    let eps_b = TOLERANCE / db.norm().max(TOLERANCE);
    if t >= -eps_a && t <= 1.0 + eps_a && u >= -eps_b && u <= 1.0 + eps_b {
        let t = t.clamp(0.0, 1.0);
        Some((a0 + da * t, t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Returns `true` if the segments cross at a single point interior to both.
///
/// Touching at an endpoint, or overlapping collinearly, is not a proper
/// crossing.
#[must_use]
pub fn segments_cross_properly(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let Some((_, t, u)) = segment_segment_intersect_2d(a0, a1, b0, b1) else {
        return false;
    };
    let eps_a = TOLERANCE / (a1 - a0).norm().max(TOLERANCE);
    let eps_b = TOLERANCE / (b1 - b0).norm().max(TOLERANCE);
    t > eps_a && t < 1.0 - eps_a && u > eps_b && u < 1.0 - eps_b
}

/// Returns `true` if the two segments share a collinear overlap of positive
/// length.
#[must_use]
pub fn segments_overlap_collinear(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let da = a1 - a0;
    let len = da.norm();
    if len < TOLERANCE {
        return false;
    }
    let dir = da / len;
    let off0 = dir.perp(&(b0 - a0));
    let off1 = dir.perp(&(b1 - a0));
    if off0.abs() > TOLERANCE || off1.abs() > TOLERANCE {
        return false;
    }
    let s0 = dir.dot(&(b0 - a0));
    let s1 = dir.dot(&(b1 - a0));
    let lo = s0.min(s1).max(0.0);
    let hi = s0.max(s1).min(len);
    hi - lo > TOLERANCE
}
