use std::f64::consts::FRAC_PI_2;

use crate::math::transform_2d::Transform2;
use crate::math::{approx_eq, points_approx_eq, Point2, Vector2};
use crate::project::{Line, LineRole};

/// Orients a slope without eaves by a gable that meets a valley.
///
/// The first gable sharing an endpoint with any valley is the main line and
/// the shared endpoint is the anchor. If the anchor holds the largest X or Y
/// of the slope, the slope is mirrored on that axis so the anchor becomes the
/// lower-left corner. A vertical gable is then turned a quarter turn.
pub fn align_to_gable(lines: &[Line]) -> Option<Transform2> {
    let valleys: Vec<&Line> = lines.iter().filter(|l| l.role == LineRole::Valley).collect();
    let (gable, anchor) = lines
        .iter()
        .filter(|l| l.role == LineRole::Gable)
        .find_map(|gable| {
            let (a, b) = gable.projection.endpoints();
            [a, b]
                .into_iter()
                .find(|p| valleys.iter().any(|v| touches(&v.projection.endpoints(), p)))
                .map(|anchor| (gable, anchor))
        })?;

    let (x_max, y_max) = maxima(lines);
    let right = approx_eq(anchor.x, x_max);
    let up = approx_eq(anchor.y, y_max);

    let mut transform = Transform2::translation(&Vector2::new(-anchor.x, -anchor.y));
    if right {
        transform = transform.then(&Transform2::mirror_y());
    }
    if up {
        transform = transform.then(&Transform2::mirror_x());
    }
    if gable.projection.is_vertical() {
        transform = transform.then(&Transform2::rotation_about(&Point2::origin(), FRAC_PI_2));
    }
    Some(transform)
}

/// Orients a slope by an axis-aligned ridge.
///
/// The anchor is the ridge endpoint with the larger coordinate along the
/// ridge. The ridge is turned horizontal, then the slope is mirrored so the
/// ridge runs along +X from the anchor and the rest lies above it.
pub fn align_to_ridge(lines: &[Line]) -> Option<Transform2> {
    let ridge = lines.iter().find(|l| {
        l.role == LineRole::Ridge
            && l.length() > crate::math::TOLERANCE
            && (l.projection.is_horizontal() || l.projection.is_vertical())
    })?;
    let (a, b) = ridge.projection.endpoints();
    let vertical = ridge.projection.is_vertical();
    let anchor = if vertical {
        if a.y >= b.y {
            a
        } else {
            b
        }
    } else if a.x >= b.x {
        a
    } else {
        b
    };

    let mut transform = Transform2::translation(&Vector2::new(-anchor.x, -anchor.y));
    if vertical {
        transform = transform.then(&Transform2::rotation_about(&Point2::origin(), -FRAC_PI_2));
    }
    // The ridge now runs from the anchor towards -X.
    transform = transform.then(&Transform2::mirror_y());

    let far_y = lines
        .iter()
        .flat_map(|l| [l.projection.start, l.projection.end])
        .map(|p| transform.apply(&p).y)
        .fold(0.0_f64, |acc, y| if y.abs() > acc.abs() { y } else { acc });
    if far_y < 0.0 {
        transform = transform.then(&Transform2::mirror_x());
    }
    Some(transform)
}

fn touches(segment: &(Point2, Point2), point: &Point2) -> bool {
    points_approx_eq(&segment.0, point) || points_approx_eq(&segment.1, point)
}

fn maxima(lines: &[Line]) -> (f64, f64) {
    lines
        .iter()
        .flat_map(|l| [l.projection.start, l.projection.end])
        .fold((f64::NEG_INFINITY, f64::NEG_INFINITY), |(x, y), p| {
            (x.max(p.x), y.max(p.y))
        })
}
