use crate::math::distance_2d::signed_line_dist;
use crate::math::transform_2d::Transform2;
use crate::math::{Point2, Vector2, TOLERANCE};
use crate::project::{Line, LineRole};

/// How a slope is brought onto its eave.
#[derive(Debug, Clone, Copy)]
pub struct EaveAlignment {
    /// Rigid motion putting the main eave on +X from the origin.
    pub transform: Transform2,
    /// The slope reaches both sides of the eave's line, so points left below
    /// the X axis must be reflected onto it.
    pub fold: bool,
}

/// Picks the eave the slope is oriented by.
///
/// Eaves whose line leaves the whole slope on one side come first; among
/// them, or among all eaves if there is none, the longest wins and earlier
/// lines win ties.
pub fn main_eave(lines: &[Line]) -> Option<&Line> {
    let eaves = || {
        lines
            .iter()
            .filter(|l| l.role == LineRole::Eave && l.length() > TOLERANCE)
    };
    longest(eaves().filter(|e| !straddles(e, lines))).or_else(|| longest(eaves()))
}

fn longest<'a>(candidates: impl Iterator<Item = &'a Line>) -> Option<&'a Line> {
    candidates.fold(None, |best: Option<&Line>, line| match best {
        Some(b) if line.length() <= b.length() + TOLERANCE => Some(b),
        _ => Some(line),
    })
}

/// Aligns the main eave with the positive X axis.
///
/// The eave start moves to the origin and the eave is rotated by
/// `-atan2(dy, dx)`. If the vertex farthest from the eave then lies below the
/// axis, the whole slope is mirrored across it.
pub fn align_to_eave(lines: &[Line]) -> Option<EaveAlignment> {
    let eave = main_eave(lines)?;
    let transform = onto_x_axis(eave);

    let far_y = lines
        .iter()
        .flat_map(|l| [l.projection.start, l.projection.end])
        .map(|p| transform.apply(&p).y)
        .fold(0.0_f64, |acc, y| if y.abs() > acc.abs() { y } else { acc });

    let transform = if far_y < 0.0 {
        transform.then(&Transform2::mirror_x())
    } else {
        transform
    };
    Some(EaveAlignment {
        transform,
        fold: straddles(eave, lines),
    })
}

fn onto_x_axis(eave: &Line) -> Transform2 {
    let (start, end) = eave.projection.endpoints();
    let d = end - start;
    Transform2::translation(&Vector2::new(-start.x, -start.y))
        .then(&Transform2::rotation_about(&Point2::origin(), -d.y.atan2(d.x)))
}

/// Returns `true` if the slope has endpoints strictly on both sides of the
/// line through `eave`.
fn straddles(eave: &Line, lines: &[Line]) -> bool {
    let (a, b) = eave.projection.endpoints();
    let (mut below, mut above) = (false, false);
    for p in lines.iter().flat_map(|l| [l.projection.start, l.projection.end]) {
        let d = signed_line_dist(&p, &a, &b);
        below |= d < -TOLERANCE;
        above |= d > TOLERANCE;
    }
    below && above
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use crate::project::LineId;
    use approx::assert_abs_diff_eq;
    use slotmap::SlotMap;

    fn lines(spec: &[(LineRole, f64, f64, f64, f64)]) -> Vec<Line> {
        let mut ids: SlotMap<LineId, ()> = SlotMap::with_key();
        spec.iter()
            .map(|&(role, x0, y0, x1, y1)| {
                Line::new(
                    ids.insert(()),
                    role,
                    Segment::new(Point2::new(x0, y0), Point2::new(x1, y1)),
                )
            })
            .collect()
    }

    #[test]
    fn longest_eave_wins() {
        let ls = lines(&[
            (LineRole::Eave, 0.0, 0.0, 3.0, 0.0),
            (LineRole::Gable, 3.0, 0.0, 3.0, 5.0),
            (LineRole::Eave, 3.0, 5.0, 0.0, 0.0),
        ]);
        assert_eq!(main_eave(&ls).unwrap().id, ls[2].id);
    }

    #[test]
    fn equal_eaves_keep_first() {
        let ls = lines(&[
            (LineRole::Eave, 0.0, 0.0, 4.0, 0.0),
            (LineRole::Eave, 4.0, 0.0, 4.0, 4.0),
        ]);
        assert_eq!(main_eave(&ls).unwrap().id, ls[0].id);
    }

    #[test]
    fn vertical_eave_rotates_onto_x_axis() {
        let ls = lines(&[
            (LineRole::Eave, 10.0, 0.0, 10.0, 4.0),
            (LineRole::Gable, 10.0, 4.0, 7.0, 4.0),
            (LineRole::Ridge, 7.0, 4.0, 7.0, 0.0),
            (LineRole::Gable, 7.0, 0.0, 10.0, 0.0),
        ]);
        let t = align_to_eave(&ls).unwrap().transform;
        let s = t.apply(&Point2::new(10.0, 0.0));
        let e = t.apply(&Point2::new(10.0, 4.0));
        assert_abs_diff_eq!(s.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(e.x, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(e.y, 0.0, epsilon = 1e-9);
        // The ridge ends up above the eave.
        let r = t.apply(&Point2::new(7.0, 4.0));
        assert_abs_diff_eq!(r.y, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn slope_below_eave_is_mirrored() {
        let ls = lines(&[
            (LineRole::Eave, 0.0, 5.0, 6.0, 5.0),
            (LineRole::Gable, 6.0, 5.0, 3.0, 1.0),
            (LineRole::Gable, 3.0, 1.0, 0.0, 5.0),
        ]);
        let t = align_to_eave(&ls).unwrap().transform;
        let apex = t.apply(&Point2::new(3.0, 1.0));
        assert_abs_diff_eq!(apex.y, 4.0, epsilon = 1e-9);
        let end = t.apply(&Point2::new(6.0, 5.0));
        assert_abs_diff_eq!(end.x, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn eave_with_slope_on_one_side_is_preferred() {
        // The longer eave has the slope on both sides of its line.
        let ls = lines(&[
            (LineRole::Eave, 0.0, 0.0, 6.0, 0.0),
            (LineRole::Gable, 6.0, 0.0, 6.0, 5.0),
            (LineRole::Eave, 6.0, 5.0, 1.0, 1.0),
            (LineRole::Gable, 1.0, 1.0, 0.0, 5.0),
            (LineRole::Gable, 0.0, 5.0, 0.0, 0.0),
        ]);
        assert!(ls[2].length() > ls[0].length());
        let main = main_eave(&ls).unwrap();
        assert_eq!(main.id, ls[0].id);
        assert!(!align_to_eave(&ls).unwrap().fold);
    }

    #[test]
    fn straddled_eave_is_folded() {
        let ls = lines(&[
            (LineRole::Eave, 0.0, 0.0, 4.0, 0.0),
            (LineRole::Gable, 4.0, 0.0, 6.0, -2.0),
            (LineRole::Gable, 6.0, -2.0, 6.0, 5.0),
            (LineRole::Ridge, 6.0, 5.0, 0.0, 5.0),
            (LineRole::Gable, 0.0, 5.0, 0.0, 0.0),
        ]);
        let aligned = align_to_eave(&ls).unwrap();
        assert!(aligned.fold);
        let ridge = aligned.transform.apply(&Point2::new(6.0, 5.0));
        assert_abs_diff_eq!(ridge.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn no_eave() {
        let ls = lines(&[(LineRole::Gable, 0.0, 0.0, 1.0, 0.0)]);
        assert!(align_to_eave(&ls).is_none());
    }
}
