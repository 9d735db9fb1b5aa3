mod eave;
mod fallback;

use tracing::debug;

use crate::error::{Result, SlopeError};
use crate::geometry::Segment;
use crate::math::transform_2d::Transform2;
use crate::math::{Point2, Vector2};
use crate::project::Line;

pub use eave::main_eave;

/// Canonical coordinates closer to zero than this are snapped to zero.
const SNAP: f64 = 1e-9;

/// Which rule oriented a slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationCase {
    /// Aligned by its main eave.
    Eave,
    /// Aligned by its main eave, but the slope reaches both sides of the
    /// eave's line; points below the X axis are reflected onto it.
    FoldedEave,
    /// No eave; aligned by a gable that meets a valley.
    GableOnValley,
    /// No eave and no valley-anchored gable; aligned by an axis-aligned ridge.
    Ridge,
}

/// Moves a slope into its canonical pose: the eave on the X axis starting at
/// or right of the origin, the whole slope in the first quadrant, sheets laid
/// towards +Y.
#[derive(Debug)]
pub struct Canonicalize<'a> {
    lines: &'a [Line],
}

impl<'a> Canonicalize<'a> {
    /// Creates a new `Canonicalize` operation over the lines of one slope.
    #[must_use]
    pub fn new(lines: &'a [Line]) -> Self {
        Self { lines }
    }

    /// Returns the rule that applies and the rigid motion it produces.
    ///
    /// The fold of [`OrientationCase::FoldedEave`] and the final shift into
    /// the first quadrant are applied by [`Canonicalize::execute`].
    ///
    /// # Errors
    ///
    /// Returns `SlopeError::EaveMissing` if the slope has no eave, no gable
    /// meeting a valley, and no axis-aligned ridge.
    pub fn orientation(&self) -> Result<(OrientationCase, Transform2)> {
        if let Some(aligned) = eave::align_to_eave(self.lines) {
            let case = if aligned.fold {
                OrientationCase::FoldedEave
            } else {
                OrientationCase::Eave
            };
            Ok((case, aligned.transform))
        } else if let Some(t) = fallback::align_to_gable(self.lines) {
            Ok((OrientationCase::GableOnValley, t))
        } else if let Some(t) = fallback::align_to_ridge(self.lines) {
            Ok((OrientationCase::Ridge, t))
        } else {
            Err(SlopeError::EaveMissing.into())
        }
    }

    /// Executes the operation, returning copies of the lines with their
    /// canonical segments filled in.
    ///
    /// # Errors
    ///
    /// Returns `SlopeError::EaveMissing` if no orientation rule applies.
    pub fn execute(&self) -> Result<Vec<Line>> {
        let (case, transform) = self.orientation()?;
        let fold = case == OrientationCase::FoldedEave;
        let place = |p: &Point2| {
            let q = transform.apply(p);
            if fold {
                Point2::new(q.x, q.y.abs())
            } else {
                q
            }
        };

        let placed: Vec<(Point2, Point2)> = self
            .lines
            .iter()
            .map(|l| (place(&l.projection.start), place(&l.projection.end)))
            .collect();
        let (x_min, y_min) = placed
            .iter()
            .flat_map(|&(s, e)| [s, e])
            .fold((f64::INFINITY, f64::INFINITY), |(x, y), p| {
                (x.min(p.x), y.min(p.y))
            });
        let shift = Vector2::new(-x_min, -y_min);

        debug!(?case, lines = self.lines.len(), "canonicalized slope");
        Ok(self
            .lines
            .iter()
            .zip(placed)
            .map(|(line, (start, end))| Line {
                canonical: Some(Segment::new(snap(start + shift), snap(end + shift))),
                ..line.clone()
            })
            .collect())
    }
}

fn snap(p: Point2) -> Point2 {
    let s = |v: f64| if v.abs() < SNAP { 0.0 } else { v };
    Point2::new(s(p.x), s(p.y))
}

/// Returns the lines of one slope with canonical coordinates populated.
///
/// # Errors
///
/// Returns `SlopeError::EaveMissing` if no orientation rule applies.
pub fn canonicalize(lines: &[Line]) -> Result<Vec<Line>> {
    Canonicalize::new(lines).execute()
}
