use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::transform_2d::Transform2;
use crate::math::{approx_eq, points_approx_eq, Point2, TOLERANCE};

/// A straight line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    /// Creates a new segment.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Creates a segment, rejecting zero-length input.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroLength` if both endpoints coincide.
    pub fn try_new(start: Point2, end: Point2) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::ZeroLength {
                x: start.x,
                y: start.y,
            }
            .into());
        }
        Ok(Self { start, end })
    }

    /// Returns both endpoints as `(start, end)`.
    #[must_use]
    pub fn endpoints(&self) -> (Point2, Point2) {
        (self.start, self.end)
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns `true` if both endpoints share a y coordinate.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        approx_eq(self.start.y, self.end.y)
    }

    /// Returns `true` if both endpoints share an x coordinate.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        approx_eq(self.start.x, self.end.x)
    }

    /// Returns the endpoints of this segment that coincide with an endpoint
    /// of `other`, up to [`TOLERANCE`].
    #[must_use]
    pub fn shared_endpoints(&self, other: &Segment) -> Vec<Point2> {
        [self.start, self.end]
            .into_iter()
            .filter(|p| points_approx_eq(p, &other.start) || points_approx_eq(p, &other.end))
            .collect()
    }

    /// Returns the segment with both endpoints mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Transform2) -> Self {
        Self {
            start: transform.apply(&self.start),
            end: transform.apply(&self.end),
        }
    }
}
