use nalgebra::Matrix3;

use super::{Point2, Vector2, TOLERANCE};

/// A planar affine transform in homogeneous coordinates.
///
/// Transforms compose left to right with [`Transform2::then`]: `a.then(b)`
/// applies `a` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    matrix: Matrix3<f64>,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2 {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Translation by `offset`.
    #[must_use]
    pub fn translation(offset: &Vector2) -> Self {
        Self {
            matrix: Matrix3::new_translation(offset),
        }
    }

    /// Counter-clockwise rotation by `angle` radians about `origin`.
    #[must_use]
    pub fn rotation_about(origin: &Point2, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let rot = Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0);
        let t_neg = Matrix3::new_translation(&(-origin.coords));
        let t_pos = Matrix3::new_translation(&origin.coords);
        Self {
            matrix: t_pos * rot * t_neg,
        }
    }

    /// Reflection across the line through `a` and `b`.
    ///
    /// A degenerate line (coincident points) yields a point reflection
    /// through `a`.
    #[must_use]
    pub fn reflection_across(a: &Point2, b: &Point2) -> Self {
        let d = b - a;
        let len = d.norm();
        let reflect = if len < TOLERANCE {
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0)
        } else {
            let (ux, uy) = (d.x / len, d.y / len);
            Matrix3::new(
                2.0 * ux * ux - 1.0,
                2.0 * ux * uy,
                0.0,
                2.0 * ux * uy,
                2.0 * uy * uy - 1.0,
                0.0,
                0.0,
                0.0,
                1.0,
            )
        };
        let t_neg = Matrix3::new_translation(&(-a.coords));
        let t_pos = Matrix3::new_translation(&a.coords);
        Self {
            matrix: t_pos * reflect * t_neg,
        }
    }

    /// Reflection across the X axis (`y -> -y`).
    #[must_use]
    pub fn mirror_x() -> Self {
        Self::reflection_across(&Point2::origin(), &Point2::new(1.0, 0.0))
    }

    /// Reflection across the Y axis (`x -> -x`).
    #[must_use]
    pub fn mirror_y() -> Self {
        Self::reflection_across(&Point2::origin(), &Point2::new(0.0, 1.0))
    }

    /// Returns the transform that applies `self` and then `next`.
    #[must_use]
    pub fn then(&self, next: &Transform2) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn apply(&self, point: &Point2) -> Point2 {
        self.matrix.transform_point(point)
    }
}

/// Rotates `point` counter-clockwise by `angle` radians about `origin`.
#[must_use]
pub fn rotate_point(point: &Point2, origin: &Point2, angle: f64) -> Point2 {
    Transform2::rotation_about(origin, angle).apply(point)
}

/// Translates `point` by `offset`.
#[must_use]
pub fn translate_point(point: &Point2, offset: &Vector2) -> Point2 {
    point + offset
}

/// Reflects `point` across the line through `a` and `b`.
#[must_use]
pub fn reflect_point(point: &Point2, a: &Point2, b: &Point2) -> Point2 {
    Transform2::reflection_across(a, b).apply(point)
}
