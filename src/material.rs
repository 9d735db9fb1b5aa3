use serde::{Deserialize, Serialize};

use crate::error::{MaterialError, Result};

/// Manufacturer parameters of a metal roofing sheet.
///
/// All lengths share the unit of the drawing (usually metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofMaterial {
    /// Physical sheet width.
    pub overall_width: f64,
    /// Width left visible once adjacent sheets overlap.
    pub useful_width: f64,
    /// Required vertical overlap between stacked sheets.
    pub overlap: f64,
    /// Shortest sheet the manufacturer cuts.
    pub min_length: f64,
    /// Longest sheet the manufacturer cuts.
    pub max_length: f64,
}

impl RoofMaterial {
    /// Creates a validated material.
    ///
    /// # Errors
    ///
    /// Returns `MaterialError::InvalidRoofParameters` if the parameters break
    /// any of the invariants checked by [`RoofMaterial::validate`].
    pub fn new(
        overall_width: f64,
        useful_width: f64,
        overlap: f64,
        min_length: f64,
        max_length: f64,
    ) -> Result<Self> {
        let material = Self {
            overall_width,
            useful_width,
            overlap,
            min_length,
            max_length,
        };
        material.validate()?;
        Ok(material)
    }

    /// Horizontal overlap between adjacent sheets.
    #[must_use]
    pub fn horizontal_overlap(&self) -> f64 {
        self.overall_width - self.useful_width
    }

    /// Checks `0 < useful_width <= overall_width` and
    /// `0 <= overlap < min_length <= max_length`.
    ///
    /// # Errors
    ///
    /// Returns `MaterialError::InvalidRoofParameters` naming the first
    /// violated invariant.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.overall_width,
            self.useful_width,
            self.overlap,
            self.min_length,
            self.max_length,
        ];
        let fail = |msg: String| -> Result<()> {
            Err(MaterialError::InvalidRoofParameters(msg).into())
        };
        if values.iter().any(|v| !v.is_finite()) {
            return fail("parameters must be finite".to_owned());
        }
        if self.overall_width <= 0.0 {
            return fail(format!("overall width {} must be positive", self.overall_width));
        }
        if self.useful_width <= 0.0 || self.useful_width > self.overall_width {
            return fail(format!(
                "useful width {} must be in (0, {}]",
                self.useful_width, self.overall_width
            ));
        }
        if self.overlap < 0.0 {
            return fail(format!("overlap {} must not be negative", self.overlap));
        }
        if self.max_length < self.min_length {
            return fail(format!(
                "max length {} is below min length {}",
                self.max_length, self.min_length
            ));
        }
        if self.overlap >= self.min_length {
            return fail(format!(
                "overlap {} must be below min length {}",
                self.overlap, self.min_length
            ));
        }
        Ok(())
    }
}
