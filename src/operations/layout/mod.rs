mod cutout;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::geometry::{Bounds, Polygon};
use crate::material::RoofMaterial;
use crate::math::round_to;

/// Parameters controlling how sheets are reported.
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    /// Decimal places kept on emitted sheet attributes.
    pub decimals: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

/// One rectangular sheet of the cut list, in the slope's canonical frame.
///
/// The sheet is `overall_width` wide and spans `[y_start, y_start + length]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub x_start: f64,
    pub y_start: f64,
    pub length: f64,
    pub area: f64,
}

/// Tiles a canonical slope with rectangular sheets.
///
/// Sheets are laid column by column from the left edge of the slope. Each
/// column is `overall_width` wide and overlaps the previous one by the
/// material's horizontal overlap; within a column sheets are at most
/// `max_length` long and overlap vertically by `overlap`. Pieces shorter than
/// the vertical overlap or narrower than the horizontal overlap are skipped,
/// and short pieces are extended to `min_length`.
#[derive(Debug)]
pub struct SheetLayout<'a> {
    polygon: &'a Polygon,
    material: RoofMaterial,
    cutout: Option<&'a Polygon>,
    params: LayoutParams,
}

impl<'a> SheetLayout<'a> {
    /// Creates a new layout operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon, material: RoofMaterial) -> Self {
        Self {
            polygon,
            material,
            cutout: None,
            params: LayoutParams::default(),
        }
    }

    /// Removes `cutout` (chimney, skylight) from the area to cover.
    #[must_use]
    pub fn with_cutout(mut self, cutout: &'a Polygon) -> Self {
        self.cutout = Some(cutout);
        self
    }

    /// Sets custom reporting parameters.
    #[must_use]
    pub fn with_params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the layout, returning sheets in column-major order.
    ///
    /// # Errors
    ///
    /// Returns `MaterialError::InvalidRoofParameters` if the material breaks
    /// its invariants.
    pub fn execute(&self) -> Result<Vec<Sheet>> {
        self.material.validate()?;
        let mut sheets = Vec::new();
        if self.polygon.points().len() < 3 {
            return Ok(sheets);
        }
        let Some(bounds) = self.polygon.bounds() else {
            return Ok(sheets);
        };

        let width = self.material.overall_width;
        let side_overlap = self.material.horizontal_overlap();
        let max_len = self.material.max_length;
        let min_len = self.material.min_length;
        let overlap = self.material.overlap;
        let decimals = self.params.decimals;

        let mut x = bounds.x_min;
        while x < bounds.x_max {
            let x_ls = x;
            x += width;

            let mut y = bounds.y_min;
            while y < bounds.y_max {
                let y_ls = y;
                y += max_len;

                let window = Polygon::rectangle(x_ls, y_ls, x, y);
                let Some(covered) = self.covered_bounds(&window) else {
                    continue;
                };
                let (a, b, c, mut d) = covered.as_tuple();
                if d - b < overlap || c - a < side_overlap {
                    trace!(x = x_ls, y = y_ls, "skipping sliver");
                    continue;
                }
                if d - b < min_len {
                    d = b + min_len;
                }
                sheets.push(Sheet {
                    x_start: round_to(x_ls, decimals),
                    y_start: round_to(b, decimals),
                    length: round_to(d - b, decimals),
                    area: round_to(width * (d - b), decimals),
                });

                if y + min_len - overlap < bounds.y_max {
                    y -= overlap;
                }
            }

            if x < bounds.x_max {
                x -= side_overlap;
            }
        }

        debug!(sheets = sheets.len(), "laid sheets");
        Ok(sheets)
    }

    /// Bounds of the part of the slope inside `window`, or `None` if empty.
    fn covered_bounds(&self, window: &Polygon) -> Option<Bounds> {
        let piece = self.polygon.intersection(window);
        if piece.is_empty() {
            return None;
        }
        match self.cutout {
            Some(hole) => cutout::bounds_outside(&piece, hole),
            None => piece.bounds(),
        }
    }
}

/// Lays sheets over a canonical slope polygon.
///
/// # Errors
///
/// Returns `MaterialError::InvalidRoofParameters` if the material breaks its
/// invariants.
pub fn layout_sheets(polygon: &Polygon, material: &RoofMaterial) -> Result<Vec<Sheet>> {
    SheetLayout::new(polygon, *material).execute()
}
