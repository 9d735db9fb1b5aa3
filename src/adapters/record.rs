use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::{Key, KeyData};

use crate::error::{PayloadError, Result, RoofError};
use crate::geometry::Segment;
use crate::material::RoofMaterial;
use crate::math::Point2;
use crate::project::{LineId, LineRole, PlacedSheet, Project, SheetId, SlopeId};

/// A point as stored in records: `{"x": .., "y": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
}

impl PointRecord {
    /// Converts into an engine point.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::NonFinite` naming `context` if a coordinate is
    /// NaN or infinite.
    pub fn to_point(self, context: &'static str) -> Result<Point2> {
        if self.x.is_finite() && self.y.is_finite() {
            Ok(Point2::new(self.x, self.y))
        } else {
            Err(PayloadError::NonFinite(context).into())
        }
    }
}

impl From<Point2> for PointRecord {
    fn from(p: Point2) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Persisted form of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: u64,
    pub name: String,
    pub role: LineRole,
    pub start: PointRecord,
    pub end: PointRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_start: Option<PointRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_end: Option<PointRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slope_id: Option<u64>,
}

/// Persisted form of a sheet: `(id, name, x_start, length, area, slope_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRecord {
    pub id: u64,
    pub name: String,
    pub x_start: f64,
    pub length: f64,
    pub area: f64,
    pub slope_id: u64,
}

impl SheetRecord {
    #[must_use]
    pub fn new(id: SheetId, placed: &PlacedSheet) -> Self {
        Self {
            id: id.data().as_ffi(),
            name: placed.name.clone(),
            x_start: placed.sheet.x_start,
            length: placed.sheet.length,
            area: placed.sheet.area,
            slope_id: placed.slope.data().as_ffi(),
        }
    }
}

/// A catalog entry for a roof material.
///
/// Only the fields the layout consumes are read; anything else the catalog
/// stores (price, color, thickness) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofMaterialRecord {
    pub overall_width: f64,
    pub useful_width: f64,
    pub overlap: f64,
    pub min_length: f64,
    pub max_length: f64,
}

impl TryFrom<RoofMaterialRecord> for RoofMaterial {
    type Error = RoofError;

    fn try_from(record: RoofMaterialRecord) -> Result<Self> {
        RoofMaterial::new(
            record.overall_width,
            record.useful_width,
            record.overlap,
            record.min_length,
            record.max_length,
        )
    }
}

impl From<RoofMaterial> for RoofMaterialRecord {
    fn from(m: RoofMaterial) -> Self {
        Self {
            overall_width: m.overall_width,
            useful_width: m.useful_width,
            overlap: m.overlap,
            min_length: m.min_length,
            max_length: m.max_length,
        }
    }
}

/// Everything a caller persists for one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub lines: Vec<LineRecord>,
    #[serde(default)]
    pub sheets: Vec<SheetRecord>,
}

impl ProjectRecord {
    /// Serialize to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(PayloadError::from)?)
    }

    /// Deserialize from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::Json` if the text is not a valid record.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(PayloadError::from)?)
    }
}

/// Exports the lines and sheets of a project.
#[must_use]
pub fn export_project(project: &Project) -> ProjectRecord {
    let lines = project
        .lines()
        .map(|line| LineRecord {
            id: line.id.data().as_ffi(),
            name: line.name.clone(),
            role: line.role,
            start: line.projection.start.into(),
            end: line.projection.end.into(),
            canonical_start: line.canonical.map(|c| c.start.into()),
            canonical_end: line.canonical.map(|c| c.end.into()),
            slope_id: line.slope.map(|s: SlopeId| s.data().as_ffi()),
        })
        .collect();
    let sheets = project
        .sheets()
        .map(|(id, placed)| SheetRecord::new(id, placed))
        .collect();
    ProjectRecord { lines, sheets }
}

/// Loads persisted lines into a project, keeping their names.
///
/// Returns the mapping from record ids to the new line ids. Canonical
/// coordinates and slope owners are not restored; they are recomputed by
/// [`Project::rebuild_slopes`].
///
/// # Errors
///
/// Returns `PayloadError::NonFinite` for a non-finite coordinate or
/// `GeometryError::ZeroLength` for a line with coincident endpoints. Every
/// record is checked before any line is added.
pub fn import_lines(project: &mut Project, records: &[LineRecord]) -> Result<HashMap<u64, LineId>> {
    let segments = records
        .iter()
        .map(|record| -> Result<Segment> {
            Segment::try_new(record.start.to_point("line")?, record.end.to_point("line")?)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut ids = HashMap::with_capacity(records.len());
    for (record, segment) in records.iter().zip(segments) {
        let id = project.insert_line(Some(record.name.clone()), record.role, segment)?;
        ids.insert(record.id, id);
    }
    Ok(ids)
}

/// Reverses `Key::data().as_ffi()` for callers that persist raw ids.
#[must_use]
pub fn line_id_from_ffi(raw: u64) -> LineId {
    KeyData::from_ffi(raw).into()
}
