pub mod line;
pub mod sheet;
pub mod slope;

pub use line::{Line, LineId, LineRole};
pub use sheet::{PlacedSheet, SheetId};
pub use slope::{slope_polygon, Slope, SlopeId};

use std::collections::HashSet;

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::error::{GeometryError, Result, RoofError, StoreError};
use crate::geometry::{Polygon, Segment};
use crate::material::RoofMaterial;
use crate::math::Point2;
use crate::operations::{canonicalize, next_name, SheetLayout, SlopeExtractor};

/// Totals of one slope's cut list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutListSummary {
    pub sheet_count: usize,
    /// Sum of the emitted sheet areas.
    pub sheet_area: f64,
    /// Area to cover: the canonical polygon minus its cutout.
    pub slope_area: f64,
    /// Sheet area exceeding the area to cover (overlaps and trimmed offcuts).
    pub waste: f64,
}

/// Caller-owned arena of the lines, slopes and sheets of one roof.
///
/// Lines are the user's input. Slopes and sheets are derived: any change to
/// the line set discards them until [`Project::rebuild_slopes`] and
/// [`Project::lay_sheets`] run again.
#[derive(Debug, Default)]
pub struct Project {
    lines: SlotMap<LineId, Line>,
    slopes: SlotMap<SlopeId, Slope>,
    sheets: SlotMap<SheetId, PlacedSheet>,
}

impl Project {
    /// Creates a new, empty project.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Line operations ---

    /// Draws a new line and names it with the next free name.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroLength` if `start` and `end` coincide.
    pub fn add_line(&mut self, role: LineRole, start: Point2, end: Point2) -> Result<LineId> {
        self.insert_line(None, role, Segment::try_new(start, end)?)
    }

    /// Inserts a line, keeping `name` when given and free.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroLength` if the segment has no length.
    pub fn insert_line(
        &mut self,
        name: Option<String>,
        role: LineRole,
        projection: Segment,
    ) -> Result<LineId> {
        let projection = Segment::try_new(projection.start, projection.end)?;
        let taken: HashSet<String> = self.lines.values().map(|l| l.name.clone()).collect();
        let name = match name {
            Some(name) if !name.is_empty() && !taken.contains(&name) => name,
            _ => next_name(&taken),
        };
        let id = self
            .lines
            .insert_with_key(|id| Line::new(id, role, projection).with_name(name));
        debug!(?id, %role, "added line");
        self.invalidate();
        Ok(id)
    }

    /// Replaces the role and endpoints of a line, returning its previous state.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the line does not exist, or
    /// `GeometryError::ZeroLength` if the new endpoints coincide.
    pub fn update_line(
        &mut self,
        id: LineId,
        role: LineRole,
        start: Point2,
        end: Point2,
    ) -> Result<Line> {
        let projection = Segment::try_new(start, end)?;
        let line = self.line_mut(id)?;
        let previous = line.clone();
        line.role = role;
        line.projection = projection;
        line.canonical = None;
        debug!(?id, %role, "updated line");
        self.invalidate();
        Ok(previous)
    }

    /// Removes a line and returns it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the line does not exist.
    pub fn remove_line(&mut self, id: LineId) -> Result<Line> {
        let line = self
            .lines
            .remove(id)
            .ok_or(StoreError::EntityNotFound("line"))?;
        debug!(?id, "removed line");
        self.invalidate();
        Ok(line)
    }

    /// Returns a line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the line does not exist.
    pub fn line(&self, id: LineId) -> Result<&Line> {
        Ok(self
            .lines
            .get(id)
            .ok_or(StoreError::EntityNotFound("line"))?)
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut Line> {
        Ok(self
            .lines
            .get_mut(id)
            .ok_or(StoreError::EntityNotFound("line"))?)
    }

    /// Iterates over all lines.
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.values()
    }

    /// Number of lines in the project.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    // --- Slope operations ---

    /// Recomputes the slopes from the current lines.
    ///
    /// Every slope is extracted and canonicalized before the store changes,
    /// so a failure leaves the project as it was. Each line takes the
    /// canonical coordinates and owner of the first slope it belongs to.
    ///
    /// # Errors
    ///
    /// Returns `SlopeError::EaveMissing` if a slope cannot be oriented, or a
    /// `GeometryError` if its canonical boundary is not a simple polygon.
    pub fn rebuild_slopes(&mut self) -> Result<Vec<SlopeId>> {
        // Step 1: Extract faces from a snapshot of the lines.
        let snapshot: Vec<Line> = self.lines.values().cloned().collect();
        let extracted = SlopeExtractor::new(&snapshot).execute();

        // Step 2: Canonicalize every face.
        let mut built = Vec::with_capacity(extracted.len());
        for face in extracted {
            let ordered = face
                .lines
                .iter()
                .map(|&id| self.line(id).cloned())
                .collect::<Result<Vec<Line>>>()?;
            let canonical_lines = canonicalize(&ordered)?;
            let segments: Vec<Segment> = canonical_lines
                .iter()
                .filter_map(|l| l.canonical)
                .collect();
            let polygon = slope_polygon(&segments)?;
            built.push((canonical_lines, polygon));
        }

        // Step 3: Commit.
        self.slopes.clear();
        self.sheets.clear();
        for line in self.lines.values_mut() {
            line.canonical = None;
            line.slope = None;
        }
        let mut names = HashSet::new();
        let mut ids = Vec::with_capacity(built.len());
        for (canonical_lines, polygon) in built {
            let name = next_name(&names);
            names.insert(name.clone());
            let slope_id = self.slopes.insert(Slope {
                name,
                lines: canonical_lines.iter().map(|l| l.id).collect(),
                canonical: polygon,
                cutout: None,
                sheets: Vec::new(),
            });
            for canonical_line in canonical_lines {
                if let Some(line) = self.lines.get_mut(canonical_line.id) {
                    if line.canonical.is_none() {
                        line.canonical = canonical_line.canonical;
                        line.slope = Some(slope_id);
                    }
                }
            }
            ids.push(slope_id);
        }
        debug!(slopes = ids.len(), "rebuilt slopes");
        Ok(ids)
    }

    /// Returns a slope.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the slope does not exist.
    pub fn slope(&self, id: SlopeId) -> Result<&Slope> {
        Ok(self
            .slopes
            .get(id)
            .ok_or(StoreError::EntityNotFound("slope"))?)
    }

    /// Iterates over all slopes with their ids.
    pub fn slopes(&self) -> impl Iterator<Item = (SlopeId, &Slope)> + '_ {
        self.slopes.iter()
    }

    /// Returns the boundary lines of a slope in walking order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the slope or one of its lines
    /// does not exist.
    pub fn slope_lines(&self, id: SlopeId) -> Result<Vec<&Line>> {
        self.slope(id)?
            .lines
            .iter()
            .map(|&line| self.line(line))
            .collect()
    }

    /// Sets or clears the cutout of a slope. Its sheets are discarded.
    ///
    /// The cutout must be convex, since [`Project::cut_list_summary`] clips
    /// the slope with it as a convex window.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the slope does not exist, or
    /// `GeometryError::NonConvexCutout` if the cutout is not a convex
    /// polygon. A rejected cutout leaves the slope unchanged.
    pub fn set_cutout(&mut self, id: SlopeId, cutout: Option<Polygon>) -> Result<()> {
        if let Some(hole) = cutout.as_ref().filter(|hole| !hole.is_convex()) {
            return Err(GeometryError::NonConvexCutout(format!(
                "{} vertices",
                hole.points().len()
            ))
            .into());
        }
        let slope = self
            .slopes
            .get_mut(id)
            .ok_or(StoreError::EntityNotFound("slope"))?;
        slope.cutout = cutout;
        for sheet in std::mem::take(&mut slope.sheets) {
            self.sheets.remove(sheet);
        }
        Ok(())
    }

    // --- Sheet operations ---

    /// Lays sheets over a slope, replacing any it already had.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the slope does not exist, or
    /// `MaterialError::InvalidRoofParameters` for a bad material.
    pub fn lay_sheets(&mut self, id: SlopeId, material: &RoofMaterial) -> Result<Vec<SheetId>> {
        let slope = self.slope(id)?;
        let mut layout = SheetLayout::new(&slope.canonical, *material);
        if let Some(cutout) = &slope.cutout {
            layout = layout.with_cutout(cutout);
        }
        let laid = layout.execute()?;
        if laid.is_empty() {
            warn!(slope = %slope.name, "slope too small for any sheet");
        }

        let stale = std::mem::take(&mut self.slope_mut(id)?.sheets);
        for sheet in stale {
            self.sheets.remove(sheet);
        }
        let mut names: HashSet<String> = self.sheets.values().map(|s| s.name.clone()).collect();
        let mut ids = Vec::with_capacity(laid.len());
        for sheet in laid {
            let name = next_name(&names);
            names.insert(name.clone());
            ids.push(self.sheets.insert(PlacedSheet {
                name,
                slope: id,
                sheet,
            }));
        }
        self.slope_mut(id)?.sheets.clone_from(&ids);
        debug!(?id, sheets = ids.len(), "laid sheets on slope");
        Ok(ids)
    }

    /// Returns the sheets of a slope in layout order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the slope does not exist.
    pub fn sheets_of(&self, id: SlopeId) -> Result<Vec<(SheetId, &PlacedSheet)>> {
        self.slope(id)?
            .sheets
            .iter()
            .map(|&sheet| {
                self.sheets
                    .get(sheet)
                    .map(|placed| (sheet, placed))
                    .ok_or_else(|| RoofError::from(StoreError::EntityNotFound("sheet")))
            })
            .collect()
    }

    /// Iterates over every sheet of the project.
    pub fn sheets(&self) -> impl Iterator<Item = (SheetId, &PlacedSheet)> + '_ {
        self.sheets.iter()
    }

    /// Totals the cut list of a slope.
    ///
    /// The area to cover is the slope clipped by its cutout, which
    /// [`Project::set_cutout`] only accepts when convex.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EntityNotFound` if the slope does not exist.
    pub fn cut_list_summary(&self, id: SlopeId) -> Result<CutListSummary> {
        let slope = self.slope(id)?;
        let sheets = self.sheets_of(id)?;
        let sheet_area: f64 = sheets.iter().map(|(_, s)| s.sheet.area).sum();
        let hole = slope
            .cutout
            .as_ref()
            .map_or(0.0, |cutout| slope.canonical.intersection(cutout).area());
        let slope_area = (slope.canonical.area() - hole).max(0.0);
        Ok(CutListSummary {
            sheet_count: sheets.len(),
            sheet_area,
            slope_area,
            waste: (sheet_area - slope_area).max(0.0),
        })
    }

    fn slope_mut(&mut self, id: SlopeId) -> Result<&mut Slope> {
        Ok(self
            .slopes
            .get_mut(id)
            .ok_or(StoreError::EntityNotFound("slope"))?)
    }

    /// Drops everything derived from the line set.
    fn invalidate(&mut self) {
        if self.slopes.is_empty() && self.sheets.is_empty() {
            return;
        }
        self.slopes.clear();
        self.sheets.clear();
        for line in self.lines.values_mut() {
            line.slope = None;
            line.canonical = None;
        }
    }
}
