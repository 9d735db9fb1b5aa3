use serde::Deserialize;
use tracing::debug;

use crate::error::{PayloadError, Result};
use crate::geometry::Segment;
use crate::material::RoofMaterial;
use crate::project::{LineId, LineRole, Project};

use super::record::{PointRecord, RoofMaterialRecord};

/// One drawn line as sent by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct LinePayload {
    #[serde(default)]
    pub name: Option<String>,
    /// Role name, matched case-insensitively.
    pub role: String,
    pub start: PointRecord,
    pub end: PointRecord,
}

/// A drawing submitted for planning, optionally with the material to lay.
#[derive(Debug, Clone, Deserialize)]
pub struct DrawingPayload {
    pub lines: Vec<LinePayload>,
    #[serde(default)]
    pub material: Option<RoofMaterialRecord>,
}

impl DrawingPayload {
    /// Parses a payload from JSON.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::Json` if the text is not a valid payload.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(PayloadError::from)?)
    }

    /// Validates the material, if one was sent.
    ///
    /// # Errors
    ///
    /// Returns `MaterialError::InvalidRoofParameters` if it breaks the
    /// material invariants.
    pub fn material(&self) -> Result<Option<RoofMaterial>> {
        self.material.map(RoofMaterial::try_from).transpose()
    }

    /// Adds the drawn lines to `project`, in payload order.
    ///
    /// Every line is checked before any is added.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::UnknownRole`, `PayloadError::NonFinite` or
    /// `GeometryError::ZeroLength` for the first bad line.
    pub fn load_into(&self, project: &mut Project) -> Result<Vec<LineId>> {
        let parsed = self
            .lines
            .iter()
            .map(|line| -> Result<(Option<String>, LineRole, Segment)> {
                let role: LineRole = line.role.parse()?;
                let segment =
                    Segment::try_new(line.start.to_point("line")?, line.end.to_point("line")?)?;
                Ok((line.name.clone(), role, segment))
            })
            .collect::<Result<Vec<_>>>()?;

        let ids = parsed
            .into_iter()
            .map(|(name, role, segment)| project.insert_line(name, role, segment))
            .collect::<Result<Vec<_>>>()?;
        debug!(lines = ids.len(), "loaded drawing payload");
        Ok(ids)
    }

    /// Builds a fresh project holding the drawn lines.
    ///
    /// # Errors
    ///
    /// See [`DrawingPayload::load_into`].
    pub fn into_project(&self) -> Result<Project> {
        let mut project = Project::new();
        self.load_into(&mut project)?;
        Ok(project)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RoofError;

    const TRIANGLE: &str = r#"{
        "lines": [
            {"role": "Eave", "start": {"x": 0, "y": 0}, "end": {"x": 4, "y": 0}},
            {"role": "gable", "start": {"x": 4, "y": 0}, "end": {"x": 2, "y": 3}},
            {"name": "Z", "role": "gable", "start": {"x": 2, "y": 3}, "end": {"x": 0, "y": 0}}
        ],
        "material": {
            "overall_width": 1.2, "useful_width": 1.19, "overlap": 0.35,
            "min_length": 0.5, "max_length": 8.0, "color": "red"
        }
    }"#;

    #[test]
    fn decodes_drawing() {
        let payload = DrawingPayload::from_json(TRIANGLE).unwrap();
        let project = payload.into_project().unwrap();
        assert_eq!(project.line_count(), 3);
        let mut names: Vec<&str> = project.lines().map(|l| l.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["A", "B", "Z"]);
        assert!(payload.material().unwrap().is_some());
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            DrawingPayload::from_json("{\"lines\": 3}"),
            Err(RoofError::Payload(PayloadError::Json(_)))
        ));
    }

    #[test]
    fn unknown_role_adds_nothing() {
        let json = r#"{"lines": [
            {"role": "eave", "start": {"x": 0, "y": 0}, "end": {"x": 4, "y": 0}},
            {"role": "gutter", "start": {"x": 4, "y": 0}, "end": {"x": 4, "y": 2}}
        ]}"#;
        let payload = DrawingPayload::from_json(json).unwrap();
        let mut project = Project::new();
        assert!(matches!(
            payload.load_into(&mut project),
            Err(RoofError::Payload(PayloadError::UnknownRole(_)))
        ));
        assert_eq!(project.line_count(), 0);
        assert!(payload.material().unwrap().is_none());
    }
}
