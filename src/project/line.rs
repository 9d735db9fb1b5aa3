use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PayloadError;
use crate::geometry::Segment;

use super::slope::SlopeId;

slotmap::new_key_type! {
    /// Unique identifier for a line in the project store.
    pub struct LineId;
}

/// The physical role of a drawn line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineRole {
    /// Lower edge of a slope where the sheets terminate.
    Eave,
    /// Sloped side edge meeting a vertical wall.
    Gable,
    /// Inward corner between two slopes.
    Valley,
    /// Top edge of a slope.
    Ridge,
    /// Edge where the roof meets a vertical obstacle.
    Abutment,
}

impl LineRole {
    /// Returns the lowercase name used in records and payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eave => "eave",
            Self::Gable => "gable",
            Self::Valley => "valley",
            Self::Ridge => "ridge",
            Self::Abutment => "abutment",
        }
    }
}

impl fmt::Display for LineRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineRole {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eave" => Ok(Self::Eave),
            "gable" => Ok(Self::Gable),
            "valley" => Ok(Self::Valley),
            "ridge" => Ok(Self::Ridge),
            "abutment" => Ok(Self::Abutment),
            _ => Err(PayloadError::UnknownRole(s.to_owned())),
        }
    }
}

/// A labeled segment of the roof drawing.
///
/// `projection` holds the endpoints as authored. `canonical` is filled in the
/// first time a slope containing this line is canonicalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    pub role: LineRole,
    pub projection: Segment,
    pub canonical: Option<Segment>,
    pub slope: Option<SlopeId>,
}

impl Line {
    /// Creates an unnamed line with no canonical coordinates.
    #[must_use]
    pub fn new(id: LineId, role: LineRole, projection: Segment) -> Self {
        Self {
            id,
            name: String::new(),
            role,
            projection,
            canonical: None,
            slope: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Length of the authored segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.projection.length()
    }
}
