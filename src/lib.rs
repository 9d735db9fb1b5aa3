pub mod adapters;
pub mod error;
pub mod geometry;
pub mod material;
pub mod math;
pub mod operations;
pub mod project;

pub use error::{Result, RoofError};
pub use material::RoofMaterial;
pub use operations::{canonicalize, extract_slopes, layout_sheets, next_name, Sheet};
pub use project::{CutListSummary, Line, LineId, LineRole, Project, Slope, SlopeId};
