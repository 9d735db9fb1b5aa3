//! Conversions between the engine's types and the records and payloads of the
//! surrounding application, plus the undo/redo dispatcher.

pub mod history;
pub mod payload;
pub mod record;

pub use history::{Action, History};
pub use payload::{DrawingPayload, LinePayload};
pub use record::{
    export_project, import_lines, LineRecord, PointRecord, ProjectRecord, RoofMaterialRecord,
    SheetRecord,
};
