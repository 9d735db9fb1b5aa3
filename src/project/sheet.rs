use crate::operations::Sheet;

use super::slope::SlopeId;

slotmap::new_key_type! {
    /// Unique identifier for a laid sheet in the project store.
    pub struct SheetId;
}

/// A sheet of the cut list, named and attached to its slope.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSheet {
    pub name: String,
    pub slope: SlopeId,
    pub sheet: Sheet,
}
