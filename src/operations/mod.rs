pub mod canonical;
pub mod extract;
pub mod layout;
pub mod naming;

pub use canonical::{canonicalize, main_eave, Canonicalize, OrientationCase};
pub use extract::{extract_slopes, ExtractParams, ExtractedSlope, SlopeExtractor};
pub use layout::{layout_sheets, LayoutParams, Sheet, SheetLayout};
pub use naming::{excel_name, next_name, NameSequence};
