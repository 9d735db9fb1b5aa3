pub mod polygon;
pub mod segment;

pub use polygon::{Bounds, Polygon};
pub use segment::Segment;
