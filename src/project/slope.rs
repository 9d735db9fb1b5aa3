use crate::error::{GeometryError, Result};
use crate::geometry::{Polygon, Segment};
use crate::math::points_approx_eq;

use super::line::LineId;
use super::sheet::SheetId;

slotmap::new_key_type! {
    /// Unique identifier for a slope in the project store.
    pub struct SlopeId;
}

/// A closed roof face bounded by an ordered cycle of lines.
#[derive(Debug, Clone)]
pub struct Slope {
    pub name: String,
    /// Boundary lines in walking order; the last connects back to the first.
    pub lines: Vec<LineId>,
    /// Boundary polygon in the canonical frame.
    pub canonical: Polygon,
    /// Optional subtractive region (chimney, skylight) in the canonical frame.
    pub cutout: Option<Polygon>,
    /// Laid sheets in layout order.
    pub sheets: Vec<SheetId>,
}

/// Builds the boundary polygon of an ordered line cycle.
///
/// Vertex `i` is the endpoint shared by segment `i` and segment `i + 1`.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateCycle` if fewer than three segments are
/// given, a segment repeats, or two consecutive segments do not share exactly
/// one endpoint. Returns `GeometryError::NonSimplePolygon` if the resulting
/// boundary touches or crosses itself.
pub fn slope_polygon(segments: &[Segment]) -> Result<Polygon> {
    let n = segments.len();
    if n < 3 {
        return Err(GeometryError::DegenerateCycle(format!("{n} lines")).into());
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if same_segment(&segments[i], &segments[j]) {
                return Err(
                    GeometryError::DegenerateCycle(format!("lines {i} and {j} repeat")).into(),
                );
            }
        }
    }
    let mut ring = Vec::with_capacity(n);
    for i in 0..n {
        let next = (i + 1) % n;
        let shared = segments[i].shared_endpoints(&segments[next]);
        if shared.len() != 1 {
            return Err(GeometryError::DegenerateCycle(format!(
                "lines {i} and {next} share {} endpoints",
                shared.len()
            ))
            .into());
        }
        ring.push(shared[0]);
    }
    Polygon::try_simple(ring)
}

fn same_segment(a: &Segment, b: &Segment) -> bool {
    (points_approx_eq(&a.start, &b.start) && points_approx_eq(&a.end, &b.end))
        || (points_approx_eq(&a.start, &b.end) && points_approx_eq(&a.end, &b.start))
}
