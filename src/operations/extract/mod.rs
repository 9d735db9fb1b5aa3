mod cycles;
mod filter;
mod graph;

use tracing::{debug, trace};

use crate::geometry::Polygon;
use crate::project::{Line, LineId};

use self::filter::Candidate;
use self::graph::LineGraph;

/// Parameters controlling slope extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractParams {
    /// Longest cycle, in nodes, the search explores. `None` caps it at the
    /// node count of the drawing.
    pub max_path_len: Option<usize>,
}

/// A slope found in the drawing.
#[derive(Debug, Clone)]
pub struct ExtractedSlope {
    /// Boundary lines in walking order (counter-clockwise in the drawing).
    pub lines: Vec<LineId>,
    /// Boundary polygon in drawing coordinates.
    pub polygon: Polygon,
}

/// Finds the roof slopes of a labeled line drawing.
///
/// Endpoints become graph nodes and lines become undirected edges. Simple
/// cycles are enumerated, cycles that are degenerate or self-intersecting are
/// dropped, and only cycles that enclose no other cycle are kept.
#[derive(Debug)]
pub struct SlopeExtractor<'a> {
    lines: &'a [Line],
    params: ExtractParams,
}

impl<'a> SlopeExtractor<'a> {
    /// Creates a new extractor with default parameters.
    #[must_use]
    pub fn new(lines: &'a [Line]) -> Self {
        Self {
            lines,
            params: ExtractParams::default(),
        }
    }

    /// Sets custom extraction parameters.
    #[must_use]
    pub fn with_params(mut self, params: ExtractParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the extraction.
    ///
    /// An incomplete drawing yields an empty list.
    #[must_use]
    pub fn execute(&self) -> Vec<ExtractedSlope> {
        // Step 1: Build the endpoint graph.
        let graph = LineGraph::build(self.lines);
        let max_len = self
            .params
            .max_path_len
            .unwrap_or(graph.node_count())
            .min(graph.node_count());

        // Step 2: Enumerate candidate cycles.
        let cycles = cycles::enumerate_cycles(&graph, max_len);

        // Step 3: Validate candidates.
        let candidates: Vec<Candidate> = cycles
            .into_iter()
            .filter_map(|nodes| validate(&graph, nodes))
            .collect();

        // Step 4: Keep minimal faces.
        let faces = filter::minimal_faces(candidates);

        debug!(
            lines = self.lines.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            slopes = faces.len(),
            "extracted slopes"
        );

        // Step 5: Map node cycles back to line identities.
        faces
            .into_iter()
            .filter_map(|face| {
                let n = face.nodes.len();
                let lines = (0..n)
                    .map(|i| graph.edge(face.nodes[i], face.nodes[(i + 1) % n]))
                    .collect::<Option<Vec<LineId>>>()?;
                Some(ExtractedSlope {
                    lines,
                    polygon: face.polygon,
                })
            })
            .collect()
    }
}

/// Checks that every hop of the cycle is a drawn line and that the cycle
/// bounds a simple polygon. The cycle is reoriented counter-clockwise,
/// keeping its first node.
fn validate(graph: &LineGraph, mut nodes: Vec<usize>) -> Option<Candidate> {
    let n = nodes.len();
    if n < 3 || (0..n).any(|i| graph.edge(nodes[i], nodes[(i + 1) % n]).is_none()) {
        trace!(?nodes, "dropping cycle with missing edge");
        return None;
    }
    let points = nodes.iter().map(|&i| graph.point(i)).collect();
    let mut polygon = match Polygon::try_simple(points) {
        Ok(polygon) => polygon,
        Err(err) => {
            trace!(?nodes, %err, "dropping malformed cycle");
            return None;
        }
    };
    if polygon.signed_area() < 0.0 {
        nodes[1..].reverse();
        polygon = Polygon::new(nodes.iter().map(|&i| graph.point(i)).collect());
    }
    Some(Candidate { nodes, polygon })
}

/// Returns the slopes of a drawing as ordered lists of line identities.
#[must_use]
pub fn extract_slopes(lines: &[Line]) -> Vec<Vec<LineId>> {
    SlopeExtractor::new(lines)
        .execute()
        .into_iter()
        .map(|slope| slope.lines)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use crate::math::Point2;
    use crate::project::LineRole;
    use slotmap::SlotMap;

    struct Drawing {
        ids: SlotMap<LineId, ()>,
        lines: Vec<Line>,
    }

    impl Drawing {
        fn new() -> Self {
            Self {
                ids: SlotMap::with_key(),
                lines: Vec::new(),
            }
        }

        fn line(&mut self, role: LineRole, x0: f64, y0: f64, x1: f64, y1: f64) -> LineId {
            let id = self.ids.insert(());
            self.lines.push(Line::new(
                id,
                role,
                Segment::new(Point2::new(x0, y0), Point2::new(x1, y1)),
            ));
            id
        }
    }

    /// Rectangular roof split by a ridge into two slopes.
    fn gable_roof() -> Drawing {
        let mut d = Drawing::new();
        d.line(LineRole::Eave, 0.0, 0.0, 10.0, 0.0);
        d.line(LineRole::Gable, 10.0, 0.0, 10.0, 3.0);
        d.line(LineRole::Ridge, 10.0, 3.0, 0.0, 3.0);
        d.line(LineRole::Gable, 0.0, 3.0, 0.0, 0.0);
        d.line(LineRole::Gable, 10.0, 3.0, 10.0, 6.0);
        d.line(LineRole::Eave, 10.0, 6.0, 0.0, 6.0);
        d.line(LineRole::Gable, 0.0, 6.0, 0.0, 3.0);
        d
    }

    fn normalized(mut slopes: Vec<Vec<LineId>>) -> Vec<Vec<LineId>> {
        for slope in &mut slopes {
            slope.sort();
        }
        slopes.sort();
        slopes
    }

    #[test]
    fn gable_roof_has_two_slopes() {
        let d = gable_roof();
        let slopes = extract_slopes(&d.lines);
        assert_eq!(slopes.len(), 2);
        assert!(slopes.iter().all(|s| s.len() == 4));
    }

    #[test]
    fn consecutive_lines_share_one_endpoint() {
        let d = gable_roof();
        let by_id = |id: LineId| d.lines.iter().find(|l| l.id == id).unwrap();
        for slope in extract_slopes(&d.lines) {
            let n = slope.len();
            for i in 0..n {
                let a = &by_id(slope[i]).projection;
                let b = &by_id(slope[(i + 1) % n]).projection;
                assert_eq!(a.shared_endpoints(b).len(), 1);
            }
        }
    }

    #[test]
    fn no_slope_contains_another() {
        let d = gable_roof();
        let slopes = SlopeExtractor::new(&d.lines).execute();
        for (i, a) in slopes.iter().enumerate() {
            for (j, b) in slopes.iter().enumerate() {
                if i != j {
                    assert!(!a.polygon.contains_polygon(&b.polygon));
                }
            }
        }
    }

    #[test]
    fn slopes_are_counter_clockwise() {
        let d = gable_roof();
        for slope in SlopeExtractor::new(&d.lines).execute() {
            assert!(slope.polygon.signed_area() > 0.0);
        }
    }

    #[test]
    fn input_order_does_not_matter() {
        let d = gable_roof();
        let expected = extract_slopes(&d.lines);
        let mut shuffled = d.lines.clone();
        shuffled.reverse();
        shuffled.swap(0, 3);
        assert_eq!(extract_slopes(&shuffled), expected);
        assert_eq!(normalized(extract_slopes(&shuffled)), normalized(expected));
    }

    /// Rectangle with a central ridge and four hips.
    fn hip_roof() -> Drawing {
        let mut d = Drawing::new();
        d.line(LineRole::Eave, 0.0, 0.0, 10.0, 0.0);
        d.line(LineRole::Eave, 10.0, 0.0, 10.0, 6.0);
        d.line(LineRole::Eave, 10.0, 6.0, 0.0, 6.0);
        d.line(LineRole::Eave, 0.0, 6.0, 0.0, 0.0);
        d.line(LineRole::Ridge, 3.0, 3.0, 7.0, 3.0);
        d.line(LineRole::Valley, 0.0, 0.0, 3.0, 3.0);
        d.line(LineRole::Valley, 0.0, 6.0, 3.0, 3.0);
        d.line(LineRole::Valley, 10.0, 0.0, 7.0, 3.0);
        d.line(LineRole::Valley, 10.0, 6.0, 7.0, 3.0);
        d
    }

    #[test]
    fn hip_roof_is_stable_under_reordering() {
        let d = hip_roof();
        let expected = extract_slopes(&d.lines);
        assert_eq!(expected.len(), 4);

        let n = d.lines.len();
        let mut orders: Vec<Vec<Line>> = Vec::new();
        for shift in 0..n {
            let mut rotated = d.lines.clone();
            rotated.rotate_left(shift);
            orders.push(rotated.iter().rev().cloned().collect());
            orders.push(rotated);
        }
        // Odd positions first, then even ones.
        orders.push(
            d.lines
                .iter()
                .skip(1)
                .step_by(2)
                .chain(d.lines.iter().step_by(2))
                .cloned()
                .collect(),
        );

        for order in &orders {
            let slopes = extract_slopes(order);
            assert_eq!(slopes, expected);
            assert_eq!(normalized(slopes), normalized(expected.clone()));
        }
    }

    #[test]
    fn hip_roof_four_slopes() {
        let d = hip_roof();
        let slopes = extract_slopes(&d.lines);
        assert_eq!(slopes.len(), 4);
        let mut sizes: Vec<usize> = slopes.iter().map(Vec::len).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![3, 3, 4, 4]);
    }

    #[test]
    fn incomplete_drawing_is_empty() {
        let mut d = Drawing::new();
        d.line(LineRole::Eave, 0.0, 0.0, 10.0, 0.0);
        d.line(LineRole::Gable, 10.0, 0.0, 10.0, 3.0);
        d.line(LineRole::Ridge, 10.0, 3.0, 0.0, 3.0);
        assert!(extract_slopes(&d.lines).is_empty());
        assert!(extract_slopes(&[]).is_empty());
    }

    #[test]
    fn crossing_lines_without_shared_node_are_dropped() {
        // Bow tie drawn from four lines whose diagonals cross mid-span.
        let mut d = Drawing::new();
        d.line(LineRole::Eave, 0.0, 0.0, 2.0, 2.0);
        d.line(LineRole::Gable, 2.0, 2.0, 2.0, 0.0);
        d.line(LineRole::Ridge, 2.0, 0.0, 0.0, 2.0);
        d.line(LineRole::Gable, 0.0, 2.0, 0.0, 0.0);
        assert!(extract_slopes(&d.lines).is_empty());
    }

    #[test]
    fn path_cap_hides_long_cycles() {
        let d = gable_roof();
        let params = ExtractParams {
            max_path_len: Some(3),
        };
        assert!(SlopeExtractor::new(&d.lines)
            .with_params(params)
            .execute()
            .is_empty());
    }
}
