use tracing::trace;

use crate::geometry::Polygon;

/// A validated cycle together with its boundary polygon.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub nodes: Vec<usize>,
    pub polygon: Polygon,
}

/// Keeps only the minimal faces among the candidates.
///
/// A candidate is dropped if it contains or equals a face already kept; a
/// kept face is dropped when a later candidate lies strictly inside it. The
/// outer boundary of the drawing contains every face and never survives.
pub fn minimal_faces(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let redundant = kept.iter().any(|q| {
            candidate.polygon.equals(&q.polygon) || candidate.polygon.contains_polygon(&q.polygon)
        });
        if redundant {
            trace!(nodes = ?candidate.nodes, "dropping enclosing cycle");
            continue;
        }
        kept.retain(|q| {
            let enclosing = q.polygon.contains_polygon(&candidate.polygon);
            if enclosing {
                trace!(nodes = ?q.nodes, "dropping enclosing cycle");
            }
            !enclosing
        });
        kept.push(candidate);
    }
    kept
}
