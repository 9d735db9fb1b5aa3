use std::collections::{BTreeSet, HashMap};

use tracing::trace;

use crate::math::{Point2, PointKey};
use crate::project::{Line, LineId};

/// Undirected graph over line endpoints.
///
/// Nodes are sorted lexicographically so that traversal order, and therefore
/// the extracted slopes, do not depend on the order of the input lines.
#[derive(Debug)]
pub struct LineGraph {
    nodes: Vec<Point2>,
    adjacency: Vec<Vec<usize>>,
    edges: HashMap<(usize, usize), LineId>,
}

impl LineGraph {
    /// Builds the graph. Zero-length lines are skipped; parallel lines
    /// between the same endpoints collapse onto the smallest line id.
    pub fn build(lines: &[Line]) -> Self {
        // Step 1: Intern endpoints in sorted order.
        let keys: BTreeSet<PointKey> = lines
            .iter()
            .flat_map(|l| [PointKey::new(&l.projection.start), PointKey::new(&l.projection.end)])
            .collect();
        let index: HashMap<PointKey, usize> =
            keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
        let nodes: Vec<Point2> = keys.iter().map(PointKey::point).collect();

        // Step 2: Edge lookup keyed by the unordered node pair.
        let mut edges: HashMap<(usize, usize), LineId> = HashMap::new();
        for line in lines {
            let a = index[&PointKey::new(&line.projection.start)];
            let b = index[&PointKey::new(&line.projection.end)];
            if a == b {
                trace!(line = ?line.id, "skipping zero-length line");
                continue;
            }
            edges
                .entry(edge_key(a, b))
                .and_modify(|id| *id = (*id).min(line.id))
                .or_insert(line.id);
        }

        // Step 3: Sorted adjacency lists.
        let mut adjacency = vec![Vec::new(); nodes.len()];
        for &(a, b) in edges.keys() {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        for neighbours in &mut adjacency {
            neighbours.sort_unstable();
        }

        Self {
            nodes,
            adjacency,
            edges,
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Position of a node.
    pub fn point(&self, node: usize) -> Point2 {
        self.nodes[node]
    }

    /// Sorted neighbours of a node.
    pub fn neighbours(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// The line joining two nodes, if any.
    pub fn edge(&self, a: usize, b: usize) -> Option<LineId> {
        self.edges.get(&edge_key(a, b)).copied()
    }
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
