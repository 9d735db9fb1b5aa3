use std::collections::HashSet;

use super::graph::LineGraph;

/// Enumerates the simple cycles of the graph by depth-first search.
///
/// Every cycle is reported once, rooted at its smallest node, in the order it
/// is first reached. Paths longer than `max_len` nodes are not explored.
/// Cycles over the same vertex set are treated as one.
pub fn enumerate_cycles(graph: &LineGraph, max_len: usize) -> Vec<Vec<usize>> {
    let mut search = CycleSearch {
        graph,
        max_len,
        path: Vec::new(),
        on_path: vec![false; graph.node_count()],
        seen: HashSet::new(),
        cycles: Vec::new(),
    };
    for start in 0..graph.node_count() {
        search.visit(start, start);
    }
    search.cycles
}

struct CycleSearch<'a> {
    graph: &'a LineGraph,
    max_len: usize,
    path: Vec<usize>,
    on_path: Vec<bool>,
    seen: HashSet<Vec<usize>>,
    cycles: Vec<Vec<usize>>,
}

impl CycleSearch<'_> {
    fn visit(&mut self, start: usize, node: usize) {
        self.path.push(node);
        self.on_path[node] = true;

        let graph = self.graph;
        for &next in graph.neighbours(node) {
            if next == start {
                if self.path.len() >= 3 {
                    self.record();
                }
                continue;
            }
            // Only nodes above the root, so each cycle is rooted at its minimum.
            if next < start || self.on_path[next] || self.path.len() >= self.max_len {
                continue;
            }
            self.visit(start, next);
        }

        self.on_path[node] = false;
        self.path.pop();
    }

    fn record(&mut self) {
        let mut key = self.path.clone();
        key.sort_unstable();
        if self.seen.insert(key) {
            self.cycles.push(self.path.clone());
        }
    }
}
