//! Dependency graph between cut families.
//!
//! An edge `from -> to` means `to` is attempted in a round only if `from`
//! produced no cuts in that round. The graph is kept acyclic: every insertion
//! is preceded by a reachability check.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;

/// Returned when an edge would close a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDetected;

/// Directed acyclic graph over family indices.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// successors[i] = {j : (i, j) is an edge}, in insertion order.
    successors: Vec<Vec<usize>>,

    /// predecessors[j] = {i : (i, j) is an edge}, in insertion order.
    predecessors: Vec<Vec<usize>>,

    edge_count: usize,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index.
    pub fn add_node(&mut self) -> usize {
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        self.successors.len() - 1
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Check if the edge `from -> to` exists.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.successors[from].contains(&to)
    }

    /// Prerequisites of `node`.
    pub fn predecessors(&self, node: usize) -> &[usize] {
        &self.predecessors[node]
    }

    /// Dependents of `node`.
    pub fn successors(&self, node: usize) -> &[usize] {
        &self.successors[node]
    }

    /// Check if `dst` is reachable from `src` (every node reaches itself).
    pub fn reaches(&self, src: usize, dst: usize) -> bool {
        if src == dst {
            return true;
        }
        let mut visited = FixedBitSet::with_capacity(self.node_count());
        let mut stack = vec![src];
        visited.insert(src);

        while let Some(v) = stack.pop() {
            for &w in &self.successors[v] {
                if w == dst {
                    return true;
                }
                if !visited.put(w) {
                    stack.push(w);
                }
            }
        }
        false
    }

    /// Insert `from -> to`.
    ///
    /// Returns `Ok(false)` if the edge was already present. The graph is left
    /// untouched when the edge would create a cycle.
    pub fn try_add_edge(&mut self, from: usize, to: usize) -> Result<bool, CycleDetected> {
        if self.has_edge(from, to) {
            return Ok(false);
        }
        if self.reaches(to, from) {
            return Err(CycleDetected);
        }
        self.successors[from].push(to);
        self.predecessors[to].push(from);
        self.edge_count += 1;
        Ok(true)
    }

    /// Topological order; among ready vertices the lowest index comes first.
    pub fn topological_order(&self) -> Vec<usize> {
        let n = self.node_count();
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
            .filter(|&v| in_degree[v] == 0)
            .map(Reverse)
            .collect();
        let mut order = Vec::with_capacity(n);

        while let Some(Reverse(v)) = ready.pop() {
            order.push(v);
            for &w in &self.successors[v] {
                in_degree[w] -= 1;
                if in_degree[w] == 0 {
                    ready.push(Reverse(w));
                }
            }
        }

        debug_assert_eq!(order.len(), n, "dependency graph has a cycle");
        order
    }
}
