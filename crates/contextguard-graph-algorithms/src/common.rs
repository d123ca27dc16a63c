//! Shared utilities for graph algorithms
//!
//! Provides a read-only, undirected view of the sharing graph for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed, undirected view of the graph topology in
/// Compressed Sparse Row (CSR) format.
///
/// Every undirected edge `{u, v}` is stored twice, once in the neighbour
/// range of `u` and once in that of `v`. Parallel edges are collapsed and
/// self-loops are not stored, so the length of a neighbour range is the
/// number of distinct neighbours.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,

    /// Offsets into `neighbors`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbour indices, ascending within each node
    pub neighbors: Vec<usize>,
    /// Edge weights, aligned with `neighbors`
    pub weights: Vec<f64>,
}

impl GraphView {
    /// Build an undirected view from an edge list over dense indices.
    ///
    /// `index_to_node` fixes the node set and its order; every `(u, v, w)`
    /// must satisfy `u, v < index_to_node.len()`. When the same pair occurs
    /// more than once the last weight wins. Self-loops are skipped.
    pub fn from_edge_list(index_to_node: Vec<NodeId>, edges: &[(usize, usize, f64)]) -> Self {
        let node_count = index_to_node.len();

        // Adjacency keyed by neighbour so a repeated pair overwrites its weight
        let mut adjacency: Vec<HashMap<usize, f64>> = vec![HashMap::new(); node_count];
        for &(u, v, w) in edges {
            if u == v {
                continue;
            }
            adjacency[u].insert(v, w);
            adjacency[v].insert(u, w);
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut neighbors = Vec::new();
        let mut weights = Vec::new();

        offsets.push(0);
        for row in adjacency {
            let mut row: Vec<(usize, f64)> = row.into_iter().collect();
            row.sort_unstable_by_key(|&(idx, _)| idx);
            for (idx, w) in row {
                neighbors.push(idx);
                weights.push(w);
            }
            offsets.push(neighbors.len());
        }

        GraphView {
            node_count,
            index_to_node,
            offsets,
            neighbors,
            weights,
        }
    }

    /// Number of distinct neighbours of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Neighbours of a node (by index)
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.neighbors[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Weights of the edges to `neighbors(idx)`
    pub fn weights(&self, idx: usize) -> &[f64] {
        &self.weights[self.offsets[idx]..self.offsets[idx + 1]]
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Each undirected edge once, as `(u_idx, v_idx, weight)` with `u_idx < v_idx`
    pub fn edges(&self) -> Vec<(usize, usize, f64)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for u in 0..self.node_count {
            for (&v, &w) in self.neighbors(u).iter().zip(self.weights(u)) {
                if u < v {
                    edges.push((u, v, w));
                }
            }
        }
        edges
    }
}
