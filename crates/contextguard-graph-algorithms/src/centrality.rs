//! Degree-based centrality
//!
//! Degree counts distinct neighbours; degree centrality normalises it by the
//! largest possible degree in the view, `N - 1`.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

/// Degree of every node
pub fn degree(view: &GraphView) -> HashMap<NodeId, usize> {
    let mut result = HashMap::with_capacity(view.node_count);
    for idx in 0..view.node_count {
        result.insert(view.index_to_node[idx], view.degree(idx));
    }
    result
}

/// Degree centrality of every node
///
/// `degree / (N - 1)`, always within `[0, 1]`. A view with zero or one node
/// yields 0 for every node.
pub fn degree_centrality(view: &GraphView) -> HashMap<NodeId, f64> {
    let n = view.node_count;
    let mut result = HashMap::with_capacity(n);

    if n <= 1 {
        for &id in &view.index_to_node {
            result.insert(id, 0.0);
        }
        return result;
    }

    let scale = 1.0 / (n - 1) as f64;
    for idx in 0..n {
        result.insert(view.index_to_node[idx], view.degree(idx) as f64 * scale);
    }
    result
}
