//! Subgraph restriction
//!
//! Keeps the well-connected core of a view: nodes whose degree reaches a
//! threshold, plus the edges between them.

use super::common::GraphView;

/// Induced subgraph on the nodes with `degree >= min_degree`.
///
/// Degrees are taken from the input view; the returned view is rebuilt, so
/// its own degrees count only neighbours that survived. Node order follows
/// the input view.
pub fn restrict_by_degree(view: &GraphView, min_degree: usize) -> GraphView {
    let mut remap = vec![None; view.node_count];
    let mut index_to_node = Vec::new();

    for idx in 0..view.node_count {
        if view.degree(idx) >= min_degree {
            remap[idx] = Some(index_to_node.len());
            index_to_node.push(view.index_to_node[idx]);
        }
    }

    let edges: Vec<(usize, usize, f64)> = view
        .edges()
        .into_iter()
        .filter_map(|(u, v, w)| match (remap[u], remap[v]) {
            (Some(nu), Some(nv)) => Some((nu, nv, w)),
            _ => None,
        })
        .collect();

    GraphView::from_edge_list(index_to_node, &edges)
}
