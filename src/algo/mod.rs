//! Graph analyzer
//!
//! Projects sharing edges into an undirected graph over user ids and derives
//! per-user degree and degree centrality. The algorithms themselves live in
//! `contextguard-graph-algorithms`; this module is the adapter layer that
//! interns user ids into dense node ids and maps results back.

pub mod spreaders;

pub use spreaders::{RiskLevel, Spreader, DEFAULT_SPREADER_LIMIT, REPORT_SPREADER_LIMIT};

use crate::records::Edge;
use contextguard_graph_algorithms::{
    degree, degree_centrality, restrict_by_degree, GraphView, NodeId,
};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which edges feed the graph when a filter is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphScope {
    /// Every edge, regardless of the active filter
    #[default]
    Full,
    /// Edges with at least one endpoint among the working set's users
    WorkingSet,
}

/// Degree and centrality of one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    pub user_id: String,
    pub degree: usize,
    pub centrality: f64,
}

/// Undirected sharing graph with per-node metrics
#[derive(Debug, Clone)]
pub struct SpreadGraph {
    view: GraphView,
    nodes: Vec<NodeMetrics>,
}

/// Build the sharing graph.
///
/// With `allowed = None` every edge is used. Otherwise an edge is kept when
/// at least one endpoint is allowed; the other endpoint still becomes a node.
/// Nodes are numbered in first-seen order.
pub fn analyze(edges: &[Edge], allowed: Option<&FxHashSet<&str>>) -> SpreadGraph {
    let mut users: IndexSet<&str> = IndexSet::new();
    let mut edge_list = Vec::with_capacity(edges.len());

    for edge in edges {
        if let Some(allowed) = allowed {
            if !allowed.contains(edge.source.as_str()) && !allowed.contains(edge.target.as_str()) {
                continue;
            }
        }
        let (u, _) = users.insert_full(edge.source.as_str());
        let (v, _) = users.insert_full(edge.target.as_str());
        edge_list.push((u, v, edge.weight));
    }

    let index_to_node: Vec<NodeId> = (0..users.len() as NodeId).collect();
    let view = GraphView::from_edge_list(index_to_node, &edge_list);
    debug!(
        "Built sharing graph: {} nodes, {} edges from {} input edges",
        view.node_count,
        view.edge_count(),
        edges.len()
    );

    SpreadGraph::new(users.into_iter().map(str::to_string).collect(), view)
}

impl SpreadGraph {
    /// `users[i]` names the node whose id is `i`
    fn new(users: Vec<String>, view: GraphView) -> Self {
        let degrees = degree(&view);
        let centrality = degree_centrality(&view);
        let nodes = users
            .into_iter()
            .enumerate()
            .map(|(idx, user_id)| {
                let id = view.index_to_node[idx];
                NodeMetrics {
                    user_id,
                    degree: degrees.get(&id).copied().unwrap_or(0),
                    centrality: centrality.get(&id).copied().unwrap_or(0.0),
                }
            })
            .collect();
        Self { view, nodes }
    }

    pub fn node_count(&self) -> usize {
        self.view.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.view.edge_count()
    }

    /// Every node in first-seen order
    pub fn nodes(&self) -> &[NodeMetrics] {
        &self.nodes
    }

    pub fn node(&self, user_id: &str) -> Option<&NodeMetrics> {
        self.nodes.iter().find(|n| n.user_id == user_id)
    }

    pub fn degree(&self, user_id: &str) -> Option<usize> {
        self.node(user_id).map(|n| n.degree)
    }

    pub fn centrality(&self, user_id: &str) -> Option<f64> {
        self.node(user_id).map(|n| n.centrality)
    }

    /// Each undirected edge once, as `(user, user, weight)`
    pub fn edges(&self) -> Vec<(&str, &str, f64)> {
        self.view
            .edges()
            .into_iter()
            .map(|(u, v, w)| (self.nodes[u].user_id.as_str(), self.nodes[v].user_id.as_str(), w))
            .collect()
    }

    /// Subgraph of users with at least `min_degree` connections.
    ///
    /// Only edges between retained users survive; degree and centrality are
    /// recomputed on the subgraph.
    pub fn restrict(&self, min_degree: usize) -> SpreadGraph {
        let core = restrict_by_degree(&self.view, min_degree);
        let users: Vec<String> = core
            .index_to_node
            .iter()
            .map(|&id| self.nodes[id as usize].user_id.clone())
            .collect();

        // Renumber so node ids are dense again
        let index_to_node: Vec<NodeId> = (0..users.len() as NodeId).collect();
        let view = GraphView::from_edge_list(index_to_node, &core.edges());
        SpreadGraph::new(users, view)
    }
}
