use contextguard::{analyze, edges_to_csv, Edge, RecordStore, RiskLevel};
use rustc_hash::FxHashSet;

const POSTS_HEADER: &str = "post_id,platform,category,content,username,user_id,timestamp,\
misinfo_score,shares,likes,comments,status,archived,archive_url\n";

fn edge(source: &str, target: &str, weight: f64) -> Edge {
    Edge {
        source: source.to_string(),
        target: target.to_string(),
        weight,
    }
}

#[test]
fn test_chain_degrees_and_centrality() {
    let edges = vec![edge("A", "B", 1.0), edge("B", "C", 1.0)];
    let graph = analyze(&edges, None);

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.degree("A"), Some(1));
    assert_eq!(graph.degree("B"), Some(2));
    assert_eq!(graph.degree("C"), Some(1));
    assert_eq!(graph.centrality("B"), Some(1.0));
    assert_eq!(graph.centrality("A"), Some(0.5));

    let top = graph.top_spreaders(1);
    assert_eq!(top[0].user_id, "B");
    assert_eq!(top[0].risk, RiskLevel::Medium);
}

#[test]
fn test_centrality_bounds_and_degree_sum() {
    let edges: Vec<Edge> = (0..30)
        .map(|i| {
            let source = format!("user_{}", i % 9);
            let target = format!("user_{}", (i * 5 + 2) % 11);
            edge(&source, &target, 1.0 + (i % 3) as f64)
        })
        .collect();
    let graph = analyze(&edges, None);

    assert!(graph.nodes().iter().all(|n| (0.0..=1.0).contains(&n.centrality)));

    // Handshake lemma over the collapsed graph
    let degree_sum: usize = graph.nodes().iter().map(|n| n.degree).sum();
    assert_eq!(degree_sum, 2 * graph.edge_count());
}

#[test]
fn test_parallel_edges_and_self_loops() {
    let edges = vec![
        edge("user_1", "user_2", 1.0),
        edge("user_2", "user_1", 4.0),
        edge("user_3", "user_3", 2.0),
    ];
    let graph = analyze(&edges, None);

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.degree("user_1"), Some(1));
    assert_eq!(graph.degree("user_3"), Some(0));
    assert_eq!(graph.edges(), vec![("user_1", "user_2", 4.0)]);
}

#[test]
fn test_working_set_scope_keeps_context_nodes() {
    let edges = vec![edge("A", "B", 1.0), edge("B", "C", 1.0), edge("D", "E", 1.0)];
    let allowed: FxHashSet<&str> = ["A"].into_iter().collect();
    let graph = analyze(&edges, Some(&allowed));

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.degree("B"), Some(1));
    assert!(graph.node("C").is_none());
    assert_eq!(graph.centrality("A"), Some(1.0));
}

#[test]
fn test_restrict_recomputes_metrics() {
    // Hub connected to four leaves, plus a triangle through two of them
    let edges = vec![
        edge("hub", "a", 1.0),
        edge("hub", "b", 1.0),
        edge("hub", "c", 1.0),
        edge("hub", "d", 1.0),
        edge("a", "b", 1.0),
    ];
    let graph = analyze(&edges, None);
    assert_eq!(graph.degree("hub"), Some(4));
    assert_eq!(graph.top_spreaders(1)[0].risk, RiskLevel::High);

    let core = graph.restrict(2);
    let mut users: Vec<&str> = core.nodes().iter().map(|n| n.user_id.as_str()).collect();
    users.sort_unstable();
    assert_eq!(users, vec!["a", "b", "hub"]);
    assert!(core.nodes().iter().all(|n| n.degree >= 2));
    assert_eq!(core.degree("hub"), Some(2));
    assert_eq!(core.centrality("hub"), Some(1.0));

    assert_eq!(graph.restrict(10).node_count(), 0);
}

#[test]
fn test_spreader_ties_break_by_user_id() {
    let edges = vec![edge("zed", "x", 1.0), edge("amy", "y", 1.0), edge("bob", "z", 1.0)];
    let graph = analyze(&edges, None);

    let top = graph.top_spreaders(3);
    let ids: Vec<&str> = top.iter().map(|s| s.user_id.as_str()).collect();
    assert_eq!(ids, vec!["amy", "bob", "x"]);
    assert!(top.iter().all(|s| s.risk == RiskLevel::Low));
    assert!(graph.top_spreaders(100).len() == graph.node_count());
}

#[test]
fn test_exported_edges_reload() {
    let edges = vec![edge("user_1", "user_2", 3.0), edge("user_2", "user_3", 1.5)];
    let csv = edges_to_csv(&edges);
    assert!(csv.contains("user_1,user_2,3\n"));

    let dir = tempfile::tempdir().unwrap();
    let posts_path = dir.path().join("posts.csv");
    let edges_path = dir.path().join("edges.csv");
    std::fs::write(&posts_path, POSTS_HEADER).unwrap();
    std::fs::write(&edges_path, csv).unwrap();

    let store = RecordStore::load(&posts_path, &edges_path).unwrap();
    assert!(store.posts().is_empty());
    assert_eq!(store.edges(), edges.as_slice());
    assert!(store.report().is_clean());
}
