use contextguard::records::ViolationKind;
use contextguard::{
    analyze, counts_by_key, engagement, filter, posts_to_csv, recovery_queue, score_histogram,
    search_content, summary_report, timeline, top_by_field, top_topics, CountKey, Dashboard,
    FilterCriteria, GuardConfig, RankField, RecordError, RecordStore, ReportOptions, WorkingSet,
};
use chrono::NaiveDate;
use std::path::Path;

const POSTS: &str = "\
post_id,platform,category,content,username,user_id,timestamp,misinfo_score,shares,likes,comments,status,archived,archive_url
POST_0001,Twitter,Vaccines,Vaccines contain microchips,seeker,user_1,2025-01-05 10:00:00,90,1200,300,45,Debunked,True,https://archive.org/1
POST_0002,Reddit,Vaccines,\"Garlic cures flu, says \"\"doctor\"\"\",guru,user_2,2025-01-05 18:30:00,60,40,10,1,Under Review,False,
POST_0003,Facebook,Cures,Bleach cures COVID,healer,user_3,2025-01-06 09:15:00,95,5000,800,300,Debunked,False,
POST_0004,Twitter,Treatments,Vaccines contain microchips,seeker,user_1,2025-01-07 12:00:00,88,700,120,30,Flagged,False,
POST_0005,Instagram,Prevention,\"Sunlight
prevents all viruses\",sunny,user_4,2025-01-07 13:00:00,72,150,90,12,Under Review,False,
POST_0006,Twitter,Vaccines,Score too high,bad,user_9,2025-01-08 08:00:00,140,1,1,1,Debunked,False,
POST_0001,Twitter,Vaccines,Duplicate id,dup,user_8,2025-01-08 09:00:00,80,1,1,1,Debunked,False,
POST_0007,Reddit,Cures,Negative shares,neg,user_7,2025-01-08 10:00:00,80,-3,1,1,Debunked,False,
";

const EDGES: &str = "\
source,target,weight
user_1,user_2,3
user_1,user_3,1
user_1,user_4,2
user_2,user_3,1
user_5,user_6,4
user_5,user_6,0.5
";

fn store() -> RecordStore {
    RecordStore::from_csv_strs(POSTS, EDGES).unwrap()
}

fn write_tables(dir: &Path, posts: &str, edges: &str) {
    std::fs::write(dir.join("sample_posts.csv"), posts).unwrap();
    std::fs::write(dir.join("network_edges.csv"), edges).unwrap();
}

#[test]
fn test_load_drops_invalid_rows() {
    let store = store();

    let ids: Vec<&str> = store.posts().iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["POST_0001", "POST_0002", "POST_0003", "POST_0004", "POST_0005"]);
    assert_eq!(store.edges().len(), 5);

    let report = store.report();
    assert_eq!(report.dropped_rows(), 4);
    assert!(report
        .violations
        .iter()
        .any(|v| matches!(v.kind, ViolationKind::ScoreOutOfRange { score: 140 })));
    assert!(report
        .violations
        .iter()
        .any(|v| matches!(
            &v.kind,
            ViolationKind::DuplicatePostId { post_id } if post_id == "POST_0001"
        )));

    // The first occurrence of a duplicated id wins
    assert_eq!(store.post("POST_0001").unwrap().user_id, "user_1");
    // Quoted fields keep embedded commas, quotes and newlines
    assert_eq!(store.post("POST_0002").unwrap().content, "Garlic cures flu, says \"doctor\"");
    assert_eq!(store.post("POST_0005").unwrap().content, "Sunlight\nprevents all viruses");
}

#[test]
fn test_filter_scenario() {
    let store = RecordStore::from_csv_strs(
        "post_id,platform,category,content,username,user_id,timestamp,misinfo_score,shares,likes,comments,status,archived,archive_url
P1,Twitter,Vaccines,a,u,user_1,2025-01-01 00:00:00,90,1,1,1,Debunked,False,
P2,Reddit,Vaccines,b,u,user_2,2025-01-01 00:00:00,60,1,1,1,Debunked,False,
",
        "source,target,weight\n",
    )
    .unwrap();

    let ws = filter(store.posts(), &FilterCriteria::new(["Twitter"], ["Vaccines"], 70));
    let ids: Vec<&str> = ws.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["P1"]);
}

#[test]
fn test_filter_is_idempotent_and_ordered() {
    let store = store();
    let criteria = FilterCriteria::new(
        ["Twitter", "Facebook", "Instagram"],
        ["Vaccines", "Cures", "Treatments", "Prevention"],
        70,
    );

    let once = filter(store.posts(), &criteria);
    let twice = filter(once.iter(), &criteria);
    assert_eq!(once, twice);

    let ids: Vec<&str> = once.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["POST_0001", "POST_0003", "POST_0004", "POST_0005"]);
    assert!(once.iter().all(|p| p.misinfo_score >= 70));
}

#[test]
fn test_counts_sum_to_working_set_size() {
    let store = store();
    let ws = filter(store.posts(), &FilterCriteria::all_of(store.posts(), 0));
    assert_eq!(ws.len(), 5);

    for key in [CountKey::Platform, CountKey::Category, CountKey::Status] {
        let counts = counts_by_key(&ws, key);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), ws.len());
    }

    let platforms = counts_by_key(&ws, CountKey::Platform);
    assert_eq!(platforms[0].key, "Twitter");
    assert_eq!(platforms[0].count, 2);

    let days = timeline(&ws);
    assert_eq!(days.len(), 3);
    assert_eq!(days.iter().map(|d| d.posts).sum::<usize>(), ws.len());
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    assert_eq!(days[0].posts, 2);

    let histogram = score_histogram(&ws, 15);
    assert_eq!(histogram.len(), 15);
    assert_eq!(histogram.iter().map(|b| b.count).sum::<usize>(), ws.len());
    assert_eq!(histogram[0].lower, 60.0);
    assert_eq!(histogram[14].upper, 95.0);
}

#[test]
fn test_rankings_are_bounded() {
    let store = store();
    let ws = filter(store.posts(), &FilterCriteria::all_of(store.posts(), 0));

    for n in [0, 2, 5, 50] {
        let top = top_by_field(&ws, RankField::Shares, n);
        assert_eq!(top.len(), n.min(ws.len()));
        assert!(top.windows(2).all(|w| w[0].shares >= w[1].shares));
    }
    assert_eq!(top_by_field(&ws, RankField::MisinfoScore, 1)[0].post_id, "POST_0003");

    let topics = top_topics(&ws, 7);
    assert_eq!(topics[0].key, "Vaccines contain microchips");
    assert_eq!(topics[0].count, 2);

    let queue = recovery_queue(&ws, 5);
    assert_eq!(queue.len(), 4);
    assert!(queue.iter().all(|p| !p.archived));

    let rows = engagement(&ws, 2);
    assert_eq!(rows[0].post_id, "POST_0003");
    assert_eq!(rows[1].post_id, "POST_0001");
}

#[test]
fn test_search_content() {
    let store = store();
    let ws = filter(store.posts(), &FilterCriteria::all_of(store.posts(), 0));

    let hits = search_content(&ws, Some("MICROCHIPS"));
    assert_eq!(hits.len(), 2);
    assert_eq!(search_content(&ws, Some("   ")), ws);
    assert_eq!(search_content(&ws, None), ws);
}

#[test]
fn test_empty_working_set() {
    let store = store();
    let ws = filter(store.posts(), &FilterCriteria::new(Vec::<String>::new(), ["Vaccines"], 0));
    assert!(ws.is_empty());
    assert_eq!(ws, WorkingSet::default());

    assert!(counts_by_key(&ws, CountKey::Platform).is_empty());
    assert!(timeline(&ws).is_empty());
    assert!(score_histogram(&ws, 15).is_empty());
    assert!(top_by_field(&ws, RankField::Likes, 10).is_empty());
    assert!(top_topics(&ws, 7).is_empty());

    let csv = posts_to_csv(&ws);
    assert_eq!(csv.lines().count(), 1);

    let graph = analyze(store.edges(), Some(&ws.user_set()));
    assert_eq!(graph.node_count(), 0);

    let generated = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap().and_hms_opt(8, 0, 0).unwrap();
    let report = summary_report(&ws, &graph, generated, &ReportOptions::default());
    assert!(report.contains("- Total Posts Tracked: 0"));
    assert!(report.contains("(none)"));
}

#[test]
fn test_exported_posts_reload() {
    let store = store();
    let ws = filter(store.posts(), &FilterCriteria::all_of(store.posts(), 0));

    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), &posts_to_csv(&ws), EDGES);

    let reloaded = RecordStore::load(
        dir.path().join("sample_posts.csv"),
        dir.path().join("network_edges.csv"),
    )
    .unwrap();

    assert!(reloaded.report().violations.iter().all(|v| v.table.to_string() == "edges"));
    assert_eq!(reloaded.posts(), store.posts());
}

#[test]
fn test_missing_table_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("network_edges.csv"), EDGES).unwrap();

    let err = RecordStore::load(
        dir.path().join("sample_posts.csv"),
        dir.path().join("network_edges.csv"),
    )
    .unwrap_err();
    assert!(matches!(err, RecordError::DataUnavailable { .. }));

    // Header without a required column
    let err = RecordStore::from_csv_strs("post_id,platform\nP1,Reddit\n", EDGES).unwrap_err();
    assert!(err.to_string().contains("posts"));
}

#[test]
fn test_dashboard_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_tables(dir.path(), POSTS, EDGES);

    let config_path = dir.path().join("guard.yaml");
    std::fs::write(
        &config_path,
        format!(
            "data_dir: {}\ndefault_min_score: 85\ngraph_scope: working_set\n",
            dir.path().display()
        ),
    )
    .unwrap();

    let dashboard = Dashboard::open(GuardConfig::from_file(&config_path).unwrap()).unwrap();
    let view = dashboard.view(dashboard.default_criteria());

    let ids: Vec<&str> = view.working_set.iter().map(|p| p.post_id.as_str()).collect();
    assert_eq!(ids, vec!["POST_0001", "POST_0003", "POST_0004"]);
    assert_eq!(view.overview.high_risk_posts, 3);
    assert_eq!(view.overview.active_spreaders, 2);

    // user_5 and user_6 share no edge with a selected user
    assert!(view.graph.node("user_5").is_none());
    assert_eq!(view.graph.degree("user_1"), Some(3));
}
