//! ContextGuard
//!
//! Filter and metrics pipeline for a healthcare misinformation tracking
//! dataset: simulated social-media posts plus the sharing graph between
//! their authors.
//!
//! # Architecture
//!
//! - `records`: loads and validates the posts and edges tables (record store)
//! - `filter`: platform, category and score predicates (filter engine)
//! - `metrics`: counts, timeline, histogram, rankings, search (metrics aggregator)
//! - `algo`: undirected sharing graph, degree centrality, spreaders (graph analyzer)
//! - `export`: CSV and summary report rendering (export formatter)
//! - `session`: load-once dashboard producing per-filter views
//! - `config`, `alerts`: YAML configuration and canned alert content
//!
//! The record store is read once and shared immutably; every other stage is
//! a pure function over borrowed data.
//!
//! ## Example Usage
//!
//! ```rust
//! use contextguard::{analyze, counts_by_key, filter, CountKey, FilterCriteria, RecordStore};
//!
//! let posts = "post_id,platform,category,content,username,user_id,timestamp,misinfo_score,shares,likes,comments,status,archived,archive_url
//! P1,Reddit,Vaccines,Vaccines contain microchips,seeker,user_1,2025-01-05 10:00:00,90,1200,300,45,Debunked,False,
//! P2,Twitter,Vaccines,Garlic cures flu,guru,user_2,2025-01-06 11:00:00,60,40,10,1,Under Review,False,
//! ";
//! let edges = "source,target,weight\nuser_1,user_2,2\nuser_2,user_3,1\n";
//!
//! let store = RecordStore::from_csv_strs(posts, edges).unwrap();
//!
//! let criteria = FilterCriteria::new(["Reddit"], ["Vaccines"], 70);
//! let ws = filter(store.posts(), &criteria);
//! assert_eq!(ws.len(), 1);
//!
//! let platforms = counts_by_key(&ws, CountKey::Platform);
//! assert_eq!(platforms[0].key, "Reddit");
//!
//! let graph = analyze(store.edges(), None);
//! assert_eq!(graph.degree("user_2"), Some(2));
//! assert_eq!(graph.centrality("user_2"), Some(1.0));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod alerts;
pub mod algo;
pub mod config;
pub mod export;
pub mod filter;
pub mod metrics;
pub mod records;
pub mod session;

// Re-export main types for convenience
pub use records::{
    Edge, LoadReport, Post, RecordError, RecordResult, RecordStore, SchemaViolation, Table,
    ViolationKind,
};

pub use filter::{filter, FilterCriteria, WorkingSet, DEFAULT_MIN_SCORE};

pub use metrics::{
    counts_by_key, engagement, overview, recovery_queue, score_histogram, search_content,
    sort_for_display, timeline, top_by_field, top_topics, CountKey, DayCount, EngagementRow,
    HistogramBin, KeyCount, Overview, RankField, SortKey,
};

pub use algo::{analyze, GraphScope, NodeMetrics, RiskLevel, SpreadGraph, Spreader};

pub use export::{
    edges_to_csv, export_file_name, posts_to_csv, summary_report, ExportKind, ReportOptions,
};

pub use config::{ConfigError, ConfigResult, GuardConfig};

pub use session::{Dashboard, DashboardView};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
