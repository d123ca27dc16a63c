//! Record store: loads and validates the posts and edges tables
//!
//! The store is built once and never mutated afterwards. Downstream
//! components borrow from it; share it across callers with `Arc`.

pub mod table;
pub mod types;
pub mod validate;

pub use table::{RawRow, RawTable, TableError};
pub use types::{Edge, Post, Table, EDGE_COLUMNS, POST_COLUMNS, TIMESTAMP_FORMAT};
pub use validate::{SchemaViolation, ViolationKind};

use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Fatal record store errors
#[derive(Error, Debug)]
pub enum RecordError {
    /// A source table is missing, unreadable or structurally malformed
    #[error("Data unavailable: {table} table '{source_name}': {reason}")]
    DataUnavailable {
        table: Table,
        source_name: String,
        reason: String,
    },
}

pub type RecordResult<T> = Result<T, RecordError>;

/// Non-fatal findings gathered while loading
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct LoadReport {
    pub violations: Vec<SchemaViolation>,
}

impl LoadReport {
    /// Number of rows left out of the store
    pub fn dropped_rows(&self) -> usize {
        self.violations.iter().filter(|v| v.dropped).count()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Immutable in-memory copy of both source tables
#[derive(Debug, Clone)]
pub struct RecordStore {
    posts: Vec<Post>,
    edges: Vec<Edge>,
    report: LoadReport,
}

impl RecordStore {
    /// Load both tables from disk
    pub fn load(posts_path: impl AsRef<Path>, edges_path: impl AsRef<Path>) -> RecordResult<Self> {
        let posts_path = posts_path.as_ref();
        let edges_path = edges_path.as_ref();
        info!("Loading records from {:?} and {:?}", posts_path, edges_path);

        let posts_text = read_source(Table::Posts, posts_path)?;
        let edges_text = read_source(Table::Edges, edges_path)?;

        let posts_name = posts_path.display().to_string();
        let edges_name = edges_path.display().to_string();
        Self::from_sources(
            (posts_name.as_str(), posts_text.as_str()),
            (edges_name.as_str(), edges_text.as_str()),
        )
    }

    /// Build from in-memory table text
    pub fn from_csv_strs(posts_csv: &str, edges_csv: &str) -> RecordResult<Self> {
        Self::from_sources(("<posts>", posts_csv), ("<edges>", edges_csv))
    }

    fn from_sources(posts: (&str, &str), edges: (&str, &str)) -> RecordResult<Self> {
        let unavailable = |table, source_name: &str, err: TableError| RecordError::DataUnavailable {
            table,
            source_name: source_name.to_string(),
            reason: err.to_string(),
        };

        let posts_table =
            RawTable::parse(posts.1).map_err(|e| unavailable(Table::Posts, posts.0, e))?;
        let edges_table =
            RawTable::parse(edges.1).map_err(|e| unavailable(Table::Edges, edges.0, e))?;

        let (posts_vec, mut violations) = validate::posts_from_table(&posts_table)
            .map_err(|e| unavailable(Table::Posts, posts.0, e))?;
        let (edges_vec, edge_violations) = validate::edges_from_table(&edges_table)
            .map_err(|e| unavailable(Table::Edges, edges.0, e))?;
        violations.extend(edge_violations);

        for v in &violations {
            warn!(
                "Schema violation in {} line {}: {} ({})",
                v.table,
                v.line,
                v.kind,
                if v.dropped { "row dropped" } else { "row kept" }
            );
        }

        info!(
            "Loaded {} posts and {} edges ({} rows dropped)",
            posts_vec.len(),
            edges_vec.len(),
            violations.iter().filter(|v| v.dropped).count()
        );

        Ok(Self {
            posts: posts_vec,
            edges: edges_vec,
            report: LoadReport { violations },
        })
    }

    /// Build directly from typed records (no validation)
    pub fn from_records(posts: Vec<Post>, edges: Vec<Edge>) -> Self {
        Self {
            posts,
            edges,
            report: LoadReport::default(),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Look up a post by id
    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.post_id == post_id)
    }
}

fn read_source(table: Table, path: &Path) -> RecordResult<String> {
    std::fs::read_to_string(path).map_err(|e| RecordError::DataUnavailable {
        table,
        source_name: path.display().to_string(),
        reason: e.to_string(),
    })
}
