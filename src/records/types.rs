//! Core record types for the tracking dataset

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column names of the posts table, in canonical order
pub const POST_COLUMNS: [&str; 14] = [
    "post_id",
    "platform",
    "category",
    "content",
    "username",
    "user_id",
    "timestamp",
    "misinfo_score",
    "shares",
    "likes",
    "comments",
    "status",
    "archived",
    "archive_url",
];

/// Column names of the edges table, in canonical order
pub const EDGE_COLUMNS: [&str; 3] = ["source", "target", "weight"];

/// Canonical timestamp rendering used by exports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One observed social-media post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    pub platform: String,
    pub category: String,
    pub content: String,
    pub username: String,
    pub user_id: String,
    pub timestamp: NaiveDateTime,
    /// Misinformation score in `0..=100`
    pub misinfo_score: u8,
    pub shares: u64,
    pub likes: u64,
    pub comments: u64,
    /// Verification state (e.g. "Debunked", "Under Review")
    pub status: String,
    pub archived: bool,
    /// Set only when `archived` is true
    pub archive_url: Option<String>,
}

impl Post {
    /// Whether the post sits strictly above the given risk threshold
    pub fn is_high_risk(&self, threshold: u8) -> bool {
        self.misinfo_score > threshold
    }

    /// Whether a usable archive link exists
    pub fn has_archive(&self) -> bool {
        self.archived && self.archive_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// An observed sharing relationship between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Count of shared content instances, at least 1
    pub weight: f64,
}

/// Which source table a record or violation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Posts,
    Edges,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::Posts => write!(f, "posts"),
            Table::Edges => write!(f, "edges"),
        }
    }
}
