//! Top-N rankings and display ordering
//!
//! All orderings here are descending and stable: posts that compare equal
//! keep their working-set order.

use crate::filter::WorkingSet;
use crate::records::Post;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Numeric post fields that can be ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankField {
    MisinfoScore,
    Shares,
    Likes,
    Comments,
}

impl RankField {
    pub fn value(&self, post: &Post) -> u64 {
        match self {
            RankField::MisinfoScore => u64::from(post.misinfo_score),
            RankField::Shares => post.shares,
            RankField::Likes => post.likes,
            RankField::Comments => post.comments,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            RankField::MisinfoScore => "misinfo_score",
            RankField::Shares => "shares",
            RankField::Likes => "likes",
            RankField::Comments => "comments",
        }
    }
}

/// Orderings offered by the posts table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Timestamp,
    MisinfoScore,
    Shares,
}

/// The `n` posts with the largest `field`
pub fn top_by_field<'a>(ws: &WorkingSet<'a>, field: RankField, n: usize) -> Vec<&'a Post> {
    let mut posts: Vec<&'a Post> = ws.posts().to_vec();
    posts.sort_by(|a, b| field.value(b).cmp(&field.value(a)));
    posts.truncate(n);
    posts
}

/// Whole working set reordered for display, newest/highest first
pub fn sort_for_display<'a>(ws: &WorkingSet<'a>, key: SortKey) -> WorkingSet<'a> {
    let mut posts: Vec<&'a Post> = ws.posts().to_vec();
    match key {
        SortKey::Timestamp => posts.sort_by_key(|p| std::cmp::Reverse(p.timestamp)),
        SortKey::MisinfoScore => posts.sort_by_key(|p| std::cmp::Reverse(p.misinfo_score)),
        SortKey::Shares => posts.sort_by_key(|p| std::cmp::Reverse(p.shares)),
    }
    WorkingSet::from_posts(posts)
}

/// First `n` posts still waiting for archival
pub fn recovery_queue<'a>(ws: &WorkingSet<'a>, n: usize) -> Vec<&'a Post> {
    ws.iter().filter(|p| !p.archived).take(n).collect()
}

/// Engagement figures of one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRow {
    pub post_id: String,
    pub content: String,
    pub shares: u64,
    pub likes: u64,
    pub comments: u64,
    pub timestamp: NaiveDateTime,
}

/// Engagement of the `n` most shared posts
pub fn engagement(ws: &WorkingSet<'_>, n: usize) -> Vec<EngagementRow> {
    top_by_field(ws, RankField::Shares, n)
        .into_iter()
        .map(|p| EngagementRow {
            post_id: p.post_id.clone(),
            content: p.content.clone(),
            shares: p.shares,
            likes: p.likes,
            comments: p.comments,
            timestamp: p.timestamp,
        })
        .collect()
}
