//! Group-by counts over a working set

use crate::filter::WorkingSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical post fields that can be counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountKey {
    Platform,
    Category,
    Status,
}

impl CountKey {
    /// Column name of the key in the posts table
    pub fn column(&self) -> &'static str {
        match self {
            CountKey::Platform => "platform",
            CountKey::Category => "category",
            CountKey::Status => "status",
        }
    }
}

impl fmt::Display for CountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// One row of a count table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

/// Count posts per distinct value, most frequent first
fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<KeyCount> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut rows: Vec<KeyCount> = counts
        .into_iter()
        .map(|(key, count)| KeyCount {
            key: key.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    rows
}

/// Posts per distinct value of `key`, ordered by descending count then
/// ascending value
pub fn counts_by_key(ws: &WorkingSet<'_>, key: CountKey) -> Vec<KeyCount> {
    tally(ws.iter().map(|p| match key {
        CountKey::Platform => p.platform.as_str(),
        CountKey::Category => p.category.as_str(),
        CountKey::Status => p.status.as_str(),
    }))
}

/// The `n` most repeated content strings
pub fn top_topics(ws: &WorkingSet<'_>, n: usize) -> Vec<KeyCount> {
    let mut rows = tally(ws.iter().map(|p| p.content.as_str()));
    rows.truncate(n);
    rows
}
