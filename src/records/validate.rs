//! Row validation: raw table rows into typed records
//!
//! Rows that cannot be typed, or that break a hard invariant, are dropped
//! and reported. Soft invariants (the archive link pairing) are reported but
//! the row is kept.

use super::table::{RawRow, RawTable, TableError};
use super::types::{Edge, Post, Table, EDGE_COLUMNS, POST_COLUMNS};
use chrono::{NaiveDate, NaiveDateTime};
use rustc_hash::FxHashSet;
use serde::Serialize;
use thiserror::Error;

/// What was wrong with a single row
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    #[error("missing value for '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid value '{value}' for '{field}'")]
    InvalidField { field: &'static str, value: String },

    #[error("misinfo_score {score} outside 0..=100")]
    ScoreOutOfRange { score: i64 },

    #[error("edge weight {weight} is below 1")]
    WeightBelowOne { weight: f64 },

    #[error("duplicate post_id '{post_id}'")]
    DuplicatePostId { post_id: String },

    #[error("archive_url present={has_url} does not match archived={archived}")]
    ArchiveUrlMismatch { archived: bool, has_url: bool },
}

/// A non-fatal schema problem found while loading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaViolation {
    pub table: Table,
    /// Line the offending row starts on
    pub line: usize,
    pub kind: ViolationKind,
    /// Whether the row was left out of the store
    pub dropped: bool,
}

/// Timestamp layouts accepted on load, most specific first
const TIMESTAMP_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a timestamp cell
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse a boolean cell
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// 2^63, the first float past `i64::MAX`
const I64_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Parse an integer cell, tolerating a `.0` suffix from float-typed exports.
///
/// Values that do not fit an `i64` are rejected rather than saturated.
fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .filter(|f| (-I64_FLOAT_LIMIT..I64_FLOAT_LIMIT).contains(f))
            .map(|f| f as i64)
    })
}

struct RowReader<'a> {
    row: &'a RawRow,
    columns: &'a [usize],
}

impl<'a> RowReader<'a> {
    fn text(&self, slot: usize) -> &'a str {
        self.row.get(self.columns[slot]).unwrap_or("")
    }

    fn required(&self, slot: usize, field: &'static str) -> Result<&'a str, ViolationKind> {
        let value = self.text(slot).trim();
        if value.is_empty() {
            Err(ViolationKind::MissingField { field })
        } else {
            Ok(value)
        }
    }

    fn parsed<T>(
        &self,
        slot: usize,
        field: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, ViolationKind> {
        let value = self.required(slot, field)?;
        parse(value).ok_or_else(|| ViolationKind::InvalidField {
            field,
            value: value.to_string(),
        })
    }

    fn count(&self, slot: usize, field: &'static str) -> Result<u64, ViolationKind> {
        let n = self.parsed(slot, field, parse_integer)?;
        u64::try_from(n).map_err(|_| ViolationKind::InvalidField {
            field,
            value: n.to_string(),
        })
    }
}

fn post_from_row(reader: &RowReader<'_>) -> Result<Post, ViolationKind> {
    let score = reader.parsed(7, "misinfo_score", parse_integer)?;
    let misinfo_score = u8::try_from(score)
        .ok()
        .filter(|s| *s <= 100)
        .ok_or(ViolationKind::ScoreOutOfRange { score })?;

    let archive_url = Some(reader.text(13).trim())
        .filter(|u| !u.is_empty())
        .map(str::to_string);

    Ok(Post {
        post_id: reader.required(0, "post_id")?.to_string(),
        platform: reader.required(1, "platform")?.to_string(),
        category: reader.required(2, "category")?.to_string(),
        content: reader.text(3).to_string(),
        username: reader.text(4).trim().to_string(),
        user_id: reader.required(5, "user_id")?.to_string(),
        timestamp: reader.parsed(6, "timestamp", parse_timestamp)?,
        misinfo_score,
        shares: reader.count(8, "shares")?,
        likes: reader.count(9, "likes")?,
        comments: reader.count(10, "comments")?,
        status: reader.text(11).trim().to_string(),
        archived: reader.parsed(12, "archived", parse_bool)?,
        archive_url,
    })
}

fn edge_from_row(reader: &RowReader<'_>) -> Result<Edge, ViolationKind> {
    let weight = reader.parsed(2, "weight", |v| {
        v.parse::<f64>().ok().filter(|w| w.is_finite())
    })?;
    if weight < 1.0 {
        return Err(ViolationKind::WeightBelowOne { weight });
    }

    Ok(Edge {
        source: reader.required(0, "source")?.to_string(),
        target: reader.required(1, "target")?.to_string(),
        weight,
    })
}

/// Type every row of the posts table
pub fn posts_from_table(table: &RawTable) -> Result<(Vec<Post>, Vec<SchemaViolation>), TableError> {
    let columns = table.require_columns(&POST_COLUMNS)?;
    let mut posts = Vec::with_capacity(table.rows.len());
    let mut violations = Vec::new();
    let mut seen: FxHashSet<String> = FxHashSet::default();

    for row in &table.rows {
        let reader = RowReader { row, columns: &columns };
        let violation = |kind, dropped| SchemaViolation {
            table: Table::Posts,
            line: row.line,
            kind,
            dropped,
        };

        let post = match post_from_row(&reader) {
            Ok(post) => post,
            Err(kind) => {
                violations.push(violation(kind, true));
                continue;
            }
        };

        if !seen.insert(post.post_id.clone()) {
            violations.push(violation(
                ViolationKind::DuplicatePostId { post_id: post.post_id },
                true,
            ));
            continue;
        }

        let has_url = post.archive_url.is_some();
        if post.archived != has_url {
            violations.push(violation(
                ViolationKind::ArchiveUrlMismatch {
                    archived: post.archived,
                    has_url,
                },
                false,
            ));
        }

        posts.push(post);
    }

    Ok((posts, violations))
}

/// Type every row of the edges table
pub fn edges_from_table(table: &RawTable) -> Result<(Vec<Edge>, Vec<SchemaViolation>), TableError> {
    let columns = table.require_columns(&EDGE_COLUMNS)?;
    let mut edges = Vec::with_capacity(table.rows.len());
    let mut violations = Vec::new();

    for row in &table.rows {
        let reader = RowReader { row, columns: &columns };
        match edge_from_row(&reader) {
            Ok(edge) => edges.push(edge),
            Err(kind) => violations.push(SchemaViolation {
                table: Table::Edges,
                line: row.line,
                kind,
                dropped: true,
            }),
        }
    }

    Ok((edges, violations))
}
