//! Plain-text summary report
//!
//! Section order is fixed: title, overview, platform breakdown, category
//! breakdown, status breakdown, top spreaders.

use crate::algo::{SpreadGraph, REPORT_SPREADER_LIMIT};
use crate::filter::WorkingSet;
use crate::metrics::{counts_by_key, overview, CountKey, KeyCount, DEFAULT_HIGH_RISK_THRESHOLD};
use crate::records::TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use std::fmt::Write;

/// Knobs of the summary report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub high_risk_threshold: u8,
    pub spreader_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            high_risk_threshold: DEFAULT_HIGH_RISK_THRESHOLD,
            spreader_limit: REPORT_SPREADER_LIMIT,
        }
    }
}

/// Render the summary report
pub fn summary_report(
    ws: &WorkingSet<'_>,
    graph: &SpreadGraph,
    generated_at: NaiveDateTime,
    options: &ReportOptions,
) -> String {
    let o = overview(ws, options.high_risk_threshold);
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "MISINFORMATION TRACKING SUMMARY REPORT");
    let _ = writeln!(out, "Generated: {}", generated_at.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out);
    let _ = writeln!(out, "OVERVIEW:");
    let _ = writeln!(out, "- Total Posts Tracked: {}", o.total_posts);
    let _ = writeln!(
        out,
        "- High Risk Posts (>{}): {}",
        options.high_risk_threshold, o.high_risk_posts
    );
    let _ = writeln!(out, "- Archived Posts: {}", o.archived_posts);
    let _ = writeln!(out, "- Active Spreaders: {}", o.active_spreaders);

    for (title, key) in [
        ("PLATFORM BREAKDOWN", CountKey::Platform),
        ("CATEGORY BREAKDOWN", CountKey::Category),
        ("STATUS BREAKDOWN", CountKey::Status),
    ] {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", title);
        write_counts(&mut out, &counts_by_key(ws, key));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "TOP SUPER SPREADERS:");
    let spreaders = graph.top_spreaders(options.spreader_limit);
    if spreaders.is_empty() {
        let _ = writeln!(out, "(none)");
    } else {
        let id_width = spreaders
            .iter()
            .map(|s| s.user_id.len())
            .chain(std::iter::once("User ID".len()))
            .max()
            .unwrap_or(0);
        let _ = writeln!(
            out,
            "{:<id_width$}  {:>11}  {:>10}  Risk Level",
            "User ID", "Connections", "Centrality"
        );
        for s in &spreaders {
            let _ = writeln!(
                out,
                "{:<id_width$}  {:>11}  {:>10.3}  {}",
                s.user_id, s.connections, s.centrality, s.risk
            );
        }
    }

    out
}

fn write_counts(out: &mut String, rows: &[KeyCount]) {
    if rows.is_empty() {
        let _ = writeln!(out, "(none)");
        return;
    }
    let width = rows.iter().map(|r| r.key.chars().count()).max().unwrap_or(0);
    for row in rows {
        let _ = writeln!(out, "{:<width$}  {}", row.key, row.count);
    }
}
