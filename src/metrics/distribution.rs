//! Timeline and score histogram

use crate::filter::WorkingSet;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 15;

/// Posts observed on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub posts: usize,
}

/// Posts per calendar date, chronologically
pub fn timeline(ws: &WorkingSet<'_>) -> Vec<DayCount> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for post in ws {
        *days.entry(post.timestamp.date()).or_insert(0) += 1;
    }
    days.into_iter()
        .map(|(date, posts)| DayCount { date, posts })
        .collect()
}

/// One equal-width score bin
///
/// Covers `[lower, upper)`, except the last bin which also includes `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of `misinfo_score` spanning the observed range.
///
/// When every score is the same the range is widened by half a point on each
/// side so the bins keep a positive width.
pub fn score_histogram(ws: &WorkingSet<'_>, bins: usize) -> Vec<HistogramBin> {
    if bins == 0 || ws.is_empty() {
        return Vec::new();
    }

    let (mut lo, mut hi) = ws.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
        let s = f64::from(p.misinfo_score);
        (lo.min(s), hi.max(s))
    });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for post in ws {
        let offset = (f64::from(post.misinfo_score) - lo) / width;
        let idx = (offset.floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect()
}
