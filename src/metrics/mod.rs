//! Metrics aggregator
//!
//! Read-only aggregates over a [`WorkingSet`](crate::filter::WorkingSet).
//! Nothing here keeps state between calls, and every function accepts an
//! empty working set, returning empty or zeroed results.

pub mod counts;
pub mod distribution;
pub mod overview;
pub mod ranking;
pub mod search;

pub use counts::{counts_by_key, top_topics, CountKey, KeyCount};
pub use distribution::{score_histogram, timeline, DayCount, HistogramBin, DEFAULT_HISTOGRAM_BINS};
pub use overview::{overview, Overview, DEFAULT_HIGH_RISK_THRESHOLD};
pub use ranking::{
    engagement, recovery_queue, sort_for_display, top_by_field, EngagementRow, RankField, SortKey,
};
pub use search::{search_content, truncate_label};
