//! Headline figures of a working set

use crate::filter::WorkingSet;
use serde::{Deserialize, Serialize};

/// Scores strictly above this count as high risk
pub const DEFAULT_HIGH_RISK_THRESHOLD: u8 = 85;

/// Summary counts shown above every other view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Overview {
    pub total_posts: usize,
    pub high_risk_posts: usize,
    pub archived_posts: usize,
    /// Distinct authors in the working set
    pub active_spreaders: usize,
}

pub fn overview(ws: &WorkingSet<'_>, high_risk_threshold: u8) -> Overview {
    Overview {
        total_posts: ws.len(),
        high_risk_posts: ws.iter().filter(|p| p.is_high_risk(high_risk_threshold)).count(),
        archived_posts: ws.iter().filter(|p| p.archived).count(),
        active_spreaders: ws.user_set().len(),
    }
}
