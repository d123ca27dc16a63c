//! Super-spreader ranking

use super::SpreadGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows of the spreader table
pub const DEFAULT_SPREADER_LIMIT: usize = 10;

/// Rows of the spreader section in the summary report
pub const REPORT_SPREADER_LIMIT: usize = 5;

/// Risk label derived from a user's connection count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// High above 3 connections, Medium above 1, otherwise Low
    pub fn from_degree(degree: usize) -> Self {
        if degree > 3 {
            RiskLevel::High
        } else if degree > 1 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the spreader ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spreader {
    pub user_id: String,
    pub connections: usize,
    pub centrality: f64,
    pub risk: RiskLevel,
}

impl SpreadGraph {
    /// The `n` best-connected users, by degree descending then user id ascending
    pub fn top_spreaders(&self, n: usize) -> Vec<Spreader> {
        let mut ranked: Vec<_> = self.nodes().iter().collect();
        ranked.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.user_id.cmp(&b.user_id)));

        ranked
            .into_iter()
            .take(n)
            .map(|node| Spreader {
                user_id: node.user_id.clone(),
                connections: node.degree,
                centrality: node.centrality,
                risk: RiskLevel::from_degree(node.degree),
            })
            .collect()
    }
}
