//! Dashboard configuration
//!
//! Every field has a default matching the stock dashboard, so an empty or
//! partial YAML file is valid.

use crate::algo::{GraphScope, DEFAULT_SPREADER_LIMIT, REPORT_SPREADER_LIMIT};
use crate::export::ReportOptions;
use crate::filter::DEFAULT_MIN_SCORE;
use crate::metrics::{DEFAULT_HIGH_RISK_THRESHOLD, DEFAULT_HISTOGRAM_BINS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Directory holding the two source tables
    pub data_dir: PathBuf,
    pub posts_file: String,
    pub edges_file: String,
    /// Minimum score of the default filter
    pub default_min_score: u8,
    /// Scores strictly above this are high risk
    pub high_risk_threshold: u8,
    pub histogram_bins: usize,
    pub spreader_limit: usize,
    pub report_spreader_limit: usize,
    pub recovery_queue_size: usize,
    pub topic_count: usize,
    pub engagement_count: usize,
    /// Posts shown by the posts listing
    pub post_page_size: usize,
    pub graph_scope: GraphScope,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            posts_file: "sample_posts.csv".to_string(),
            edges_file: "network_edges.csv".to_string(),
            default_min_score: DEFAULT_MIN_SCORE,
            high_risk_threshold: DEFAULT_HIGH_RISK_THRESHOLD,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            spreader_limit: DEFAULT_SPREADER_LIMIT,
            report_spreader_limit: REPORT_SPREADER_LIMIT,
            recovery_queue_size: 5,
            topic_count: 7,
            engagement_count: 10,
            post_page_size: 20,
            graph_scope: GraphScope::Full,
        }
    }
}

impl GuardConfig {
    /// Read a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse YAML text
    pub fn from_yaml(text: &str) -> ConfigResult<Self> {
        // An empty document deserializes as unit, not as a mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_min_score > 100 {
            return Err(ConfigError::Invalid(format!(
                "default_min_score {} exceeds 100",
                self.default_min_score
            )));
        }
        if self.high_risk_threshold > 100 {
            return Err(ConfigError::Invalid(format!(
                "high_risk_threshold {} exceeds 100",
                self.high_risk_threshold
            )));
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::Invalid("histogram_bins must be positive".to_string()));
        }
        Ok(())
    }

    pub fn posts_path(&self) -> PathBuf {
        self.data_dir.join(&self.posts_file)
    }

    pub fn edges_path(&self) -> PathBuf {
        self.data_dir.join(&self.edges_file)
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            high_risk_threshold: self.high_risk_threshold,
            spreader_limit: self.report_spreader_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GuardConfig::default();
        assert_eq!(config.posts_path(), PathBuf::from("data/sample_posts.csv"));
        assert_eq!(config.edges_path(), PathBuf::from("data/network_edges.csv"));
        assert_eq!(config.default_min_score, 70);
        assert_eq!(config.high_risk_threshold, 85);
        assert_eq!(config.histogram_bins, 15);
        assert_eq!(config.graph_scope, GraphScope::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config =
            GuardConfig::from_yaml("data_dir: /srv/guard\ngraph_scope: working_set\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/guard"));
        assert_eq!(config.graph_scope, GraphScope::WorkingSet);
        assert_eq!(config.spreader_limit, 10);

        assert_eq!(GuardConfig::from_yaml("").unwrap(), GuardConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            GuardConfig::from_yaml("default_min_score: 120\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GuardConfig::from_yaml("histogram_bins: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GuardConfig::from_yaml("graph_scope: everything\n"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guard.yaml");
        std::fs::write(&path, "topic_count: 3\n").unwrap();

        assert_eq!(GuardConfig::from_file(&path).unwrap().topic_count, 3);
        assert!(matches!(
            GuardConfig::from_file(dir.path().join("missing.yaml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
