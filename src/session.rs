//! Dashboard session
//!
//! Loads the record store once and derives a fresh [`DashboardView`] for
//! every filter selection. Views borrow from the shared store and are
//! rebuilt wholesale, never patched.

use crate::algo::{analyze, GraphScope, SpreadGraph};
use crate::config::GuardConfig;
use crate::export::summary_report;
use crate::filter::{filter, FilterCriteria, WorkingSet};
use crate::metrics::{overview, Overview};
use crate::records::{RecordResult, RecordStore};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::debug;

/// Loaded dataset plus the configuration used to view it
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: Arc<RecordStore>,
    config: GuardConfig,
}

/// Everything derived from one filter selection
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub criteria: FilterCriteria,
    pub working_set: WorkingSet<'a>,
    pub overview: Overview,
    pub graph: SpreadGraph,
}

impl Dashboard {
    /// Load the tables named by `config`
    pub fn open(config: GuardConfig) -> RecordResult<Self> {
        let store = RecordStore::load(config.posts_path(), config.edges_path())?;
        Ok(Self::new(Arc::new(store), config))
    }

    pub fn new(store: Arc<RecordStore>, config: GuardConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Every platform and category, at the configured minimum score
    pub fn default_criteria(&self) -> FilterCriteria {
        FilterCriteria::all_of(self.store.posts(), self.config.default_min_score)
    }

    /// Filter, aggregate and build the sharing graph for `criteria`
    pub fn view(&self, criteria: FilterCriteria) -> DashboardView<'_> {
        let working_set = filter(self.store.posts(), &criteria);
        let overview = overview(&working_set, self.config.high_risk_threshold);

        let graph = match self.config.graph_scope {
            GraphScope::Full => analyze(self.store.edges(), None),
            GraphScope::WorkingSet => analyze(self.store.edges(), Some(&working_set.user_set())),
        };

        debug!(
            "View recomputed: {} of {} posts, {} graph nodes",
            working_set.len(),
            self.store.posts().len(),
            graph.node_count()
        );

        DashboardView {
            criteria,
            working_set,
            overview,
            graph,
        }
    }
}

impl DashboardView<'_> {
    /// Summary report with the dashboard's configured options
    pub fn summary_report(&self, config: &GuardConfig, generated_at: NaiveDateTime) -> String {
        summary_report(&self.working_set, &self.graph, generated_at, &config.report_options())
    }
}
