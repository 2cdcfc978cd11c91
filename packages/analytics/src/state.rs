//! Explicit dashboard state.
//!
//! A [`DashboardState`] is a value: changing the governor selection or the
//! search query produces a new state whose active collection has been
//! rebuilt from the full dataset. Nothing is mutated in place, so states can
//! be shared across threads and read concurrently.

use std::sync::Arc;

use massacre_map_analytics_models::{GovernorSelector, IncidentStatistics, TimelineBucket};
use massacre_map_incident_models::IncidentRecord;

use crate::filter::{filter_by_governor, search};
use crate::stats::compute_statistics;
use crate::timeline::yearly_timeline;

/// The loaded dataset plus the current selection and its result.
#[derive(Debug, Clone)]
pub struct DashboardState {
    dataset: Arc<[IncidentRecord]>,
    selector: GovernorSelector,
    query: String,
    active: Arc<[IncidentRecord]>,
}

impl DashboardState {
    /// Creates an unfiltered state over `dataset`.
    #[must_use]
    pub fn new(dataset: Arc<[IncidentRecord]>) -> Self {
        Self {
            active: Arc::clone(&dataset),
            dataset,
            selector: GovernorSelector::All,
            query: String::new(),
        }
    }

    /// Returns a new state with `selector` applied and the current query
    /// kept.
    #[must_use]
    pub fn with_governor(&self, selector: GovernorSelector) -> Self {
        Self::select(Arc::clone(&self.dataset), selector, self.query.clone())
    }

    /// Returns a new state with `query` applied and the current governor
    /// selection kept.
    #[must_use]
    pub fn with_query(&self, query: &str) -> Self {
        Self::select(
            Arc::clone(&self.dataset),
            self.selector.clone(),
            query.to_string(),
        )
    }

    /// Applies the governor filter, then the search, to the full dataset.
    #[must_use]
    pub fn select(
        dataset: Arc<[IncidentRecord]>,
        selector: GovernorSelector,
        query: String,
    ) -> Self {
        let active = if selector.is_all() && query.is_empty() {
            Arc::clone(&dataset)
        } else {
            let by_governor = filter_by_governor(&dataset, &selector);
            Arc::from(search(&by_governor, &query).into_owned())
        };

        log::debug!(
            "Selection governor={selector} query={query:?}: {} of {} records",
            active.len(),
            dataset.len()
        );

        Self {
            dataset,
            selector,
            query,
            active,
        }
    }

    /// Full, unfiltered dataset.
    #[must_use]
    pub fn dataset(&self) -> &[IncidentRecord] {
        &self.dataset
    }

    /// Records matching the current selection, in source order.
    #[must_use]
    pub fn active(&self) -> &[IncidentRecord] {
        &self.active
    }

    /// Current governor selection.
    #[must_use]
    pub const fn selector(&self) -> &GovernorSelector {
        &self.selector
    }

    /// Current search query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Statistics over the active collection.
    #[must_use]
    pub fn statistics(&self) -> IncidentStatistics {
        compute_statistics(&self.active)
    }

    /// Yearly timeline over the active collection.
    #[must_use]
    pub fn timeline(&self) -> Vec<TimelineBucket> {
        yearly_timeline(&self.active)
    }
}
