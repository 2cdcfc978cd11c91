#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the massacre map server.
//!
//! Records, statistics and timeline buckets are served as their model
//! types directly; this crate only adds the envelope types the API needs
//! on top of them.

use massacre_map_analytics_models::GovernorSelector;
use massacre_map_incident_models::VictimCategory;
use serde::{Deserialize, Serialize};

/// Query parameters shared by the incidents, statistics and timeline
/// endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionParams {
    /// Governor name, or `"all"`. Missing means `"all"`.
    pub governor: Option<String>,
    /// Free-text search query. Missing means no search.
    pub q: Option<String>,
}

impl SelectionParams {
    /// Governor selection described by these parameters.
    #[must_use]
    pub fn selector(&self) -> GovernorSelector {
        self.governor
            .clone()
            .map_or(GovernorSelector::All, GovernorSelector::from)
    }

    /// Search query described by these parameters.
    #[must_use]
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// A victim category entry for the legend and tooltips.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCategory {
    /// Category key used in record fields (e.g. `"stateAction"`).
    pub key: VictimCategory,
    /// Human-readable label.
    pub label: String,
    /// Whether the category is a layer of the stacked timeline.
    pub stacked: bool,
}

impl From<VictimCategory> for ApiCategory {
    fn from(category: VictimCategory) -> Self {
        Self {
            key: category,
            label: category.label().to_string(),
            stacked: VictimCategory::STACKED.contains(&category),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of records in the loaded dataset.
    pub records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_params_select_everything() {
        let params = SelectionParams::default();
        assert!(params.selector().is_all());
        assert_eq!(params.query(), "");
    }

    #[test]
    fn params_map_to_selection() {
        let params = SelectionParams {
            governor: Some("Cláudio Castro".to_string()),
            q: Some("jacarezinho".to_string()),
        };
        assert_eq!(
            params.selector(),
            GovernorSelector::Governor("Cláudio Castro".to_string())
        );
        assert_eq!(params.query(), "jacarezinho");

        let all = SelectionParams {
            governor: Some("all".to_string()),
            q: None,
        };
        assert!(all.selector().is_all());
    }

    #[test]
    fn minors_are_not_stacked() {
        let category = ApiCategory::from(VictimCategory::Minors);
        assert!(!category.stacked);
        assert!(ApiCategory::from(VictimCategory::Police).stacked);

        let json = serde_json::to_value(ApiCategory::from(VictimCategory::StateAction)).unwrap();
        assert_eq!(json["key"], "stateAction");
    }
}
