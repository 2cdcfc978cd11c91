#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived analytics types for the massacre dashboard.
//!
//! Everything in this crate is computed from a record collection on demand
//! and never stored.

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Summary statistics over a record collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentStatistics {
    /// Number of incidents.
    pub total_massacres: u64,
    /// Sum of state action, militia, police and disappearance victims.
    pub total_victims: u64,
    /// Sum of victims under 18.
    pub minor_victims: u64,
    /// `round((state action + militia) / incidents)`. Police and
    /// disappearance victims are not part of this average. `0` when there
    /// are no incidents.
    pub avg_victims_per_incident: u64,
    /// Latest year minus earliest year among parsable dates.
    pub years_covered: u32,
    /// Distinct governor names. A record whose governor cell is empty or
    /// missing is not attributed to any governor and is not counted.
    pub governors_involved: u64,
    /// Earliest parsable year, if any.
    pub first_year: Option<i32>,
    /// Latest parsable year, if any.
    pub last_year: Option<i32>,
}

/// Governor filter selection.
///
/// Parses from the drop-down value: `"all"` (or an empty string) is the
/// no-filter sentinel, anything else selects that governor verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GovernorSelector {
    /// No filter.
    #[default]
    All,
    /// Exact, case-sensitive governor name.
    Governor(String),
}

impl GovernorSelector {
    /// String form of [`Self::All`].
    pub const ALL: &'static str = "all";

    /// Returns `true` for the no-filter sentinel.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for GovernorSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.is_empty() || s == Self::ALL {
            Self::All
        } else {
            Self::Governor(s.to_string())
        })
    }
}

impl From<String> for GovernorSelector {
    fn from(s: String) -> Self {
        if s.is_empty() || s == Self::ALL {
            Self::All
        } else {
            Self::Governor(s)
        }
    }
}

impl From<GovernorSelector> for String {
    fn from(selector: GovernorSelector) -> Self {
        match selector {
            GovernorSelector::All => GovernorSelector::ALL.to_string(),
            GovernorSelector::Governor(name) => name,
        }
    }
}

impl std::fmt::Display for GovernorSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Governor(name) => f.write_str(name),
        }
    }
}

/// One year of the stacked victim timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBucket {
    /// Calendar year.
    pub year: i32,
    /// Incidents dated in this year.
    pub incidents: u64,
    /// Victims of state or police action.
    pub state_action: u64,
    /// Victims of faction or militia conflict.
    pub militia: u64,
    /// Police officers killed.
    pub police: u64,
    /// Enforced disappearances.
    pub disappearances: u64,
    /// Victims under 18.
    pub minors: u64,
}

impl TimelineBucket {
    /// Height of the stacked bar (every category except minors).
    #[must_use]
    pub const fn stacked_total(&self) -> u64 {
        self.state_action + self.militia + self.police + self.disappearances
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_sentinel() {
        assert_eq!("all".parse::<GovernorSelector>().unwrap(), GovernorSelector::All);
        assert_eq!("".parse::<GovernorSelector>().unwrap(), GovernorSelector::All);
    }

    #[test]
    fn governor_names_are_kept_verbatim() {
        let selector: GovernorSelector = "Sérgio Cabral".parse().unwrap();
        assert_eq!(
            selector,
            GovernorSelector::Governor("Sérgio Cabral".to_string())
        );
        assert_eq!(selector.to_string(), "Sérgio Cabral");

        let upper: GovernorSelector = "ALL".parse().unwrap();
        assert!(!upper.is_all());
    }

    #[test]
    fn selector_serializes_as_string() {
        let json = serde_json::to_value(GovernorSelector::All).unwrap();
        assert_eq!(json, serde_json::json!("all"));

        let selector: GovernorSelector =
            serde_json::from_value(serde_json::json!("Witzel")).unwrap();
        assert_eq!(selector, GovernorSelector::Governor("Witzel".to_string()));
    }

    #[test]
    fn default_statistics_are_zero() {
        let stats = IncidentStatistics::default();
        assert_eq!(stats.total_massacres, 0);
        assert_eq!(stats.avg_victims_per_incident, 0);
        assert!(stats.first_year.is_none());
    }

    #[test]
    fn statistics_serialize_camel_case() {
        let json = serde_json::to_value(IncidentStatistics::default()).unwrap();
        assert!(json.get("avgVictimsPerIncident").is_some());
        assert!(json.get("governorsInvolved").is_some());
    }
}
