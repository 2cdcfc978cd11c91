//! Governor filter and free-text search.
//!
//! Both operations return a [`Cow`]: the no-op cases (the `All` selector,
//! an empty query) borrow the input unchanged, everything else builds a new
//! owned subsequence. Input order is always preserved.

use std::borrow::Cow;
use std::collections::BTreeSet;

use massacre_map_analytics_models::GovernorSelector;
use massacre_map_incident_models::IncidentRecord;

/// Keeps the records whose governor equals the selected name exactly.
#[must_use]
pub fn filter_by_governor<'a>(
    records: &'a [IncidentRecord],
    selector: &GovernorSelector,
) -> Cow<'a, [IncidentRecord]> {
    match selector {
        GovernorSelector::All => Cow::Borrowed(records),
        GovernorSelector::Governor(name) => Cow::Owned(
            records
                .iter()
                .filter(|r| r.governor == *name)
                .cloned()
                .collect(),
        ),
    }
}

/// Keeps the records whose name, governor, or location contains `query`,
/// ignoring case.
///
/// Matching is plain substring matching on lowercased text. The query is
/// used as given, including surrounding whitespace.
#[must_use]
pub fn search<'a>(records: &'a [IncidentRecord], query: &str) -> Cow<'a, [IncidentRecord]> {
    if query.is_empty() {
        return Cow::Borrowed(records);
    }

    let needle = query.to_lowercase();
    Cow::Owned(
        records
            .iter()
            .filter(|r| matches_query(r, &needle))
            .cloned()
            .collect(),
    )
}

/// `needle` must already be lowercase.
fn matches_query(record: &IncidentRecord, needle: &str) -> bool {
    [&record.name, &record.governor, &record.location]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Distinct non-empty governor names, sorted, for the selector drop-down.
#[must_use]
pub fn governors(records: &[IncidentRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.governor.as_str())
        .filter(|g| !g.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
