//! Summary statistics over a record collection.

use std::collections::BTreeSet;

use massacre_map_analytics_models::IncidentStatistics;
use massacre_map_incident_models::IncidentRecord;

/// Computes the dashboard statistics for `records`.
///
/// An empty collection is a normal state (an over-narrow filter reaches
/// it) and yields all-zero statistics; the average is defined as `0`.
///
/// The per-incident average counts only state action and militia victims.
/// Police and disappearance victims are part of `total_victims` but not of
/// the average.
#[must_use]
pub fn compute_statistics(records: &[IncidentRecord]) -> IncidentStatistics {
    if records.is_empty() {
        return IncidentStatistics::default();
    }

    let total_massacres = records.len() as u64;
    let total_victims = records.iter().map(IncidentRecord::total_victims).sum();
    let minor_victims = records.iter().map(|r| u64::from(r.minors)).sum();
    let averaged: u64 = records
        .iter()
        .map(|r| u64::from(r.state_action) + u64::from(r.militia))
        .sum();

    let (first_year, last_year) = year_range(records);
    let years_covered = match (first_year, last_year) {
        (Some(first), Some(last)) => u32::try_from(last - first).unwrap_or(0),
        _ => 0,
    };

    let governors_involved = records
        .iter()
        .map(|r| r.governor.as_str())
        .filter(|g| !g.is_empty())
        .collect::<BTreeSet<_>>()
        .len() as u64;

    IncidentStatistics {
        total_massacres,
        total_victims,
        minor_victims,
        avg_victims_per_incident: round_half_up(averaged, total_massacres),
        years_covered,
        governors_involved,
        first_year,
        last_year,
    }
}

/// Earliest and latest parsable year. Undated records are skipped.
fn year_range(records: &[IncidentRecord]) -> (Option<i32>, Option<i32>) {
    let mut years = records.iter().filter_map(IncidentRecord::year);
    let Some(first) = years.next() else {
        return (None, None);
    };

    let (min, max) = years.fold((first, first), |(min, max), y| (min.min(y), max.max(y)));
    (Some(min), Some(max))
}

/// `round(numerator / denominator)` with halves rounded up. `denominator`
/// must be non-zero.
const fn round_half_up(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}
