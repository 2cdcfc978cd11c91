//! Yearly stacked timeline.

use std::collections::BTreeMap;

use massacre_map_analytics_models::TimelineBucket;
use massacre_map_incident_models::IncidentRecord;

/// Sums victims per calendar year, ascending by year.
///
/// Only years that occur in the collection get a bucket. Records with an
/// unparsable date are left out.
#[must_use]
pub fn yearly_timeline(records: &[IncidentRecord]) -> Vec<TimelineBucket> {
    let mut buckets: BTreeMap<i32, TimelineBucket> = BTreeMap::new();

    for record in records {
        let Some(year) = record.year() else {
            continue;
        };

        let bucket = buckets.entry(year).or_insert_with(|| TimelineBucket {
            year,
            ..TimelineBucket::default()
        });
        bucket.incidents += 1;
        bucket.state_action += u64::from(record.state_action);
        bucket.militia += u64::from(record.militia);
        bucket.police += u64::from(record.police);
        bucket.disappearances += u64::from(record.disappearances);
        bucket.minors += u64::from(record.minors);
    }

    log::trace!("Built timeline with {} buckets", buckets.len());

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, state_action: u32, police: u32) -> IncidentRecord {
        IncidentRecord {
            date: date.to_string(),
            state_action,
            police,
            minors: 1,
            ..IncidentRecord::default()
        }
    }

    #[test]
    fn groups_by_year_ascending() {
        let records = [
            record("2021-05-06", 27, 1),
            record("23/07/1993", 8, 0),
            record("29/08/1993", 21, 0),
            record("unknown", 100, 100),
        ];

        let timeline = yearly_timeline(&records);
        let years: Vec<i32> = timeline.iter().map(|b| b.year).collect();
        assert_eq!(years, [1993, 2021]);

        assert_eq!(timeline[0].incidents, 2);
        assert_eq!(timeline[0].state_action, 29);
        assert_eq!(timeline[0].minors, 2);
        assert_eq!(timeline[1].stacked_total(), 28);
    }

    #[test]
    fn buckets_sum_to_dated_totals() {
        let records = [
            record("2001", 3, 1),
            record("2002", 4, 0),
            record("2001", 5, 2),
            record("", 9, 9),
        ];

        let timeline = yearly_timeline(&records);
        let stacked: u64 = timeline.iter().map(TimelineBucket::stacked_total).sum();
        let dated: u64 = records
            .iter()
            .filter(|r| r.year().is_some())
            .map(IncidentRecord::total_victims)
            .sum();
        assert_eq!(stacked, dated);
    }

    #[test]
    fn empty_collection_has_no_buckets() {
        assert!(yearly_timeline(&[]).is_empty());
    }
}
