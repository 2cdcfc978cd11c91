//! Fills in coordinates for records whose source coordinates are invalid.

use std::time::Duration;

use massacre_map_incident_models::IncidentRecord;

use crate::{Geocoder, geocode_first};

/// Returns a copy of `records` where each record without a valid position
/// and with a non-empty location has been geocoded from that location.
///
/// Records that already have a position, have no location, or miss in
/// every geocoder are copied unchanged. Waits `delay` between lookups.
pub async fn enrich_coordinates(
    records: &[IncidentRecord],
    geocoders: &[Box<dyn Geocoder>],
    delay: Duration,
) -> Vec<IncidentRecord> {
    let mut enriched = Vec::with_capacity(records.len());
    let mut lookups = 0_usize;
    let mut resolved = 0_usize;

    for record in records {
        let location = record.location.trim();
        if record.position().is_some() || location.is_empty() {
            enriched.push(record.clone());
            continue;
        }

        if lookups > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        lookups += 1;

        let mut record = record.clone();
        if let Some(point) = geocode_first(geocoders, location).await {
            record.lat = Some(point.latitude);
            record.lon = Some(point.longitude);
            resolved += 1;
        }
        enriched.push(record);
    }

    log::info!("Geocoded {resolved} of {lookups} records without coordinates");

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedGeocoder;

    fn record(location: &str, lat: Option<f64>, lon: Option<f64>) -> IncidentRecord {
        IncidentRecord {
            location: location.to_string(),
            lat,
            lon,
            ..IncidentRecord::default()
        }
    }

    fn geocoders() -> Vec<Box<dyn Geocoder>> {
        vec![Box::new(FixedGeocoder {
            id: "fixed",
            answers: vec![("Maré", (-22.86, -43.24)), ("Placed", (1.0, 1.0))],
            fail: false,
        })]
    }

    #[tokio::test]
    async fn fills_missing_positions() {
        let records = [
            record("Maré", None, None),
            record("Maré", Some(-22.0), None),
        ];

        let enriched = enrich_coordinates(&records, &geocoders(), Duration::ZERO).await;
        assert_eq!(enriched[0].position(), Some((-22.86, -43.24)));
        assert_eq!(enriched[1].position(), Some((-22.86, -43.24)));
        assert!(records[0].position().is_none());
    }

    #[tokio::test]
    async fn keeps_valid_and_unresolvable_records() {
        let records = [
            record("Placed", Some(-22.9), Some(-43.2)),
            record("", None, None),
            record("Unknown favela", None, None),
        ];

        let enriched = enrich_coordinates(&records, &geocoders(), Duration::ZERO).await;
        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].position(), Some((-22.9, -43.2)));
        assert!(enriched[1].position().is_none());
        assert!(enriched[2].position().is_none());
    }
}
