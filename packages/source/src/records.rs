//! CSV text to [`IncidentRecord`] conversion.
//!
//! Rows are read as byte records and decoded lossily, with flexible row
//! lengths, so every row the CSV reader can delimit becomes exactly one
//! record. Missing columns read as empty cells.

use std::borrow::Cow;

use csv::ByteRecord;
use massacre_map_incident_models::IncidentRecord;

use crate::columns;
use crate::parsing::{parse_coordinate, parse_count};

/// Positions of the known columns within the header row.
#[derive(Debug, Clone, Copy, Default)]
struct ColumnIndex {
    name: Option<usize>,
    location: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
    date: Option<usize>,
    governor: Option<usize>,
    minors: Option<usize>,
    disappearances: Option<usize>,
    state_action: Option<usize>,
    militia: Option<usize>,
    police: Option<usize>,
    names: Option<usize>,
    notes: Option<usize>,
    link: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &ByteRecord) -> Self {
        let names: Vec<String> = headers
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_owned()
            })
            .collect();
        let find = |column: &str| names.iter().position(|n| n == column);

        let index = Self {
            name: find(columns::NAME),
            location: find(columns::LOCATION),
            latitude: find(columns::LATITUDE),
            longitude: find(columns::LONGITUDE),
            date: find(columns::DATE),
            governor: find(columns::GOVERNOR),
            minors: find(columns::MINORS),
            disappearances: find(columns::DISAPPEARANCES),
            state_action: find(columns::STATE_ACTION),
            militia: find(columns::MILITIA),
            police: find(columns::POLICE),
            names: find(columns::NAMES),
            notes: find(columns::NOTES),
            link: find(columns::LINK),
        };

        if index.latitude.is_none() || index.longitude.is_none() {
            log::warn!("Source has no Latitude/Longitude columns; no record will have a position");
        }

        index
    }

    fn record(&self, row: &ByteRecord) -> IncidentRecord {
        let text = |idx: Option<usize>| cell(row, idx).into_owned();

        IncidentRecord {
            name: text(self.name),
            location: text(self.location),
            lat: parse_coordinate(&cell(row, self.latitude)),
            lon: parse_coordinate(&cell(row, self.longitude)),
            date: text(self.date),
            governor: text(self.governor),
            minors: parse_count(&cell(row, self.minors)),
            disappearances: parse_count(&cell(row, self.disappearances)),
            state_action: parse_count(&cell(row, self.state_action)),
            militia: parse_count(&cell(row, self.militia)),
            police: parse_count(&cell(row, self.police)),
            names: text(self.names),
            notes: text(self.notes),
            link: text(self.link),
        }
    }
}

/// Reads one cell, treating an unknown column or a short row as empty.
fn cell(row: &ByteRecord, idx: Option<usize>) -> Cow<'_, str> {
    idx.and_then(|i| row.get(i))
        .map_or(Cow::Borrowed(""), String::from_utf8_lossy)
}

/// Parses the raw CSV text of the dataset into records, in source order.
///
/// Never fails: input without a header row yields an empty collection and
/// malformed cells fall back to their per-field defaults.
#[must_use]
pub fn parse_records(raw: &str) -> Vec<IncidentRecord> {
    parse_record_bytes(raw.as_bytes())
}

/// Byte-level variant of [`parse_records`] for input that may not be valid
/// UTF-8.
#[must_use]
pub fn parse_record_bytes(raw: &[u8]) -> Vec<IncidentRecord> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(raw);

    let columns = match reader.byte_headers() {
        Ok(headers) => ColumnIndex::from_headers(headers),
        Err(e) => {
            log::warn!("Failed to read CSV header row: {e}");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for result in reader.byte_records() {
        match result {
            Ok(row) => records.push(columns.record(&row)),
            Err(e) => log::warn!("Skipping unreadable CSV row: {e}"),
        }
    }

    log::debug!("Parsed {} records from CSV", records.len());

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Massacre Name,Location (Google Maps),Latitude,Longitude,Date,\
State Governor at the Time,Minor Victims (Under 18),Enforced Dissapearances,\
Victims of State/Police Action,Victims of Faction/Militia Conflict,\
Police Officers Victims,Names,Notes,WikiFavelas Source Link";

    #[test]
    fn parses_full_rows_in_order() {
        let raw = format!(
            "{HEADER}\n\
             Chacina da Candelária,\"Candelária, Rio de Janeiro\",-22.9008,-43.1772,23/07/1993,\
             Leonel Brizola,6,0,8,0,0,\"A, B\",Night attack,https://wikifavelas.com.br/a\n\
             Chacina de Vigário Geral,Vigário Geral,-22.8057,-43.3058,29/08/1993,\
             Leonel Brizola,0,0,21,0,0,,,\n"
        );

        let records = parse_records(&raw);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.name, "Chacina da Candelária");
        assert_eq!(first.location, "Candelária, Rio de Janeiro");
        assert_eq!(first.position(), Some((-22.9008, -43.1772)));
        assert_eq!(first.date, "23/07/1993");
        assert_eq!(first.governor, "Leonel Brizola");
        assert_eq!(first.minors, 6);
        assert_eq!(first.state_action, 8);
        assert_eq!(first.names, "A, B");
        assert_eq!(first.notes, "Night attack");
        assert_eq!(first.link, "https://wikifavelas.com.br/a");

        let second = &records[1];
        assert_eq!(second.name, "Chacina de Vigário Geral");
        assert_eq!(second.state_action, 21);
        assert!(second.names.is_empty());
        assert!(second.link.is_empty());
    }

    #[test]
    fn malformed_cells_use_defaults() {
        let raw = "Latitude,Minor Victims (Under 18),Victims of State/Police Action\nabc,,5\n";

        let records = parse_records(raw);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert!(record.lat.is_none());
        assert_eq!(record.minors, 0);
        assert_eq!(record.state_action, 5);
    }

    #[test]
    fn coordinates_with_trailing_text_keep_their_number() {
        let raw = "Latitude,Longitude,Victims of State/Police Action\n\
                   -22.8847 S,-43.2575°,5 mortos\n";

        let records = parse_records(raw);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.lat, Some(-22.8847));
        assert_eq!(record.lon, Some(-43.2575));
        assert_eq!(record.state_action, 5);
        assert!(record.position().is_some());
    }

    #[test]
    fn missing_columns_read_as_empty() {
        let raw = "Massacre Name\nOnly a name\n";

        let records = parse_records(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Only a name");
        assert!(records[0].governor.is_empty());
        assert!(records[0].position().is_none());
        assert_eq!(records[0].total_victims(), 0);
    }

    #[test]
    fn short_and_long_rows_are_kept() {
        let raw = "Massacre Name,Date,Police Officers Victims\nshort\nlong,2001,2,extra\n";

        let records = parse_records(raw);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "short");
        assert!(records[0].date.is_empty());
        assert_eq!(records[1].police, 2);
    }

    #[test]
    fn rows_with_all_defaults_are_not_dropped() {
        let raw = format!("{HEADER}\n,,,,,,,,,,,,,\n,,x,y,,,a,b,c,d,e,,,\n");

        let records = parse_records(&raw);
        assert_eq!(records.len(), 2);
        for record in &records {
            assert!(record.position().is_none());
            assert_eq!(record.total_victims(), 0);
            assert_eq!(record.minors, 0);
        }
    }

    #[test]
    fn header_whitespace_and_bom_are_ignored() {
        let raw = "\u{feff}Massacre Name , Latitude\nX,1.5\n";

        let records = parse_records(raw);
        assert_eq!(records[0].name, "X");
        assert_eq!(records[0].lat, Some(1.5));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let raw = b"Massacre Name,Police Officers Victims\nbad \xff name,1\n";

        let records = parse_record_bytes(raw);
        assert_eq!(records.len(), 1);
        assert!(records[0].name.starts_with("bad "));
        assert_eq!(records[0].police, 1);
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_records("").is_empty());
        assert!(parse_records(HEADER).is_empty());
    }
}
