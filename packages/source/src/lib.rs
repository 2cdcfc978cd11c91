#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Massacre dataset retrieval and record parsing.
//!
//! The dataset is a single CSV file read once at startup. Parsing never
//! fails on bad data: see [`records::parse_records`] and the per-cell
//! parsers in [`parsing`]. Retrieval failures surface as [`SourceError`]
//! from [`load_from_path`], or are absorbed into an empty collection by
//! [`load_or_empty`].

pub mod columns;
pub mod parsing;
pub mod records;

use std::path::Path;

use massacre_map_incident_models::IncidentRecord;

pub use records::{parse_record_bytes, parse_records};

/// Errors that can occur while retrieving the source dataset.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error (file read).
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Reads and parses the dataset at `path`.
///
/// # Errors
///
/// Returns [`SourceError::Io`] if the file cannot be read. Malformed
/// content is never an error.
pub async fn load_from_path(path: &Path) -> Result<Vec<IncidentRecord>, SourceError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    log::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let records = parse_record_bytes(&bytes);
    let unplaced = records.iter().filter(|r| r.position().is_none()).count();

    log::info!(
        "Loaded {} records from {} ({unplaced} without valid coordinates)",
        records.len(),
        path.display()
    );

    Ok(records)
}

/// Reads and parses the dataset at `path`, substituting an empty
/// collection if retrieval fails.
///
/// This is a single attempt with no retry; the failure is logged.
pub async fn load_or_empty(path: &Path) -> Vec<IncidentRecord> {
    match load_from_path(path).await {
        Ok(records) => records,
        Err(e) => {
            log::error!("Error loading data: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[tokio::test]
    async fn loads_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Massacre Name,Victims of State/Police Action").unwrap();
        writeln!(file, "A,3").unwrap();
        writeln!(file, "B,x").unwrap();

        let records = load_from_path(file.path()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state_action, 3);
        assert_eq!(records[1].state_action, 0);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let err = load_from_path(&path).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_or_empty(&dir.path().join("missing.csv")).await;
        assert!(records.is_empty());
    }
}
