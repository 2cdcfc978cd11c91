#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address-to-coordinate lookup for massacre locations.
//!
//! Two interchangeable providers are configured via TOML files in
//! `services/`:
//!
//! 1. **Nominatim / OpenStreetMap** (priority 1): free, 1 req/sec rate
//!    limit, restricted to Brazil.
//! 2. **Photon** (priority 2): komoot's OSM-based search, biased to the
//!    Rio de Janeiro bounding box.
//!
//! Geocoding is an optional enrichment step. The primary data path never
//! depends on it: a lookup miss is `Ok(None)`, and [`geocode_first`]
//! turns transport errors into a logged miss.

pub mod enrich;
pub mod nominatim;
pub mod photon;
pub mod service_registry;

use async_trait::async_trait;
use thiserror::Error;

/// User agent sent with every request. Nominatim's usage policy requires
/// an identifying one.
pub const USER_AGENT: &str = concat!("massacre-map/", env!("CARGO_PKG_VERSION"));

/// A geocoding result.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// The matched place name returned by the provider.
    pub matched_address: Option<String>,
    /// Which provider resolved this address.
    pub provider: GeocodingProvider,
}

/// Which geocoding provider resolved an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodingProvider {
    /// Nominatim / OpenStreetMap.
    Nominatim,
    /// komoot Photon.
    Photon,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,
}

/// A single address lookup service.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns the service identifier (e.g., `"nominatim"`).
    fn id(&self) -> &str;

    /// Looks up `address`. A miss is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the HTTP request or response parsing
    /// fails.
    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, GeocodeError>;
}

/// Builds the shared HTTP client with [`USER_AGENT`].
///
/// # Errors
///
/// Returns [`GeocodeError::Http`] if the TLS backend cannot be initialized.
pub fn build_client() -> Result<reqwest::Client, GeocodeError> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// Tries each geocoder in order and returns the first hit.
///
/// Errors are logged and the next provider is tried, so the result is
/// `None` both when every provider misses and when every provider fails.
pub async fn geocode_first(geocoders: &[Box<dyn Geocoder>], address: &str) -> Option<GeoPoint> {
    for geocoder in geocoders {
        match geocoder.geocode(address).await {
            Ok(Some(point)) => {
                log::debug!(
                    "[{}] '{address}' -> ({}, {})",
                    geocoder.id(),
                    point.latitude,
                    point.longitude
                );
                return Some(point);
            }
            Ok(None) => log::debug!("[{}] no match for '{address}'", geocoder.id()),
            Err(e) => log::warn!("[{}] lookup failed for '{address}': {e}", geocoder.id()),
        }
    }
    None
}
