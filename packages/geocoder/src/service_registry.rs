//! Compile-time registry of geocoding service configurations.
//!
//! Each geocoding provider is defined in a TOML file under `services/`.
//! The registry embeds these at compile time and exposes them via
//! [`all_services`] and [`enabled_services`].

use std::time::Duration;

use serde::Deserialize;

use crate::Geocoder;
use crate::nominatim::NominatimGeocoder;
use crate::photon::PhotonGeocoder;

/// A geocoding service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingService {
    /// Unique identifier (e.g., `"nominatim"`, `"photon"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this service is used for enrichment.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Execution order, lower values run first.
    pub priority: u32,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Nominatim / `OpenStreetMap` geocoder.
    Nominatim {
        /// API base URL (e.g., `"https://nominatim.openstreetmap.org/search"`).
        base_url: String,
        /// Minimum delay between requests in milliseconds.
        rate_limit_ms: u64,
        /// Comma-separated ISO country codes to restrict results to.
        #[serde(default)]
        country_codes: String,
    },
    /// komoot Photon geocoder.
    Photon {
        /// API base URL (e.g., `"https://photon.komoot.io/api"`).
        base_url: String,
        /// Minimum delay between requests in milliseconds.
        rate_limit_ms: u64,
        /// Bounding box `"west,south,east,north"` to bias results to.
        bbox: Option<String>,
    },
}

const fn default_true() -> bool {
    true
}

impl GeocodingService {
    /// Returns the provider's base URL regardless of variant.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match &self.provider {
            ProviderConfig::Nominatim { base_url, .. }
            | ProviderConfig::Photon { base_url, .. } => base_url,
        }
    }

    /// Minimum delay between two requests to this service.
    #[must_use]
    pub const fn rate_limit(&self) -> Duration {
        match &self.provider {
            ProviderConfig::Nominatim { rate_limit_ms, .. }
            | ProviderConfig::Photon { rate_limit_ms, .. } => Duration::from_millis(*rate_limit_ms),
        }
    }

    /// Builds the client for this service.
    #[must_use]
    pub fn geocoder(&self, client: &reqwest::Client) -> Box<dyn Geocoder> {
        match &self.provider {
            ProviderConfig::Nominatim {
                base_url,
                country_codes,
                ..
            } => Box::new(NominatimGeocoder::new(
                client.clone(),
                base_url,
                country_codes,
            )),
            ProviderConfig::Photon { base_url, bbox, .. } => Box::new(PhotonGeocoder::new(
                client.clone(),
                base_url,
                bbox.as_deref(),
            )),
        }
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("nominatim", include_str!("../services/nominatim.toml")),
    ("photon", include_str!("../services/photon.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 2;

/// Returns all geocoding service configurations (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML config is malformed (this is a compile-time guarantee
/// since the configs are embedded).
#[must_use]
pub fn all_services() -> Vec<GeocodingService> {
    SERVICE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse geocoding service '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled services, sorted by priority (ascending).
#[must_use]
pub fn enabled_services() -> Vec<GeocodingService> {
    let mut services: Vec<GeocodingService> =
        all_services().into_iter().filter(|s| s.enabled).collect();
    services.sort_by_key(|s| s.priority);
    services
}

/// Builds clients for every enabled service, in priority order.
#[must_use]
pub fn build_geocoders(client: &reqwest::Client) -> Vec<Box<dyn Geocoder>> {
    enabled_services()
        .iter()
        .map(|s| s.geocoder(client))
        .collect()
}

/// The slowest rate limit among `services`, used to pace enrichment.
#[must_use]
pub fn slowest_rate_limit(services: &[GeocodingService]) -> Duration {
    services
        .iter()
        .map(GeocodingService::rate_limit)
        .max()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_services() {
        let services = all_services();
        assert_eq!(services.len(), EXPECTED_SERVICE_COUNT);
    }

    #[test]
    fn service_ids_are_unique() {
        let services = all_services();
        let mut seen = BTreeSet::new();
        for svc in &services {
            assert!(seen.insert(&svc.id), "Duplicate service ID: {}", svc.id);
        }
    }

    #[test]
    fn all_services_have_required_fields() {
        for svc in &all_services() {
            assert!(!svc.id.is_empty(), "Service has empty id");
            assert!(!svc.name.is_empty(), "Service {} has empty name", svc.id);
            assert!(
                !svc.base_url().is_empty(),
                "Service {} has empty base_url",
                svc.id
            );
        }
    }

    #[test]
    fn enabled_services_sorted_by_priority() {
        let services = enabled_services();
        for window in services.windows(2) {
            assert!(
                window[0].priority <= window[1].priority,
                "Services not sorted by priority: {} ({}) > {} ({})",
                window[0].id,
                window[0].priority,
                window[1].id,
                window[1].priority
            );
        }
    }

    #[test]
    fn geocoder_ids_match_service_ids() {
        let client = reqwest::Client::new();
        for svc in &enabled_services() {
            assert_eq!(svc.geocoder(&client).id(), svc.id);
        }
    }

    #[test]
    fn nominatim_is_paced_at_one_per_second() {
        let services = all_services();
        assert_eq!(slowest_rate_limit(&services), Duration::from_secs(1));
        assert_eq!(slowest_rate_limit(&[]), Duration::ZERO);
    }
}
