//! Nominatim / OpenStreetMap geocoder client.
//!
//! Nominatim has strict rate limits: **1 request per second** maximum on
//! the public instance. The caller paces requests (see `rate_limit_ms` in
//! the service TOML configuration).
//!
//! See <https://nominatim.org/release-docs/develop/api/Search/>

use async_trait::async_trait;

use crate::{GeoPoint, GeocodeError, Geocoder, GeocodingProvider};

/// Free-form Nominatim search restricted to a set of countries.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    country_codes: String,
}

impl NominatimGeocoder {
    /// Creates a client for the search endpoint at `base_url`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, country_codes: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_owned(),
            country_codes: country_codes.to_owned(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    fn id(&self) -> &str {
        "nominatim"
    }

    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        geocode_freeform(&self.client, &self.base_url, &self.country_codes, address).await
    }
}

/// Geocodes a free-form query using Nominatim.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn geocode_freeform(
    client: &reqwest::Client,
    base_url: &str,
    country_codes: &str,
    query: &str,
) -> Result<Option<GeoPoint>, GeocodeError> {
    let mut params = vec![("q", query), ("format", "jsonv2"), ("limit", "1")];
    if !country_codes.is_empty() {
        params.push(("countrycodes", country_codes));
    }

    let resp = client.get(base_url).query(&params).send().await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    if !resp.status().is_success() {
        return Err(GeocodeError::Parse {
            message: format!("Nominatim returned status {}", resp.status()),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses Nominatim JSON response.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeoPoint>, GeocodeError> {
    let results = body.as_array().ok_or_else(|| GeocodeError::Parse {
        message: "Nominatim response is not an array".to_string(),
    })?;

    let Some(first) = results.first() else {
        return Ok(None);
    };

    let lat = first["lat"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lat in Nominatim response".to_string(),
        })?;

    let lon = first["lon"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing lon in Nominatim response".to_string(),
        })?;

    let display_name = first["display_name"].as_str().map(String::from);

    Ok(Some(GeoPoint {
        latitude: lat,
        longitude: lon,
        matched_address: display_name,
        provider: GeocodingProvider::Nominatim,
    }))
}
