//! komoot Photon geocoder client.
//!
//! Photon exposes a `/api` endpoint that accepts free-form text queries and
//! returns `GeoJSON` `FeatureCollection` responses. An optional bounding box
//! biases results to the configured area.
//!
//! See <https://github.com/komoot/photon#search-with-bounding-box>

use async_trait::async_trait;

use crate::{GeoPoint, GeocodeError, Geocoder, GeocodingProvider};

/// Free-form Photon search.
#[derive(Debug, Clone)]
pub struct PhotonGeocoder {
    client: reqwest::Client,
    base_url: String,
    bbox: Option<String>,
}

impl PhotonGeocoder {
    /// Creates a client for the search endpoint at `base_url`, optionally
    /// limited to `bbox` (`"west,south,east,north"`).
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str, bbox: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.to_owned(),
            bbox: bbox.map(str::to_owned),
        }
    }
}

#[async_trait]
impl Geocoder for PhotonGeocoder {
    fn id(&self) -> &str {
        "photon"
    }

    async fn geocode(&self, address: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        geocode_freeform(&self.client, &self.base_url, self.bbox.as_deref(), address).await
    }
}

/// Geocodes a free-form query against a Photon instance.
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn geocode_freeform(
    client: &reqwest::Client,
    base_url: &str,
    bbox: Option<&str>,
    query: &str,
) -> Result<Option<GeoPoint>, GeocodeError> {
    let mut req = client.get(base_url).query(&[("q", query), ("limit", "1")]);
    if let Some(bbox) = bbox {
        req = req.query(&[("bbox", bbox)]);
    }

    let resp = req.send().await?;

    if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GeocodeError::RateLimited);
    }

    if !resp.status().is_success() {
        return Err(GeocodeError::Parse {
            message: format!("Photon returned status {}", resp.status()),
        });
    }

    let body: serde_json::Value = resp.json().await?;
    parse_response(&body)
}

/// Parses a Photon `GeoJSON` `FeatureCollection` response.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeoPoint>, GeocodeError> {
    let features = body
        .get("features")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| GeocodeError::Parse {
            message: "Photon response missing 'features' array".to_string(),
        })?;

    let Some(first) = features.first() else {
        return Ok(None);
    };

    let coords = first
        .pointer("/geometry/coordinates")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| GeocodeError::Parse {
            message: "Feature missing geometry.coordinates".to_string(),
        })?;

    let [lon, lat, ..] = coords.as_slice() else {
        return Err(GeocodeError::Parse {
            message: "coordinates array has fewer than 2 elements".to_string(),
        });
    };

    let lon = lon.as_f64().ok_or_else(|| GeocodeError::Parse {
        message: "longitude is not a number".to_string(),
    })?;
    let lat = lat.as_f64().ok_or_else(|| GeocodeError::Parse {
        message: "latitude is not a number".to_string(),
    })?;

    let label = ["name", "street", "district", "city"]
        .iter()
        .filter_map(|key| {
            first
                .pointer(&format!("/properties/{key}"))
                .and_then(serde_json::Value::as_str)
        })
        .collect::<Vec<_>>();

    Ok(Some(GeoPoint {
        latitude: lat,
        longitude: lon,
        matched_address: (!label.is_empty()).then(|| label.join(", ")),
        provider: GeocodingProvider::Photon,
    }))
}
