//! Mapbox Geocoding API client.
//!
//! Issues forward-geocoding requests against the
//! `/geocoding/v5/mapbox.places/{query}.json` endpoint, scoped to a
//! bounding box and restricted to addresses and points of interest.
//!
//! See <https://docs.mapbox.com/api/search/geocoding/>

use std::time::Duration;

use civic_map_geo_models::{BoundingBox, Coordinate};

use crate::{GeocodeCandidate, GeocodeError};

/// Request timeout for geocoding calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Result types requested from the geocoder.
const RESULT_TYPES: &str = "address,poi";

/// An explicitly constructed Mapbox geocoding client.
///
/// Cheap to clone; callers receive it by injection rather than through a
/// process-wide singleton.
#[derive(Debug, Clone)]
pub struct GeocoderClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GeocoderClient {
    /// Creates a client against the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(base_url: &str, access_token: &str) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// Geocodes a free-text query, returning at most `limit` candidates
    /// inside `bounds`.
    ///
    /// An empty or whitespace-only query resolves to an empty candidate
    /// list without touching the network. No retries are performed; the
    /// caller decides whether to reissue.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request fails, times out, comes
    /// back with a non-success status, or the body does not parse.
    pub async fn search(
        &self,
        query: &str,
        bounds: BoundingBox,
        limit: u32,
    ) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url,
            urlencoding::encode(query)
        );

        let bbox = bounds.to_param();
        let limit = limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("bbox", bbox.as_str()),
                ("limit", limit.as_str()),
                ("types", RESULT_TYPES),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(GeocodeError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let candidates = parse_response(&body)?;
        log::debug!("Geocoding returned {} candidates", candidates.len());
        Ok(candidates)
    }
}

/// Parses a Mapbox geocoding `FeatureCollection` response.
fn parse_response(body: &serde_json::Value) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    let features = body
        .get("features")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| GeocodeError::Parse {
            message: "response missing 'features' array".to_string(),
        })?;

    let mut candidates = Vec::with_capacity(features.len());

    for feature in features {
        let text = feature
            .get("text")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| GeocodeError::Parse {
                message: "feature missing 'text'".to_string(),
            })?;

        let place_name = feature
            .get("place_name")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| GeocodeError::Parse {
                message: "feature missing 'place_name'".to_string(),
            })?;

        let center = feature
            .get("center")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| GeocodeError::Parse {
                message: "feature missing 'center'".to_string(),
            })?;

        if center.len() < 2 {
            return Err(GeocodeError::Parse {
                message: "center array has fewer than 2 elements".to_string(),
            });
        }

        let longitude = center[0].as_f64().ok_or_else(|| GeocodeError::Parse {
            message: "longitude is not a number".to_string(),
        })?;
        let latitude = center[1].as_f64().ok_or_else(|| GeocodeError::Parse {
            message: "latitude is not a number".to_string(),
        })?;

        candidates.push(GeocodeCandidate {
            text: text.to_string(),
            place_name: place_name.to_string(),
            center: Coordinate::new(longitude, latitude),
        });
    }

    Ok(candidates)
}
