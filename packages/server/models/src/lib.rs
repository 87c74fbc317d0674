#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the civic map server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the internal domain types so the API contract can
//! evolve independently.

use chrono::NaiveDate;
use civic_map_geo_models::Coordinate;
use civic_map_neighborhood_models::NeighborhoodBoundary;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A neighborhood as returned by the API. The polygon itself is not
/// part of the payload; the map layer carries its own geometry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNeighborhood {
    /// Stable numeric identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// URL-safe identifier.
    pub slug: String,
    /// Reference center point.
    pub center: Coordinate,
}

impl From<&NeighborhoodBoundary> for ApiNeighborhood {
    fn from(boundary: &NeighborhoodBoundary) -> Self {
        Self {
            id: boundary.id,
            name: boundary.name.clone(),
            slug: boundary.slug.clone(),
            center: boundary.center,
        }
    }
}

/// Query parameters for point-to-neighborhood resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveQueryParams {
    /// Longitude (WGS84).
    pub lng: f64,
    /// Latitude (WGS84).
    pub lat: f64,
}

/// Response for point-to-neighborhood resolution.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    /// The containing neighborhood, if any.
    pub neighborhood: Option<ApiNeighborhood>,
    /// Whether the point lies inside the city's bounding box at all.
    pub within_city: bool,
}

/// Query parameters for the geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeQueryParams {
    /// Free-text address query.
    #[serde(default)]
    pub q: String,
}

/// A geocoding candidate annotated with its containing neighborhood.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGeocodeCandidate {
    /// Short label, usually the street name.
    pub text: String,
    /// Full formatted place name.
    pub place_name: String,
    /// Candidate location.
    pub center: Coordinate,
    /// Slug of the neighborhood containing the candidate, if any.
    pub neighborhood: Option<String>,
}

/// Query parameters for the normalized feed endpoint.
///
/// Dates use the upstream feed's `YYYY-MM-DD` convention. With no range
/// given, the server defaults to the trailing 30 days.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedQueryParams {
    /// Inclusive start of the window.
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the window.
    pub end_date: Option<NaiveDate>,
    /// Upstream event type filter (`SCREAMING_SNAKE_CASE`).
    pub event_type: Option<String>,
    /// Restricts the feed to one neighborhood. Council votes are kept
    /// regardless.
    pub neighborhood_id: Option<String>,
}
