#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Forward geocoding for free-text address search.
//!
//! Translates a typed address query into a short ranked list of candidate
//! locations, scoped to the city's bounding box. The HTTP request and the
//! response parsing are split so the wire format is testable without a
//! network.
//!
//! Search-as-you-type callers coordinate their in-flight requests through
//! [`session::SearchSession`], which makes stale responses ignorable by
//! construction.

pub mod mapbox;
pub mod session;

use civic_map_geo_models::Coordinate;
use thiserror::Error;

/// A single ranked geocoding result.
///
/// Candidates live for one search request. Once a selection is made or
/// the query changes they are discarded; nothing is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    /// Short label, usually the street name.
    pub text: String,
    /// Full formatted place name.
    pub place_name: String,
    /// Candidate location.
    pub center: Coordinate,
}

/// Errors from geocoding operations.
///
/// Every variant means "geocoding unavailable". Callers fall back to an
/// empty suggestion state; an error is never conflated with a successful
/// zero-match response.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error or timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("geocoding service returned status {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },

    /// Rate limit exceeded.
    #[error("rate limit exceeded")]
    RateLimited,

    /// Response body did not match the expected shape.
    #[error("parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}
