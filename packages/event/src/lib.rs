#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Events feed client and normalization.
//!
//! Fetches raw event records from the backend feed for a date range and
//! converts them into the uniform, time-ordered display model. Fetching
//! and normalization are separate steps; normalization is pure and never
//! touches the network.

pub mod client;
pub mod normalize;
pub mod type_mapping;

use thiserror::Error;

/// Errors from feed operations.
///
/// Surfaced to the UI layer as a user-visible error state, distinct from
/// an empty-but-successful response. No internal retries.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed (network error or timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("events feed returned status {status}")]
    Status {
        /// The HTTP status code received.
        status: u16,
    },

    /// The response body was not the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
