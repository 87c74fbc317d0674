#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood boundary types.
//!
//! A boundary is one named polygon region of the city. The full set is
//! loaded once from the embedded dataset at startup and never mutated
//! afterwards.

use civic_map_geo_models::Coordinate;

/// A named neighborhood polygon.
#[derive(Debug, Clone)]
pub struct NeighborhoodBoundary {
    /// Stable numeric identifier (1-based position in the dataset).
    pub id: i64,
    /// Human-readable display name.
    pub name: String,
    /// URL-safe identifier derived from the name, unique across the set.
    pub slug: String,
    /// Reference center point, informational only.
    pub center: Coordinate,
    /// Boundary polygon. The exterior ring is always present; any
    /// interior rings are treated as holes.
    pub polygon: geo::Polygon<f64>,
}
