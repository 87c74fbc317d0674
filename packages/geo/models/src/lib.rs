#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic primitive types shared across the civic map crates.
//!
//! Coordinates are always WGS84 longitude/latitude pairs, longitude first,
//! matching the `GeoJSON` axis order used by every upstream data source.

use serde::{Deserialize, Serialize};

/// A WGS84 point as a (longitude, latitude) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Latitude (WGS84).
    pub latitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from longitude and latitude.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Returns `true` if the point lies within the box. Edges count as
    /// inside.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        point.longitude >= self.west
            && point.longitude <= self.east
            && point.latitude >= self.south
            && point.latitude <= self.north
    }

    /// Formats the box as a `west,south,east,north` query parameter value.
    #[must_use]
    pub fn to_param(&self) -> String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

/// Bounding box covering the City of Vancouver.
pub const VANCOUVER_BOUNDS: BoundingBox = BoundingBox::new(-123.27, 49.19, -123.02, 49.32);

/// Reference center point for the City of Vancouver.
pub const VANCOUVER_CENTER: Coordinate = Coordinate::new(-123.12, 49.25);
