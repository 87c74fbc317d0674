#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood boundary resolution.
//!
//! Answers "which neighborhood contains this point?" against the
//! immutable boundary set loaded at startup. Containment walks the
//! boundaries in stored order with a bounding-rectangle pre-filter per
//! entry, so overlapping boundaries (not expected in the dataset, but
//! tolerated) resolve deterministically to the first match.

pub mod registry;

use civic_map_geo_models::{Coordinate, VANCOUVER_BOUNDS};
use civic_map_neighborhood_models::NeighborhoodBoundary;
use geo::{BoundingRect, Contains, Point, Rect};
use thiserror::Error;

/// Errors from loading and validating the boundary dataset.
///
/// All variants are load-time failures. The boundary set is a build-time
/// static asset; a dataset that fails validation is a fatal configuration
/// error, never a silent per-query miss.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// The embedded dataset is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The dataset parsed but violates a structural invariant.
    #[error("Malformed boundary data: {message}")]
    Malformed {
        /// Description of the violated invariant.
        message: String,
    },
}

/// A boundary with its precomputed bounding rectangle.
struct IndexEntry {
    boundary: NeighborhoodBoundary,
    envelope: Rect<f64>,
}

/// The immutable boundary set, in stored order.
///
/// Built once at startup and shared read-only thereafter.
pub struct BoundaryIndex {
    entries: Vec<IndexEntry>,
}

impl BoundaryIndex {
    /// Builds an index over the given boundaries, preserving their order.
    #[must_use]
    pub fn new(boundaries: Vec<NeighborhoodBoundary>) -> Self {
        let entries = boundaries
            .into_iter()
            .map(|boundary| {
                let envelope = boundary.polygon.bounding_rect().unwrap_or_else(|| {
                    Rect::new(
                        geo::coord! { x: 0.0, y: 0.0 },
                        geo::coord! { x: 0.0, y: 0.0 },
                    )
                });
                IndexEntry { boundary, envelope }
            })
            .collect();
        Self { entries }
    }

    /// Loads the embedded Vancouver local-area dataset into an index.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if the embedded dataset fails to parse
    /// or validate.
    pub fn vancouver() -> Result<Self, BoundaryError> {
        Ok(Self::new(registry::vancouver_boundaries()?))
    }

    /// Returns the first boundary in stored order whose polygon contains
    /// the point, or `None` if no boundary does.
    #[must_use]
    pub fn find_containing(&self, point: Coordinate) -> Option<&NeighborhoodBoundary> {
        let p = Point::new(point.longitude, point.latitude);
        self.entries
            .iter()
            .find(|entry| envelope_contains(&entry.envelope, point) && entry.boundary.polygon.contains(&p))
            .map(|entry| &entry.boundary)
    }

    /// Looks up a boundary by its slug. Exact, case-sensitive match.
    #[must_use]
    pub fn find_by_slug(&self, slug: &str) -> Option<&NeighborhoodBoundary> {
        self.entries
            .iter()
            .find(|entry| entry.boundary.slug == slug)
            .map(|entry| &entry.boundary)
    }

    /// Iterates the boundaries in stored order.
    #[must_use]
    pub fn boundaries(&self) -> impl ExactSizeIterator<Item = &NeighborhoodBoundary> {
        self.entries.iter().map(|entry| &entry.boundary)
    }
}

/// Returns `true` if the point lies within the city's fixed bounding
/// box.
///
/// Independent of the polygon set; used as a fast pre-filter before
/// geocoding or containment lookups are attempted.
#[must_use]
pub fn is_within_city_bounds(point: Coordinate) -> bool {
    VANCOUVER_BOUNDS.contains(point)
}

/// Inclusive bounding-rectangle test, unlike `geo`'s strict
/// [`Contains`] which excludes points on the rectangle edge.
fn envelope_contains(rect: &Rect<f64>, point: Coordinate) -> bool {
    point.longitude >= rect.min().x
        && point.longitude <= rect.max().x
        && point.latitude >= rect.min().y
        && point.latitude <= rect.max().y
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_map_geo_models::VANCOUVER_CENTER;
    use geo::{LineString, Polygon};

    fn rect_boundary(id: i64, slug: &str, west: f64, south: f64, east: f64, north: f64) -> NeighborhoodBoundary {
        let exterior = LineString::from(vec![
            (west, south),
            (east, south),
            (east, north),
            (west, north),
            (west, south),
        ]);
        NeighborhoodBoundary {
            id,
            name: slug.to_string(),
            slug: slug.to_string(),
            center: Coordinate::new(f64::midpoint(west, east), f64::midpoint(south, north)),
            polygon: Polygon::new(exterior, Vec::new()),
        }
    }

    #[test]
    fn finds_containing_boundary() {
        let index = BoundaryIndex::new(vec![
            rect_boundary(1, "west", -123.2, 49.2, -123.1, 49.3),
            rect_boundary(2, "east", -123.1, 49.2, -123.0, 49.3),
        ]);
        let hit = index.find_containing(Coordinate::new(-123.15, 49.25)).unwrap();
        assert_eq!(hit.slug, "west");
        let hit = index.find_containing(Coordinate::new(-123.05, 49.25)).unwrap();
        assert_eq!(hit.slug, "east");
    }

    #[test]
    fn returns_none_outside_all_boundaries() {
        let index = BoundaryIndex::new(vec![rect_boundary(1, "only", -123.2, 49.2, -123.1, 49.3)]);
        assert!(index.find_containing(Coordinate::new(-122.0, 48.0)).is_none());
    }

    #[test]
    fn overlapping_boundaries_resolve_to_first_in_stored_order() {
        let index = BoundaryIndex::new(vec![
            rect_boundary(1, "first", -123.2, 49.2, -123.0, 49.3),
            rect_boundary(2, "second", -123.2, 49.2, -123.0, 49.3),
        ]);
        let hit = index.find_containing(Coordinate::new(-123.1, 49.25)).unwrap();
        assert_eq!(hit.slug, "first");
    }

    #[test]
    fn slug_lookup_is_exact_and_case_sensitive() {
        let index = BoundaryIndex::new(vec![rect_boundary(1, "riley-park", -123.2, 49.2, -123.1, 49.3)]);
        assert!(index.find_by_slug("riley-park").is_some());
        assert!(index.find_by_slug("Riley-Park").is_none());
        assert!(index.find_by_slug("nonexistent").is_none());
    }

    #[test]
    fn city_bounds_test_is_independent_of_polygons() {
        assert!(is_within_city_bounds(VANCOUVER_CENTER));
        // Chicago
        assert!(!is_within_city_bounds(Coordinate::new(-87.6278, 41.8827)));
    }
}
