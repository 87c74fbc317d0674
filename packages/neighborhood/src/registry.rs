//! Embedded Vancouver local-area boundary dataset.
//!
//! The dataset is a `GeoJSON` `FeatureCollection` of the city's 22 local
//! areas, embedded at compile time. Polygons are simplified rings around
//! each area's published reference center; the full-resolution city
//! geometry is not vendored.
//!
//! Validation happens here, at load time. A dataset that fails any
//! structural check is rejected wholesale so a bad build asset can never
//! degrade into per-query misses.

use std::collections::BTreeSet;

use civic_map_geo_models::Coordinate;
use civic_map_neighborhood_models::NeighborhoodBoundary;
use geo::{LineString, Polygon};
use geojson::{GeoJson, PolygonType};

use crate::BoundaryError;

/// Number of local areas in the embedded dataset. Enforced by a test.
#[cfg(test)]
const EXPECTED_BOUNDARY_COUNT: usize = 22;

/// Embedded boundary dataset.
const LOCAL_AREAS_GEOJSON: &str = include_str!("../boundaries/vancouver_local_areas.geojson");

/// Parses and validates the embedded Vancouver local-area dataset.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the dataset is not a valid `GeoJSON`
/// `FeatureCollection`, if any feature is missing its properties or
/// polygon geometry, if any ring is open or has fewer than 4 positions,
/// or if slugs are not unique.
pub fn vancouver_boundaries() -> Result<Vec<NeighborhoodBoundary>, BoundaryError> {
    parse_feature_collection(LOCAL_AREAS_GEOJSON)
}

fn parse_feature_collection(raw: &str) -> Result<Vec<NeighborhoodBoundary>, BoundaryError> {
    let geojson: GeoJson = raw.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(malformed("dataset is not a FeatureCollection"));
    };

    let mut boundaries = Vec::with_capacity(collection.features.len());
    let mut slugs = BTreeSet::new();

    for feature in collection.features {
        let properties = feature
            .properties
            .ok_or_else(|| malformed("feature has no properties"))?;

        let id = properties
            .get("id")
            .and_then(serde_json::Value::as_i64)
            .ok_or_else(|| malformed("feature is missing a numeric 'id'"))?;

        let name = properties
            .get("name")
            .and_then(serde_json::Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| malformed("feature is missing a 'name'"))?
            .to_string();

        let slug = properties
            .get("slug")
            .and_then(serde_json::Value::as_str)
            .filter(|slug| !slug.is_empty())
            .ok_or_else(|| malformed("feature is missing a 'slug'"))?
            .to_string();

        if !slugs.insert(slug.clone()) {
            return Err(malformed(&format!("duplicate slug '{slug}'")));
        }

        let center = properties
            .get("center")
            .and_then(serde_json::Value::as_array)
            .and_then(|pair| {
                let longitude = pair.first()?.as_f64()?;
                let latitude = pair.get(1)?.as_f64()?;
                Some(Coordinate::new(longitude, latitude))
            })
            .ok_or_else(|| malformed(&format!("boundary '{slug}' is missing a 'center' pair")))?;

        let geometry = feature
            .geometry
            .ok_or_else(|| malformed(&format!("boundary '{slug}' has no geometry")))?;

        let geojson::Value::Polygon(rings) = geometry.value else {
            return Err(malformed(&format!("boundary '{slug}' geometry is not a Polygon")));
        };

        let polygon = build_polygon(&slug, &rings)?;

        boundaries.push(NeighborhoodBoundary {
            id,
            name,
            slug,
            center,
            polygon,
        });
    }

    log::debug!("Loaded {} neighborhood boundaries", boundaries.len());
    Ok(boundaries)
}

/// Validates the raw rings and converts them into a [`Polygon`].
///
/// The first ring is the exterior; any further rings become holes. Every
/// ring must be closed (first position == last) and carry at least 4
/// positions.
fn build_polygon(slug: &str, rings: &PolygonType) -> Result<Polygon<f64>, BoundaryError> {
    let mut line_strings = Vec::with_capacity(rings.len());

    for ring in rings {
        if ring.len() < 4 {
            return Err(malformed(&format!(
                "boundary '{slug}' has a ring with fewer than 4 positions"
            )));
        }
        if ring.first() != ring.last() {
            return Err(malformed(&format!("boundary '{slug}' has an open ring")));
        }

        let coords = ring
            .iter()
            .map(|position| {
                if position.len() < 2 {
                    return Err(malformed(&format!(
                        "boundary '{slug}' has a position without two ordinates"
                    )));
                }
                Ok(geo::coord! { x: position[0], y: position[1] })
            })
            .collect::<Result<Vec<_>, _>>()?;

        line_strings.push(LineString::new(coords));
    }

    let Some(exterior) = line_strings.first().cloned() else {
        return Err(malformed(&format!("boundary '{slug}' has no rings")));
    };

    Ok(Polygon::new(exterior, line_strings.split_off(1)))
}

fn malformed(message: &str) -> BoundaryError {
    BoundaryError::Malformed {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoundaryIndex, is_within_city_bounds};
    use civic_map_geo_models::VANCOUVER_CENTER;

    #[test]
    fn loads_all_boundaries() {
        let boundaries = vancouver_boundaries().unwrap();
        assert_eq!(
            boundaries.len(),
            EXPECTED_BOUNDARY_COUNT,
            "Expected {EXPECTED_BOUNDARY_COUNT} boundaries, found {}. \
             Update EXPECTED_BOUNDARY_COUNT after changing the dataset.",
            boundaries.len()
        );
    }

    #[test]
    fn ids_and_slugs_are_unique() {
        let boundaries = vancouver_boundaries().unwrap();
        let mut ids = BTreeSet::new();
        let mut slugs = BTreeSet::new();
        for boundary in &boundaries {
            assert!(ids.insert(boundary.id), "Duplicate boundary id {}", boundary.id);
            assert!(
                slugs.insert(boundary.slug.clone()),
                "Duplicate boundary slug {}",
                boundary.slug
            );
        }
    }

    #[test]
    fn centers_lie_within_city_bounds() {
        for boundary in vancouver_boundaries().unwrap() {
            assert!(
                is_within_city_bounds(boundary.center),
                "{} center is outside the city bounds",
                boundary.slug
            );
        }
    }

    #[test]
    fn each_center_resolves_to_its_own_boundary() {
        let index = BoundaryIndex::vancouver().unwrap();
        let slugs: Vec<String> = index.boundaries().map(|b| b.slug.clone()).collect();
        for slug in slugs {
            let boundary = index.find_by_slug(&slug).unwrap();
            let resolved = index.find_containing(boundary.center).unwrap();
            assert_eq!(resolved.slug, slug);
        }
    }

    #[test]
    fn city_center_resolves_to_south_cambie() {
        let index = BoundaryIndex::vancouver().unwrap();
        let hit = index.find_containing(VANCOUVER_CENTER).unwrap();
        assert_eq!(hit.slug, "south-cambie");
    }

    #[test]
    fn far_away_point_resolves_to_none() {
        let index = BoundaryIndex::vancouver().unwrap();
        // Chicago
        assert!(index.find_containing(Coordinate::new(-87.6278, 41.8827)).is_none());
    }

    #[test]
    fn slug_round_trip() {
        let index = BoundaryIndex::vancouver().unwrap();
        for slug in ["downtown", "kitsilano", "south-cambie"] {
            assert_eq!(index.find_by_slug(slug).unwrap().slug, slug);
        }
        assert!(index.find_by_slug("nonexistent").is_none());
    }

    #[test]
    fn rejects_open_rings() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"id": 1, "name": "Broken", "slug": "broken", "center": [-123.1, 49.25]},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-123.2, 49.2], [-123.0, 49.2], [-123.0, 49.3], [-123.2, 49.3]]]
                }
            }]
        }"#;
        let err = parse_feature_collection(raw).unwrap_err();
        assert!(matches!(err, BoundaryError::Malformed { .. }));
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"id": 1, "name": "A", "slug": "same", "center": [-123.1, 49.25]},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[-123.2, 49.2], [-123.0, 49.2], [-123.0, 49.3], [-123.2, 49.2]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {"id": 2, "name": "B", "slug": "same", "center": [-123.1, 49.25]},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[-123.2, 49.2], [-123.0, 49.2], [-123.0, 49.3], [-123.2, 49.2]]]
                    }
                }
            ]
        }"#;
        let err = parse_feature_collection(raw).unwrap_err();
        assert!(matches!(err, BoundaryError::Malformed { .. }));
    }
}
