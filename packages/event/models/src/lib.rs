#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Event taxonomy and display types for the civic feed.
//!
//! Raw feed records arrive loosely shaped: the `location` field may be a
//! `GeoJSON` point, a free-text label, or absent, and the upstream `type`
//! is an optional string. These types pin that variability down — the
//! category set is closed, the location is a tagged variant, and the
//! normalized [`DisplayEvent`] is the one shape every downstream consumer
//! renders.

use chrono::{DateTime, Utc};
use civic_map_geo_models::Coordinate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Display category for a civic event.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventCategory {
    /// Development applications and city projects.
    Development,
    /// Road closures and street work.
    Road,
    /// Council votes. City-wide by business rule.
    Council,
    /// 311-style service requests.
    Service,
}

impl EventCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Development, Self::Road, Self::Council, Self::Service]
    }

    /// Returns the display configuration for this category.
    #[must_use]
    pub const fn display(self) -> CategoryDisplay {
        match self {
            Self::Development => CategoryDisplay {
                label: "Development",
                color: "#8B7355",
                icon: "building",
            },
            Self::Road => CategoryDisplay {
                label: "Road",
                color: "#A67C52",
                icon: "construction",
            },
            Self::Council => CategoryDisplay {
                label: "Council",
                color: "#6B5D4F",
                icon: "users",
            },
            Self::Service => CategoryDisplay {
                label: "Service",
                color: "#9B8B7E",
                icon: "megaphone",
            },
        }
    }
}

/// Display configuration for one event category.
///
/// The mapping in [`EventCategory::display`] is exhaustive over the
/// closed category set, so a category can never render without a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDisplay {
    /// Short human-readable label.
    pub label: &'static str,
    /// Hex accent color for the card and map pin.
    pub color: &'static str,
    /// Icon name in the frontend icon set.
    pub icon: &'static str,
}

/// Event types known to the upstream feed, `SCREAMING_SNAKE_CASE` on the
/// wire.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceEventType {
    /// A road or lane closure.
    RoadClosure,
    /// A 311 service request.
    ServiceRequest,
    /// A city construction or development project.
    CityProject,
    /// A council vote.
    CouncilVote,
}

impl SourceEventType {
    /// Maps this upstream type to its display category.
    #[must_use]
    pub const fn category(self) -> EventCategory {
        match self {
            Self::RoadClosure => EventCategory::Road,
            Self::ServiceRequest => EventCategory::Service,
            Self::CityProject => EventCategory::Development,
            Self::CouncilVote => EventCategory::Council,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::RoadClosure,
            Self::ServiceRequest,
            Self::CityProject,
            Self::CouncilVote,
        ]
    }
}

/// Where an event happened, as reported by the feed.
///
/// The upstream `location` field is duck-typed: a `GeoJSON` `Point`
/// object, a free-text label, or absent. Unknown object shapes degrade
/// to [`EventLocation::None`] rather than failing the record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum EventLocation {
    /// A point geometry.
    Point(Coordinate),
    /// A free-text location label without a coordinate.
    Text(String),
    /// No usable location.
    #[default]
    None,
}

impl From<serde_json::Value> for EventLocation {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(label) => Self::Text(label),
            serde_json::Value::Object(map) => {
                if map.get("type").and_then(serde_json::Value::as_str) != Some("Point") {
                    return Self::None;
                }
                let Some(coordinates) = map.get("coordinates").and_then(serde_json::Value::as_array)
                else {
                    return Self::None;
                };
                if coordinates.len() < 2 {
                    return Self::None;
                }
                match (coordinates[0].as_f64(), coordinates[1].as_f64()) {
                    (Some(longitude), Some(latitude)) => {
                        Self::Point(Coordinate::new(longitude, latitude))
                    }
                    _ => Self::None,
                }
            }
            _ => Self::None,
        }
    }
}

/// A single row from the upstream events feed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEventRecord {
    /// Opaque upstream identifier (UUID-shaped). Never displayed.
    pub id: String,
    /// Foreign key into the neighborhood boundary set, when attributed.
    #[serde(default)]
    pub neighborhood_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// Upstream event type, `SCREAMING_SNAKE_CASE` when present.
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Duck-typed location: `GeoJSON` point, free text, or absent.
    #[serde(default)]
    pub location: EventLocation,
    /// Publication timestamp, ISO 8601. Required.
    pub published_at: String,
}

/// A normalized event ready for display.
///
/// The full set is rebuilt on every fetch; only [`Self::source_id`] is
/// stable across fetches.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayEvent {
    /// 1-based position in the fetched batch. Ephemeral list key only —
    /// the same record may get a different value on the next fetch.
    pub id: usize,
    /// The upstream opaque id, carried through as the durable identity.
    pub source_id: String,
    /// Event title, with a placeholder for untitled records.
    pub title: String,
    /// Display category.
    pub category: EventCategory,
    /// Time of day the event was published, `h:mm AM/PM`.
    pub time_label: String,
    /// Free-text location label, when the feed provided one.
    pub location: Option<String>,
    /// Point coordinate, present only for point-geometry locations.
    pub coordinate: Option<Coordinate>,
    /// Short summary text.
    pub summary: Option<String>,
    /// Name of the publishing source.
    pub source: Option<String>,
    /// Publication date, `Mon D, YYYY`.
    pub published_date_label: String,
    /// Formatted end date, when present and parseable.
    pub end_date_label: Option<String>,
    /// Original publication timestamp, retained for sort ordering.
    pub published_at_raw: DateTime<Utc>,
}
