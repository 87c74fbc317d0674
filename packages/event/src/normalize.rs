//! Event normalization.
//!
//! Converts raw feed records into [`DisplayEvent`]s: category mapping,
//! coordinate extraction, label formatting, then a stable sort with the
//! most recent publication first.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use civic_map_event_models::{DisplayEvent, EventLocation, RawEventRecord};

use crate::type_mapping::map_event_type;

/// Placeholder title for records the feed left untitled.
const UNTITLED: &str = "Untitled Event";

/// Converts a batch of raw records into display events, most recent
/// first.
///
/// Output ids are the 1-based positions in the input batch. A record
/// whose `published_at` does not parse is skipped with a warning and the
/// rest of the batch is unaffected; an unparseable `end_date` only drops
/// that label. Records with equal publication timestamps keep their
/// input order.
#[must_use]
pub fn normalize_events(records: &[RawEventRecord]) -> Vec<DisplayEvent> {
    let mut events: Vec<DisplayEvent> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| normalize_one(record, index + 1))
        .collect();
    events.sort_by(|a, b| b.published_at_raw.cmp(&a.published_at_raw));
    events
}

fn normalize_one(record: &RawEventRecord, id: usize) -> Option<DisplayEvent> {
    let Some(published_at) = parse_timestamp(&record.published_at) else {
        log::warn!(
            "Skipping event {}: unparseable published_at {:?}",
            record.id,
            record.published_at
        );
        return None;
    };

    let (location, coordinate) = match &record.location {
        EventLocation::Point(point) => (None, Some(*point)),
        EventLocation::Text(label) if !label.is_empty() => (Some(label.clone()), None),
        EventLocation::Text(_) | EventLocation::None => (None, None),
    };

    let end_date_label = record
        .end_date
        .as_deref()
        .and_then(parse_timestamp)
        .map(format_date_label);

    Some(DisplayEvent {
        id,
        source_id: record.id.clone(),
        title: record
            .title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string()),
        category: map_event_type(record.event_type.as_deref()),
        time_label: format_time_label(published_at),
        location,
        coordinate,
        summary: record.summary.clone().filter(|summary| !summary.is_empty()),
        source: record.source.clone(),
        published_date_label: format_date_label(published_at),
        end_date_label,
        published_at_raw: published_at,
    })
}

/// Parses a feed timestamp: RFC 3339 first, then a naive datetime with
/// optional fractional seconds, then a bare date. Naive values are taken
/// as UTC, the feed's canonical zone.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// `h:mm AM/PM`, the feed card's time-of-day rendering.
fn format_time_label(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%-I:%M %p").to_string()
}

/// `Mon D, YYYY`.
fn format_date_label(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use civic_map_event_models::EventCategory;
    use civic_map_geo_models::Coordinate;

    fn record(value: serde_json::Value) -> RawEventRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalizes_service_request_with_point_location() {
        let records = [record(serde_json::json!({
            "id": "4f4e4b3a-0001",
            "type": "SERVICE_REQUEST",
            "published_at": "2026-02-01T14:30:00Z",
            "location": { "type": "Point", "coordinates": [-123.1, 49.23] }
        }))];

        let events = normalize_events(&records);
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.category, EventCategory::Service);
        assert_eq!(event.coordinate, Some(Coordinate::new(-123.1, 49.23)));
        assert!(event.location.is_none());
        assert_eq!(event.time_label, "2:30 PM");
        assert_eq!(event.published_date_label, "Feb 1, 2026");
        assert_eq!(event.title, "Untitled Event");
        assert_eq!(event.source_id, "4f4e4b3a-0001");
    }

    #[test]
    fn free_text_location_becomes_label_without_coordinate() {
        let records = [record(serde_json::json!({
            "id": "a",
            "title": "Lane closure",
            "type": "ROAD_CLOSURE",
            "published_at": "2026-02-01T08:00:00Z",
            "location": "Main St & 2nd Ave"
        }))];

        let events = normalize_events(&records);
        assert_eq!(events[0].location.as_deref(), Some("Main St & 2nd Ave"));
        assert!(events[0].coordinate.is_none());
        assert_eq!(events[0].category, EventCategory::Road);
    }

    #[test]
    fn sorts_most_recent_first() {
        let records = [
            record(serde_json::json!({ "id": "old", "published_at": "2026-01-05T09:00:00Z" })),
            record(serde_json::json!({ "id": "new", "published_at": "2026-02-01T09:00:00Z" })),
            record(serde_json::json!({ "id": "mid", "published_at": "2026-01-20T09:00:00Z" })),
        ];

        let events = normalize_events(&records);
        let order: Vec<&str> = events.iter().map(|e| e.source_id.as_str()).collect();
        assert_eq!(order, ["new", "mid", "old"]);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let records = [
            record(serde_json::json!({ "id": "first", "published_at": "2026-02-01T09:00:00Z" })),
            record(serde_json::json!({ "id": "second", "published_at": "2026-02-01T09:00:00Z" })),
            record(serde_json::json!({ "id": "third", "published_at": "2026-02-01T09:00:00Z" })),
        ];

        let events = normalize_events(&records);
        let order: Vec<&str> = events.iter().map(|e| e.source_id.as_str()).collect();
        assert_eq!(order, ["first", "second", "third"]);
    }

    #[test]
    fn ids_are_positions_in_the_input_batch() {
        let records = [
            record(serde_json::json!({ "id": "old", "published_at": "2026-01-05T09:00:00Z" })),
            record(serde_json::json!({ "id": "new", "published_at": "2026-02-01T09:00:00Z" })),
        ];

        let events = normalize_events(&records);
        // Sorted newest-first, but ids reflect input positions.
        assert_eq!(events[0].source_id, "new");
        assert_eq!(events[0].id, 2);
        assert_eq!(events[1].source_id, "old");
        assert_eq!(events[1].id, 1);
    }

    #[test]
    fn malformed_published_at_skips_only_that_record() {
        let records = [
            record(serde_json::json!({ "id": "good", "published_at": "2026-02-01T09:00:00Z" })),
            record(serde_json::json!({ "id": "bad", "published_at": "yesterday-ish" })),
            record(serde_json::json!({ "id": "also-good", "published_at": "2026-01-15T09:00:00Z" })),
        ];

        let events = normalize_events(&records);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.source_id != "bad"));
    }

    #[test]
    fn unparseable_end_date_only_drops_the_label() {
        let records = [record(serde_json::json!({
            "id": "a",
            "published_at": "2026-02-01T09:00:00Z",
            "end_date": "whenever"
        }))];

        let events = normalize_events(&records);
        assert_eq!(events.len(), 1);
        assert!(events[0].end_date_label.is_none());
    }

    #[test]
    fn bare_date_end_date_gets_a_label() {
        let records = [record(serde_json::json!({
            "id": "a",
            "published_at": "2026-02-01T09:00:00Z",
            "end_date": "2026-03-15"
        }))];

        let events = normalize_events(&records);
        assert_eq!(events[0].end_date_label.as_deref(), Some("Mar 15, 2026"));
    }

    #[test]
    fn parses_naive_timestamps_as_utc() {
        let parsed = parse_timestamp("2026-02-01T14:30:00.000").unwrap();
        assert_eq!(parsed, parse_timestamp("2026-02-01T14:30:00Z").unwrap());
        assert!(parse_timestamp("not-a-date").is_none());
    }
}
