//! Event type mapping.
//!
//! Maps upstream event type strings to the closed display category set.
//! Unknown and missing types map to [`EventCategory::Development`] — the
//! feed's deliberate default, not an error.

use civic_map_event_models::{EventCategory, SourceEventType};

/// Maps an upstream `type` value to its display category.
#[must_use]
pub fn map_event_type(raw: Option<&str>) -> EventCategory {
    raw.and_then(|value| value.parse::<SourceEventType>().ok())
        .map_or(EventCategory::Development, SourceEventType::category)
}
