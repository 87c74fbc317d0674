//! HTTP client for the backend events feed.
//!
//! One `GET /api/events` endpoint with a date range and an optional
//! event-type filter. The upstream feed has no neighborhood filter, so
//! neighborhood scoping is applied locally after the fetch.

use std::time::Duration;

use chrono::NaiveDate;
use civic_map_event_models::{RawEventRecord, SourceEventType};

use crate::FeedError;

/// Request timeout for feed calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Date-range query for the events feed.
#[derive(Debug, Clone)]
pub struct EventsQuery {
    /// Inclusive start of the window.
    pub start_date: NaiveDate,
    /// Inclusive end of the window.
    pub end_date: NaiveDate,
    /// Restricts the feed to one upstream event type.
    pub event_type: Option<SourceEventType>,
}

/// An explicitly constructed events feed client.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Creates a client against the given feed base URL.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: &str) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches raw event records for a date range.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] if the request fails, the feed answers with
    /// a non-success status, or the body does not deserialize. No
    /// internal retries.
    pub async fn get_events(&self, query: &EventsQuery) -> Result<Vec<RawEventRecord>, FeedError> {
        let url = format!("{}/api/events", self.base_url);
        let start_date = query.start_date.format("%Y-%m-%d").to_string();
        let end_date = query.end_date.format("%Y-%m-%d").to_string();

        let mut params = vec![("start_date", start_date), ("end_date", end_date)];
        if let Some(event_type) = query.event_type {
            params.push(("event_type", event_type.to_string()));
        }

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches events scoped to one neighborhood.
    ///
    /// Keeps records attributed to the neighborhood plus every council
    /// vote: council events are city-wide by business rule and appear in
    /// every neighborhood view regardless of their `neighborhood_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] under the same conditions as
    /// [`Self::get_events`].
    pub async fn neighborhood_events(
        &self,
        neighborhood_id: &str,
        query: &EventsQuery,
    ) -> Result<Vec<RawEventRecord>, FeedError> {
        let mut records = self.get_events(query).await?;
        retain_for_neighborhood(&mut records, neighborhood_id);
        Ok(records)
    }
}

/// Keeps records attributed to `neighborhood_id`, plus council votes.
pub fn retain_for_neighborhood(records: &mut Vec<RawEventRecord>, neighborhood_id: &str) {
    records.retain(|record| {
        record.neighborhood_id.as_deref() == Some(neighborhood_id)
            || record.event_type.as_deref() == Some(SourceEventType::CouncilVote.as_ref())
    });
}
