//! HTTP handler functions for the civic map API.

use actix_web::{HttpRequest, HttpResponse, web};
use chrono::{Duration, Utc};
use civic_map_event::client::EventsQuery;
use civic_map_event::normalize::normalize_events;
use civic_map_event_models::SourceEventType;
use civic_map_geo_models::{Coordinate, VANCOUVER_BOUNDS};
use civic_map_neighborhood::is_within_city_bounds;
use civic_map_server_models::{
    ApiGeocodeCandidate, ApiHealth, ApiNeighborhood, FeedQueryParams, GeocodeQueryParams,
    ResolveQueryParams, ResolveResponse,
};

use crate::AppState;

/// Number of candidates requested per geocoding query.
const GEOCODE_LIMIT: u32 = 5;
/// Default feed window when no date range is given.
const DEFAULT_FEED_DAYS: i64 = 30;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/events`
///
/// Same-origin forwarder to the backend events feed.
pub async fn proxy_events(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    forward(&state, "events", req.query_string()).await
}

/// `GET /api/neighborhoods`
///
/// Same-origin forwarder to the backend neighborhoods feed.
pub async fn proxy_neighborhoods(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    forward(&state, "neighborhoods", req.query_string()).await
}

/// Forwards a `GET` to the backend, relaying the upstream status code
/// and body verbatim. A failure of the forward itself (DNS, connect,
/// timeout) maps to `500` with an error payload.
async fn forward(state: &AppState, path: &str, query: &str) -> HttpResponse {
    let mut url = format!("{}/api/{path}", state.backend_url);
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }

    match state.http.get(&url).send().await {
        Ok(response) => {
            let status = actix_web::http::StatusCode::from_u16(response.status().as_u16())
                .unwrap_or(actix_web::http::StatusCode::BAD_GATEWAY);
            match response.bytes().await {
                Ok(body) => HttpResponse::build(status)
                    .content_type("application/json")
                    .body(body),
                Err(e) => forward_error(&e),
            }
        }
        Err(e) => forward_error(&e),
    }
}

fn forward_error(error: &reqwest::Error) -> HttpResponse {
    log::error!("Backend forward failed: {error}");
    HttpResponse::InternalServerError().json(serde_json::json!({
        "error": "Failed to fetch from backend",
        "details": error.to_string(),
    }))
}

/// `GET /api/neighborhoods/boundaries`
///
/// Lists the embedded boundary set for map rendering.
pub async fn boundaries(state: web::Data<AppState>) -> HttpResponse {
    let list: Vec<ApiNeighborhood> = state.boundaries.boundaries().map(ApiNeighborhood::from).collect();
    HttpResponse::Ok().json(list)
}

/// `GET /api/neighborhoods/resolve?lng=..&lat=..`
///
/// Resolves a point to its containing neighborhood. The city-bounds
/// test runs first so far-away points skip the containment walk.
pub async fn resolve(
    state: web::Data<AppState>,
    params: web::Query<ResolveQueryParams>,
) -> HttpResponse {
    let point = Coordinate::new(params.lng, params.lat);
    let within_city = is_within_city_bounds(point);
    let neighborhood = if within_city {
        state.boundaries.find_containing(point).map(ApiNeighborhood::from)
    } else {
        None
    };

    HttpResponse::Ok().json(ResolveResponse {
        neighborhood,
        within_city,
    })
}

/// `GET /api/geocode?q=..`
///
/// Geocodes a free-text query scoped to the city bounds and annotates
/// each candidate with the slug of the neighborhood containing it.
/// Answers `503` when no geocoder is configured and `502` when the
/// upstream geocoder is unavailable — both distinct from a successful
/// empty candidate list.
pub async fn geocode(
    state: web::Data<AppState>,
    params: web::Query<GeocodeQueryParams>,
) -> HttpResponse {
    let Some(geocoder) = &state.geocoder else {
        return HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "Geocoding is not configured"
        }));
    };

    match geocoder.search(&params.q, VANCOUVER_BOUNDS, GEOCODE_LIMIT).await {
        Ok(candidates) => {
            let annotated: Vec<ApiGeocodeCandidate> = candidates
                .into_iter()
                .map(|candidate| {
                    let neighborhood = state
                        .boundaries
                        .find_containing(candidate.center)
                        .map(|boundary| boundary.slug.clone());
                    ApiGeocodeCandidate {
                        text: candidate.text,
                        place_name: candidate.place_name,
                        center: candidate.center,
                        neighborhood,
                    }
                })
                .collect();
            HttpResponse::Ok().json(annotated)
        }
        Err(e) => {
            log::error!("Geocoding failed: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Geocoding unavailable",
                "details": e.to_string(),
            }))
        }
    }
}

/// `GET /api/feed`
///
/// Fetches the trailing window of events (30 days by default), applies
/// the neighborhood scope when requested, and returns the normalized,
/// time-ordered feed.
pub async fn feed(state: web::Data<AppState>, params: web::Query<FeedQueryParams>) -> HttpResponse {
    let end_date = params.end_date.unwrap_or_else(|| Utc::now().date_naive());
    let start_date = params
        .start_date
        .unwrap_or_else(|| end_date - Duration::days(DEFAULT_FEED_DAYS));

    let event_type = match params.event_type.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<SourceEventType>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Unknown event type: {raw}")
                }));
            }
        },
    };

    let query = EventsQuery {
        start_date,
        end_date,
        event_type,
    };

    let result = match params.neighborhood_id.as_deref() {
        Some(neighborhood_id) => state.feed.neighborhood_events(neighborhood_id, &query).await,
        None => state.feed.get_events(&query).await,
    };

    match result {
        Ok(records) => HttpResponse::Ok().json(normalize_events(&records)),
        Err(e) => {
            log::error!("Feed fetch failed: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Events feed unavailable",
                "details": e.to_string(),
            }))
        }
    }
}
