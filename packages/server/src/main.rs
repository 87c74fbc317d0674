#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the civic map application.
//!
//! Fronts the backend events feed for the browser UI (same-origin
//! forwarding with permissive CORS) and wires the geocoder, the
//! neighborhood resolver, and the event normalizer together behind a
//! small JSON API.

mod handlers;

use std::time::Duration;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use civic_map_event::client::FeedClient;
use civic_map_geocoder::mapbox::GeocoderClient;
use civic_map_neighborhood::BoundaryIndex;

/// Default upstream events feed.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// Default geocoding API endpoint.
const DEFAULT_MAPBOX_URL: &str = "https://api.mapbox.com";

/// Shared application state, read-only after startup.
pub struct AppState {
    /// Client used by the pass-through forwarders.
    pub http: reqwest::Client,
    /// Upstream events feed base URL.
    pub backend_url: String,
    /// Normalizing feed client.
    pub feed: FeedClient,
    /// Geocoder, present only when a token is configured.
    pub geocoder: Option<GeocoderClient>,
    /// Immutable neighborhood boundary set.
    pub boundaries: BoundaryIndex,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let boundaries = BoundaryIndex::vancouver().expect("Failed to load neighborhood boundaries");
    log::info!(
        "Loaded {} neighborhood boundaries",
        boundaries.boundaries().len()
    );

    let backend_url =
        std::env::var("BACKEND_API_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
    let feed = FeedClient::new(&backend_url).expect("Failed to build feed client");

    let mapbox_url =
        std::env::var("MAPBOX_API_URL").unwrap_or_else(|_| DEFAULT_MAPBOX_URL.to_string());
    let geocoder = match std::env::var("MAPBOX_TOKEN") {
        Ok(token) if !token.is_empty() => Some(
            GeocoderClient::new(&mapbox_url, &token).expect("Failed to build geocoding client"),
        ),
        _ => {
            log::warn!("MAPBOX_TOKEN not set; geocoding endpoint disabled");
            None
        }
    };

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(8))
        .build()
        .expect("Failed to build HTTP client");

    let state = web::Data::new(AppState {
        http,
        backend_url,
        feed,
        geocoder,
        boundaries,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/events", web::get().to(handlers::proxy_events))
                    .route("/neighborhoods", web::get().to(handlers::proxy_neighborhoods))
                    .route(
                        "/neighborhoods/boundaries",
                        web::get().to(handlers::boundaries),
                    )
                    .route("/neighborhoods/resolve", web::get().to(handlers::resolve))
                    .route("/geocode", web::get().to(handlers::geocode))
                    .route("/feed", web::get().to(handlers::feed)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
