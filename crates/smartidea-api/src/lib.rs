//! # smartidea-api
//!
//! HTTP API server for Smart Idea Finder: accounts, saved documents, search
//! trends, and the four generation endpoints.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;
use uuid::Uuid;

pub use config::AppConfig;
pub use error::{ApiError, GenerationError};
pub use state::AppState;

/// Request ID generator using UUIDv7 for time-ordered IDs.
#[derive(Clone, Copy)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600));

    if config.allows_any_origin() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/api/health", get(handlers::health))
        // Accounts
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        // Saved documents
        .route("/api/ideas", get(handlers::ideas::list))
        .route("/api/ideas/save", post(handlers::ideas::save))
        .route("/api/ideas/favorites", get(handlers::ideas::favorites))
        // Generation
        .route("/api/ai/generate-idea", post(handlers::ai::generate_idea))
        .route("/api/ai/generate-roadmap", post(handlers::ai::generate_roadmap))
        .route(
            "/api/ai/generate-pitch-deck",
            post(handlers::ai::generate_pitch_deck),
        )
        .route("/api/ai/enhance-idea", post(handlers::ai::enhance_idea))
        // Trends
        .route("/api/trends", get(handlers::trends::get_trends))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .with_state(state)
}
