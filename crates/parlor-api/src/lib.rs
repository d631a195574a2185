pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method},
    middleware::{from_fn, map_response_with_state},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use parlor_chat::PollPolicy;

use crate::config::Config;
use crate::routes::{chat, docs, health, index};
use crate::state::AppState;

pub use error::{ApiError, ApiResult};

pub fn build_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/", get(index::index))
        .route("/health", get(health::health_check))
        .route("/api/chat", post(chat::send_message))
        .route("/api/chat/history", get(chat::get_history))
        .route("/api/openapi.json", get(docs::openapi_json));

    let mut router = api_routes.layer(from_fn(middleware::logging::log_request));

    let floor = Duration::from_secs(state.config.server.request_timeout_secs);
    match request_timeout(&state.chat.config().poll, floor) {
        Some(limit) => {
            router = router
                .layer(TimeoutLayer::new(limit))
                .layer(map_response_with_state(limit, middleware::timeout::map_timeout));
        }
        None => tracing::info!("Run polling is unbounded, no request timeout applied"),
    }

    router
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Extra time for the provider round trips around the poll sleeps
const ROUND_TRIP_GRACE: Duration = Duration::from_secs(60);

/// Per-request timeout that never cuts a bounded poll short
///
/// `None` when polling is unbounded.
pub fn request_timeout(poll: &PollPolicy, floor: Duration) -> Option<Duration> {
    poll.budget()
        .map(|budget| floor.max(budget.saturating_add(ROUND_TRIP_GRACE)))
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let origins = config.cors.origins();
    if origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(parsed)
}
