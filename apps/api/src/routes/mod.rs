pub mod health;

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::generation::handlers::handle_generate_message;
use crate::state::AppState;

/// Path the portfolio site has always posted to; kept so the front-end needs no change.
const LEGACY_FUNCTION_PATH: &str = "/.netlify/functions/generate-message";

/// Non-POST methods on the generation routes get axum's empty-bodied 405.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/generate-message", post(handle_generate_message))
        .route(LEGACY_FUNCTION_PATH, post(handle_generate_message))
        .with_state(state)
}

/// The router with the production middleware stack applied.
///
/// No CORS layer: it would answer every OPTIONS itself as a preflight, and
/// the site calls this endpoint from its own origin.
pub fn build_app(state: AppState, config: &Config) -> Router {
    // Dropping the handler on timeout or client disconnect also aborts the upstream call.
    build_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
}
