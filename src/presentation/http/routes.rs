//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    http::Uri,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{auth_middleware, rate_limit, track_metrics};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Create the main API router
///
/// Health and metrics endpoints are neither authenticated nor rate limited.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(api_routes(state.clone()))
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// Chat and message routes
///
/// Auth runs before rate limiting so rejected credentials never consume a
/// client's budget.
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/chats", post(handlers::chat::create_chat))
        .route("/chats/{chat_id}/messages", get(handlers::chat::get_messages))
        .route("/messages", post(handlers::message::send_message))
        .route("/messages/{message_id}", get(handlers::message::get_message))
        .route(
            "/messages/{message_id}/status",
            put(handlers::message::update_status),
        )
        .route("/users/{user_id}/chats", get(handlers::user::list_chats))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
