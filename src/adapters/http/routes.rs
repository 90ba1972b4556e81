//! HTTP routes for the issuance API.

use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    delete_class, ensure_class, health, issue_pass, list_classes, upload_roster, ApiHandlers,
};

/// Builds the full API router.
pub fn api_routes(handlers: ApiHandlers, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/issue-pass", post(issue_pass))
        .route("/api/clubs/:club_id/roster", post(upload_roster))
        .route("/api/admin/classes", get(list_classes))
        .route("/api/admin/classes", post(ensure_class))
        .route("/api/admin/classes/:class_id", delete(delete_class))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(handlers)
}
