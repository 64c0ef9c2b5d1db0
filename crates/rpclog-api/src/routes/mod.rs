//! Route definitions
//!
//! Read-only admin routes mounted under /api/v1, plus health probes.

use axum::{routing::get, Router};

use crate::handlers::{health, logs};
use crate::state::AppState;

/// Create the main API router (excluding health, which bypasses middleware)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Export must be registered before the :log_id matcher
        .route("/logs/export", get(logs::export_logs))
        .route("/logs", get(logs::list_logs))
        .route("/logs/:log_id", get(logs::get_log))
}
