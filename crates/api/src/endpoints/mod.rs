//! API endpoints.

mod admin;
mod push;
mod suggestions;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::middleware::AppState;

/// Liveness check.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(suggestions::router())
        .nest("/admin", admin::router())
        .nest("/push", push::router())
}
