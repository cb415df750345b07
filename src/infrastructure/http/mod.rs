//! HTTP REST API routes

mod script_routes;

use std::sync::Arc;

use axum::{routing::post, Router};

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/generate", post(script_routes::generate))
        .route("/api/expand", post(script_routes::expand))
}
