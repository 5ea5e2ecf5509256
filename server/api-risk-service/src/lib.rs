//! API Risk Service
//!
//! HTTP service that compares two OpenAPI documents and scores the change.
//! Bind to 127.0.0.1 by default (internal only).

mod handlers;
mod state;

use axum::extract::DefaultBodyLimit;
use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handlers::{analyze, health, score};
pub use state::AppState;

/// Largest accepted request body (two documents plus envelope).
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/analyze", post(analyze))
    .route("/score", post(score))
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
