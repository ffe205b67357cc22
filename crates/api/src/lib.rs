//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The report submission endpoint
//! - Health check
//! - JSON error responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use msb_core::delivery::NotificationSink;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where submitted reports are delivered.
    pub sink: Arc<dyn NotificationSink>,
}

impl AppState {
    /// Creates state around a notification sink.
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
