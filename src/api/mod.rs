//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/time", get(api_time_handler))
        .route("/overlay", get(overlay_handler))
        .route("/add_time", post(add_time_handler))
        .route("/set_time", post(set_time_handler))
        .route("/pause", post(pause_handler))
        .route("/resume", post(resume_handler))
        // Event sources
        .route("/webhook", post(donation_handler))
        .route("/twitch", post(twitch_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
