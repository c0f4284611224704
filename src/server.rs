use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::middleware::record;
use crate::stats::stream;
use crate::AppState;

/// Builds the full Axum `Router`: demo endpoints, stats endpoints,
/// and the recording middleware wrapped around all of them.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Demo endpoints (instrumented traffic) ───────────────
        .route("/api/items", post(handlers::demo::create_item))
        .route("/api/items/:id", get(handlers::demo::get_item))
        .route("/api/work", get(handlers::demo::simulated_work))
        // ── Stats ───────────────────────────────────────────────
        .route("/api/stats", get(stream::get_stats))
        .route("/api/stats/stream", get(stream::stats_stream))
        // ── Provide shared state to all routes above ────────────
        .with_state(state.clone())
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn_with_state(state, record::record_stats))
        .layer(CorsLayer::permissive())
}
