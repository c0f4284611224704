use axum::{
    extract::{Request, State},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use crate::AppState;

/// Axum middleware that observes every request/response pair and
/// feeds it into the stats engine.
///
/// The response value already carries its final status once the
/// inner chain returns, so this path uses the explicit-status end
/// variant instead of wrapping a sink recorder.
///
/// Also adds an `X-Response-Time-Us` header and prints a coloured
/// one-liner to stdout for development.
pub async fn record_stats(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let url = req.uri().to_string();
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let start = Instant::now();
    let mut response = next.run(req).await;

    state
        .stats
        .end_with_status(start, response.status(), &url, &method, &user_agent);

    // ── Inject response header ──────────────────────────────────
    let us = start.elapsed().as_micros();
    if let Ok(val) = us.to_string().parse() {
        response.headers_mut().insert("X-Response-Time-Us", val);
    }

    // ── Console log ─────────────────────────────────────────────
    let status = response.status().as_u16();
    let colour = match status {
        200..=299 => "\x1b[32m", // green
        400..=499 => "\x1b[33m", // yellow
        _ => "\x1b[31m",        // red
    };
    // Skip the noisy SSE stream
    if url.starts_with("/api/") && !url.contains("/stream") {
        println!(
            "  {colour}{status}\x1b[0m  {method:<5} {url:<35} {us:>7}μs"
        );
    }

    response
}
