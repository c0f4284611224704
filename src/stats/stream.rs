use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

use super::report::StatsReport;
use crate::AppState;

// ─── GET /api/stats ──────────────────────────────────────────────
/// One JSON snapshot of every aggregate — the operator "stats"
/// endpoint, also handy for curl / debugging.

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsReport> {
    Json(state.stats.report())
}

// ─── GET /api/stats/stream ───────────────────────────────────────
/// Server-Sent Events endpoint pushing a full `StatsReport` as JSON
/// once per second — the same cadence the rolling window turns over
/// at, so each event shows one window's worth of traffic.

pub async fn stats_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let interval = tokio::time::interval(Duration::from_secs(1));

    let stream = IntervalStream::new(interval).map(move |_| {
        let report = state.stats.report();
        let json = serde_json::to_string(&report).unwrap_or_default();
        Ok(Event::default().data(json))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
