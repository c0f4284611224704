use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::recorder::{ResponseSink, StatusRecorder};
use super::report::StatsReport;
use super::Observation;

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe request-stats engine, one per process.
/// The recording middleware calls `end_with_status()` on every
/// request, the window-reset task calls `reset_window_counts()`
/// once a second, and the stats endpoint calls `report()`.
///
/// Writers take the lock exclusively; `report()` takes a shared
/// read. Lock hold times are a handful of map operations.
pub struct RequestStats {
    pub(crate) pid: u32,
    pub(crate) started_instant: Instant,
    pub(crate) inner: RwLock<Inner>,
}

/// The slowest request observed since process start. Replaced
/// wholesale whenever a strictly larger duration is recorded;
/// ties keep the existing record.
#[derive(Debug, Clone, Default)]
pub(crate) struct Peak {
    pub(crate) url: String,
    pub(crate) method: String,
    pub(crate) duration: Duration,
    pub(crate) observed_at: Option<DateTime<Utc>>,
}

// ─── Internal state ──────────────────────────────────────────────

pub(crate) struct Inner {
    /// Rolling one-second counters, cleared by the window-reset task.
    pub(crate) window_status_counts: HashMap<String, u64>,

    // Cumulative aggregates — only ever increase.
    pub(crate) total_status_counts: HashMap<String, u64>,
    pub(crate) total_response_time: Duration,
    pub(crate) url_request_counts: HashMap<String, u64>,
    pub(crate) url_latency_sum: HashMap<String, Duration>,
    pub(crate) method_counts: HashMap<String, u64>,
    pub(crate) user_agent_counts: HashMap<String, u64>,

    // Per-URL extrema.
    pub(crate) url_max_latency: HashMap<String, Duration>,
    pub(crate) url_min_latency: HashMap<String, Duration>,

    pub(crate) peak: Peak,
}

// ─── RequestStats impl ───────────────────────────────────────────

impl RequestStats {
    pub fn new() -> Self {
        Self {
            pid: std::process::id(),
            started_instant: Instant::now(),
            inner: RwLock::new(Inner::new()),
        }
    }

    /// Start observing one request: capture the clock and wrap the
    /// real response sink in a status recorder.
    pub fn begin<S: ResponseSink>(&self, sink: S) -> (Instant, StatusRecorder<S>) {
        (Instant::now(), StatusRecorder::new(sink))
    }

    /// Finish observing one request, reading the status off the
    /// recorder. Must be called exactly once, after the inner
    /// handler has fully completed.
    pub fn end<S: ResponseSink>(
        &self,
        start: Instant,
        recorder: &StatusRecorder<S>,
        url: &str,
        method: &str,
        user_agent: &str,
    ) {
        self.end_with_status(start, recorder.status(), url, method, user_agent);
    }

    /// Finish observing one request when the final status is already
    /// known to the caller (the axum middleware path — the response
    /// value carries its status).
    pub fn end_with_status(
        &self,
        start: Instant,
        status: StatusCode,
        url: &str,
        method: &str,
        user_agent: &str,
    ) {
        self.record(Observation {
            url: url.to_owned(),
            method: method.to_owned(),
            user_agent: user_agent.to_owned(),
            status,
            elapsed: start.elapsed(),
        });
    }

    /// Fold one observation into every aggregate, atomically.
    /// Tests inject synthetic elapsed durations through here.
    pub fn record(&self, obs: Observation) {
        self.inner.write().record(obs);
    }

    /// Clear the rolling window counters. Only the window-reset
    /// task (and tests) call this.
    pub fn reset_window_counts(&self) {
        self.inner.write().window_status_counts.clear();
    }

    /// Produce an immutable point-in-time report. Takes the read
    /// lock; never writes back into the store.
    pub fn report(&self) -> StatsReport {
        StatsReport::build(self)
    }
}

impl Default for RequestStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Inner impl ──────────────────────────────────────────────────

impl Inner {
    fn new() -> Self {
        Self {
            window_status_counts: HashMap::new(),
            total_status_counts: HashMap::new(),
            total_response_time: Duration::ZERO,
            url_request_counts: HashMap::new(),
            url_latency_sum: HashMap::new(),
            method_counts: HashMap::new(),
            user_agent_counts: HashMap::new(),
            url_max_latency: HashMap::new(),
            url_min_latency: HashMap::new(),
            peak: Peak::default(),
        }
    }

    fn record(&mut self, obs: Observation) {
        let status_key = obs.status.as_u16().to_string();

        // ── Status counters (window + cumulative) ───────────────
        *self.window_status_counts.entry(status_key.clone()).or_insert(0) += 1;
        *self.total_status_counts.entry(status_key).or_insert(0) += 1;

        // ── Cumulative latency ──────────────────────────────────
        self.total_response_time += obs.elapsed;

        // ── Per-URL counters ────────────────────────────────────
        *self.url_request_counts.entry(obs.url.clone()).or_insert(0) += 1;
        *self
            .url_latency_sum
            .entry(obs.url.clone())
            .or_insert(Duration::ZERO) += obs.elapsed;

        // ── Method / agent counters ─────────────────────────────
        *self.method_counts.entry(obs.method.clone()).or_insert(0) += 1;
        *self.user_agent_counts.entry(obs.user_agent).or_insert(0) += 1;

        // ── Process-wide peak ───────────────────────────────────
        if obs.elapsed > self.peak.duration {
            self.peak = Peak {
                url: obs.url.clone(),
                method: obs.method,
                duration: obs.elapsed,
                observed_at: Some(Utc::now()),
            };
        }

        // ── Per-URL extrema ─────────────────────────────────────
        let max = self
            .url_max_latency
            .entry(obs.url.clone())
            .or_insert(Duration::ZERO);
        if obs.elapsed > *max {
            *max = obs.elapsed;
        }

        // A zero minimum means "not yet initialized" and gets
        // overwritten by the next observation — a genuinely
        // zero-length request is indistinguishable from an empty
        // slot. Known quirk, kept deliberately.
        let min = self
            .url_min_latency
            .entry(obs.url)
            .or_insert(Duration::ZERO);
        if *min == Duration::ZERO || obs.elapsed < *min {
            *min = obs.elapsed;
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────
