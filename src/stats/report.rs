use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use super::store::RequestStats;
use super::timespan::{round_to_decimals, TimeSpan};

// ─── Report types ────────────────────────────────────────────────

/// Complete point-in-time snapshot of the stats engine, ready to
/// serialize. Every field is a plain value or an owned copy — the
/// report never aliases store state, so handing it to an encoder
/// has no side effects on the engine.
///
/// Field names on the wire follow the long-established stats
/// endpoint format, misspelling included.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub pid: u32,
    pub uptime: String,
    pub uptime_sec: f64,
    pub time: String,
    pub unixtime: i64,

    /// Requests seen in the current one-second window, by status.
    pub status_code_count: HashMap<String, u64>,
    pub total_status_code_count: HashMap<String, u64>,
    pub count: u64,
    pub total_count: u64,

    pub total_response_time: String,
    pub total_response_time_sec: f64,
    pub average_response_time: String,
    pub average_response_time_sec: f64,

    #[serde(rename = "URLRequestCounts")]
    pub url_request_counts: HashMap<String, u64>,
    #[serde(rename = "RequestTypeCounts")]
    pub request_type_counts: HashMap<String, u64>,
    #[serde(rename = "UserAgentCounts")]
    pub user_agent_counts: HashMap<String, u64>,

    /// Accumulated per-URL latency, integer nanoseconds.
    #[serde(rename = "URLRequestLatency")]
    pub url_request_latency: HashMap<String, u64>,
    /// Per-URL extrema, nanoseconds.
    #[serde(rename = "URLHighestResponse")]
    pub url_highest_response: HashMap<String, f64>,
    #[serde(rename = "URLLowestResponse")]
    pub url_lowest_response: HashMap<String, f64>,

    #[serde(rename = "MaxResponseTimes")]
    pub max_response_times: PeakReport,
}

/// The slowest request observed since startup, with its derived
/// "how long ago" breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct PeakReport {
    #[serde(rename = "ResponseURL")]
    pub url: String,
    #[serde(rename = "RepsonseMethod")]
    pub method: String,
    #[serde(rename = "ResponseDuration")]
    pub duration_ns: u64,
    #[serde(rename = "ResponseTime")]
    pub observed_at: String,
    #[serde(rename = "ResponseSeconds")]
    pub seconds: f64,
    #[serde(rename = "ResponseSince")]
    pub since: TimeSpan,
}

// ─── Building ────────────────────────────────────────────────────

impl StatsReport {
    /// Derive a report from the live store under the read lock.
    /// Pure read: cumulative counters are summed and copied, derived
    /// values (uptime, average, time-since-peak) are recomputed here
    /// and never written back.
    pub(crate) fn build(stats: &RequestStats) -> Self {
        let inner = stats.inner.read();
        let now = Utc::now();

        let uptime = stats.started_instant.elapsed();

        let count: u64 = inner.window_status_counts.values().sum();
        let total_count: u64 = inner.total_status_counts.values().sum();

        let total = inner.total_response_time;
        let average = if total_count > 0 {
            Duration::from_nanos((total.as_nanos() / total_count as u128) as u64)
        } else {
            Duration::ZERO
        };

        let peak = &inner.peak;
        let (observed_at, since) = match peak.observed_at {
            Some(at) => {
                let since_secs =
                    (now - at).num_milliseconds().max(0) as f64 / 1000.0;
                (
                    at.to_rfc3339(),
                    TimeSpan::from_secs(round_to_decimals(since_secs, 0) as u64),
                )
            }
            // No peak yet — nothing to measure from.
            None => (String::new(), TimeSpan::default()),
        };

        Self {
            pid: stats.pid,
            uptime: fmt_duration(uptime),
            uptime_sec: uptime.as_secs_f64(),
            time: now.to_rfc3339(),
            unixtime: now.timestamp(),

            status_code_count: inner.window_status_counts.clone(),
            total_status_code_count: inner.total_status_counts.clone(),
            count,
            total_count,

            total_response_time: fmt_duration(total),
            total_response_time_sec: total.as_secs_f64(),
            average_response_time: fmt_duration(average),
            average_response_time_sec: average.as_secs_f64(),

            url_request_counts: inner.url_request_counts.clone(),
            request_type_counts: inner.method_counts.clone(),
            user_agent_counts: inner.user_agent_counts.clone(),

            url_request_latency: inner
                .url_latency_sum
                .iter()
                .map(|(url, d)| (url.clone(), d.as_nanos() as u64))
                .collect(),
            url_highest_response: inner
                .url_max_latency
                .iter()
                .map(|(url, d)| (url.clone(), d.as_nanos() as f64))
                .collect(),
            url_lowest_response: inner
                .url_min_latency
                .iter()
                .map(|(url, d)| (url.clone(), d.as_nanos() as f64))
                .collect(),

            max_response_times: PeakReport {
                url: peak.url.clone(),
                method: peak.method.clone(),
                duration_ns: peak.duration.as_nanos() as u64,
                observed_at,
                seconds: peak.duration.as_secs_f64(),
                since,
            },
        }
    }
}

/// Human-readable duration, e.g. "65ms" or "1.5s".
fn fmt_duration(d: Duration) -> String {
    format!("{d:?}")
}

// ─── Tests ───────────────────────────────────────────────────────
