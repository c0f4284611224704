pub mod recorder;
pub mod report;
pub mod scheduler;
pub mod store;
pub mod stream;
pub mod timespan;

use std::time::Duration;

use axum::http::StatusCode;

pub use recorder::{ResponseSink, StatusRecorder};
pub use report::{PeakReport, StatsReport};
pub use scheduler::{spawn_window_reset, WindowReset};
pub use store::RequestStats;
pub use timespan::{round_to_decimals, TimeSpan};

/// One fully observed request, ready to fold into the store.
/// This is the "write" side — the recording pipeline builds these
/// and pushes them in; tests inject them with synthetic durations.
#[derive(Debug, Clone)]
pub struct Observation {
    /// Request URL as received, path plus query
    pub url: String,
    /// HTTP method, e.g. "GET"
    pub method: String,
    /// Client agent string, empty when the header is absent
    pub user_agent: String,
    /// Status code the handler ultimately sent
    pub status: StatusCode,
    /// Wall time between begin and end
    pub elapsed: Duration,
}
