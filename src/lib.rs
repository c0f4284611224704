pub mod handlers;
pub mod middleware;
pub mod server;
pub mod stats;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

pub use stats::{Observation, RequestStats, StatsReport};

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Central stats engine — the middleware pushes observations,
    /// the stats endpoints read reports.
    pub stats: Arc<stats::RequestStats>,

    /// In-memory store backing the demo endpoints.
    pub items: RwLock<HashMap<String, handlers::demo::Item>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(stats::RequestStats::new()),
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
