use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::store::RequestStats;

/// How often the rolling window counters are cleared.
const WINDOW: Duration = Duration::from_secs(1);

/// Handle to the background window-reset task. The reference design
/// runs this unconditionally forever; holding a handle lets tests
/// and graceful shutdown cancel it deterministically.
pub struct WindowReset {
    handle: JoinHandle<()>,
}

/// Spawn the task that clears the one-second window counters on a
/// fixed cadence, for the life of the process. This is the only
/// caller of `reset_window_counts()`.
pub fn spawn_window_reset(stats: Arc<RequestStats>) -> WindowReset {
    let handle = tokio::spawn(async move {
        let mut tick = tokio::time::interval(WINDOW);
        loop {
            tick.tick().await;
            stats.reset_window_counts();
        }
    });

    WindowReset { handle }
}

impl WindowReset {
    /// Cancel the reset task. Safe at any point — the task holds no
    /// lock while waiting on the timer.
    pub fn stop(self) {
        self.handle.abort();
    }
}

// ─── Tests ───────────────────────────────────────────────────────
