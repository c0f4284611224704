use std::sync::Arc;

use request_stats::server;
use request_stats::stats::spawn_window_reset;
use request_stats::AppState;

#[tokio::main]
async fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════╗");
    println!("║   📊  IN-PROCESS REQUEST STATS                  ║");
    println!("╚══════════════════════════════════════════════════╝");
    println!();

    // ── 1. Build shared state ────────────────────────────────────
    let state = Arc::new(AppState::new());

    // ── 2. Start the window-reset task ───────────────────────────
    // Clears the rolling one-second counters for the life of the
    // process; the handle would let a shutdown path stop it.
    let _window_reset = spawn_window_reset(state.stats.clone());

    // ── 3. Build Axum router ─────────────────────────────────────
    let app = server::create_router(state);

    // ── 4. Bind & serve ──────────────────────────────────────────
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to port 3000 — is it already in use?");

    println!("Server listening on http://localhost:3000");
    println!("Stats JSON      → http://localhost:3000/api/stats");
    println!("Stats SSE       → http://localhost:3000/api/stats/stream");
    println!("Demo workload   → http://localhost:3000/api/work");
    println!();

    axum::serve(listener, app)
        .await
        .expect("Server exited with error");
}
