use std::sync::Arc;
use std::thread;
use std::time::Duration;

use axum::http::StatusCode;
use request_stats::stats::{Observation, RequestStats};

fn obs(url: &str) -> Observation {
    Observation {
        url: url.to_owned(),
        method: "GET".to_owned(),
        user_agent: "bench".to_owned(),
        status: StatusCode::OK,
        elapsed: Duration::from_micros(100),
    }
}

#[test]
fn a_thousand_concurrent_updates_lose_nothing() {
    let stats = Arc::new(RequestStats::new());
    let threads = 8;
    let per_thread = 125;

    thread::scope(|s| {
        for _ in 0..threads {
            let stats = &stats;
            s.spawn(move || {
                for _ in 0..per_thread {
                    stats.record(obs("/hot"));
                }
            });
        }
    });

    let report = stats.report();
    assert_eq!(report.url_request_counts["/hot"], 1000);
    assert_eq!(report.total_count, 1000);
    assert_eq!(report.total_status_code_count["200"], 1000);
    // 1000 × 100 µs, exactly
    assert_eq!(report.total_response_time_sec, 0.1);
    assert_eq!(report.url_request_latency["/hot"], 100_000_000);
}

#[test]
fn readers_run_alongside_writers() {
    let stats = Arc::new(RequestStats::new());

    thread::scope(|s| {
        for _ in 0..4 {
            let stats = &stats;
            s.spawn(move || {
                for _ in 0..250 {
                    stats.record(obs("/mixed"));
                }
            });
        }
        // Concurrent snapshot readers; each report must be
        // internally consistent at whatever instant it was taken.
        for _ in 0..4 {
            let stats = &stats;
            s.spawn(move || {
                for _ in 0..50 {
                    let report = stats.report();
                    let by_status: u64 =
                        report.total_status_code_count.values().sum();
                    assert_eq!(report.total_count, by_status);
                }
            });
        }
    });

    assert_eq!(stats.report().total_count, 1000);
}
