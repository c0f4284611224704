use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use request_stats::server::create_router;
use request_stats::AppState;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::USER_AGENT, "pipeline-test")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn middleware_records_every_demo_request() {
    let state = Arc::new(AppState::new());
    let app = create_router(state.clone());

    let res = app.clone().oneshot(get("/api/work")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("X-Response-Time-Us"));

    let res = app.clone().oneshot(get("/api/items/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let report = state.stats.report();
    assert_eq!(report.total_count, 2);
    assert_eq!(report.count, 2);
    assert_eq!(report.total_status_code_count["200"], 1);
    assert_eq!(report.total_status_code_count["404"], 1);
    assert_eq!(report.request_type_counts["GET"], 2);
    assert_eq!(report.user_agent_counts["pipeline-test"], 2);
    assert_eq!(report.url_request_counts["/api/work"], 1);
    assert_eq!(report.url_request_counts["/api/items/nope"], 1);
    assert_eq!(report.max_response_times.method, "GET");
}

#[tokio::test]
async fn create_then_fetch_item_round_trip() {
    let state = Arc::new(AppState::new());
    let app = create_router(state.clone());

    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"widget"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let id = created["id"].as_str().unwrap();
    assert!(id.starts_with("itm_"));

    let res = app
        .clone()
        .oneshot(get(&format!("/api/items/{id}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // An empty name is rejected and still recorded by the pipeline.
    let res = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/items")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"  "}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let report = state.stats.report();
    assert_eq!(report.total_count, 3);
    assert_eq!(report.request_type_counts["POST"], 2);
    assert_eq!(report.total_status_code_count["400"], 1);
}

#[tokio::test]
async fn stats_endpoint_exports_the_wire_format() {
    let state = Arc::new(AppState::new());
    let app = create_router(state.clone());

    let res = app.clone().oneshot(get("/api/work")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.clone().oneshot(get("/api/stats")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    // The snapshot is taken inside the handler, before the stats
    // request itself gets recorded.
    assert_eq!(v["total_count"].as_u64().unwrap(), 1);
    assert_eq!(v["pid"].as_u64().unwrap(), std::process::id() as u64);
    assert!(v["uptime_sec"].as_f64().unwrap() >= 0.0);
    assert!(v["URLRequestCounts"]["/api/work"].as_u64().unwrap() == 1);
    assert!(v["MaxResponseTimes"]["RepsonseMethod"].is_string());
}
