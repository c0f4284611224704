use axum::{
    extract::{Path, State},
    Json,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::AppState;

use super::AppError;

// ─── Domain types ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
}

// ─── GET /api/items/:id ──────────────────────────────────────────

pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let items = state.items.read();
    match items.get(&id) {
        Some(item) => Ok(Json(item.clone())),
        None => Err(AppError::NotFound(format!("item '{id}' not found"))),
    }
}

// ─── POST /api/items ─────────────────────────────────────────────

pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateItemRequest>,
) -> Result<Json<Item>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let item = Item {
        id: format!("itm_{}", &uuid::Uuid::new_v4().to_string()[..8]),
        name: req.name,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    state.items.write().insert(item.id.clone(), item.clone());

    Ok(Json(item))
}

// ─── GET /api/work ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct WorkReport {
    pub slept_ms: u64,
}

/// Simulated workload with 1–50 ms of jitter, so the stats endpoint
/// has a latency spread worth looking at in development.
pub async fn simulated_work() -> Json<WorkReport> {
    let slept_ms = rand::thread_rng().gen_range(1..=50);
    tokio::time::sleep(Duration::from_millis(slept_ms)).await;

    Json(WorkReport { slept_ms })
}
