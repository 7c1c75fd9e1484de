//! Health and status handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};

/// Record counts for the status endpoint
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub work_records: i64,
    pub projects: i64,
    pub objectives: i64,
}

/// GET /api/health - Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/status - Record counts
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, AppError> {
    Ok(Json(StatusResponse {
        work_records: state.db.count_work_records()?,
        projects: state.db.count_projects()?,
        objectives: state.db.count_objectives()?,
    }))
}
