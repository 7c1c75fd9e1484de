//! Work record handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse, MAX_PAGE_LIMIT};
use cadence_core::{NewWorkRecord, WorkRecord, WorkStatus};

/// Query parameters for listing work records
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Request body for creating a work record
#[derive(Debug, Deserialize)]
pub struct CreateWorkRequest {
    /// Defaults to now when omitted
    pub logged_at: Option<DateTime<Utc>>,
    pub user: String,
    pub department: String,
    pub project_id: Option<i64>,
    pub hours: Option<f64>,
    /// Defaults to in_progress when omitted
    pub status: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// GET /api/work - List work records with pagination
pub async fn list_work_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<WorkRecord>>, AppError> {
    if params.limit < 1 || params.limit > MAX_PAGE_LIMIT {
        return Err(AppError::bad_request(&format!(
            "Limit must be between 1 and {}",
            MAX_PAGE_LIMIT
        )));
    }
    if params.offset < 0 {
        return Err(AppError::bad_request("Offset must be non-negative"));
    }

    let records = state.db.list_work_records(params.limit, params.offset)?;
    Ok(Json(records))
}

/// POST /api/work - Create a work record
pub async fn create_work_record(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateWorkRequest>,
) -> Result<Json<WorkRecord>, AppError> {
    if body.user.trim().is_empty() || body.department.trim().is_empty() {
        return Err(AppError::bad_request("User and department are required"));
    }

    let status = match &body.status {
        Some(raw) => WorkStatus::from_str(raw)
            .map_err(|_| AppError::bad_request("Unknown work status"))?,
        None => WorkStatus::default(),
    };

    if let Some(project_id) = body.project_id {
        if state.db.get_project(project_id)?.is_none() {
            return Err(AppError::bad_request("Unknown project id"));
        }
    }

    let id = state
        .db
        .insert_work_record(&NewWorkRecord {
            logged_at: body.logged_at.unwrap_or_else(Utc::now),
            user: body.user,
            department: body.department,
            project_id: body.project_id,
            hours: body.hours,
            status,
            description: body.description,
            import_hash: None,
        })?
        .expect("unhashed records never dedup");

    let record = state
        .db
        .get_work_record(id)?
        .ok_or_else(|| AppError::not_found("Work record not found after insert"))?;
    Ok(Json(record))
}

/// GET /api/work/:id - Get a single work record
pub async fn get_work_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<WorkRecord>, AppError> {
    let record = state
        .db
        .get_work_record(id)?
        .ok_or_else(|| AppError::not_found("Work record not found"))?;
    Ok(Json(record))
}

/// DELETE /api/work/:id - Delete a work record
pub async fn delete_work_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_work_record(id)?;
    Ok(Json(SuccessResponse { success: true }))
}
