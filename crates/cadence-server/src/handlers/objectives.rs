//! Objective handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use cadence_core::{NewObjective, ObjectiveRecord};

/// Request body for creating an objective
#[derive(Debug, Deserialize)]
pub struct CreateObjectiveRequest {
    pub title: String,
    #[serde(default)]
    pub progress: f64,
    pub target: f64,
    pub owner: Option<String>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

/// Request body for updating an objective's progress
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub progress: f64,
}

/// GET /api/objectives - List all objectives
pub async fn list_objectives(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ObjectiveRecord>>, AppError> {
    let objectives = state.db.all_objectives()?;
    Ok(Json(objectives))
}

/// POST /api/objectives - Create an objective
pub async fn create_objective(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateObjectiveRequest>,
) -> Result<Json<ObjectiveRecord>, AppError> {
    if body.title.trim().is_empty() {
        return Err(AppError::bad_request("Objective title is required"));
    }
    if body.target <= 0.0 {
        return Err(AppError::bad_request("Target must be positive"));
    }
    if body.progress < 0.0 {
        return Err(AppError::bad_request("Progress must be non-negative"));
    }

    let id = state.db.insert_objective(&NewObjective {
        title: body.title,
        progress: body.progress,
        target: body.target,
        owner: body.owner,
        period_start: body.period_start,
        period_end: body.period_end,
    })?;

    let objective = state
        .db
        .get_objective(id)?
        .ok_or_else(|| AppError::not_found("Objective not found after insert"))?;
    Ok(Json(objective))
}

/// GET /api/objectives/:id - Get a single objective
pub async fn get_objective(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ObjectiveRecord>, AppError> {
    let objective = state
        .db
        .get_objective(id)?
        .ok_or_else(|| AppError::not_found("Objective not found"))?;
    Ok(Json(objective))
}

/// PATCH /api/objectives/:id/progress - Update an objective's progress
pub async fn update_objective_progress(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateProgressRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    if body.progress < 0.0 {
        return Err(AppError::bad_request("Progress must be non-negative"));
    }

    state.db.update_objective_progress(id, body.progress)?;
    Ok(Json(SuccessResponse { success: true }))
}
