//! Project handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppError, AppState, SuccessResponse};
use cadence_core::{NewProject, ProjectRecord, ProjectStatus};

/// Request body for creating a project
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub status: Option<String>,
    pub starts_on: NaiveDate,
    pub ends_on: Option<NaiveDate>,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

/// Request body for updating a project's status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// GET /api/projects - List all projects
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProjectRecord>>, AppError> {
    let projects = state.db.all_projects()?;
    Ok(Json(projects))
}

/// POST /api/projects - Create a project
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<Json<ProjectRecord>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::bad_request("Project name is required"));
    }
    if let Some(ends_on) = body.ends_on {
        if ends_on < body.starts_on {
            return Err(AppError::bad_request("End date is before start date"));
        }
    }

    let status = match &body.status {
        Some(raw) => ProjectStatus::from_str(raw)
            .map_err(|_| AppError::bad_request("Unknown project status"))?,
        None => ProjectStatus::default(),
    };

    if state.db.get_project_by_name(&body.name)?.is_some() {
        return Err(AppError::conflict("A project with this name already exists"));
    }

    let id = state.db.insert_project(&NewProject {
        name: body.name,
        status,
        starts_on: body.starts_on,
        ends_on: body.ends_on,
        departments: body.departments,
        members: body.members,
    })?;

    let project = state
        .db
        .get_project(id)?
        .ok_or_else(|| AppError::not_found("Project not found after insert"))?;
    Ok(Json(project))
}

/// GET /api/projects/:id - Get a single project
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectRecord>, AppError> {
    let project = state
        .db
        .get_project(id)?
        .ok_or_else(|| AppError::not_found("Project not found"))?;
    Ok(Json(project))
}

/// PATCH /api/projects/:id/status - Update a project's lifecycle status
pub async fn update_project_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let status = ProjectStatus::from_str(&body.status)
        .map_err(|_| AppError::bad_request("Unknown project status"))?;

    state.db.update_project_status(id, status)?;
    Ok(Json(SuccessResponse { success: true }))
}
