//! Insight handlers

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};
use cadence_core::insights::{InsightCollection, InsightEngine};
use cadence_core::PeriodKind;

/// GET /api/insights/:period - Generate insights for a period
///
/// The collection is regenerated from the current record snapshot on every
/// call; nothing is cached or persisted.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Path(period): Path<String>,
) -> Result<Json<InsightCollection>, AppError> {
    let period = PeriodKind::from_str(&period)
        .map_err(|_| AppError::bad_request("Period must be weekly, monthly, or quarterly"))?;

    let engine = InsightEngine::new();
    let collection = engine.generate(&state.db, period).await?;

    Ok(Json(collection))
}
