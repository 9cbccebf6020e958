//! Axum route handlers for the advisory API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::advisory::models::{AdvisoryRequest, AdvisoryResult};
use crate::advisory::service::run_advisory;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// POST /api/scan
pub async fn handle_scan(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<AdvisoryResult>, AppError> {
    let request = payload
        .ok()
        .and_then(|Json(req)| req.prompt)
        .as_deref()
        .and_then(AdvisoryRequest::new)
        .ok_or_else(|| AppError::Validation("A valid prompt is required.".to_string()))?;

    let result = run_advisory(state.model.as_ref(), &state.linker, &request).await?;
    Ok(Json(result))
}
