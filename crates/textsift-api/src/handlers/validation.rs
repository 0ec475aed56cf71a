//! Validation report handlers

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use textsift_core::{ResolutionAction, ValidationFinding};

use crate::error::AppError;
use crate::state::AppState;

/// Validation log for the current session
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationResponse {
    pub findings: Vec<ValidationFinding>,
    pub total: usize,
}

/// Get the validation findings for the current upload
#[utoipa::path(
    get,
    path = "/api/v1/validation",
    tag = "validation",
    responses(
        (status = 200, description = "Validation log", body = ValidationResponse),
        (status = 404, description = "No upload in session", body = crate::error::ApiError)
    )
)]
pub async fn validation_report(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Uploaded table".to_string()))?;

    Ok(Json(ValidationResponse {
        total: session.findings.len(),
        findings: session.findings.clone(),
    }))
}

/// Resolution actions for the current session
#[derive(Debug, Serialize, ToSchema)]
pub struct ResolutionResponse {
    pub actions: Vec<ResolutionAction>,
    pub total: usize,
}

/// Get the cleanup actions taken for the current upload
#[utoipa::path(
    get,
    path = "/api/v1/resolution",
    tag = "validation",
    responses(
        (status = 200, description = "Resolution actions", body = ResolutionResponse),
        (status = 404, description = "No upload in session", body = crate::error::ApiError)
    )
)]
pub async fn resolution_report(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Uploaded table".to_string()))?;

    Ok(Json(ResolutionResponse {
        total: session.actions.len(),
        actions: session.actions.clone(),
    }))
}
