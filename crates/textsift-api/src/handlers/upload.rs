//! Upload and download handlers
//!
//! `upload` runs the whole pipeline (parse, validate, resolve, extract)
//! and replaces the current session; `download` serves the cleaned
//! table back as CSV.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use textsift_core::SiftError;
use textsift_parser::csv_table::to_csv_string;

use crate::error::AppError;
use crate::state::{AnalysisSession, AppState};

/// Summary returned after a successful upload
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Original file name
    #[schema(example = "excerpts_parsed.xlsx")]
    pub file_name: String,

    /// Rows in the uploaded table
    pub input_rows: usize,

    /// Rows after cleanup (one per group key)
    pub cleaned_rows: usize,

    /// Validation findings recorded
    pub finding_count: usize,

    /// Resolution actions taken
    pub action_count: usize,

    /// Entities extracted from the cleaned text
    pub entity_count: usize,

    /// Relationships extracted from the cleaned text
    pub relationship_count: usize,
}

/// Upload a spreadsheet and run the analysis pipeline
#[utoipa::path(
    post,
    path = "/api/v1/upload",
    tag = "upload",
    request_body(content = Vec<u8>, content_type = "multipart/form-data", description = "Spreadsheet file (xlsx, xls, csv) in a `file` field"),
    responses(
        (status = 200, description = "Upload processed", body = UploadResponse),
        (status = 400, description = "No file field or unreadable spreadsheet", body = crate::error::ApiError),
        (status = 422, description = "Sheet does not have the expected columns", body = crate::error::ApiError)
    )
)]
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field
                .file_name()
                .unwrap_or("upload.xlsx")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            upload = Some((file_name, bytes.to_vec()));
            break;
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("Missing `file` field".to_string()))?;

    tracing::info!(file = %file_name, bytes = bytes.len(), "processing upload");

    let table = textsift_parser::parse_upload(&file_name, &bytes)
        .map_err(SiftError::from)
        .map_err(AppError::from)?;

    let session = AnalysisSession::build(
        &file_name,
        table,
        state.entity_extractor.as_ref(),
        state.relation_extractor.as_ref(),
        state.config.extraction.min_confidence,
    )?;

    let response = UploadResponse {
        file_name: session.file_name.clone(),
        input_rows: session.input_rows,
        cleaned_rows: session.table.len(),
        finding_count: session.findings.len(),
        action_count: session.actions.len(),
        entity_count: session.entities.len(),
        relationship_count: session.relationships.len(),
    };

    // last write wins; the previous session is discarded whole
    *state.session.write().await = Some(session);

    Ok((StatusCode::OK, Json(response)))
}

/// Download the cleaned table as CSV
#[utoipa::path(
    get,
    path = "/api/v1/download",
    tag = "upload",
    responses(
        (status = 200, description = "Cleaned table as CSV", content_type = "text/csv"),
        (status = 404, description = "No upload in session", body = crate::error::ApiError)
    )
)]
pub async fn download(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Uploaded table".to_string()))?;

    let csv = to_csv_string(&session.table)
        .map_err(SiftError::from)
        .map_err(AppError::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"cleaned.csv\"".to_string(),
            ),
        ],
        csv,
    ))
}
