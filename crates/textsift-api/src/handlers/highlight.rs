//! Entity highlighting handler

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use textsift_core::Entity;
use textsift_extract::highlight_entities;

use crate::error::AppError;
use crate::state::AppState;

/// Highlight request
#[derive(Debug, Deserialize, ToSchema)]
pub struct HighlightRequest {
    /// Text to annotate
    #[schema(example = "Vendor 1 admitted the tender irregularity")]
    pub text: String,
}

/// Highlight response
#[derive(Debug, Serialize, ToSchema)]
pub struct HighlightResponse {
    /// Input text with entity spans wrapped in highlight markup
    pub html: String,

    /// Entities found in the text
    pub entities: Vec<Entity>,
}

/// Extract and highlight entities in submitted text
#[utoipa::path(
    post,
    path = "/api/v1/highlight",
    tag = "search",
    request_body = HighlightRequest,
    responses(
        (status = 200, description = "Highlighted text", body = HighlightResponse),
        (status = 500, description = "Extraction failed", body = crate::error::ApiError)
    )
)]
pub async fn highlight(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HighlightRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let (html, entities) =
        highlight_entities(&request.text, state.entity_extractor.as_ref())?;

    Ok(Json(HighlightResponse { html, entities }))
}
