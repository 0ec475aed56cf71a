//! textsift API - REST server for the analysis dashboard
//!
//! Exposes the upload/validate/resolve/extract pipeline and the derived
//! insights over HTTP for a single-analyst dashboard.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::upload::upload,
        handlers::upload::download,
        handlers::validation::validation_report,
        handlers::validation::resolution_report,
        handlers::insights::top_entities,
        handlers::insights::top_relationships,
        handlers::insights::relationship_graph,
        handlers::insights::topics,
        handlers::highlight::highlight,
    ),
    components(schemas(
        error::ApiError,
        handlers::health::HealthResponse,
        handlers::health::ReadinessResponse,
        handlers::upload::UploadResponse,
        handlers::validation::ValidationResponse,
        handlers::validation::ResolutionResponse,
        handlers::insights::EntityCount,
        handlers::insights::EntityCountsResponse,
        handlers::insights::RelationshipCount,
        handlers::insights::RelationshipCountsResponse,
        handlers::insights::TopicsResponse,
        handlers::highlight::HighlightRequest,
        handlers::highlight::HighlightResponse,
        textsift_core::ValidationFinding,
        textsift_core::FindingKind,
        textsift_core::ResolutionAction,
        textsift_core::Entity,
        textsift_core::EntityLabel,
        textsift_core::Relationship,
        textsift_insight::NetworkView,
        textsift_insight::graph::NodeView,
        textsift_insight::graph::EdgeView,
        textsift_insight::Topic,
    )),
    tags(
        (name = "health", description = "Service probes"),
        (name = "upload", description = "Spreadsheet upload and download"),
        (name = "validation", description = "Validation and resolution reports"),
        (name = "insights", description = "Counts, network, and topics"),
        (name = "search", description = "Entity highlighting"),
    )
)]
pub struct ApiDoc;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_upload = state.config.server.max_upload_bytes;

    // No configured origins means a local single-analyst setup
    let cors = if state.config.server.cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .server
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
