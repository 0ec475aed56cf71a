//! API route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{highlight, insights, upload, validation};
use crate::state::AppState;

/// Create API v1 routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Upload / download
        .route("/upload", post(upload::upload))
        .route("/download", get(upload::download))
        // Validation report
        .route("/validation", get(validation::validation_report))
        .route("/resolution", get(validation::resolution_report))
        // Insights
        .route("/insights/entities", get(insights::top_entities))
        .route("/insights/relationships", get(insights::top_relationships))
        .route("/insights/graph", get(insights::relationship_graph))
        .route("/insights/topics", get(insights::topics))
        // Search
        .route("/highlight", post(highlight::highlight))
}
