//! Insight handlers: frequency counts, network view, topics

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use textsift_insight::{
    entity_counts, relationship_counts, LdaConfig, LdaModel, NetworkView, RelationshipGraph,
    Topic,
};

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for top-N listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct TopQuery {
    /// Number of entries to return
    #[param(default = 10)]
    pub top: Option<usize>,
}

/// One entity frequency entry
#[derive(Debug, Serialize, ToSchema)]
pub struct EntityCount {
    /// Entity text
    #[schema(example = "Vendor 1")]
    pub text: String,

    /// Entity label
    #[schema(example = "ORG")]
    pub label: String,

    /// Occurrences across the cleaned table
    pub count: usize,
}

/// Entity frequency response
#[derive(Debug, Serialize, ToSchema)]
pub struct EntityCountsResponse {
    pub entities: Vec<EntityCount>,

    /// Distinct (text, label) pairs seen
    pub distinct: usize,
}

/// Top entities by frequency
#[utoipa::path(
    get,
    path = "/api/v1/insights/entities",
    tag = "insights",
    params(TopQuery),
    responses(
        (status = 200, description = "Entity counts", body = EntityCountsResponse),
        (status = 404, description = "No upload in session", body = crate::error::ApiError)
    )
)]
pub async fn top_entities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopQuery>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();
    let top = params.top.unwrap_or(state.config.insight.top_n);

    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Uploaded table".to_string()))?;

    let counter = entity_counts(&session.entities);
    let entities = counter
        .most_common(top)
        .into_iter()
        .map(|((text, label), count)| EntityCount { text, label, count })
        .collect();

    Ok(Json(EntityCountsResponse {
        entities,
        distinct: counter.len(),
    }))
}

/// One relationship frequency entry
#[derive(Debug, Serialize, ToSchema)]
pub struct RelationshipCount {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub count: usize,
}

/// Relationship frequency response
#[derive(Debug, Serialize, ToSchema)]
pub struct RelationshipCountsResponse {
    pub relationships: Vec<RelationshipCount>,
    pub distinct: usize,
}

/// Top relationships by frequency
#[utoipa::path(
    get,
    path = "/api/v1/insights/relationships",
    tag = "insights",
    params(TopQuery),
    responses(
        (status = 200, description = "Relationship counts", body = RelationshipCountsResponse),
        (status = 404, description = "No upload in session", body = crate::error::ApiError)
    )
)]
pub async fn top_relationships(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopQuery>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();
    let top = params.top.unwrap_or(state.config.insight.top_n);

    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Uploaded table".to_string()))?;

    let counter = relationship_counts(&session.relationships);
    let relationships = counter
        .most_common(top)
        .into_iter()
        .map(|((subject, predicate, object), count)| RelationshipCount {
            subject,
            predicate,
            object,
            count,
        })
        .collect();

    Ok(Json(RelationshipCountsResponse {
        relationships,
        distinct: counter.len(),
    }))
}

/// Relationship network for the dashboard
#[utoipa::path(
    get,
    path = "/api/v1/insights/graph",
    tag = "insights",
    responses(
        (status = 200, description = "Network nodes and edges", body = NetworkView),
        (status = 404, description = "No upload in session", body = crate::error::ApiError)
    )
)]
pub async fn relationship_graph(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Uploaded table".to_string()))?;

    let graph = RelationshipGraph::from_relationships(&session.relationships);
    Ok(Json(graph.view()))
}

/// Query parameters for topic modeling
#[derive(Debug, Deserialize, IntoParams)]
pub struct TopicsQuery {
    /// Number of topics to fit
    #[param(default = 5)]
    pub num_topics: Option<usize>,
}

/// Topic modeling response
#[derive(Debug, Serialize, ToSchema)]
pub struct TopicsResponse {
    pub topics: Vec<Topic>,

    /// Vocabulary size after stopword filtering
    pub vocabulary: usize,
}

/// Fit LDA topics over the cleaned table text
#[utoipa::path(
    get,
    path = "/api/v1/insights/topics",
    tag = "insights",
    params(TopicsQuery),
    responses(
        (status = 200, description = "Fitted topics", body = TopicsResponse),
        (status = 404, description = "No upload in session", body = crate::error::ApiError)
    )
)]
pub async fn topics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopicsQuery>,
) -> Result<impl IntoResponse, AppError> {
    state.increment_requests();

    let guard = state.session.read().await;
    let session = guard
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Uploaded table".to_string()))?;

    let documents: Vec<String> = session
        .table
        .records
        .iter()
        .filter_map(|r| r.text.clone())
        .collect();

    let config = LdaConfig {
        num_topics: params.num_topics.unwrap_or(state.config.insight.num_topics),
        iterations: state.config.insight.topic_iterations,
        seed: state.config.insight.topic_seed,
        ..Default::default()
    };

    let model = LdaModel::fit(&documents, &config);
    Ok(Json(TopicsResponse {
        topics: model.topics(),
        vocabulary: model.vocab_len(),
    }))
}
