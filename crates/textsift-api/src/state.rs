//! Application state management
//!
//! One analyst, one session: each upload replaces the previous session
//! whole (last-write-wins), and handlers read the current session
//! through the shared lock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use textsift_core::{
    AppConfig, CleanReport, Entity, Relationship, Result, Table, ValidationFinding,
};
use textsift_core::ResolutionAction;
use textsift_extract::{
    clean_entities, clean_relationships, EntityExtractor, RelationExtractor, RuleBasedNer,
    SvoExtractor,
};
use textsift_validate::{Resolver, Validator};

/// Everything computed from one uploaded spreadsheet
pub struct AnalysisSession {
    /// Original file name
    pub file_name: String,

    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,

    /// Rows in the uploaded table before cleanup
    pub input_rows: usize,

    /// Validation log for the upload
    pub findings: Vec<ValidationFinding>,

    /// Actions the resolver took
    pub actions: Vec<ResolutionAction>,

    /// Cleaned table (one row per group key)
    pub table: Table,

    /// Entities extracted from the cleaned rows
    pub entities: Vec<Entity>,

    /// Relationships extracted from the cleaned rows
    pub relationships: Vec<Relationship>,
}

impl AnalysisSession {
    /// Run the full pipeline over an uploaded table
    pub fn build(
        file_name: impl Into<String>,
        table: Table,
        entity_extractor: &dyn EntityExtractor,
        relation_extractor: &dyn RelationExtractor,
        min_confidence: f32,
    ) -> Result<Self> {
        let input_rows = table.len();

        let findings = Validator::new().validate(&table);
        let CleanReport { table, actions } = Resolver::new().resolve(&table);

        let mut entities = Vec::new();
        let mut relationships = Vec::new();
        for record in &table.records {
            let Some(text) = &record.text else { continue };
            let row_entities = entity_extractor.extract(text)?;
            relationships.extend(relation_extractor.extract(text, &row_entities)?);
            entities.extend(row_entities);
        }

        let mut entities = clean_entities(entities);
        let mut relationships = clean_relationships(relationships);
        entities.retain(|e| e.confidence >= min_confidence);
        relationships.retain(|r| r.confidence >= min_confidence);

        tracing::info!(
            rows = input_rows,
            cleaned = table.len(),
            findings = findings.len(),
            entities = entities.len(),
            relationships = relationships.len(),
            "built analysis session"
        );

        Ok(Self {
            file_name: file_name.into(),
            uploaded_at: Utc::now(),
            input_rows,
            findings,
            actions,
            table,
            entities,
            relationships,
        })
    }
}

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Current analysis session (replaced per upload)
    pub session: RwLock<Option<AnalysisSession>>,
    /// Injected entity extractor
    pub entity_extractor: Arc<dyn EntityExtractor>,
    /// Injected relation extractor
    pub relation_extractor: Arc<dyn RelationExtractor>,
}

impl AppState {
    /// Create state with the shipped rule-based extractors
    pub fn new(config: AppConfig) -> Self {
        let svo = SvoExtractor::new().with_max_distance(config.extraction.relation_max_distance);
        Self::with_extractors(config, Arc::new(RuleBasedNer::new()), Arc::new(svo))
    }

    /// Create state with injected extractors (tests substitute stubs here)
    pub fn with_extractors(
        config: AppConfig,
        entity_extractor: Arc<dyn EntityExtractor>,
        relation_extractor: Arc<dyn RelationExtractor>,
    ) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            session: RwLock::new(None),
            entity_extractor,
            relation_extractor,
        }
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Whether an upload has been processed
    pub async fn has_session(&self) -> bool {
        self.session.read().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsift_core::Record;

    #[test]
    fn test_session_pipeline_composes() {
        let table = Table::from_records(vec![
            Record::new("1.pdf", "Vendor 1 admitted the tender procedures problem"),
            Record::new("1.pdf", "Vendor 1 admitted the tender procedures problem"),
            Record::missing("2.pdf"),
        ]);

        let session = AnalysisSession::build(
            "upload.xlsx",
            table,
            &RuleBasedNer::new(),
            &SvoExtractor::new(),
            0.5,
        )
        .unwrap();

        assert_eq!(session.input_rows, 3);
        assert_eq!(session.table.len(), 1);
        assert!(!session.findings.is_empty());
        assert!(!session.entities.is_empty());
    }

    #[tokio::test]
    async fn test_state_starts_without_session() {
        let state = AppState::new(AppConfig::default());
        assert!(!state.has_session().await);
        assert_eq!(state.get_request_count(), 0);
    }
}
