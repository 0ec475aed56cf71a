//! textsift Core - Domain models and shared types
//!
//! This crate defines the core abstractions used throughout textsift:
//! - Table model (records keyed by a group column with free text)
//! - Validation findings and resolution actions
//! - Extracted entities and relationships
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, ExtractionConfig, InsightConfig, ServerConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for textsift operations
#[derive(Error, Debug)]
pub enum SiftError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SiftError>;

// ============================================================================
// Table Model
// ============================================================================

/// Spreadsheet rows are 1-based and the first visible row is the header,
/// so data row `i` (0-based) appears as row `i + 2` in the sheet.
pub const HEADER_ROW_OFFSET: usize = 2;

/// One row of the input table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Record {
    /// Document or source identifier (first column)
    pub group_key: String,

    /// Free text (second column); absent when the cell was empty
    pub text: Option<String>,
}

impl Record {
    /// Create a record with text
    pub fn new(group_key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            group_key: group_key.into(),
            text: Some(text.into()),
        }
    }

    /// Create a record whose text cell was empty
    pub fn missing(group_key: impl Into<String>) -> Self {
        Self {
            group_key: group_key.into(),
            text: None,
        }
    }
}

/// Ordered sequence of records parsed from one uploaded spreadsheet.
///
/// Ordering carries no meaning beyond stable grouping by `group_key`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from records
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a row
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Spreadsheet row number for a 0-based record index
    pub fn spreadsheet_row(index: usize) -> usize {
        index + HEADER_ROW_OFFSET
    }

    /// Iterate over rows paired with their spreadsheet row numbers
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Record)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (Self::spreadsheet_row(i), r))
    }
}

// ============================================================================
// Validation Findings
// ============================================================================

/// Category of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    MissingValue,
    ExactDuplicate,
    SubsetDuplicate,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingValue => "Missing Value",
            Self::ExactDuplicate => "Duplicate Entry",
            Self::SubsetDuplicate => "Subset Duplicate",
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the validation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationFinding {
    /// Finding category
    pub kind: FindingKind,

    /// Human-readable description
    pub description: String,

    /// Spreadsheet row number(s) concerned (1-based, header adjusted)
    pub rows: Vec<usize>,
}

impl ValidationFinding {
    /// Create a finding for a single row
    pub fn for_row(kind: FindingKind, row: usize, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            rows: vec![row],
        }
    }

    /// Create a finding naming a pair of rows
    pub fn for_pair(kind: FindingKind, rows: (usize, usize), description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            rows: vec![rows.0, rows.1],
        }
    }
}

// ============================================================================
// Resolution Actions
// ============================================================================

/// One cleanup step taken by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResolutionAction {
    /// What was done and why
    pub description: String,

    /// Rows removed or merged by this step
    pub count: usize,
}

impl ResolutionAction {
    pub fn new(description: impl Into<String>, count: usize) -> Self {
        Self {
            description: description.into(),
            count,
        }
    }
}

/// Result of running the resolver: cleaned table plus the action log
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CleanReport {
    pub table: Table,
    pub actions: Vec<ResolutionAction>,
}

// ============================================================================
// Extracted Knowledge
// ============================================================================

/// Entity categories, mirroring the labels of the upstream NER pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    Date,
    Money,
    Event,
    Product,
    Unknown,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORG",
            Self::Location => "LOC",
            Self::Date => "DATE",
            Self::Money => "MONEY",
            Self::Event => "EVENT",
            Self::Product => "PRODUCT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named span of text tagged with a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Entity {
    /// Matched text
    pub text: String,

    /// Entity category
    pub label: EntityLabel,

    /// Byte offset where the span starts
    pub start: usize,

    /// Byte offset where the span ends
    pub end: usize,

    /// Extraction confidence (0.0 - 1.0)
    pub confidence: f32,
}

impl Entity {
    pub fn new(
        text: impl Into<String>,
        label: EntityLabel,
        start: usize,
        end: usize,
        confidence: f32,
    ) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
            confidence,
        }
    }
}

/// A (subject, predicate, object) triple extracted from a sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Relationship {
    pub subject: String,
    pub predicate: String,
    pub object: String,

    /// Extraction confidence (0.0 - 1.0)
    pub confidence: f32,
}

impl Relationship {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            confidence,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
