//! textsift Parser - Spreadsheet parsing and tabular export
//!
//! Turns an uploaded spreadsheet into a `Table` and writes a cleaned
//! table back out as CSV for download. Supported input formats:
//! - Microsoft Excel (XLSX, XLS)
//! - CSV
//!
//! The expected schema is a header row followed by data rows with the
//! group key in the first column and free text in the second. A sheet
//! without a usable text column is rejected whole; there is no partial
//! processing.

use std::path::Path;

use textsift_core::{SiftError, Table};
use thiserror::Error;

pub mod csv_table;
pub mod excel;

pub use csv_table::{write_csv, CsvParser};
pub use excel::ExcelParser;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while parsing a spreadsheet
#[derive(Error, Debug)]
pub enum ParserError {
    /// File format is not supported
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// IO error while reading the file
    #[error("IO error reading file: {path}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Excel parsing error
    #[error("Excel parsing error: {0}")]
    ExcelError(String),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(String),

    /// The sheet does not have the expected group-key/text columns
    #[error("Schema error: {0}")]
    SchemaError(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

impl From<ParserError> for SiftError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::SchemaError(msg) => SiftError::Schema(msg),
            other => SiftError::Parse(other.to_string()),
        }
    }
}

// ============================================================================
// File Types
// ============================================================================

/// Supported spreadsheet formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Xlsx,
    Xls,
    Csv,
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "xlsx" => Self::Xlsx,
            "xls" => Self::Xls,
            "csv" => Self::Csv,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Get MIME type
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Xls => "application/vnd.ms-excel",
            Self::Csv => "text/csv",
            Self::Unknown => "application/octet-stream",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xlsx => write!(f, "xlsx"),
            Self::Xls => write!(f, "xls"),
            Self::Csv => write!(f, "csv"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ============================================================================
// Parser Trait
// ============================================================================

/// Trait for spreadsheet parsers producing a `Table`
pub trait TableParser: Send + Sync {
    /// Parse a table from a file path
    fn parse(&self, path: &Path) -> Result<Table>;

    /// Parse a table from in-memory bytes (uploads never touch disk)
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Table>;

    /// Get supported file types
    fn supported_types(&self) -> &[FileType];

    /// Check if this parser can handle a file type
    fn can_parse(&self, file_type: FileType) -> bool {
        self.supported_types().contains(&file_type)
    }
}

/// Parse a file with the parser matching its extension
pub fn parse_path(path: &Path) -> Result<Table> {
    match FileType::from_path(path) {
        FileType::Xlsx | FileType::Xls => ExcelParser::new().parse(path),
        FileType::Csv => CsvParser::new().parse(path),
        FileType::Unknown => Err(ParserError::UnsupportedFormat(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("none")
                .to_string(),
        )),
    }
}

/// Parse uploaded bytes with the parser matching the original file name
pub fn parse_upload(file_name: &str, bytes: &[u8]) -> Result<Table> {
    match FileType::from_path(Path::new(file_name)) {
        FileType::Xlsx | FileType::Xls => ExcelParser::new().parse_bytes(bytes),
        FileType::Csv => CsvParser::new().parse_bytes(bytes),
        FileType::Unknown => Err(ParserError::UnsupportedFormat(file_name.to_string())),
    }
}

// ============================================================================
// Schema Checks
// ============================================================================

/// Minimum columns: group key plus text
pub(crate) const MIN_COLUMNS: usize = 2;

/// Reject a header row that cannot carry the expected schema
pub(crate) fn check_header(header: &[String]) -> Result<()> {
    if header.len() < MIN_COLUMNS {
        return Err(ParserError::SchemaError(format!(
            "expected at least {MIN_COLUMNS} columns (group key, text), found {}",
            header.len()
        )));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
