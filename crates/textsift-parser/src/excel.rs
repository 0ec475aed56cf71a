//! Excel parser using calamine
//!
//! Reads the first worksheet of an XLSX/XLS workbook into a `Table`:
//! header row first, then one record per data row with the group key in
//! column 0 and text in column 1.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader};

use textsift_core::{Record, Table};

use crate::{check_header, FileType, ParserError, Result, TableParser};

/// Excel spreadsheet parser
pub struct ExcelParser {
    /// Whether to treat the first row as header
    pub first_row_header: bool,
}

impl ExcelParser {
    /// Create a new Excel parser with default settings
    pub fn new() -> Self {
        Self {
            first_row_header: true,
        }
    }

    /// Set whether first row is treated as header
    pub fn with_first_row_header(mut self, enabled: bool) -> Self {
        self.first_row_header = enabled;
        self
    }

    /// Convert a Data cell to string
    fn cell_to_string(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Float(f) => {
                // Format without unnecessary decimals
                if f.fract() == 0.0 {
                    format!("{}", *f as i64)
                } else {
                    format!("{f}")
                }
            }
            Data::Int(i) => format!("{i}"),
            Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Data::Error(e) => format!("#ERROR: {e:?}"),
            Data::DateTime(dt) => format!("{dt}"),
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
        }
    }

    /// Build the table from a worksheet range
    fn range_to_table(&self, range: Range<Data>) -> Result<Table> {
        let mut rows_iter = range.rows();

        if self.first_row_header {
            let header: Vec<String> = rows_iter
                .next()
                .map(|row| row.iter().map(Self::cell_to_string).collect())
                .unwrap_or_default();
            check_header(&header)?;
        }

        let mut table = Table::new();
        for row in rows_iter {
            let group_key = row.first().map(Self::cell_to_string).unwrap_or_default();
            let text = match row.get(1) {
                Some(Data::Empty) | None => None,
                Some(cell) => Some(Self::cell_to_string(cell)),
            };

            // skip fully empty rows
            if group_key.is_empty() && text.is_none() {
                continue;
            }

            table.push(Record { group_key, text });
        }

        Ok(table)
    }

    fn parse_workbook<RS>(&self, mut workbook: calamine::Sheets<RS>) -> Result<Table>
    where
        RS: std::io::Read + std::io::Seek,
    {
        let sheet_names = workbook.sheet_names().to_vec();
        let first_sheet = sheet_names
            .first()
            .ok_or_else(|| ParserError::ExcelError("workbook has no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(first_sheet)
            .map_err(|e| ParserError::ExcelError(e.to_string()))?;

        self.range_to_table(range)
    }
}

impl Default for ExcelParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableParser for ExcelParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let workbook =
            open_workbook_auto(path).map_err(|e| ParserError::ExcelError(e.to_string()))?;
        self.parse_workbook(workbook)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        let cursor = Cursor::new(bytes.to_vec());
        let workbook = open_workbook_auto_from_rs(cursor)
            .map_err(|e| ParserError::ExcelError(e.to_string()))?;
        self.parse_workbook(workbook)
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::Xlsx, FileType::Xls]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string() {
        assert_eq!(ExcelParser::cell_to_string(&Data::Empty), "");
        assert_eq!(
            ExcelParser::cell_to_string(&Data::String("test".to_string())),
            "test"
        );
        assert_eq!(ExcelParser::cell_to_string(&Data::Int(42)), "42");
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(3.5)), "3.5");
        assert_eq!(ExcelParser::cell_to_string(&Data::Float(10.0)), "10");
        assert_eq!(ExcelParser::cell_to_string(&Data::Bool(true)), "TRUE");
    }

    #[test]
    fn test_range_to_table() {
        let mut range = Range::new((0, 0), (2, 1));
        range.set_value((0, 0), Data::String("Column1".into()));
        range.set_value((0, 1), Data::String("Text".into()));
        range.set_value((1, 0), Data::String("1.pdf".into()));
        range.set_value((1, 1), Data::String("first excerpt".into()));
        range.set_value((2, 0), Data::String("2.pdf".into()));
        // row 2 text left empty

        let table = ExcelParser::new().range_to_table(range).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].group_key, "1.pdf");
        assert_eq!(table.records[0].text.as_deref(), Some("first excerpt"));
        assert!(table.records[1].text.is_none());
    }

    #[test]
    fn test_single_column_sheet_is_schema_error() {
        let mut range = Range::new((0, 0), (1, 0));
        range.set_value((0, 0), Data::String("Column1".into()));
        range.set_value((1, 0), Data::String("1.pdf".into()));

        let err = ExcelParser::new().range_to_table(range).unwrap_err();
        assert!(matches!(err, ParserError::SchemaError(_)));
    }

    #[test]
    fn test_supported_types() {
        let parser = ExcelParser::new();
        assert!(parser.can_parse(FileType::Xlsx));
        assert!(parser.can_parse(FileType::Xls));
        assert!(!parser.can_parse(FileType::Csv));
    }
}
