//! CSV import and export
//!
//! CSV is accepted on upload alongside Excel, and the cleaned table is
//! offered back for download in the same shape: a header row plus one
//! `group_key,text` record per row.

use std::io::Write;
use std::path::Path;

use textsift_core::{Record, Table};

use crate::{check_header, FileType, ParserError, Result, TableParser};

/// Header written on export
const EXPORT_HEADER: [&str; 2] = ["Column1", "Text"];

/// CSV table parser
pub struct CsvParser {
    /// Whether to treat the first row as header
    pub first_row_header: bool,
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self {
            first_row_header: true,
        }
    }

    fn read_table<R: std::io::Read>(&self, reader: R) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut table = Table::new();
        let mut first = true;

        for result in csv_reader.records() {
            let row = result.map_err(|e| ParserError::CsvError(e.to_string()))?;

            if first && self.first_row_header {
                first = false;
                let header: Vec<String> = row.iter().map(|s| s.to_string()).collect();
                check_header(&header)?;
                continue;
            }
            first = false;

            let group_key = row.get(0).unwrap_or_default().to_string();
            let text = match row.get(1) {
                Some("") | None => None,
                Some(t) => Some(t.to_string()),
            };

            if group_key.is_empty() && text.is_none() {
                continue;
            }

            table.push(Record { group_key, text });
        }

        Ok(table)
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableParser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let file = std::fs::File::open(path).map_err(|e| ParserError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        self.read_table(file)
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<Table> {
        self.read_table(bytes)
    }

    fn supported_types(&self) -> &[FileType] {
        &[FileType::Csv]
    }
}

/// Write a table as CSV with the standard header
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(EXPORT_HEADER)
        .map_err(|e| ParserError::CsvError(e.to_string()))?;

    for record in &table.records {
        csv_writer
            .write_record([
                record.group_key.as_str(),
                record.text.as_deref().unwrap_or_default(),
            ])
            .map_err(|e| ParserError::CsvError(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| ParserError::CsvError(e.to_string()))?;
    Ok(())
}

/// Render a table as a CSV string (download responses)
pub fn to_csv_string(table: &Table) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ParserError::CsvError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_parse_bytes_round() {
        let data = b"Column1,Text\n1.pdf,first excerpt\n2.pdf,\n";
        let table = CsvParser::new().parse_bytes(data).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].group_key, "1.pdf");
        assert_eq!(table.records[0].text.as_deref(), Some("first excerpt"));
        assert!(table.records[1].text.is_none());
    }

    #[test]
    fn test_single_column_is_schema_error() {
        let err = CsvParser::new().parse_bytes(b"Column1\n1.pdf\n").unwrap_err();
        assert!(matches!(err, ParserError::SchemaError(_)));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Column1,Text").unwrap();
        writeln!(file, "a.pdf,hello there").unwrap();
        file.flush().unwrap();

        let table = CsvParser::new().parse(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].text.as_deref(), Some("hello there"));
    }

    #[test]
    fn test_export_quotes_embedded_commas() {
        let table = Table::from_records(vec![Record::new("1.pdf", "one, two and three")]);
        let out = to_csv_string(&table).unwrap();

        assert!(out.starts_with("Column1,Text\n"));
        assert!(out.contains("\"one, two and three\""));
    }

    #[test]
    fn test_export_empty_table_is_header_only() {
        let out = to_csv_string(&Table::new()).unwrap();
        assert_eq!(out, "Column1,Text\n");
    }

    #[test]
    fn test_import_export_preserves_rows() {
        let table = Table::from_records(vec![
            Record::new("a.pdf", "alpha"),
            Record::new("b.pdf", "beta"),
        ]);

        let out = to_csv_string(&table).unwrap();
        let back = CsvParser::new().parse_bytes(out.as_bytes()).unwrap();
        assert_eq!(back, table);
    }
}
