//! Read-only validation pass
//!
//! Scans a table for missing values, exact duplicates, and normalized
//! subset duplicates, producing one finding per affected row (or row
//! pair). The input is never mutated.

use std::collections::HashMap;

use textsift_core::{FindingKind, Table, ValidationFinding};

use crate::normalize;

/// Validation scanner
///
/// Checks run in a fixed order so the log reads the way an analyst
/// expects: missing values first, then exact duplicates, then subset
/// duplicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Scan a table and produce the validation log
    pub fn validate(&self, table: &Table) -> Vec<ValidationFinding> {
        let mut findings = Vec::new();

        self.check_missing(table, &mut findings);
        self.check_exact_duplicates(table, &mut findings);
        self.check_subset_duplicates(table, &mut findings);

        tracing::debug!(rows = table.len(), findings = findings.len(), "validated table");
        findings
    }

    /// One finding per row whose text cell is absent
    fn check_missing(&self, table: &Table, findings: &mut Vec<ValidationFinding>) {
        for (row, record) in table.numbered() {
            if record.text.is_none() {
                findings.push(ValidationFinding::for_row(
                    FindingKind::MissingValue,
                    row,
                    "Missing value found in text column",
                ));
            }
        }
    }

    /// One finding per member of every byte-identical duplicate set
    fn check_exact_duplicates(&self, table: &Table, findings: &mut Vec<ValidationFinding>) {
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for record in &table.records {
            if let Some(text) = &record.text {
                *occurrences.entry(text.as_str()).or_insert(0) += 1;
            }
        }

        for (row, record) in table.numbered() {
            let Some(text) = &record.text else { continue };
            if occurrences[text.as_str()] > 1 {
                findings.push(ValidationFinding::for_row(
                    FindingKind::ExactDuplicate,
                    row,
                    format!("Duplicate entry found in text column: {text}"),
                ));
            }
        }
    }

    /// Pairwise subset scan over normalized text.
    ///
    /// O(n²) with no early termination; input tables are single uploaded
    /// spreadsheets, not a bulk pipeline. Rows with absent text or text
    /// that normalizes to the empty string are not comparable and are
    /// skipped.
    fn check_subset_duplicates(&self, table: &Table, findings: &mut Vec<ValidationFinding>) {
        let normalized: Vec<Option<String>> = table
            .records
            .iter()
            .map(|r| {
                r.text
                    .as_deref()
                    .map(normalize)
                    .filter(|n| !n.is_empty())
            })
            .collect();

        for i in 0..normalized.len() {
            for j in (i + 1)..normalized.len() {
                let (Some(text_i), Some(text_j)) = (&normalized[i], &normalized[j]) else {
                    continue;
                };

                let row_i = Table::spreadsheet_row(i);
                let row_j = Table::spreadsheet_row(j);

                if text_j.contains(text_i.as_str()) {
                    findings.push(ValidationFinding::for_pair(
                        FindingKind::SubsetDuplicate,
                        (row_i, row_j),
                        format!("Text in row {row_i} is a subset of text in row {row_j}"),
                    ));
                } else if text_i.contains(text_j.as_str()) {
                    findings.push(ValidationFinding::for_pair(
                        FindingKind::SubsetDuplicate,
                        (row_i, row_j),
                        format!("Text in row {row_j} is a subset of text in row {row_i}"),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsift_core::Record;

    fn table(rows: Vec<(&str, Option<&str>)>) -> Table {
        Table::from_records(
            rows.into_iter()
                .map(|(key, text)| match text {
                    Some(t) => Record::new(key, t),
                    None => Record::missing(key),
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_table_yields_no_findings() {
        let findings = Validator::new().validate(&Table::new());
        assert!(findings.is_empty());
    }

    #[test]
    fn test_missing_value_reported_per_row() {
        let t = table(vec![("A", None), ("A", Some("x"))]);
        let findings = Validator::new().validate(&t);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::MissingValue);
        assert_eq!(findings[0].rows, vec![2]);
    }

    #[test]
    fn test_exact_duplicates_flag_all_members() {
        let t = table(vec![("A", Some("hello")), ("A", Some("hello"))]);
        let findings = Validator::new().validate(&t);

        let dups: Vec<_> = findings
            .iter()
            .filter(|f| f.kind == FindingKind::ExactDuplicate)
            .collect();
        assert_eq!(dups.len(), 2);
        assert_eq!(dups[0].rows, vec![2]);
        assert_eq!(dups[1].rows, vec![3]);
    }

    #[test]
    fn test_subset_duplicate_names_both_rows() {
        let t = table(vec![
            ("A", Some("the cat sat")),
            ("A", Some("the cat sat on the mat")),
        ]);
        let findings = Validator::new().validate(&t);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::SubsetDuplicate);
        assert_eq!(findings[0].rows, vec![2, 3]);
        assert!(findings[0]
            .description
            .contains("row 2 is a subset of text in row 3"));
    }

    #[test]
    fn test_subset_detected_through_normalization() {
        // Case and punctuation differ but the normalized forms nest.
        let t = table(vec![
            ("A", Some("The CAT, sat!")),
            ("A", Some("the cat sat on the mat")),
        ]);
        let findings = Validator::new().validate(&t);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::SubsetDuplicate);
    }

    #[test]
    fn test_missing_rows_skipped_by_duplicate_checks() {
        let t = table(vec![("A", None), ("B", None)]);
        let findings = Validator::new().validate(&t);

        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.kind == FindingKind::MissingValue));
    }

    #[test]
    fn test_punctuation_only_text_not_comparable() {
        let t = table(vec![("A", Some("...")), ("A", Some("real text"))]);
        let findings = Validator::new().validate(&t);

        assert!(findings
            .iter()
            .all(|f| f.kind != FindingKind::SubsetDuplicate));
    }

    #[test]
    fn test_validator_does_not_mutate() {
        let t = table(vec![("A", Some("hello")), ("A", Some("hello"))]);
        let before = t.clone();
        Validator::new().validate(&t);
        assert_eq!(t, before);
    }

    #[test]
    fn test_check_order_in_log() {
        let t = table(vec![
            ("A", None),
            ("A", Some("dup")),
            ("A", Some("dup")),
            ("B", Some("short text")),
            ("B", Some("short text and more")),
        ]);
        let findings = Validator::new().validate(&t);

        let kinds: Vec<_> = findings.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::MissingValue,
                FindingKind::ExactDuplicate,
                FindingKind::ExactDuplicate,
                // exact duplicates are also equal under normalization
                FindingKind::SubsetDuplicate,
                FindingKind::SubsetDuplicate,
            ]
        );
    }
}
