//! Deterministic cleanup pass
//!
//! Applies the fixes for everything the validator flags, each step
//! consuming the previous step's output:
//! 1. drop exact duplicates, keeping the first occurrence
//! 2. drop rows with missing text
//! 3. drop subset-duplicate rows, keeping the longer text
//! 4. merge surviving rows per group key
//!
//! The result is deterministic for a fixed input ordering, and running
//! the resolver on its own output changes nothing.

use std::collections::{BTreeMap, HashSet};

use textsift_core::{CleanReport, Record, ResolutionAction, Table};

use crate::normalize;

/// Cleanup pass over a validated table
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver;

impl Resolver {
    pub fn new() -> Self {
        Self
    }

    /// Produce a cleaned table and the list of actions taken
    pub fn resolve(&self, table: &Table) -> CleanReport {
        let mut actions = Vec::new();

        let records = self.drop_exact_duplicates(table.records.clone(), &mut actions);
        let records = self.drop_missing(records, &mut actions);
        let records = self.drop_subset_duplicates(records, &mut actions);
        let table = self.merge_groups(records, &mut actions);

        tracing::debug!(rows = table.len(), actions = actions.len(), "resolved table");
        CleanReport { table, actions }
    }

    /// Step 1: keep the first occurrence of each exact text
    fn drop_exact_duplicates(
        &self,
        records: Vec<Record>,
        actions: &mut Vec<ResolutionAction>,
    ) -> Vec<Record> {
        let mut seen: HashSet<String> = HashSet::new();
        let before = records.len();

        let kept: Vec<Record> = records
            .into_iter()
            .filter(|record| match &record.text {
                Some(text) => seen.insert(text.clone()),
                // missing-text rows are handled by the next step
                None => true,
            })
            .collect();

        let removed = before - kept.len();
        if removed > 0 {
            actions.push(ResolutionAction::new(
                format!("Removed {removed} exact duplicate entries."),
                removed,
            ));
        }
        kept
    }

    /// Step 2: drop rows whose text cell is absent
    fn drop_missing(
        &self,
        records: Vec<Record>,
        actions: &mut Vec<ResolutionAction>,
    ) -> Vec<Record> {
        let before = records.len();
        let kept: Vec<Record> = records.into_iter().filter(|r| r.text.is_some()).collect();

        let removed = before - kept.len();
        if removed > 0 {
            actions.push(ResolutionAction::new(
                format!("Removed {removed} rows with missing text values."),
                removed,
            ));
        }
        kept
    }

    /// Step 3: pairwise subset scan over normalized text, dropping the
    /// shorter side of every nested pair.
    ///
    /// Every pair is evaluated against the same surviving set and marks
    /// are a set union, so evaluation order cannot change the outcome.
    /// Tie-break: equal-length normalized texts (necessarily equal
    /// strings when one contains the other) drop the lower-indexed row.
    fn drop_subset_duplicates(
        &self,
        records: Vec<Record>,
        actions: &mut Vec<ResolutionAction>,
    ) -> Vec<Record> {
        let normalized: Vec<String> = records
            .iter()
            .map(|r| normalize(r.text.as_deref().unwrap_or_default()))
            .collect();

        let mut marked: HashSet<usize> = HashSet::new();

        for i in 0..normalized.len() {
            for j in (i + 1)..normalized.len() {
                let (text_i, text_j) = (&normalized[i], &normalized[j]);
                if text_i.is_empty() || text_j.is_empty() {
                    continue;
                }

                if text_j.contains(text_i.as_str()) {
                    // covers the equal-string case: lower index dropped
                    marked.insert(i);
                } else if text_i.contains(text_j.as_str()) {
                    marked.insert(j);
                }
            }
        }

        let removed = marked.len();
        let kept: Vec<Record> = records
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !marked.contains(i))
            .map(|(_, r)| r)
            .collect();

        if removed > 0 {
            actions.push(ResolutionAction::new(
                format!("Removed {removed} subset duplicate entries, keeping the longer text."),
                removed,
            ));
        }
        kept
    }

    /// Step 4: one output row per group key, texts joined by a single
    /// space in original row order; keys emitted in ascending order.
    fn merge_groups(&self, records: Vec<Record>, actions: &mut Vec<ResolutionAction>) -> Table {
        if records.is_empty() {
            return Table::new();
        }

        let merged_from = records.len();
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for record in records {
            groups
                .entry(record.group_key)
                .or_default()
                .push(record.text.unwrap_or_default());
        }

        let table = Table::from_records(
            groups
                .into_iter()
                .map(|(group_key, texts)| Record::new(group_key, texts.join(" ")))
                .collect(),
        );

        actions.push(ResolutionAction::new(
            format!(
                "Merged {merged_from} rows into {} groups by group key.",
                table.len()
            ),
            merged_from,
        ));
        table
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
    fn test_empty_table_resolves_trivially() {
        let report = Resolver::new().resolve(&Table::new());
        assert!(report.table.is_empty());
        assert!(report.actions.is_empty());
    }

    #[test]
    fn test_exact_duplicates_keep_one_representative() {
        let t = table(vec![("A", Some("hello")), ("A", Some("hello"))]);
        let report = Resolver::new().resolve(&t);

        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.records[0].group_key, "A");
        assert_eq!(report.table.records[0].text.as_deref(), Some("hello"));
        assert_eq!(report.actions[0].count, 1);
    }

    #[test]
    fn test_missing_rows_dropped() {
        let t = table(vec![("A", None), ("A", Some("x"))]);
        let report = Resolver::new().resolve(&t);

        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.records[0].text.as_deref(), Some("x"));
        assert!(report.actions[0].description.contains("missing text"));
    }

    #[test]
    fn test_subset_removes_shorter_text() {
        let t = table(vec![
            ("A", Some("the cat sat")),
            ("A", Some("the cat sat on the mat")),
        ]);
        let report = Resolver::new().resolve(&t);

        assert_eq!(report.table.len(), 1);
        assert_eq!(
            report.table.records[0].text.as_deref(),
            Some("the cat sat on the mat")
        );
    }

    #[test]
    fn test_equal_length_tie_drops_lower_index() {
        // Same text under normalization but not byte-identical, so the
        // exact-duplicate step does not touch them.
        let t = table(vec![("A", Some("Hello!")), ("B", Some("hello"))]);
        let report = Resolver::new().resolve(&t);

        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.records[0].group_key, "B");
    }

    #[test]
    fn test_clean_table_only_merges() {
        let t = table(vec![("A", Some("alpha")), ("B", Some("beta"))]);
        let report = Resolver::new().resolve(&t);

        assert_eq!(report.table.len(), 2);
        assert_eq!(report.actions.len(), 1);
        assert!(report.actions[0].description.contains("Merged"));
    }

    #[test]
    fn test_merge_concatenates_in_row_order() {
        let t = table(vec![
            ("1.pdf", Some("first part")),
            ("2.pdf", Some("other doc")),
            ("1.pdf", Some("second part")),
        ]);
        let report = Resolver::new().resolve(&t);

        assert_eq!(report.table.len(), 2);
        assert_eq!(report.table.records[0].group_key, "1.pdf");
        assert_eq!(
            report.table.records[0].text.as_deref(),
            Some("first part second part")
        );
        assert_eq!(report.table.records[1].group_key, "2.pdf");
    }

    #[test]
    fn test_groups_emitted_in_ascending_key_order() {
        let t = table(vec![("b", Some("two")), ("a", Some("one"))]);
        let report = Resolver::new().resolve(&t);

        let keys: Vec<_> = report
            .table
            .records
            .iter()
            .map(|r| r.group_key.as_str())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_output_never_larger_than_input() {
        let t = table(vec![
            ("A", Some("the cat sat")),
            ("A", Some("the cat sat on the mat")),
            ("A", Some("the cat sat on the mat")),
            ("B", None),
        ]);
        let report = Resolver::new().resolve(&t);
        assert!(report.table.len() <= t.len());
    }

    #[test]
    fn test_resolver_is_idempotent() {
        let t = table(vec![
            ("1.pdf", Some("tender procedures at the airport")),
            ("1.pdf", Some("tender procedures")),
            ("2.pdf", Some("unrelated entry")),
            ("2.pdf", None),
        ]);

        let first = Resolver::new().resolve(&t);
        let second = Resolver::new().resolve(&first.table);

        assert_eq!(second.table, first.table);
        // only the merge action remains, and it drops nothing
        assert_eq!(second.actions.len(), 1);
        assert_eq!(second.table.len(), first.table.len());
    }

    #[test]
    fn test_steps_compose_on_previous_output() {
        // The duplicate of the missing row's group survives step 1, the
        // missing row goes in step 2, and the subset pair resolves over
        // what remains.
        let t = table(vec![
            ("A", Some("same")),
            ("A", Some("same")),
            ("B", None),
            ("C", Some("a bigger phrase entirely")),
            ("C", Some("bigger phrase")),
        ]);
        let report = Resolver::new().resolve(&t);

        assert_eq!(report.actions.len(), 4);
        assert_eq!(report.table.len(), 2);
        assert_eq!(
            report.table.records[1].text.as_deref(),
            Some("a bigger phrase entirely")
        );
    }
}
