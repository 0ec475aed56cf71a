//! Property tests for the resolver
//!
//! Covers the invariants that must hold for any input table: output
//! never grows, a clean table only merges, and resolving twice is the
//! same as resolving once.

use proptest::prelude::*;

use textsift_core::{Record, Table};
use textsift_validate::{normalize, Resolver, Validator};

fn arb_record() -> impl Strategy<Value = Record> {
    let key = prop_oneof![Just("a.pdf"), Just("b.pdf"), Just("c.pdf")];
    let text = proptest::option::of(proptest::sample::select(vec![
        "the cat sat",
        "the cat sat on the mat",
        "The CAT sat!",
        "tender procedures",
        "tender procedures at the airport",
        "unrelated entry",
        "another unrelated entry",
        "...",
    ]));

    (key, text).prop_map(|(key, text)| Record {
        group_key: key.to_string(),
        text: text.map(|t| t.to_string()),
    })
}

fn arb_table() -> impl Strategy<Value = Table> {
    proptest::collection::vec(arb_record(), 0..12).prop_map(Table::from_records)
}

proptest! {
    #[test]
    fn output_rows_never_exceed_input_rows(table in arb_table()) {
        let report = Resolver::new().resolve(&table);
        prop_assert!(report.table.len() <= table.len());
    }

    #[test]
    fn resolver_is_idempotent(table in arb_table()) {
        let first = Resolver::new().resolve(&table);
        let second = Resolver::new().resolve(&first.table);

        prop_assert_eq!(&second.table, &first.table);
        // second pass drops nothing, so at most the merge action remains
        prop_assert!(second.actions.len() <= 1);
    }

    #[test]
    fn resolved_table_has_unique_group_keys(table in arb_table()) {
        let report = Resolver::new().resolve(&table);
        let mut keys: Vec<_> = report
            .table
            .records
            .iter()
            .map(|r| r.group_key.clone())
            .collect();
        let sorted = keys.clone();
        keys.sort();
        keys.dedup();

        // already sorted ascending and free of duplicates
        prop_assert_eq!(&sorted, &keys);
    }

    #[test]
    fn resolved_table_has_no_missing_text(table in arb_table()) {
        let report = Resolver::new().resolve(&table);
        prop_assert!(report.table.records.iter().all(|r| r.text.is_some()));
    }

    #[test]
    fn validator_never_mutates(table in arb_table()) {
        let before = table.clone();
        Validator::new().validate(&table);
        prop_assert_eq!(table, before);
    }
}

#[test]
fn clean_table_reports_only_the_merge() {
    let table = Table::from_records(vec![
        Record::new("a.pdf", "completely distinct first entry"),
        Record::new("b.pdf", "completely different second entry"),
    ]);

    // sanity: the two texts do not nest under normalization
    let (n0, n1) = (
        normalize(table.records[0].text.as_deref().unwrap()),
        normalize(table.records[1].text.as_deref().unwrap()),
    );
    assert!(!n0.contains(&n1) && !n1.contains(&n0));

    let report = Resolver::new().resolve(&table);
    assert_eq!(report.table.len(), 2);
    assert_eq!(report.actions.len(), 1);
    assert!(report.actions[0].description.contains("Merged"));
}
