//! Frequency counts over extracted knowledge
//!
//! A small multiset counter with `most_common` ordering: descending by
//! count, ties broken by first appearance so results are stable across
//! runs for the same input ordering.

use std::collections::HashMap;
use std::hash::Hash;

use textsift_core::{Entity, Relationship};

/// Insertion-ordered frequency counter
#[derive(Debug, Clone, Default)]
pub struct Counter<K: Eq + Hash + Clone> {
    counts: HashMap<K, usize>,
    first_seen: HashMap<K, usize>,
    next_index: usize,
}

impl<K: Eq + Hash + Clone> Counter<K> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            first_seen: HashMap::new(),
            next_index: 0,
        }
    }

    /// Count one occurrence
    pub fn add(&mut self, key: K) {
        if !self.first_seen.contains_key(&key) {
            self.first_seen.insert(key.clone(), self.next_index);
            self.next_index += 1;
        }
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Count every item of an iterator
    pub fn extend(&mut self, keys: impl IntoIterator<Item = K>) {
        for key in keys {
            self.add(key);
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of one key
    pub fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// The `n` most frequent keys, descending by count; ties keep first
    /// appearance order
    pub fn most_common(&self, n: usize) -> Vec<(K, usize)> {
        let mut entries: Vec<(K, usize)> = self
            .counts
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        entries.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| self.first_seen[&a.0].cmp(&self.first_seen[&b.0]))
        });
        entries.truncate(n);
        entries
    }
}

/// Count entities by (text, label)
pub fn entity_counts(entities: &[Entity]) -> Counter<(String, String)> {
    let mut counter = Counter::new();
    counter.extend(
        entities
            .iter()
            .map(|e| (e.text.clone(), e.label.to_string())),
    );
    counter
}

/// Count relationships by (subject, predicate, object)
pub fn relationship_counts(
    relationships: &[Relationship],
) -> Counter<(String, String, String)> {
    let mut counter = Counter::new();
    counter.extend(
        relationships
            .iter()
            .map(|r| (r.subject.clone(), r.predicate.clone(), r.object.clone())),
    );
    counter
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsift_core::EntityLabel;

    #[test]
    fn test_most_common_orders_by_count() {
        let mut counter = Counter::new();
        counter.extend(["b", "a", "b", "c", "b", "a"]);

        let top = counter.most_common(3);
        assert_eq!(top, vec![("b", 3), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let mut counter = Counter::new();
        counter.extend(["z", "m", "a"]);

        let top = counter.most_common(3);
        assert_eq!(top, vec![("z", 1), ("m", 1), ("a", 1)]);
    }

    #[test]
    fn test_truncates_to_n() {
        let mut counter = Counter::new();
        counter.extend(1..=20);
        assert_eq!(counter.most_common(5).len(), 5);
    }

    #[test]
    fn test_entity_counts_key_on_text_and_label() {
        let entities = vec![
            Entity::new("Vendor 1", EntityLabel::Organization, 0, 8, 0.9),
            Entity::new("Vendor 1", EntityLabel::Organization, 20, 28, 0.9),
            Entity::new("Vendor 1", EntityLabel::Person, 40, 48, 0.5),
        ];

        let counter = entity_counts(&entities);
        assert_eq!(counter.len(), 2);
        assert_eq!(
            counter.get(&("Vendor 1".to_string(), "ORG".to_string())),
            2
        );
    }

    #[test]
    fn test_relationship_counts() {
        let rels = vec![
            Relationship::new("a", "admit", "b", 0.8),
            Relationship::new("a", "admit", "b", 0.8),
            Relationship::new("a", "award", "c", 0.8),
        ];

        let counter = relationship_counts(&rels);
        let top = counter.most_common(1);
        assert_eq!(
            top[0],
            (("a".to_string(), "admit".to_string(), "b".to_string()), 2)
        );
    }

    #[test]
    fn test_empty_input() {
        let counter = entity_counts(&[]);
        assert!(counter.is_empty());
        assert!(counter.most_common(10).is_empty());
    }
}
