//! Subject–verb–object relation extraction
//!
//! Scans the text between entity pairs for verbs from a lexicon,
//! yielding (subject, predicate, object) triples. Entity pairs further
//! apart than the distance window are not considered.

use std::collections::HashMap;

use textsift_core::{Entity, Relationship, Result};

use crate::RelationExtractor;

/// Relation confidence is discounted from the weaker entity of the pair
const CONFIDENCE_DISCOUNT: f32 = 0.9;

/// Verb-lexicon SVO extractor
pub struct SvoExtractor {
    /// Surface form -> lemma
    verbs: HashMap<String, String>,
    /// Maximum character distance between subject and object
    pub max_distance: usize,
}

impl SvoExtractor {
    /// Create an extractor with the default verb lexicon
    pub fn new() -> Self {
        let mut extractor = Self {
            verbs: HashMap::new(),
            max_distance: 150,
        };
        extractor.init_verbs();
        extractor
    }

    /// Set the distance window
    pub fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }

    fn init_verbs(&mut self) {
        let defaults = [
            ("admitted", "admit"),
            ("admits", "admit"),
            ("alleged", "allege"),
            ("alleges", "allege"),
            ("awarded", "award"),
            ("awards", "award"),
            ("signed", "sign"),
            ("signs", "sign"),
            ("paid", "pay"),
            ("pays", "pay"),
            ("approved", "approve"),
            ("approves", "approve"),
            ("supplied", "supply"),
            ("supplies", "supply"),
            ("investigated", "investigate"),
            ("investigates", "investigate"),
            ("reported", "report"),
            ("reports", "report"),
            ("submitted", "submit"),
            ("submits", "submit"),
            ("received", "receive"),
            ("receives", "receive"),
            ("exchanged", "exchange"),
            ("exchanges", "exchange"),
            ("conducted", "conduct"),
            ("conducts", "conduct"),
            ("involved", "involve"),
            ("involves", "involve"),
            ("met", "meet"),
            ("meets", "meet"),
        ];

        for (form, lemma) in defaults {
            self.verbs.insert(form.to_string(), lemma.to_string());
        }
    }

    /// Add a verb form to the lexicon
    pub fn add_verb(&mut self, form: &str, lemma: &str) {
        self.verbs.insert(form.to_lowercase(), lemma.to_string());
    }

    /// Find the first lexicon verb in a span of text
    fn find_verb(&self, span: &str) -> Option<&str> {
        span.split_whitespace()
            .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
            .filter_map(|word| self.verbs.get(&word.to_lowercase()))
            .map(|lemma| lemma.as_str())
            .next()
    }
}

impl Default for SvoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationExtractor for SvoExtractor {
    fn extract(&self, text: &str, entities: &[Entity]) -> Result<Vec<Relationship>> {
        let mut ordered: Vec<&Entity> = entities.iter().collect();
        ordered.sort_by_key(|e| e.start);

        let mut relationships = Vec::new();

        for (i, subject) in ordered.iter().enumerate() {
            for object in ordered.iter().skip(i + 1) {
                if object.start < subject.end {
                    continue; // overlapping spans
                }
                if object.start - subject.end > self.max_distance {
                    break; // entities are ordered, every later one is further
                }

                let between = &text[subject.end..object.start];
                if let Some(lemma) = self.find_verb(between) {
                    let confidence =
                        subject.confidence.min(object.confidence) * CONFIDENCE_DISCOUNT;
                    relationships.push(Relationship::new(
                        subject.text.clone(),
                        lemma,
                        object.text.clone(),
                        confidence,
                    ));
                }
            }
        }

        Ok(relationships)
    }
}
