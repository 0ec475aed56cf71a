//! Rule-based Named Entity Recognition
//!
//! Regex patterns plus a dictionary with aliases, in the categories the
//! upstream NLP pipeline reports (person, organization, location, date,
//! money, ...). Overlapping matches are deduplicated keeping the
//! highest-confidence span.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use textsift_core::{Entity, EntityLabel, Result};

use crate::EntityExtractor;

/// Dictionary entry for entity matching
#[derive(Debug, Clone)]
pub struct DictionaryEntry {
    pub term: String,
    pub label: EntityLabel,
    pub aliases: Vec<String>,
}

/// Rule-based NER using regex patterns and a term dictionary
pub struct RuleBasedNer {
    /// Pattern rules (regex, label, confidence)
    patterns: Vec<(Regex, EntityLabel, f32)>,
    /// Dictionary of known terms
    dictionary: HashMap<String, DictionaryEntry>,
}

impl RuleBasedNer {
    /// Create a rule-based NER with the default patterns and dictionary
    pub fn new() -> Self {
        let mut ner = Self {
            patterns: Vec::new(),
            dictionary: HashMap::new(),
        };

        ner.init_patterns();
        ner.init_dictionary();
        ner
    }

    fn init_patterns(&mut self) {
        // Date patterns
        self.add_pattern(r"\d{4}[-/]\d{1,2}[-/]\d{1,2}", EntityLabel::Date, 0.95);
        self.add_pattern(r"\d{1,2}[-/]\d{1,2}[-/]\d{4}", EntityLabel::Date, 0.95);
        self.add_pattern(
            r"\d{1,2}(?:st|nd|rd|th)?\s+(?:January|February|March|April|May|June|July|August|September|October|November|December)(?:\s+\d{4})?",
            EntityLabel::Date,
            0.9,
        );
        self.add_pattern(
            r"(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2}(?:,\s*\d{4})?",
            EntityLabel::Date,
            0.9,
        );

        // Money patterns
        self.add_pattern(r"[$€£]\s?\d[\d,]*(?:\.\d+)?", EntityLabel::Money, 0.9);
        self.add_pattern(
            r"\d[\d,]*(?:\.\d+)?\s?(?:euros?|dollars?|EUR|USD)",
            EntityLabel::Money,
            0.85,
        );

        // Organization patterns: anonymized parties and corporate suffixes
        self.add_pattern(r"(?:Vendor|Company|Contractor)\s+\d+", EntityLabel::Organization, 0.9);
        self.add_pattern(
            r"[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*\s+(?:Ltd|Inc|LLC|GmbH|Corp|Corporation|Authority|Ministry|Agency|Commission|Airport)",
            EntityLabel::Organization,
            0.8,
        );

        // Person patterns: titled names
        self.add_pattern(
            r"(?:Mr|Mrs|Ms|Dr|Prof)\.?\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?",
            EntityLabel::Person,
            0.85,
        );
    }

    fn init_dictionary(&mut self) {
        self.add_term(
            "tender procedure",
            EntityLabel::Event,
            vec!["tender procedures", "tender process"],
        );
        self.add_term("interview", EntityLabel::Event, vec!["interviews"]);
        self.add_term("investigation", EntityLabel::Event, vec!["investigations"]);
        self.add_term(
            "representative",
            EntityLabel::Person,
            vec!["representatives"],
        );
        self.add_term("price offer", EntityLabel::Product, vec!["price offers"]);
    }

    /// Add a regex pattern
    fn add_pattern(&mut self, pattern: &str, label: EntityLabel, confidence: f32) {
        if let Ok(regex) = Regex::new(pattern) {
            self.patterns.push((regex, label, confidence));
        }
    }

    /// Add a dictionary term with aliases
    pub fn add_term(&mut self, term: &str, label: EntityLabel, aliases: Vec<&str>) {
        let entry = DictionaryEntry {
            term: term.to_string(),
            label,
            aliases: aliases.iter().map(|s| s.to_string()).collect(),
        };
        self.dictionary.insert(term.to_string(), entry);
    }

    /// Extract entities using pattern matching
    fn extract_by_patterns(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for (regex, label, confidence) in &self.patterns {
            for mat in regex.find_iter(text) {
                entities.push(Entity::new(
                    mat.as_str(),
                    *label,
                    mat.start(),
                    mat.end(),
                    *confidence,
                ));
            }
        }

        entities
    }

    /// Extract entities using case-insensitive dictionary lookup
    fn extract_by_dictionary(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for entry in self.dictionary.values() {
            let term: Vec<char> = entry.term.to_lowercase().chars().collect();
            for (start, end) in find_case_insensitive(text, &term) {
                entities.push(Entity::new(&text[start..end], entry.label, start, end, 0.95));
            }

            for alias in &entry.aliases {
                let alias: Vec<char> = alias.to_lowercase().chars().collect();
                for (start, end) in find_case_insensitive(text, &alias) {
                    entities.push(Entity::new(&text[start..end], entry.label, start, end, 0.9));
                }
            }
        }

        entities
    }

    /// Remove overlapping entities, keeping the highest confidence span
    fn deduplicate(&self, mut entities: Vec<Entity>) -> Vec<Entity> {
        // Sort by start position, then by confidence (descending), then by
        // longer span first so the widest match of equal confidence wins.
        entities.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(b.confidence.total_cmp(&a.confidence))
                .then(b.end.cmp(&a.end))
        });

        let mut result: Vec<Entity> = Vec::new();
        let mut covered: HashSet<usize> = HashSet::new();

        for entity in entities {
            let overlaps = (entity.start..entity.end).any(|i| covered.contains(&i));
            if !overlaps {
                for i in entity.start..entity.end {
                    covered.insert(i);
                }
                result.push(entity);
            }
        }

        result.sort_by_key(|e| e.start);
        result
    }
}

impl Default for RuleBasedNer {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte ranges of `needle` (lowercase chars) in `text`, compared char by
/// char. Lowercasing a char can change its byte length, so matching on a
/// lowercased copy of the whole string would yield offsets that do not
/// index the original; this keeps every offset on a boundary of `text`.
fn find_case_insensitive(text: &str, needle: &[char]) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for (start, _) in text.char_indices() {
        let mut consumed = 0;
        for (offset, c) in text[start..].char_indices() {
            let mut aligned = true;
            for lower in c.to_lowercase() {
                if consumed == needle.len() || needle[consumed] != lower {
                    aligned = false;
                    break;
                }
                consumed += 1;
            }
            if !aligned {
                break;
            }
            if consumed == needle.len() {
                matches.push((start, start + offset + c.len_utf8()));
                break;
            }
        }
    }
    matches
}

impl EntityExtractor for RuleBasedNer {
    fn extract(&self, text: &str) -> Result<Vec<Entity>> {
        let mut entities = Vec::new();
        entities.extend(self.extract_by_patterns(text));
        entities.extend(self.extract_by_dictionary(text));

        Ok(self.deduplicate(entities))
    }
}
