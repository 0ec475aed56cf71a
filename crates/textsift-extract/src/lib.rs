//! textsift Extract - Entity and relationship extraction
//!
//! Implements Named Entity Recognition (NER) and subject–verb–object
//! relation extraction over cleaned table text. The pipeline is
//! consumed through the two traits below so the surrounding application
//! can swap the shipped rule-based implementation for a stub in tests
//! or for a heavier model later.

use textsift_core::{Entity, Relationship, Result};

pub mod highlight;
pub mod ner;
pub mod relation;

pub use highlight::highlight_entities;
pub use ner::RuleBasedNer;
pub use relation::SvoExtractor;

/// Trait for entity extractors
pub trait EntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<Entity>>;
}

/// Trait for relation extractors
pub trait RelationExtractor: Send + Sync {
    fn extract(&self, text: &str, entities: &[Entity]) -> Result<Vec<Relationship>>;
}

/// Drop entities whose text is blank
pub fn clean_entities(entities: Vec<Entity>) -> Vec<Entity> {
    entities
        .into_iter()
        .filter(|e| {
            let keep = !e.text.trim().is_empty();
            if !keep {
                tracing::debug!(?e, "skipping blank entity");
            }
            keep
        })
        .collect()
}

/// Drop relationships with a blank subject or object
pub fn clean_relationships(relationships: Vec<Relationship>) -> Vec<Relationship> {
    relationships
        .into_iter()
        .filter(|r| {
            let keep = !r.subject.trim().is_empty() && !r.object.trim().is_empty();
            if !keep {
                tracing::debug!(?r, "skipping invalid relationship");
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use textsift_core::EntityLabel;

    #[test]
    fn test_clean_entities_drops_blank_text() {
        let entities = vec![
            Entity::new("Vendor 1", EntityLabel::Organization, 0, 8, 0.9),
            Entity::new("   ", EntityLabel::Unknown, 9, 12, 0.5),
        ];

        let cleaned = clean_entities(entities);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].text, "Vendor 1");
    }

    #[test]
    fn test_clean_relationships_drops_blank_ends() {
        let rels = vec![
            Relationship::new("Vendor 1", "admit", "irregularity", 0.8),
            Relationship::new("", "admit", "irregularity", 0.8),
            Relationship::new("Vendor 1", "admit", " ", 0.8),
        ];

        let cleaned = clean_relationships(rels);
        assert_eq!(cleaned.len(), 1);
    }
}
