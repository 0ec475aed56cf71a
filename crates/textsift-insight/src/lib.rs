//! textsift Insight - Aggregation over extracted knowledge
//!
//! Turns the entities and relationships extracted from a cleaned table
//! into the numbers the dashboard renders:
//! - frequency counts with deterministic `most_common` ordering
//! - a relationship network (nodes, labeled edges, degree statistics)
//! - LDA topic models with a fixed sampling seed

pub mod counts;
pub mod graph;
pub mod topics;

pub use counts::{entity_counts, relationship_counts, Counter};
pub use graph::{NetworkView, RelationshipGraph};
pub use topics::{LdaConfig, LdaModel, Topic, MAX_TOPICS};
