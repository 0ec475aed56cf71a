//! Relationship network
//!
//! Builds an undirected graph from (subject, predicate, object) triples:
//! one node per distinct subject or object, one edge per triple labeled
//! with the predicate. The serializable view feeds the dashboard's
//! network rendering.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use textsift_core::Relationship;

/// Undirected relationship network
pub struct RelationshipGraph {
    graph: UnGraph<String, String>,
    nodes: HashMap<String, NodeIndex>,
}

impl RelationshipGraph {
    /// Build the network from triples; blank subjects or objects are
    /// assumed to have been filtered out upstream
    pub fn from_relationships(relationships: &[Relationship]) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

        for rel in relationships {
            let subject = *nodes
                .entry(rel.subject.clone())
                .or_insert_with(|| graph.add_node(rel.subject.clone()));
            let object = *nodes
                .entry(rel.object.clone())
                .or_insert_with(|| graph.add_node(rel.object.clone()));

            graph.add_edge(subject, object, rel.predicate.clone());
        }

        Self { graph, nodes }
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Degree of a named node, if present
    pub fn degree(&self, name: &str) -> Option<usize> {
        self.nodes
            .get(name)
            .map(|&idx| self.graph.edges(idx).count())
    }

    /// Serializable node/edge lists for the dashboard
    pub fn view(&self) -> NetworkView {
        let mut node_views: Vec<NodeView> = self
            .graph
            .node_indices()
            .map(|idx| NodeView {
                id: self.graph[idx].clone(),
                degree: self.graph.edges(idx).count(),
            })
            .collect();
        // most connected first, name as tie-break, for a stable listing
        node_views.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.id.cmp(&b.id)));

        let edge_views: Vec<EdgeView> = self
            .graph
            .edge_indices()
            .filter_map(|idx| {
                let (a, b) = self.graph.edge_endpoints(idx)?;
                Some(EdgeView {
                    source: self.graph[a].clone(),
                    target: self.graph[b].clone(),
                    label: self.graph[idx].clone(),
                })
            })
            .collect();

        NetworkView {
            nodes: node_views,
            edges: edge_views,
        }
    }
}

/// One network node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NodeView {
    /// Entity text
    pub id: String,

    /// Number of incident edges
    pub degree: usize,
}

/// One labeled network edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EdgeView {
    pub source: String,
    pub target: String,

    /// Predicate of the originating triple
    pub label: String,
}

/// Serializable network for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NetworkView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(s: &str, p: &str, o: &str) -> Relationship {
        Relationship::new(s, p, o, 0.8)
    }

    #[test]
    fn test_nodes_deduplicated_across_triples() {
        let graph = RelationshipGraph::from_relationships(&[
            rel("Vendor 1", "admit", "irregularity"),
            rel("Vendor 2", "admit", "irregularity"),
        ]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_degree() {
        let graph = RelationshipGraph::from_relationships(&[
            rel("a", "p", "b"),
            rel("a", "q", "c"),
        ]);

        assert_eq!(graph.degree("a"), Some(2));
        assert_eq!(graph.degree("b"), Some(1));
        assert_eq!(graph.degree("missing"), None);
    }

    #[test]
    fn test_view_sorted_by_degree() {
        let graph = RelationshipGraph::from_relationships(&[
            rel("hub", "p", "x"),
            rel("hub", "p", "y"),
            rel("hub", "p", "z"),
        ]);

        let view = graph.view();
        assert_eq!(view.nodes[0].id, "hub");
        assert_eq!(view.nodes[0].degree, 3);
        assert_eq!(view.edges.len(), 3);
        assert!(view.edges.iter().all(|e| e.label == "p"));
    }

    #[test]
    fn test_empty_relationships_empty_network() {
        let graph = RelationshipGraph::from_relationships(&[]);
        let view = graph.view();
        assert!(view.nodes.is_empty());
        assert!(view.edges.is_empty());
    }
}
