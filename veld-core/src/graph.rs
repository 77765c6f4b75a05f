//! Parsed JSON-LD documents
//!
//! A [`Graph`] holds the nodes of one expanded document in document order,
//! with a by-subject index for lookups. Document order is preserved because
//! downstream consumers give "first declaration wins" semantics to it.

use crate::error::{json_type_name, Error, Result};
use crate::node::Node;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// An immutable set of nodes with by-subject lookup
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Graph {
    /// Parse an expanded JSON-LD document: an array of node objects, a single
    /// node object, or a `{"@graph": [...]}` wrapper
    pub fn from_expanded(document: &JsonValue) -> Result<Graph> {
        let items: Vec<&JsonValue> = match document {
            JsonValue::Array(items) => items.iter().collect(),
            JsonValue::Object(obj) => match obj.get("@graph").and_then(JsonValue::as_array) {
                Some(items) => items.iter().collect(),
                None => vec![document],
            },
            other => {
                return Err(Error::NotADocument {
                    found: json_type_name(other),
                })
            }
        };
        let nodes = items
            .into_iter()
            .map(Node::from_expanded)
            .collect::<Result<Vec<_>>>()?;
        Ok(Graph::from_nodes(nodes))
    }

    /// Build a graph from already-parsed nodes; on duplicate subjects the
    /// first occurrence wins
    pub fn from_nodes(nodes: Vec<Node>) -> Graph {
        let mut graph = Graph {
            index: HashMap::with_capacity(nodes.len()),
            nodes,
        };
        for (position, node) in graph.nodes.iter().enumerate() {
            graph.index.entry(node.id.clone()).or_insert(position);
        }
        graph
    }

    /// Look a node up by subject IRI
    pub fn node(&self, iri: &str) -> Option<&Node> {
        self.index.get(iri).map(|&position| &self.nodes[position])
    }

    /// Whether a subject is present
    pub fn contains(&self, iri: &str) -> bool {
        self.index.contains_key(iri)
    }

    /// Nodes in document order
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Display label for a subject present in this graph
    ///
    /// Resolves `rdfs:label`, then `sh:name`, then falls back to the IRI
    /// itself. Subjects not present resolve to `None`.
    pub fn label_for(&self, iri: &str) -> Option<String> {
        self.node(iri)
            .map(|node| node.display_label().unwrap_or(&node.id).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Graph {
        Graph::from_expanded(&json!([
            {
                "@id": "http://example.com/a",
                "http://www.w3.org/2000/01/rdf-schema#label": [{"@value": "Label A"}]
            },
            {
                "@id": "http://example.com/b",
                "http://www.w3.org/ns/shacl#name": [{"@value": "Name B"}]
            },
            {"@id": "http://example.com/c"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_lookup_by_subject() {
        let graph = sample();
        assert_eq!(graph.len(), 3);
        assert!(graph.contains("http://example.com/a"));
        assert!(graph.node("http://example.com/nope").is_none());
    }

    #[test]
    fn test_label_resolution_order() {
        let graph = sample();
        assert_eq!(graph.label_for("http://example.com/a"), Some("Label A".into()));
        assert_eq!(graph.label_for("http://example.com/b"), Some("Name B".into()));
        assert_eq!(
            graph.label_for("http://example.com/c"),
            Some("http://example.com/c".into())
        );
        assert_eq!(graph.label_for("http://example.com/absent"), None);
    }

    #[test]
    fn test_graph_wrapper_and_single_object() {
        let wrapped = Graph::from_expanded(&json!({"@graph": [{"@id": "http://example.com/x"}]}));
        assert_eq!(wrapped.unwrap().len(), 1);
        let single = Graph::from_expanded(&json!({"@id": "http://example.com/y"}));
        assert_eq!(single.unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_subjects_first_wins() {
        let graph = Graph::from_expanded(&json!([
            {
                "@id": "http://example.com/dup",
                "http://www.w3.org/2000/01/rdf-schema#label": [{"@value": "first"}]
            },
            {
                "@id": "http://example.com/dup",
                "http://www.w3.org/2000/01/rdf-schema#label": [{"@value": "second"}]
            }
        ]))
        .unwrap();
        assert_eq!(graph.label_for("http://example.com/dup"), Some("first".into()));
    }
}
