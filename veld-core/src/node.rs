//! Typed JSON-LD nodes
//!
//! A [`Node`] is one subject of an expanded JSON-LD document: its IRI, its
//! `@type` list, and its predicate/value-terms map. Nodes are parsed once per
//! fetch and treated as immutable snapshots afterwards.
//!
//! Parsing normalizes a literal `rdf:type` predicate into the `@type` list
//! when the document did not already carry one, so callers can rely on
//! [`Node::types`] regardless of how the store serialized types.

use crate::error::{json_type_name, Error, Result};
use crate::term::{Literal, Term};
use serde_json::{json, Map, Value as JsonValue};
use std::collections::BTreeMap;
use veld_vocab::{rdfs, shacl};

/// A single subject and its predicate/value pairs
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Subject IRI
    pub id: String,
    /// Class IRIs from `@type` (or a normalized `rdf:type`)
    pub types: Vec<String>,
    properties: BTreeMap<String, Vec<Term>>,
}

impl Node {
    /// Parse one node object of an expanded JSON-LD document
    pub fn from_expanded(value: &JsonValue) -> Result<Node> {
        let obj = value.as_object().ok_or(Error::NotAnObject {
            found: json_type_name(value),
        })?;
        let id = obj
            .get(veld_vocab::ID)
            .and_then(JsonValue::as_str)
            .ok_or(Error::MissingSubject)?
            .to_string();

        let mut types = obj
            .get(veld_vocab::TYPE)
            .map(parse_types)
            .unwrap_or_default();

        let mut properties = BTreeMap::new();
        for (key, val) in obj {
            if key == veld_vocab::ID || key == veld_vocab::TYPE {
                continue;
            }
            let terms = match val {
                JsonValue::Array(items) => items
                    .iter()
                    .map(|item| Term::from_json(key, item))
                    .collect::<Result<Vec<_>>>()?,
                single => vec![Term::from_json(key, single)?],
            };
            properties.insert(key.clone(), terms);
        }

        // Stores may serialize types as a literal rdf:type predicate instead
        // of @type; fold them in when @type itself was absent.
        if types.is_empty() {
            if let Some(terms) = properties.remove(veld_vocab::rdf::TYPE) {
                types = terms
                    .iter()
                    .filter_map(Term::ref_id)
                    .map(String::from)
                    .collect();
            }
        }

        Ok(Node {
            id,
            types,
            properties,
        })
    }

    /// Serialize back to the expanded wire form
    pub fn to_json(&self) -> JsonValue {
        let mut obj = Map::new();
        obj.insert(veld_vocab::ID.to_string(), json!(self.id));
        if !self.types.is_empty() {
            obj.insert(veld_vocab::TYPE.to_string(), json!(self.types));
        }
        for (predicate, terms) in &self.properties {
            let terms: Vec<JsonValue> = terms.iter().map(Term::to_json).collect();
            obj.insert(predicate.clone(), JsonValue::Array(terms));
        }
        JsonValue::Object(obj)
    }

    /// All value terms for a predicate, empty when the predicate is absent
    pub fn values(&self, predicate: &str) -> &[Term] {
        self.properties
            .get(predicate)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the node carries the predicate at all
    pub fn has(&self, predicate: &str) -> bool {
        self.properties.contains_key(predicate)
    }

    /// Iterate over all predicates and their terms
    pub fn predicates(&self) -> impl Iterator<Item = (&str, &[Term])> {
        self.properties
            .iter()
            .map(|(predicate, terms)| (predicate.as_str(), terms.as_slice()))
    }

    /// Whether `@type` contains the given class IRI
    pub fn is_type(&self, class_iri: &str) -> bool {
        self.types.iter().any(|t| t == class_iri)
    }

    /// Referenced IRI of the first term under a predicate
    pub fn first_ref(&self, predicate: &str) -> Option<&str> {
        self.values(predicate).first().and_then(Term::ref_id)
    }

    /// Literal payload of the first term under a predicate
    pub fn first_literal(&self, predicate: &str) -> Option<&Literal> {
        self.values(predicate).first().and_then(Term::literal)
    }

    /// String payload of the first term under a predicate
    pub fn first_str(&self, predicate: &str) -> Option<&str> {
        self.first_literal(predicate).and_then(Literal::as_str)
    }

    /// Non-negative integer payload of the first term under a predicate
    pub fn first_usize(&self, predicate: &str) -> Option<usize> {
        match self.first_literal(predicate) {
            Some(Literal::Long(i)) if *i >= 0 => Some(*i as usize),
            _ => None,
        }
    }

    /// Numeric payload of the first term under a predicate
    pub fn first_f64(&self, predicate: &str) -> Option<f64> {
        match self.first_literal(predicate) {
            Some(Literal::Long(i)) => Some(*i as f64),
            Some(Literal::Double(d)) => Some(*d),
            _ => None,
        }
    }

    /// Boolean payload of the first term under a predicate
    pub fn first_bool(&self, predicate: &str) -> Option<bool> {
        match self.first_literal(predicate) {
            Some(Literal::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    /// Members of the first list container under a predicate
    pub fn first_list(&self, predicate: &str) -> Option<&[Term]> {
        self.values(predicate).first().and_then(Term::list)
    }

    /// Node-local display label: `rdfs:label`, else `sh:name`
    pub fn display_label(&self) -> Option<&str> {
        self.first_str(rdfs::LABEL)
            .or_else(|| self.first_str(shacl::NAME))
    }
}

fn parse_types(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(items) => items
            .iter()
            .filter_map(|item| {
                item.as_str()
                    .or_else(|| item.get(veld_vocab::ID).and_then(JsonValue::as_str))
            })
            .map(String::from)
            .collect(),
        JsonValue::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn person() -> JsonValue {
        json!({
            "@id": "http://example.com/alice",
            "@type": ["http://example.com/Person"],
            "http://example.com/name": [{"@value": "Alice"}],
            "http://example.com/friend": [{"@id": "http://example.com/bob"}]
        })
    }

    #[test]
    fn test_parses_subject_types_and_predicates() {
        let node = Node::from_expanded(&person()).unwrap();
        assert_eq!(node.id, "http://example.com/alice");
        assert_eq!(node.types, vec!["http://example.com/Person"]);
        assert_eq!(node.first_str("http://example.com/name"), Some("Alice"));
        assert_eq!(
            node.first_ref("http://example.com/friend"),
            Some("http://example.com/bob")
        );
        assert!(node.values("http://example.com/missing").is_empty());
    }

    #[test]
    fn test_missing_subject_is_an_error() {
        let err = Node::from_expanded(&json!({"@type": ["x"]})).unwrap_err();
        assert!(matches!(err, Error::MissingSubject));
    }

    #[test]
    fn test_rdf_type_predicate_is_normalized() {
        let node = Node::from_expanded(&json!({
            "@id": "http://example.com/1",
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type": [
                {"@id": "http://example.com/Type"}
            ]
        }))
        .unwrap();
        assert_eq!(node.types, vec!["http://example.com/Type"]);
        assert!(!node.has("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"));
    }

    #[test]
    fn test_explicit_type_wins_over_rdf_type() {
        let node = Node::from_expanded(&json!({
            "@id": "http://example.com/1",
            "@type": ["http://example.com/Explicit"],
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type": [
                {"@id": "http://example.com/Other"}
            ]
        }))
        .unwrap();
        assert_eq!(node.types, vec!["http://example.com/Explicit"]);
        assert!(node.has("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"));
    }

    #[test]
    fn test_wire_round_trip() {
        let wire = person();
        let node = Node::from_expanded(&wire).unwrap();
        assert_eq!(node.to_json(), wire);
    }

    #[test]
    fn test_accessors_read_first_term_only() {
        let node = Node::from_expanded(&json!({
            "@id": "http://example.com/shape",
            "http://www.w3.org/ns/shacl#maxCount": [{"@value": 3}, {"@value": 9}]
        }))
        .unwrap();
        assert_eq!(node.first_usize("http://www.w3.org/ns/shacl#maxCount"), Some(3));
    }
}
