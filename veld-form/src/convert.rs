//! Conversion between expanded JSON-LD and editable value maps
//!
//! The forward direction ([`from_graph`]) flattens one node of an expanded
//! document into a map from predicate IRI to [`ValueEntry`] lists, the shape
//! forms and validators work with. The reverse direction ([`to_graph`])
//! turns one predicate's edited list back into a patch fragment, encoding
//! "no values left" as a reference to the nil sentinel.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value as JsonValue;
use tracing::warn;
use veld_core::{Graph, Node, Term, ValueEntry};
use veld_shapes::{shape, ShapeRepository};
use veld_vocab::{veld, ID, INVERSE_MARKER, LIST, TYPE, VALUE};

/// Editable values of one subject, keyed by predicate IRI
pub type ValuesByPredicate = BTreeMap<String, Vec<ValueEntry>>;

/// Flatten one node's values into form-editable entries, one list per
/// property shape.
///
/// Ordinary predicates the node does not carry are omitted from the map;
/// callers treat a missing key as an empty list. Inverse paths (starting
/// with `_`) are read by scanning `all_nodes` for referrers under the
/// forward predicate and are always present in the result, in scan order.
/// RDF list values keep their member order; everything else is sorted by
/// label, id and literal value. The repository resolves inverse-path
/// annotations that live on a separate vocabulary node instead of on the
/// property shape itself.
pub fn from_graph(
    node: &Node,
    property_shapes: &[&Node],
    all_nodes: &Graph,
    repository: &ShapeRepository,
) -> ValuesByPredicate {
    let mut values = ValuesByPredicate::new();
    for &property_shape in property_shapes {
        let Some(path) = shape::path(property_shape) else {
            warn!(shape = %property_shape.id, "property shape has no path, skipped");
            continue;
        };
        if path.starts_with(INVERSE_MARKER) {
            let referrers = referrer_entries(node, path, property_shape, all_nodes, repository);
            values.insert(path.to_string(), referrers);
        } else if node.has(path) {
            let entries = if shape::is_rdf_list(property_shape) {
                list_entries(node.values(path), all_nodes)
            } else {
                sorted_entries(node.values(path), all_nodes)
            };
            values.insert(path.to_string(), entries);
        }
    }
    if !node.types.is_empty() {
        let types = node.types.iter().map(ValueEntry::reference).collect();
        values.insert(TYPE.to_string(), types);
    }
    values
}

/// Values for one subject of a graph, via the property shapes governing its
/// types (inherited ones included). An absent subject yields an empty map.
pub fn values_map(
    repository: &ShapeRepository,
    graph: &Graph,
    subject: &str,
) -> ValuesByPredicate {
    let Some(node) = graph.node(subject) else {
        return ValuesByPredicate::new();
    };
    let shapes = repository.property_shapes_for_types_with_inherited(&node.types);
    from_graph(node, &shapes, graph, repository)
}

/// Serialize one predicate's edited values into a patch fragment.
///
/// Returns `None` when there is nothing to serialize: an empty subject or
/// predicate, or no value list at all. A list with no surviving valid value
/// yields the nil-sentinel fragment, the patch encoding of "delete every
/// value of this property". RDF list shapes wrap their members in an
/// ordered `@list` container without datatypes; any other shape contributes
/// a plain term array, each term tagged with the declared datatype when the
/// shape has one. Display labels never reach the wire.
pub fn to_graph(
    subject: &str,
    predicate: &str,
    values: Option<&[ValueEntry]>,
    property_shape: Option<&Node>,
) -> Option<JsonValue> {
    if subject.is_empty() || predicate.is_empty() {
        return None;
    }
    let values = values?;
    let valid: Vec<&ValueEntry> = values.iter().filter(|v| v.is_valid()).collect();

    let mut fragment = serde_json::Map::new();
    fragment.insert(ID.to_string(), JsonValue::String(subject.to_string()));
    if valid.is_empty() {
        let mut nil = serde_json::Map::new();
        nil.insert(ID.to_string(), JsonValue::String(veld::NIL.to_string()));
        fragment.insert(predicate.to_string(), JsonValue::Object(nil));
    } else if property_shape.is_some_and(shape::is_rdf_list) {
        let members: Vec<JsonValue> = valid.iter().map(|v| wire_term(v, None)).collect();
        let mut list = serde_json::Map::new();
        list.insert(LIST.to_string(), JsonValue::Array(members));
        fragment.insert(predicate.to_string(), JsonValue::Object(list));
    } else {
        let datatype = property_shape.and_then(shape::datatype);
        let terms: Vec<JsonValue> = valid.iter().map(|v| wire_term(v, datatype)).collect();
        fragment.insert(predicate.to_string(), JsonValue::Array(terms));
    }
    Some(JsonValue::Object(fragment))
}

fn wire_term(entry: &ValueEntry, datatype: Option<&str>) -> JsonValue {
    let mut term = serde_json::Map::new();
    if let Some(id) = &entry.id {
        term.insert(ID.to_string(), JsonValue::String(id.clone()));
    }
    if let Some(value) = &entry.value {
        term.insert(VALUE.to_string(), value.to_json());
    }
    if let Some(datatype) = datatype {
        term.insert(TYPE.to_string(), JsonValue::String(datatype.to_string()));
    }
    JsonValue::Object(term)
}

fn referrer_entries(
    node: &Node,
    path: &str,
    property_shape: &Node,
    all_nodes: &Graph,
    repository: &ShapeRepository,
) -> Vec<ValueEntry> {
    let forward = shape::inverse_path(property_shape)
        .or_else(|| repository.shape(path).and_then(shape::inverse_path));
    let Some(forward) = forward else {
        warn!(path = %path, "inverse path without an inverse-path annotation");
        return Vec::new();
    };
    all_nodes
        .iter()
        .filter(|candidate| {
            candidate
                .values(forward)
                .iter()
                .any(|term| term.ref_id() == Some(node.id.as_str()))
        })
        .map(|candidate| {
            let mut entry = ValueEntry::reference(candidate.id.clone());
            entry.label = all_nodes.label_for(&candidate.id);
            entry
        })
        .collect()
}

fn list_entries(terms: &[Term], all_nodes: &Graph) -> Vec<ValueEntry> {
    let mut entries = Vec::new();
    for term in terms {
        match term {
            Term::List(members) => {
                entries.extend(members.iter().map(|m| value_entry(m, all_nodes)));
            }
            other => entries.push(value_entry(other, all_nodes)),
        }
    }
    entries
}

fn sorted_entries(terms: &[Term], all_nodes: &Graph) -> Vec<ValueEntry> {
    let mut entries: Vec<ValueEntry> = terms.iter().map(|t| value_entry(t, all_nodes)).collect();
    entries.sort_by(compare_entries);
    entries
}

fn value_entry(term: &Term, all_nodes: &Graph) -> ValueEntry {
    match term {
        Term::Ref { id, label } => {
            let mut entry = ValueEntry::reference(id.clone());
            entry.label = label.clone().or_else(|| all_nodes.label_for(id));
            entry
        }
        Term::Literal { value, .. } => ValueEntry::literal(value.clone()),
        Term::List(_) => ValueEntry::default(),
    }
}

// Absent fields tie at their tier so that reference-only and literal-only
// entries keep their relative order.
fn compare_entries(a: &ValueEntry, b: &ValueEntry) -> Ordering {
    compare_optional_text(a.label.as_deref(), b.label.as_deref())
        .then_with(|| compare_optional_text(a.id.as_deref(), b.id.as_deref()))
        .then_with(|| match (&a.value, &b.value) {
            (Some(x), Some(y)) => x.compare(y),
            _ => Ordering::Equal,
        })
}

fn compare_optional_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        _ => Ordering::Equal,
    }
}
