//! Property descriptors derived from property shapes
//!
//! A descriptor is the flat, recomputed-on-demand view a form consumes: one
//! entry per editable property with its label, kind, and constraints. The
//! widget choice is settled once here via [`PropertyKind`] instead of being
//! re-derived from raw datatype strings downstream.

use serde::Serialize;
use tracing::warn;

use veld_core::{iri, Node, ValueEntry};
use veld_vocab::xsd;

use crate::repository::ShapeRepository;
use crate::shape;

/// Editing widget category for a property, computed once per descriptor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum PropertyKind {
    StringLiteral,
    Number,
    DateTime,
    Boolean,
    Relation,
    RdfList,
    GenericIri,
}

/// Flat editable-property description derived from a property shape.
#[derive(Clone, Debug, Serialize)]
pub struct PropertyDescriptor {
    /// Predicate IRI, or the reserved `@type` key
    pub key: String,
    pub label: String,
    pub description: Option<String>,
    pub kind: PropertyKind,
    pub datatype: Option<String>,
    pub related_class: Option<String>,
    pub min_count: usize,
    /// `None` means unbounded; RDF-list properties are always unbounded
    pub max_count: Option<usize>,
    pub max_length: Option<usize>,
    pub is_relation: bool,
    pub is_rdf_list: bool,
    pub is_machine_only: bool,
    pub is_generic_iri_resource: bool,
    pub is_external_link: bool,
    pub multi_line: bool,
    pub allowed_values: Option<Vec<ValueEntry>>,
    pub order: Option<f64>,
}

impl PropertyDescriptor {
    /// Derive a descriptor from a property shape.
    ///
    /// Returns `None` for shapes without a resolvable path; such entries are
    /// logged and dropped so one malformed shape degrades the form instead of
    /// failing it.
    pub fn from_shape(shape: &Node) -> Option<Self> {
        let Some(path) = shape::path(shape) else {
            warn!(shape = %shape.id, "property shape has no path, skipped");
            return None;
        };

        let label = shape::name(shape)
            .map(str::to_string)
            .unwrap_or_else(|| iri::local_name(path).to_string());

        Some(Self {
            key: path.to_string(),
            label,
            description: shape::description(shape).map(str::to_string),
            kind: kind_for(shape),
            datatype: shape::datatype(shape).map(str::to_string),
            related_class: shape::related_class(shape).map(str::to_string),
            min_count: shape::min_count(shape),
            max_count: shape::max_count(shape),
            max_length: shape::max_length(shape),
            is_relation: shape::is_relation(shape),
            is_rdf_list: shape::is_rdf_list(shape),
            is_machine_only: shape::is_machine_only(shape),
            is_generic_iri_resource: shape::is_generic_iri_resource(shape),
            is_external_link: shape::is_external_link(shape),
            multi_line: shape::is_multi_line(shape),
            allowed_values: shape::allowed_values(shape),
            order: shape::order(shape),
        })
    }

    /// The synthetic `@type` descriptor appended to every property list.
    ///
    /// `@type` is not a declared property shape, but every entity form shows
    /// a type row; it renders as a single read-only reference.
    pub fn type_descriptor() -> Self {
        Self {
            key: veld_vocab::TYPE.to_string(),
            label: "Type".to_string(),
            description: None,
            kind: PropertyKind::Relation,
            datatype: None,
            related_class: None,
            min_count: 0,
            max_count: Some(1),
            max_length: None,
            is_relation: false,
            is_rdf_list: false,
            is_machine_only: true,
            is_generic_iri_resource: false,
            is_external_link: false,
            multi_line: false,
            allowed_values: None,
            order: None,
        }
    }
}

fn kind_for(shape: &Node) -> PropertyKind {
    if shape::is_rdf_list(shape) {
        return PropertyKind::RdfList;
    }
    if shape::is_generic_iri_resource(shape) {
        return PropertyKind::GenericIri;
    }
    if shape::is_relation(shape) {
        return PropertyKind::Relation;
    }
    match shape::datatype(shape) {
        Some(xsd::BOOLEAN) => PropertyKind::Boolean,
        Some(xsd::INTEGER) | Some(xsd::LONG) | Some(xsd::DECIMAL) | Some(xsd::DOUBLE) => {
            PropertyKind::Number
        }
        Some(xsd::DATE_TIME) | Some(xsd::DATE) | Some(xsd::TIME) => PropertyKind::DateTime,
        _ => PropertyKind::StringLiteral,
    }
}

/// Derive descriptors for a list of property shapes, appending the synthetic
/// `@type` descriptor.
pub fn describe_properties(property_shapes: &[&Node]) -> Vec<PropertyDescriptor> {
    let mut descriptors: Vec<PropertyDescriptor> = property_shapes
        .iter()
        .filter_map(|shape| PropertyDescriptor::from_shape(shape))
        .collect();
    descriptors.push(PropertyDescriptor::type_descriptor());
    descriptors
}

impl ShapeRepository {
    /// Descriptors for the class governing `types`, including inherited
    /// property shapes.
    pub fn descriptors_for_types(&self, types: &[String]) -> Vec<PropertyDescriptor> {
        let shapes = self.property_shapes_for_types_with_inherited(types);
        describe_properties(&shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape_from(value: serde_json::Value) -> Node {
        Node::from_expanded(&value).unwrap()
    }

    #[test]
    fn test_kind_priority_list_over_datatype() {
        let shape = shape_from(json!({
            "@id": "http://example.com/keywords",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/keyword"}],
            "http://www.w3.org/ns/shacl#node": [{"@id": "http://datashapes.org/dash#ListShape"}],
            "http://www.w3.org/ns/shacl#datatype": [
                {"@id": "http://www.w3.org/2001/XMLSchema#string"}
            ],
            "http://www.w3.org/ns/shacl#maxCount": [{"@value": 1}]
        }));
        let descriptor = PropertyDescriptor::from_shape(&shape).unwrap();
        assert_eq!(descriptor.kind, PropertyKind::RdfList);
        assert!(descriptor.is_rdf_list);
        assert_eq!(descriptor.max_count, None);
    }

    #[test]
    fn test_kind_datatype_dispatch() {
        let cases = [
            ("http://www.w3.org/2001/XMLSchema#boolean", PropertyKind::Boolean),
            ("http://www.w3.org/2001/XMLSchema#integer", PropertyKind::Number),
            ("http://www.w3.org/2001/XMLSchema#double", PropertyKind::Number),
            ("http://www.w3.org/2001/XMLSchema#dateTime", PropertyKind::DateTime),
            ("http://www.w3.org/2001/XMLSchema#string", PropertyKind::StringLiteral),
            ("https://veld.nl/ontology#markdown", PropertyKind::StringLiteral),
        ];
        for (datatype, expected) in cases {
            let shape = shape_from(json!({
                "@id": "http://example.com/shape",
                "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/p"}],
                "http://www.w3.org/ns/shacl#datatype": [{"@id": datatype}]
            }));
            let descriptor = PropertyDescriptor::from_shape(&shape).unwrap();
            assert_eq!(descriptor.kind, expected, "datatype {datatype}");
        }
    }

    #[test]
    fn test_relation_kind_and_related_class() {
        let shape = shape_from(json!({
            "@id": "http://example.com/friendShape",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/friend"}],
            "http://www.w3.org/ns/shacl#class": [{"@id": "http://example.com/Person"}]
        }));
        let descriptor = PropertyDescriptor::from_shape(&shape).unwrap();
        assert_eq!(descriptor.kind, PropertyKind::Relation);
        assert!(descriptor.is_relation);
        assert_eq!(descriptor.related_class.as_deref(), Some("http://example.com/Person"));
    }

    #[test]
    fn test_shape_without_path_is_skipped() {
        let shape = shape_from(json!({
            "@id": "http://example.com/broken",
            "http://www.w3.org/ns/shacl#name": [{"@value": "Broken"}]
        }));
        assert!(PropertyDescriptor::from_shape(&shape).is_none());
    }

    #[test]
    fn test_label_falls_back_to_local_name() {
        let shape = shape_from(json!({
            "@id": "http://example.com/unnamed",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/ontology#keyword"}]
        }));
        let descriptor = PropertyDescriptor::from_shape(&shape).unwrap();
        assert_eq!(descriptor.label, "keyword");
    }

    #[test]
    fn test_describe_properties_appends_type_row() {
        let name_shape = shape_from(json!({
            "@id": "http://example.com/nameShape",
            "http://www.w3.org/ns/shacl#path": [{"@id": "http://example.com/name"}],
            "http://www.w3.org/ns/shacl#name": [{"@value": "Name"}]
        }));
        let broken = shape_from(json!({"@id": "http://example.com/broken"}));

        let descriptors = describe_properties(&[&name_shape, &broken]);
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].key, "http://example.com/name");
        let type_row = &descriptors[1];
        assert_eq!(type_row.key, "@type");
        assert_eq!(type_row.label, "Type");
        assert_eq!(type_row.max_count, Some(1));
        assert!(type_row.is_machine_only);
        assert_eq!(type_row.kind, PropertyKind::Relation);
    }
}
