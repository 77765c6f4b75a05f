//! Accessors over property- and class-shape nodes
//!
//! Shapes stay plain [`Node`] values for the lifetime of a vocabulary
//! snapshot; these functions give names to the predicates the engine reads
//! off them. All of them tolerate absent predicates and first-term-only
//! semantics: a shape declares each constraint at most once, extra terms are
//! ignored.

use veld_core::{Node, Term, ValueEntry};
use veld_vocab::{dash, rdfs, shacl, veld, xsd};

/// The predicate path a property shape applies to
pub fn path(shape: &Node) -> Option<&str> {
    shape.first_ref(shacl::PATH)
}

/// Forward predicate for an inverse (referenced-by) path
pub fn inverse_path(shape: &Node) -> Option<&str> {
    shape.first_ref(shacl::INVERSE_PATH)
}

/// Whether values are a single ordered RDF list
pub fn is_rdf_list(shape: &Node) -> bool {
    shape.first_ref(shacl::NODE) == Some(dash::LIST_SHAPE)
}

/// Whether values are arbitrary IRIs rather than literals or known entities
pub fn is_generic_iri_resource(shape: &Node) -> bool {
    shape.first_ref(shacl::NODE_KIND) == Some(shacl::IRI)
}

/// Whether values are references to entities of a restricted class
pub fn is_relation(shape: &Node) -> bool {
    shape.has(shacl::CLASS)
}

/// The class restriction for relation shapes
pub fn related_class(shape: &Node) -> Option<&str> {
    shape.first_ref(shacl::CLASS)
}

/// Declared literal datatype
pub fn datatype(shape: &Node) -> Option<&str> {
    shape.first_ref(shacl::DATATYPE)
}

/// Minimum cardinality, zero when undeclared
pub fn min_count(shape: &Node) -> usize {
    shape.first_usize(shacl::MIN_COUNT).unwrap_or(0)
}

/// Maximum cardinality, `None` when unbounded
///
/// RDF-list shapes are always unbounded: the list itself is the single
/// declared value, its elements are not capped by `sh:maxCount`.
pub fn max_count(shape: &Node) -> Option<usize> {
    if is_rdf_list(shape) {
        return None;
    }
    shape.first_usize(shacl::MAX_COUNT).filter(|&n| n > 0)
}

/// Maximum string length for literal values
pub fn max_length(shape: &Node) -> Option<usize> {
    shape.first_usize(shacl::MAX_LENGTH)
}

/// Whether the shape is maintained by the system rather than users
pub fn is_machine_only(shape: &Node) -> bool {
    shape.first_bool(veld::MACHINE_ONLY).unwrap_or(false)
}

/// Whether values should render as external links
pub fn is_external_link(shape: &Node) -> bool {
    shape.first_bool(veld::EXTERNAL_LINK).unwrap_or(false)
}

/// Whether the shape flags itself important for entity summaries
pub fn is_important(shape: &Node) -> bool {
    shape.first_bool(veld::IMPORTANT_PROPERTY).unwrap_or(false)
}

/// Whether the shape has been soft-deleted
pub fn is_deleted(shape: &Node) -> bool {
    shape.has(veld::DATE_DELETED)
}

/// Display name (`sh:name`)
pub fn name(shape: &Node) -> Option<&str> {
    shape.first_str(shacl::NAME)
}

/// Display description (`sh:description`, else `rdfs:comment`)
pub fn description(shape: &Node) -> Option<&str> {
    shape
        .first_str(shacl::DESCRIPTION)
        .or_else(|| shape.first_str(rdfs::COMMENT))
}

/// Ordering hint (`sh:order`)
pub fn order(shape: &Node) -> Option<f64> {
    shape.first_f64(shacl::ORDER)
}

/// Target class of a class shape
pub fn target_class(shape: &Node) -> Option<&str> {
    shape.first_ref(shacl::TARGET_CLASS)
}

/// Property-shape references of a class shape, in declaration order
pub fn property_refs(shape: &Node) -> impl Iterator<Item = &str> {
    shape.values(shacl::PROPERTY).iter().filter_map(Term::ref_id)
}

/// Declared superclasses (`rdfs:subClassOf`)
pub fn super_classes(shape: &Node) -> impl Iterator<Item = &str> {
    shape
        .values(rdfs::SUB_CLASS_OF)
        .iter()
        .filter_map(Term::ref_id)
}

/// Enumerated allowed values (`sh:in`), when declared
pub fn allowed_values(shape: &Node) -> Option<Vec<ValueEntry>> {
    let members = shape.first_list(shacl::IN)?;
    Some(
        members
            .iter()
            .filter_map(|term| match term {
                Term::Ref { id, label } => {
                    let mut entry = ValueEntry::reference(id.clone());
                    entry.label = label.clone();
                    Some(entry)
                }
                Term::Literal { value, .. } => Some(ValueEntry::literal(value.clone())),
                Term::List(_) => None,
            })
            .collect(),
    )
}

/// Whether string values should render as multi-line text
///
/// True for plain strings without the single-line hint, and always for
/// markdown.
pub fn is_multi_line(shape: &Node) -> bool {
    match datatype(shape) {
        Some(xsd::STRING) => !shape.first_bool(dash::SINGLE_LINE).unwrap_or(false),
        Some(veld::MARKDOWN) => true,
        _ => false,
    }
}
