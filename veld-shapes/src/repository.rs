//! Immutable repository over a vocabulary graph
//!
//! Built once per vocabulary fetch and passed explicitly to converters and
//! validators. All queries are pure reads; the snapshot is replaced wholesale
//! when the vocabulary changes.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use serde::Serialize;

use veld_core::{Graph, Node};
use veld_vocab::{rdfs, shacl, veld};

use crate::hierarchy::ClassHierarchy;
use crate::shape;

/// Declared namespace, read from a prefix-declaration node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Namespace {
    pub id: String,
    pub label: Option<String>,
    pub prefix: Option<String>,
    pub namespace: Option<String>,
    pub is_default: bool,
}

/// Display summary for an entity's resolved type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeInfo {
    /// Target class of the governing shape, or the shape's own IRI
    pub type_iri: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
}

/// Arc-backed vocabulary snapshot for cheap cloning.
#[derive(Clone, Debug)]
pub struct ShapeRepository {
    inner: Arc<RepositoryInner>,
}

#[derive(Debug)]
struct RepositoryInner {
    graph: Graph,
    hierarchy: ClassHierarchy,
}

impl ShapeRepository {
    /// Build a repository from a parsed vocabulary graph.
    pub fn new(graph: Graph) -> Self {
        let hierarchy = ClassHierarchy::from_graph(&graph);
        Self {
            inner: Arc::new(RepositoryInner { graph, hierarchy }),
        }
    }

    /// The underlying vocabulary graph.
    pub fn graph(&self) -> &Graph {
        &self.inner.graph
    }

    /// Whether the vocabulary declares the given IRI.
    pub fn contains(&self, iri: &str) -> bool {
        self.inner.graph.contains(iri)
    }

    /// Shape node for the given IRI.
    pub fn shape(&self, iri: &str) -> Option<&Node> {
        self.inner.graph.node(iri)
    }

    /// Classes an end user may instantiate.
    ///
    /// A class is in the catalog when it declares a target class, or is typed
    /// as both an `rdfs:Class` and a node shape. Machine-only and
    /// soft-deleted classes are excluded.
    pub fn classes_in_catalog(&self) -> Vec<&Node> {
        self.inner
            .graph
            .iter()
            .filter(|entry| {
                shape::target_class(entry).is_some()
                    || (entry.is_type(rdfs::CLASS) && entry.is_type(shacl::NODE_SHAPE))
            })
            .filter(|entry| !shape::is_machine_only(entry))
            .filter(|entry| !shape::is_deleted(entry))
            .collect()
    }

    /// The class shape governing the given type set.
    ///
    /// The first shape in vocabulary order whose own IRI or target class
    /// matches any of `types` wins; matching shapes are never merged.
    pub fn class_shape_for_types(&self, types: &[String]) -> Option<&Node> {
        self.inner.graph.iter().find(|entry| {
            types.iter().any(|t| t == &entry.id)
                || shape::target_class(entry).is_some_and(|tc| types.iter().any(|t| t == tc))
        })
    }

    /// Property shapes a class shape declares, in declaration order.
    pub fn property_shapes_for(&self, class_shape: &Node) -> Vec<&Node> {
        shape::property_refs(class_shape)
            .filter_map(|id| self.inner.graph.node(id))
            .collect()
    }

    /// Property shapes for the class shape governing `types`.
    pub fn property_shapes_for_types(&self, types: &[String]) -> Vec<&Node> {
        match self.class_shape_for_types(types) {
            Some(class_shape) => self.property_shapes_for(class_shape),
            None => Vec::new(),
        }
    }

    /// Property shapes for `types`, including shapes inherited from
    /// superclasses.
    ///
    /// Walks the superclass graph breadth-first from the governing shape,
    /// visiting each class once (cycles terminate), and concatenates the
    /// declared shapes child-first in walk order. A shape declared by several
    /// classes appears once.
    pub fn property_shapes_for_types_with_inherited(&self, types: &[String]) -> Vec<&Node> {
        let Some(class_shape) = self.class_shape_for_types(types) else {
            return Vec::new();
        };

        let mut shapes: Vec<&Node> = Vec::new();
        let mut seen_shapes: HashSet<&str> = HashSet::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&Node> = VecDeque::new();

        visited.insert(class_shape.id.as_str());
        queue.push_back(class_shape);

        while let Some(current) = queue.pop_front() {
            for property_shape in self.property_shapes_for(current) {
                if seen_shapes.insert(property_shape.id.as_str()) {
                    shapes.push(property_shape);
                }
            }
            for parent_id in shape::super_classes(current) {
                if let Some(parent) = self.inner.graph.node(parent_id) {
                    if visited.insert(parent.id.as_str()) {
                        queue.push_back(parent);
                    }
                }
            }
        }

        shapes
    }

    /// First property shape whose path matches `predicate` and which carries
    /// a name.
    ///
    /// Anonymous shapes may share a path with a named one to add constraints;
    /// requiring the name skips them.
    pub fn property_shape_for_path(&self, predicate: &str) -> Option<&Node> {
        self.inner.graph.iter().find(|entry| {
            shape::path(entry) == Some(predicate) && shape::name(entry).is_some()
        })
    }

    /// Human-readable label for a type, or the IRI when none is declared.
    pub fn label_for_type(&self, type_iri: &str) -> String {
        self.shape(type_iri)
            .and_then(shape::name)
            .unwrap_or(type_iri)
            .to_string()
    }

    /// Description of a type shape, when declared.
    pub fn description_for_type(&self, type_iri: &str) -> Option<&str> {
        self.shape(type_iri).and_then(shape::description)
    }

    /// Human-readable label for a predicate, or the IRI when its shape
    /// declares no name.
    pub fn label_for_predicate(&self, predicate: &str) -> String {
        self.property_shape_for_path(predicate)
            .and_then(shape::name)
            .unwrap_or(predicate)
            .to_string()
    }

    /// Display summary for the governing shape of the given type set.
    pub fn type_info(&self, types: &[String]) -> Option<TypeInfo> {
        if types.is_empty() {
            return None;
        }
        let class_shape = self.class_shape_for_types(types)?;
        Some(TypeInfo {
            type_iri: shape::target_class(class_shape)
                .unwrap_or(&class_shape.id)
                .to_string(),
            label: shape::name(class_shape).map(str::to_string),
            description: class_shape
                .first_str(shacl::DESCRIPTION)
                .map(str::to_string),
            comment: class_shape.first_str(rdfs::COMMENT).map(str::to_string),
        })
    }

    /// Property shapes of a class flagged as important for summaries.
    pub fn important_property_shapes_for(&self, class_iri: &str) -> Vec<&Node> {
        self.property_shapes_for_types(&[class_iri.to_string()])
            .into_iter()
            .filter(|entry| shape::is_important(entry))
            .collect()
    }

    /// Direct subclasses of a class.
    pub fn child_subclasses(&self, class_iri: &str) -> &[String] {
        self.inner.hierarchy.direct_subclasses_of(class_iri)
    }

    /// All transitive subclasses of a class.
    pub fn descendants_of(&self, class_iri: &str) -> Vec<String> {
        self.inner.hierarchy.descendants_of(class_iri)
    }

    /// All declared namespaces.
    pub fn namespaces(&self) -> Vec<Namespace> {
        self.namespaces_filtered(|_| true)
    }

    /// Declared namespaces passing the given filter.
    pub fn namespaces_filtered<F>(&self, filter: F) -> Vec<Namespace>
    where
        F: Fn(&Node) -> bool,
    {
        self.inner
            .graph
            .iter()
            .filter(|entry| entry.is_type(shacl::PREFIX_DECLARATION))
            .filter(|entry| filter(entry))
            .map(|entry| Namespace {
                id: entry.id.clone(),
                label: shape::name(entry).map(str::to_string),
                prefix: entry.first_str(shacl::PREFIX).map(str::to_string),
                namespace: entry.first_ref(shacl::NAMESPACE).map(str::to_string),
                is_default: entry.first_bool(veld::DEFAULT_NAMESPACE).unwrap_or(false),
            })
            .collect()
    }

    /// Rewrites an IRI to `prefix:rest` form when a declared namespace
    /// covers it.
    pub fn prefixed_iri(&self, iri: &str) -> String {
        for ns in self.namespaces() {
            if let (Some(base), Some(prefix)) = (ns.namespace.as_deref(), ns.prefix.as_deref()) {
                if iri.starts_with(base) {
                    return format!("{}:{}", prefix, &iri[base.len()..]);
                }
            }
        }
        iri.to_string()
    }
}
