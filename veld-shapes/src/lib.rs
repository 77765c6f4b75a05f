//! Vocabulary shapes: repository, class hierarchy, property descriptors
//!
//! A vocabulary is itself an expanded JSON-LD graph whose nodes describe
//! classes and properties in SHACL terms. This crate turns a parsed
//! vocabulary into an immutable [`ShapeRepository`] snapshot and derives the
//! flat [`PropertyDescriptor`] list that drives form rendering and
//! validation.
//!
//! # Organization
//!
//! - [`shape`]: predicate accessors over raw shape nodes
//! - [`hierarchy`]: subclass index with cycle-safe descendant traversal
//! - [`repository`]: the vocabulary snapshot and its queries
//! - [`descriptor`]: [`PropertyKind`] and descriptor derivation
//!
//! # Example
//!
//! ```
//! use veld_core::Graph;
//! use veld_shapes::ShapeRepository;
//!
//! let vocabulary = serde_json::json!([{
//!     "@id": "http://example.com/PersonShape",
//!     "http://www.w3.org/ns/shacl#targetClass": [{"@id": "http://example.com/Person"}]
//! }]);
//! let repo = ShapeRepository::new(Graph::from_expanded(&vocabulary)?);
//! assert!(repo.class_shape_for_types(&["http://example.com/Person".to_string()]).is_some());
//! # Ok::<(), veld_core::Error>(())
//! ```

pub mod descriptor;
pub mod hierarchy;
pub mod repository;
pub mod shape;

pub use descriptor::{describe_properties, PropertyDescriptor, PropertyKind};
pub use hierarchy::ClassHierarchy;
pub use repository::{Namespace, ShapeRepository, TypeInfo};
