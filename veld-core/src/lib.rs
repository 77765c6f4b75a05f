//! Core data model for the Veld linked-data metadata engine
//!
//! This crate provides the typed view over expanded JSON-LD that the rest of
//! the engine builds on:
//!
//! - [`Node`] / [`Term`] / [`Literal`]: one subject with its predicate/value
//!   pairs, parsed from the wire form
//! - [`Graph`]: a document of nodes with by-subject lookup and label
//!   resolution
//! - [`ValueEntry`]: the flat values-by-property representation edited in
//!   forms
//! - [`iri`]: local-name extraction, well-formedness checking, IRI minting
//!
//! Everything here is pure data: no I/O, no global state. Nodes and graphs
//! are parsed once per fetch and treated as immutable snapshots.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use veld_core::Graph;
//!
//! let graph = Graph::from_expanded(&json!([
//!     {
//!         "@id": "http://example.com/alice",
//!         "@type": ["http://example.com/Person"],
//!         "http://example.com/name": [{"@value": "Alice"}]
//!     }
//! ]))?;
//! let alice = graph.node("http://example.com/alice").unwrap();
//! assert_eq!(alice.first_str("http://example.com/name"), Some("Alice"));
//! # Ok::<(), veld_core::Error>(())
//! ```

pub mod error;
pub mod graph;
pub mod iri;
pub mod node;
pub mod term;
pub mod value;

pub use error::{Error, Result};
pub use graph::Graph;
pub use iri::WorkspaceIris;
pub use node::Node;
pub use term::{Literal, Term};
pub use value::{values_equal, ValueEntry};
