//! Error types for parsing expanded JSON-LD

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building the typed node model from wire JSON
#[derive(Debug, Error)]
pub enum Error {
    /// A node object without an `@id` cannot be addressed
    #[error("node is missing an @id")]
    MissingSubject,

    /// Node objects must be JSON objects
    #[error("expected a JSON object for a node, got {found}")]
    NotAnObject {
        /// JSON type name of the offending value
        found: &'static str,
    },

    /// Documents must be arrays of nodes, a single node, or `{"@graph": [...]}`
    #[error("expected an expanded JSON-LD document, got {found}")]
    NotADocument {
        /// JSON type name of the offending value
        found: &'static str,
    },

    /// A value term that is neither a literal, a reference, nor a list
    #[error("malformed term for predicate {predicate}: {detail}")]
    MalformedTerm {
        /// Predicate the term was found under
        predicate: String,
        /// What was wrong with it
        detail: String,
    },
}

/// JSON type name for diagnostics
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
