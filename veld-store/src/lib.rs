//! Store contract for expanded JSON-LD graphs
//!
//! Metadata and vocabulary live behind the same narrow [`LinkedDataStore`]
//! contract: query statements, apply patch fragments, delete subjects.
//! Documents cross this boundary in expanded JSON-LD only; no context
//! object is ever exchanged. A patch fragment replaces the listed
//! predicates of its subject, and a reference to the nil sentinel means
//! "this predicate now has zero values".
//!
//! [`MemoryStore`] is the bundled implementation, used by tests and by
//! embedders that do not need a remote backend.

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Subject does not exist
    #[error("Subject not found: {0}")]
    NotFound(String),

    /// The store refused a patch; per-subject details attached
    #[error("Submission rejected with {} issue(s)", issues.len())]
    Rejected {
        /// What the store objected to, per subject
        issues: Vec<SubmissionIssue>,
    },

    /// A patch fragment that is not an object with an `@id`
    #[error("Malformed patch fragment: {0}")]
    MalformedFragment(String),

    /// Transport-level failure talking to a remote store
    #[error("Transport error: {0}")]
    Transport(String),
}

impl StoreError {
    /// A rejection carrying a single issue
    pub fn rejected(subject: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Rejected {
            issues: vec![SubmissionIssue::new(subject, message)],
        }
    }
}

/// One objection raised by a store against a submitted patch
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmissionIssue {
    /// Subject the objection is about
    pub subject: String,
    /// Human-readable description
    pub message: String,
}

impl SubmissionIssue {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        SubmissionIssue {
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Split issues into those about `subject` and those about other subjects
pub fn partition_issues<'a>(
    issues: &'a [SubmissionIssue],
    subject: &str,
) -> (Vec<&'a SubmissionIssue>, Vec<&'a SubmissionIssue>) {
    issues.iter().partition(|issue| issue.subject == subject)
}

/// Statement pattern for [`LinkedDataStore::get`]
///
/// All three positions are optional; `None` matches anything. Queries by
/// subject return the subject together with the nodes it references and the
/// nodes referencing it, so display labels resolve without a second fetch.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StatementQuery {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<String>,
}

impl StatementQuery {
    /// Match every statement
    pub fn all() -> Self {
        StatementQuery::default()
    }

    /// Match one subject and its neighborhood
    pub fn by_subject(subject: impl Into<String>) -> Self {
        StatementQuery {
            subject: Some(subject.into()),
            ..StatementQuery::default()
        }
    }

    /// Match every instance of a class
    pub fn by_type(class_iri: impl Into<String>) -> Self {
        StatementQuery {
            predicate: Some(veld_vocab::rdf::TYPE.to_string()),
            object: Some(class_iri.into()),
            ..StatementQuery::default()
        }
    }
}

/// Contract to a linked-data graph, metadata and vocabulary alike
#[async_trait]
pub trait LinkedDataStore: Debug + Send + Sync {
    /// Nodes matching a statement pattern, as expanded JSON-LD objects
    async fn get(&self, query: &StatementQuery) -> Result<Vec<JsonValue>>;

    /// Apply patch fragments: per predicate each fragment replaces what the
    /// subject held before, with the nil sentinel deleting the predicate
    async fn patch(&self, fragments: &[JsonValue]) -> Result<()>;

    /// Remove a subject entirely
    async fn delete(&self, subject: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partition_issues_by_subject() {
        let issues = vec![
            SubmissionIssue::new("http://example.com/iri/a", "minCount violated"),
            SubmissionIssue::new("http://example.com/iri/b", "unknown property"),
            SubmissionIssue::new("http://example.com/iri/a", "maxLength violated"),
        ];

        let (ours, others) = partition_issues(&issues, "http://example.com/iri/a");
        assert_eq!(ours, vec![&issues[0], &issues[2]]);
        assert_eq!(others, vec![&issues[1]]);
    }

    #[test]
    fn test_by_type_query_shape() {
        let query = StatementQuery::by_type("http://example.com/Person");
        assert_eq!(query.subject, None);
        assert_eq!(
            query.predicate.as_deref(),
            Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
        );
        assert_eq!(query.object.as_deref(), Some("http://example.com/Person"));
    }

    #[test]
    fn test_rejected_display_counts_issues() {
        let error = StoreError::Rejected {
            issues: vec![
                SubmissionIssue::new("http://example.com/iri/a", "bad"),
                SubmissionIssue::new("http://example.com/iri/b", "worse"),
            ],
        };
        assert_eq!(error.to_string(), "Submission rejected with 2 issue(s)");
    }
}
