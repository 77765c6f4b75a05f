//! Error types for the engine facade

use thiserror::Error;
use veld_form::SessionError;
use veld_store::{StoreError, SubmissionIssue};

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur in engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Subject does not exist in the metadata graph
    #[error("Subject not found: {0}")]
    NotFound(String),

    /// No class shape in the vocabulary governs this type
    #[error("No shape found for type: {0}")]
    UnknownType(String),

    /// Pending values failed validation for the listed keys
    #[error("Validation failed for: {}", keys.join(", "))]
    Validation {
        /// Predicate IRIs with at least one violation
        keys: Vec<String>,
    },

    /// The store refused the submission; issues split by subject
    #[error(
        "Submission rejected with {} issue(s) for this subject and {} for others",
        subject_issues.len(),
        other_issues.len()
    )]
    Rejected {
        /// Issues about the submitted subject
        subject_issues: Vec<SubmissionIssue>,
        /// Issues about other subjects touched by the patch
        other_issues: Vec<SubmissionIssue>,
    },

    /// The session was not in a submittable state
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Store-level failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A store returned a document that does not parse
    #[error(transparent)]
    Document(#[from] veld_core::Error),
}
