//! Veld metadata engine: vocabulary-driven editing of linked-data entities
//!
//! This crate is the front door of the workspace metadata engine. It wires
//! a metadata store and a vocabulary store into one [`MetadataEngine`] that
//! loads vocabulary snapshots, opens subjects as editable contexts, and
//! submits pending edits as JSON-LD patch fragments.
//!
//! # Organization
//!
//! - [`engine`]: [`MetadataEngine`], [`EditingContext`] and entity listings
//! - [`error`]: [`EngineError`] and the facade [`Result`]
//!
//! # Example
//!
//! ```
//! use veld_api::MetadataEngine;
//! use veld_core::WorkspaceIris;
//! use veld_store::MemoryStore;
//!
//! # async fn run() -> veld_api::Result<()> {
//! let metadata = MemoryStore::new();
//! let vocabulary = MemoryStore::new();
//! let engine = MetadataEngine::new(
//!     metadata,
//!     vocabulary,
//!     WorkspaceIris::new("workspace.example.com"),
//! );
//! let repository = engine.load_vocabulary().await?;
//! assert!(repository.classes_in_catalog().is_empty());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;

pub use engine::{EditingContext, EntitySummary, MetadataEngine};
pub use error::{EngineError, Result};
