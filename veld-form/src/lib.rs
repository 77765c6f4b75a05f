//! Form-side editing model: value conversion and edit sessions
//!
//! Forms edit a flat per-predicate value map, not raw JSON-LD. This crate
//! converts one subject's expanded node into that map ([`from_graph`]),
//! tracks the user's pending edits against it ([`EditSession`]), and turns
//! edited lists back into patch fragments ([`to_graph`]), using the nil
//! sentinel to express property deletion.
//!
//! # Organization
//!
//! - [`convert`]: graph to value-map flattening and the reverse patch
//!   fragments
//! - [`session`]: the base/overlay edit state with validation and the
//!   submit handshake
//!
//! # Example
//!
//! ```
//! use veld_form::{EditSession, SessionState};
//!
//! let session = EditSession::new(Default::default());
//! assert_eq!(session.state(), SessionState::Clean);
//! assert!(!session.has_pending_changes());
//! ```

pub mod convert;
pub mod session;

pub use convert::{from_graph, to_graph, values_map, ValuesByPredicate};
pub use session::{seed_defaults, EditSession, SessionError, SessionState};
