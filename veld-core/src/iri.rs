//! IRI helpers
//!
//! Local-name extraction for display fallbacks, well-formedness checking for
//! generic IRI resources, and minting of workspace-scoped IRIs for newly
//! created entities.

use url::Url;
use uuid::Uuid;

/// The local part of an IRI: everything after the last `#`, then after the
/// last `/`
///
/// Returns the whole input when it contains neither separator.
pub fn local_name(iri: &str) -> &str {
    let after_hash = match iri.rfind('#') {
        Some(position) => &iri[position + 1..],
        None => iri,
    };
    match after_hash.rfind('/') {
        Some(position) => &after_hash[position + 1..],
        None => after_hash,
    }
}

/// Whether a string parses as an absolute IRI
///
/// Accepts any scheme-qualified IRI (`http`, `mailto`, `urn`, ...); rejects
/// scheme-only fragments such as `http://` and strings with embedded spaces.
pub fn is_well_formed(iri: &str) -> bool {
    Url::parse(iri).is_ok()
}

/// Mints workspace-scoped IRIs for newly created entities
#[derive(Clone, Debug)]
pub struct WorkspaceIris {
    hostname: String,
}

impl WorkspaceIris {
    /// A minter rooted at the given workspace hostname
    pub fn new(hostname: impl Into<String>) -> Self {
        WorkspaceIris {
            hostname: hostname.into(),
        }
    }

    /// Metadata entity IRI for a known identifier
    pub fn metadata_iri(&self, id: &str) -> String {
        format!("http://{}/iri/{}", self.hostname, id)
    }

    /// Vocabulary entity IRI for a known identifier
    pub fn vocabulary_iri(&self, id: &str) -> String {
        format!("http://{}/vocabulary/{}", self.hostname, id)
    }

    /// A fresh metadata entity IRI
    pub fn mint_metadata_iri(&self) -> String {
        self.metadata_iri(&Uuid::new_v4().to_string())
    }
}
