//! Form-facing value entries
//!
//! A [`ValueEntry`] is the flat representation of one value of one property,
//! as edited in a form: a reference (`id`), a literal (`value`), or in
//! transient editing states neither. The optional `label` is a display
//! enrichment resolved from other nodes and is never written back to a store.

use crate::term::Literal;
use serde::{Deserialize, Serialize};

/// One value of one property in the values-by-property representation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueEntry {
    /// IRI of a referenced node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Literal payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,
    /// Resolved display label for references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ValueEntry {
    /// A reference entry
    pub fn reference(id: impl Into<String>) -> Self {
        ValueEntry {
            id: Some(id.into()),
            value: None,
            label: None,
        }
    }

    /// A literal entry
    pub fn literal(value: impl Into<Literal>) -> Self {
        ValueEntry {
            id: None,
            value: Some(value.into()),
            label: None,
        }
    }

    /// Attach a display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether this entry would survive serialization to a patch
    ///
    /// Valid means a non-empty literal or a reference id; zero and `false`
    /// count, the empty string does not.
    pub fn is_valid(&self) -> bool {
        self.value.as_ref().is_some_and(Literal::is_non_empty)
            || self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Structural equality on the primary payload (`id` and `value`),
    /// ignoring the display label
    pub fn same_primary(&self, other: &Self) -> bool {
        self.id == other.id && self.value == other.value
    }
}

/// Pairwise [`ValueEntry::same_primary`] over two value lists
pub fn values_equal(a: &[ValueEntry], b: &[ValueEntry]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.same_primary(y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_keeps_zero_and_false() {
        assert!(ValueEntry::literal(0i64).is_valid());
        assert!(ValueEntry::literal(false).is_valid());
        assert!(ValueEntry::reference("http://example.com/a").is_valid());
        assert!(!ValueEntry::literal("").is_valid());
        assert!(!ValueEntry::default().is_valid());
    }

    #[test]
    fn test_same_primary_ignores_label() {
        let a = ValueEntry::reference("http://example.com/a").with_label("A");
        let b = ValueEntry::reference("http://example.com/a");
        assert!(a.same_primary(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_values_equal_is_pairwise() {
        let a = vec![ValueEntry::literal("x"), ValueEntry::literal("y")];
        let b = vec![ValueEntry::literal("x"), ValueEntry::literal("y")];
        let c = vec![ValueEntry::literal("y"), ValueEntry::literal("x")];
        assert!(values_equal(&a, &b));
        assert!(!values_equal(&a, &c));
        assert!(!values_equal(&a, &a[..1].to_vec()));
    }
}
