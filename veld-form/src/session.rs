//! Edit sessions over a base value snapshot
//!
//! An [`EditSession`] tracks the difference between the values a subject had
//! when it was loaded (the base) and the values the user has edited so far
//! (the overlay). The overlay is sparse: only keys whose effective list
//! differs structurally from the base list are present, so "is there
//! anything to save" is a plain emptiness check. Mutations go through
//! [`EditSession::add_value`], [`EditSession::update_value`] and
//! [`EditSession::delete_value`], which renormalize the overlay and
//! re-validate the touched key. Submission is a two-phase handshake driven
//! by the caller: [`EditSession::begin_submit`] hands out the overlay and
//! blocks further submits until [`EditSession::finish_submit_success`] or
//! [`EditSession::finish_submit_failure`] resolves the attempt.

use std::collections::BTreeMap;

use thiserror::Error;
use veld_core::{values_equal, ValueEntry};
use veld_shapes::PropertyDescriptor;
use veld_vocab::{veld, xsd};

use crate::convert::ValuesByPredicate;

/// Datatypes whose single-valued fields are seeded with an empty entry so
/// they render as editable inputs rather than as absent properties
const DEFAULTABLE_DATATYPES: [&str; 5] = [
    xsd::STRING,
    xsd::INTEGER,
    xsd::DECIMAL,
    xsd::LONG,
    veld::MARKDOWN,
];

/// Where a session is in its lifecycle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    /// No pending edits
    Clean,
    /// Pending edits, no submit in flight
    Dirty,
    /// A submit is in flight; further submits are rejected
    Submitting,
}

/// Why a submit attempt was rejected
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SessionError {
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("there are no pending changes to submit")]
    NoPendingChanges,
}

/// Pending edits of one subject against its loaded base values
#[derive(Clone, Debug, Default)]
pub struct EditSession {
    base: ValuesByPredicate,
    overlay: ValuesByPredicate,
    errors: BTreeMap<String, Vec<String>>,
    submitting: bool,
}

impl EditSession {
    /// Session over an already-seeded base snapshot
    pub fn new(base: ValuesByPredicate) -> EditSession {
        EditSession {
            base,
            ..EditSession::default()
        }
    }

    /// Session over a base snapshot, seeding defaults first
    pub fn seeded(mut base: ValuesByPredicate, descriptors: &[PropertyDescriptor]) -> EditSession {
        seed_defaults(&mut base, descriptors);
        EditSession::new(base)
    }

    pub fn state(&self) -> SessionState {
        if self.submitting {
            SessionState::Submitting
        } else if self.overlay.is_empty() {
            SessionState::Clean
        } else {
            SessionState::Dirty
        }
    }

    /// Whether any key has a pending edit; drives navigation guards
    pub fn has_pending_changes(&self) -> bool {
        !self.overlay.is_empty()
    }

    /// The sparse overlay, as submitted in a patch
    pub fn updates(&self) -> &ValuesByPredicate {
        &self.overlay
    }

    /// Effective values for a key: the pending edit when one exists, the
    /// base list otherwise
    pub fn values_for(&self, key: &str) -> &[ValueEntry] {
        self.overlay
            .get(key)
            .or_else(|| self.base.get(key))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Validation messages recorded for a key
    pub fn errors_for(&self, key: &str) -> &[String] {
        self.errors.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append a value to the effective list for a descriptor's key
    pub fn add_value(&mut self, descriptor: &PropertyDescriptor, value: ValueEntry) {
        let mut list = self.values_for(&descriptor.key).to_vec();
        list.push(value);
        self.save(descriptor, list);
    }

    /// Replace the value at `index` in the effective list.
    ///
    /// Out-of-range indices leave the list untouched. Setting a value back
    /// to what the base holds removes the overlay entry once no other edit
    /// remains for the key, so undoing an edit returns the session to Clean.
    pub fn update_value(&mut self, descriptor: &PropertyDescriptor, value: ValueEntry, index: usize) {
        let mut list = self.values_for(&descriptor.key).to_vec();
        let Some(slot) = list.get_mut(index) else {
            return;
        };
        *slot = value;
        self.save(descriptor, list);
    }

    /// Remove the value at `index` from the effective list.
    ///
    /// Single-valued properties of a defaultable datatype are reset to an
    /// empty entry instead, so the field stays editable; other single-valued
    /// properties drop the pending edit and revert to the base value.
    pub fn delete_value(&mut self, descriptor: &PropertyDescriptor, index: usize) {
        if descriptor.max_count == Some(1) {
            if is_defaultable(descriptor.datatype.as_deref()) {
                self.update_value(descriptor, ValueEntry::literal(""), index);
            } else {
                self.overlay.remove(&descriptor.key);
                self.revalidate(descriptor);
            }
            return;
        }
        let mut list = self.values_for(&descriptor.key).to_vec();
        if index >= list.len() {
            return;
        }
        list.remove(index);
        self.save(descriptor, list);
    }

    /// Validate every descriptor's effective list and record the messages.
    ///
    /// Returns `true` when any descriptor failed; submission is gated on a
    /// `false` result.
    pub fn validate_all(&mut self, descriptors: &[PropertyDescriptor]) -> bool {
        for descriptor in descriptors {
            self.revalidate(descriptor);
        }
        !self.errors.is_empty()
    }

    /// Discard all pending edits and their validation state
    pub fn cancel(&mut self) {
        self.overlay.clear();
        self.errors.clear();
    }

    /// Move Dirty to Submitting and yield the overlay to patch with.
    ///
    /// Rejected while a submit is in flight or when there is nothing to
    /// submit.
    pub fn begin_submit(&mut self) -> Result<ValuesByPredicate, SessionError> {
        if self.submitting {
            return Err(SessionError::AlreadySubmitting);
        }
        if self.overlay.is_empty() {
            return Err(SessionError::NoPendingChanges);
        }
        self.submitting = true;
        Ok(self.overlay.clone())
    }

    /// The submitted patch was accepted: install the refreshed base and
    /// drop the overlay
    pub fn finish_submit_success(&mut self, new_base: ValuesByPredicate) {
        self.base = new_base;
        self.overlay.clear();
        self.errors.clear();
        self.submitting = false;
    }

    /// The submitted patch was rejected: keep the overlay for a retry
    pub fn finish_submit_failure(&mut self) {
        self.submitting = false;
    }

    fn save(&mut self, descriptor: &PropertyDescriptor, list: Vec<ValueEntry>) {
        self.overlay.insert(descriptor.key.clone(), list);
        self.renormalize(&descriptor.key);
        self.revalidate(descriptor);
    }

    // An overlay entry whose list structurally equals the base list carries
    // no information and must not keep the session Dirty.
    fn renormalize(&mut self, key: &str) {
        let base = self.base.get(key).map(Vec::as_slice).unwrap_or_default();
        if self
            .overlay
            .get(key)
            .is_some_and(|pending| values_equal(pending, base))
        {
            self.overlay.remove(key);
        }
    }

    fn revalidate(&mut self, descriptor: &PropertyDescriptor) {
        let messages = veld_validate::validate(descriptor, self.values_for(&descriptor.key));
        if messages.is_empty() {
            self.errors.remove(&descriptor.key);
        } else {
            self.errors.insert(descriptor.key.clone(), messages);
        }
    }
}

/// Seed `[{value: ""}]` for every single-valued property of a defaultable
/// datatype that has no value yet, so forms render an empty input for it
pub fn seed_defaults(values: &mut ValuesByPredicate, descriptors: &[PropertyDescriptor]) {
    for descriptor in descriptors {
        if descriptor.max_count == Some(1)
            && is_defaultable(descriptor.datatype.as_deref())
            && values.get(&descriptor.key).is_none_or(Vec::is_empty)
        {
            values.insert(descriptor.key.clone(), vec![ValueEntry::literal("")]);
        }
    }
}

fn is_defaultable(datatype: Option<&str>) -> bool {
    datatype.is_some_and(|dt| DEFAULTABLE_DATATYPES.contains(&dt))
}
