//! In-memory linked-data store
//!
//! Keeps whole expanded node objects keyed by subject, with insertion order
//! preserved so query results are deterministic. Interior mutability via
//! `Arc<RwLock>` makes the store cheap to clone and safe to share across
//! async tasks. Used by tests and by embedders without a remote backend.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value as JsonValue};
use veld_vocab::veld;

use crate::{LinkedDataStore, Result, StatementQuery, StoreError, SubmissionIssue};

/// In-memory [`LinkedDataStore`]
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    /// Insertion order of subjects; keeps query results deterministic
    order: Vec<String>,
    nodes: HashMap<String, Map<String, JsonValue>>,
    /// When set, the next patch fails with these issues
    reject_next: Option<Vec<SubmissionIssue>>,
}

impl Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("MemoryStore")
            .field("node_count", &inner.order.len())
            .finish()
    }
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an expanded document (a node array or a
    /// single node object)
    pub fn from_document(document: &JsonValue) -> Result<MemoryStore> {
        let store = MemoryStore::new();
        let nodes = match document {
            JsonValue::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };
        {
            let mut inner = store.inner.write();
            for node in nodes {
                let (id, obj) = fragment_parts(node)?;
                inner.upsert(id.to_string(), obj.clone());
            }
        }
        Ok(store)
    }

    /// Make the next `patch` call fail with the given issues
    ///
    /// Stands in for server-side validation rejecting a submission.
    pub fn fail_next_patch(&self, issues: Vec<SubmissionIssue>) {
        self.inner.write().reject_next = Some(issues);
    }

    /// Number of stored subjects
    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().order.is_empty()
    }
}

#[async_trait]
impl LinkedDataStore for MemoryStore {
    async fn get(&self, query: &StatementQuery) -> Result<Vec<JsonValue>> {
        let inner = self.inner.read();
        if let Some(subject) = &query.subject {
            Ok(inner.neighborhood(subject))
        } else {
            Ok(inner
                .iter_ordered()
                .filter(|node| matches_pattern(node, query))
                .map(|node| JsonValue::Object(node.clone()))
                .collect())
        }
    }

    async fn patch(&self, fragments: &[JsonValue]) -> Result<()> {
        let mut inner = self.inner.write();
        if let Some(issues) = inner.reject_next.take() {
            return Err(StoreError::Rejected { issues });
        }
        // reject malformed input before touching any node
        for fragment in fragments {
            fragment_parts(fragment)?;
        }
        for fragment in fragments {
            let (subject, obj) = fragment_parts(fragment)?;
            inner.apply(subject, obj);
        }
        Ok(())
    }

    async fn delete(&self, subject: &str) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.nodes.remove(subject).is_none() {
            return Err(StoreError::NotFound(subject.to_string()));
        }
        inner.order.retain(|id| id != subject);
        Ok(())
    }
}

impl StoreInner {
    fn upsert(&mut self, id: String, node: Map<String, JsonValue>) {
        if !self.nodes.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.nodes.insert(id, node);
    }

    fn entry(&mut self, id: &str) -> &mut Map<String, JsonValue> {
        if !self.nodes.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.nodes.entry(id.to_string()).or_insert_with(|| {
            let mut obj = Map::new();
            obj.insert(
                veld_vocab::ID.to_string(),
                JsonValue::String(id.to_string()),
            );
            obj
        })
    }

    fn apply(&mut self, subject: &str, fragment: &Map<String, JsonValue>) {
        let node = self.entry(subject);
        for (predicate, value) in fragment {
            if predicate == veld_vocab::ID {
                continue;
            }
            if is_nil_reference(value) {
                node.remove(predicate);
            } else if predicate == veld_vocab::TYPE {
                node.insert(predicate.clone(), value.clone());
            } else {
                node.insert(predicate.clone(), normalized_objects(value));
            }
        }
    }

    fn iter_ordered(&self) -> impl Iterator<Item = &Map<String, JsonValue>> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// The subject node followed by the nodes it references and the nodes
    /// referencing it, so labels and inverse properties resolve from one
    /// fetch. An unknown subject yields nothing.
    fn neighborhood(&self, subject: &str) -> Vec<JsonValue> {
        let Some(node) = self.nodes.get(subject) else {
            return Vec::new();
        };
        let mut seen: HashSet<String> = HashSet::new();
        let mut result = Vec::new();
        seen.insert(subject.to_string());
        result.push(JsonValue::Object(node.clone()));

        for id in referenced_ids(node) {
            if seen.insert(id.clone()) {
                if let Some(neighbor) = self.nodes.get(&id) {
                    result.push(JsonValue::Object(neighbor.clone()));
                }
            }
        }
        for id in &self.order {
            if seen.contains(id) {
                continue;
            }
            let Some(candidate) = self.nodes.get(id) else {
                continue;
            };
            if referenced_ids(candidate).iter().any(|r| r == subject) {
                seen.insert(id.clone());
                result.push(JsonValue::Object(candidate.clone()));
            }
        }
        result
    }
}

fn fragment_parts(fragment: &JsonValue) -> Result<(&str, &Map<String, JsonValue>)> {
    let obj = fragment
        .as_object()
        .ok_or_else(|| malformed(fragment))?;
    let id = obj
        .get(veld_vocab::ID)
        .and_then(JsonValue::as_str)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| malformed(fragment))?;
    Ok((id, obj))
}

fn malformed(fragment: &JsonValue) -> StoreError {
    StoreError::MalformedFragment(fragment.to_string())
}

fn is_nil_reference(value: &JsonValue) -> bool {
    let reference = match value {
        JsonValue::Array(items) if items.len() == 1 => &items[0],
        other => other,
    };
    reference.get(veld_vocab::ID).and_then(JsonValue::as_str) == Some(veld::NIL)
}

fn normalized_objects(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(_) => value.clone(),
        single => JsonValue::Array(vec![single.clone()]),
    }
}

fn node_types(node: &Map<String, JsonValue>) -> Vec<&str> {
    match node.get(veld_vocab::TYPE) {
        Some(JsonValue::Array(items)) => items.iter().filter_map(JsonValue::as_str).collect(),
        Some(JsonValue::String(s)) => vec![s.as_str()],
        _ => Vec::new(),
    }
}

fn referenced_ids(node: &Map<String, JsonValue>) -> Vec<String> {
    let mut ids = Vec::new();
    for (predicate, value) in node {
        if predicate == veld_vocab::ID || predicate == veld_vocab::TYPE {
            continue;
        }
        collect_refs(value, &mut ids);
    }
    ids
}

fn collect_refs(value: &JsonValue, ids: &mut Vec<String>) {
    match value {
        JsonValue::Array(items) => {
            for item in items {
                collect_refs(item, ids);
            }
        }
        JsonValue::Object(obj) => {
            if let Some(members) = obj.get(veld_vocab::LIST) {
                collect_refs(members, ids);
            } else if let Some(id) = obj.get(veld_vocab::ID).and_then(JsonValue::as_str) {
                ids.push(id.to_string());
            }
        }
        _ => {}
    }
}

fn matches_pattern(node: &Map<String, JsonValue>, query: &StatementQuery) -> bool {
    let type_predicate = query
        .predicate
        .as_deref()
        .is_some_and(|p| p == veld_vocab::TYPE || p == veld_vocab::rdf::TYPE);

    if let Some(predicate) = query.predicate.as_deref() {
        let present = if type_predicate {
            !node_types(node).is_empty()
        } else {
            node.contains_key(predicate)
        };
        if !present {
            return false;
        }
    }

    let Some(object) = query.object.as_deref() else {
        return true;
    };
    if type_predicate {
        return node_types(node).iter().any(|t| *t == object);
    }
    match query.predicate.as_deref() {
        Some(predicate) => node.get(predicate).is_some_and(|value| {
            let mut ids = Vec::new();
            collect_refs(value, &mut ids);
            ids.iter().any(|id| id == object)
        }),
        None => referenced_ids(node).iter().any(|id| id == object),
    }
}
