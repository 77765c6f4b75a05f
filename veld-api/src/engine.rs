//! The metadata engine facade
//!
//! One [`MetadataEngine`] ties the layers together: it loads the vocabulary
//! snapshot from one store, opens subjects from another as editable
//! [`EditingContext`]s, and drives the submit handshake that turns pending
//! edits into patch fragments. The vocabulary snapshot is an explicit value
//! passed back in by the caller, so a stale snapshot can never be used
//! without the caller knowing which one it holds.

use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};
use veld_core::{Graph, Node, WorkspaceIris};
use veld_form::{from_graph, seed_defaults, to_graph, EditSession, ValuesByPredicate};
use veld_shapes::{shape, PropertyDescriptor, ShapeRepository};
use veld_store::{partition_issues, LinkedDataStore, StatementQuery, StoreError};
use veld_vocab::{ID, INVERSE_MARKER, TYPE};

use crate::error::{EngineError, Result};

/// One subject opened for editing
#[derive(Debug)]
pub struct EditingContext {
    /// Subject IRI
    pub subject: String,
    /// The subject's neighborhood as last fetched
    pub graph: Graph,
    /// Class IRIs of the subject
    pub types: Vec<String>,
    /// Descriptors governing the form, in declaration order
    pub descriptors: Vec<PropertyDescriptor>,
    /// Base values plus pending edits
    pub session: EditSession,
}

/// Entry in an entity listing
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySummary {
    pub id: String,
    pub label: Option<String>,
    pub types: Vec<String>,
}

impl EntitySummary {
    fn from_node(node: &Node) -> Self {
        EntitySummary {
            id: node.id.clone(),
            label: node.display_label().map(String::from),
            types: node.types.clone(),
        }
    }
}

/// Facade over a metadata store and a vocabulary store
#[derive(Clone, Debug)]
pub struct MetadataEngine<M, V> {
    metadata: M,
    vocabulary: V,
    iris: WorkspaceIris,
}

impl<M, V> MetadataEngine<M, V>
where
    M: LinkedDataStore,
    V: LinkedDataStore,
{
    pub fn new(metadata: M, vocabulary: V, iris: WorkspaceIris) -> Self {
        MetadataEngine {
            metadata,
            vocabulary,
            iris,
        }
    }

    /// Fetch the vocabulary graph and build an immutable snapshot of it
    pub async fn load_vocabulary(&self) -> Result<ShapeRepository> {
        let nodes = self.vocabulary.get(&StatementQuery::all()).await?;
        let graph = Graph::from_expanded(&JsonValue::Array(nodes))?;
        debug!(node_count = graph.len(), "Loaded vocabulary snapshot");
        Ok(ShapeRepository::new(graph))
    }

    /// Open a subject for editing: fetch its neighborhood, derive the
    /// descriptors its types call for, and seed an edit session
    pub async fn open(&self, repository: &ShapeRepository, subject: &str) -> Result<EditingContext> {
        let graph = self.fetch_graph(subject).await?;
        let Some(node) = graph.node(subject) else {
            return Err(EngineError::NotFound(subject.to_string()));
        };
        let types = node.types.clone();
        let descriptors = repository.descriptors_for_types(&types);
        let shapes = repository.property_shapes_for_types_with_inherited(&types);
        let base = from_graph(node, &shapes, &graph, repository);
        let session = EditSession::seeded(base, &descriptors);
        debug!(subject = %subject, property_count = descriptors.len(), "Opened subject");
        Ok(EditingContext {
            subject: subject.to_string(),
            graph,
            types,
            descriptors,
            session,
        })
    }

    /// Submit the context's pending edits to the metadata store.
    ///
    /// Validates first and refuses to send an invalid form. On acceptance
    /// the subject is re-fetched and installed as the new base; on rejection
    /// the pending edits stay in place for a retry and the store's issues
    /// come back split into those about this subject and those about others.
    pub async fn submit(
        &self,
        repository: &ShapeRepository,
        context: &mut EditingContext,
    ) -> Result<()> {
        if context.session.validate_all(&context.descriptors) {
            let keys = context
                .descriptors
                .iter()
                .filter(|d| !context.session.errors_for(&d.key).is_empty())
                .map(|d| d.key.clone())
                .collect();
            return Err(EngineError::Validation { keys });
        }
        let overlay = context.session.begin_submit()?;
        let fragments = fragments_for(repository, &context.subject, &overlay);
        info!(
            subject = %context.subject,
            fragment_count = fragments.len(),
            "Submitting changes"
        );
        match self.metadata.patch(&fragments).await {
            Ok(()) => self.refresh_after_submit(repository, context).await,
            Err(StoreError::Rejected { issues }) => {
                context.session.finish_submit_failure();
                let (ours, others) = partition_issues(&issues, &context.subject);
                Err(EngineError::Rejected {
                    subject_issues: ours.into_iter().cloned().collect(),
                    other_issues: others.into_iter().cloned().collect(),
                })
            }
            Err(other) => {
                context.session.finish_submit_failure();
                Err(other.into())
            }
        }
    }

    /// Mint an IRI and create an entity of the given type with the given
    /// initial values, returning the new subject IRI
    pub async fn create(
        &self,
        repository: &ShapeRepository,
        type_iri: &str,
        values: &ValuesByPredicate,
    ) -> Result<String> {
        let types = vec![type_iri.to_string()];
        if repository.class_shape_for_types(&types).is_none() {
            return Err(EngineError::UnknownType(type_iri.to_string()));
        }
        let descriptors = repository.descriptors_for_types(&types);
        let empty = Vec::new();
        let invalid: Vec<String> = descriptors
            .iter()
            .filter(|d| {
                let list = values.get(&d.key).unwrap_or(&empty);
                !veld_validate::validate(d, list).is_empty()
            })
            .map(|d| d.key.clone())
            .collect();
        if !invalid.is_empty() {
            return Err(EngineError::Validation { keys: invalid });
        }

        let subject = self.iris.mint_metadata_iri();
        let mut fragments = vec![json!({ID: subject, TYPE: [type_iri]})];
        for (key, entry_values) in values {
            if key == TYPE {
                continue;
            }
            let property_shape = repository.property_shape_for_path(key);
            if let Some(fragment) = to_graph(&subject, key, Some(entry_values), property_shape) {
                fragments.push(fragment);
            }
        }
        info!(subject = %subject, entity_type = %type_iri, "Creating entity");
        self.metadata.patch(&fragments).await?;
        Ok(subject)
    }

    /// Remove a subject from the metadata store
    pub async fn delete(&self, subject: &str) -> Result<()> {
        info!(subject = %subject, "Deleting entity");
        self.metadata.delete(subject).await.map_err(|error| match error {
            StoreError::NotFound(s) => EngineError::NotFound(s),
            other => other.into(),
        })
    }

    /// All instances of one class
    pub async fn entities_of_type(&self, class_iri: &str) -> Result<Vec<EntitySummary>> {
        let nodes = self.metadata.get(&StatementQuery::by_type(class_iri)).await?;
        let graph = Graph::from_expanded(&JsonValue::Array(nodes))?;
        Ok(graph.iter().map(EntitySummary::from_node).collect())
    }

    /// All instances of every class the vocabulary exposes in its catalog
    pub async fn catalog_entities(
        &self,
        repository: &ShapeRepository,
    ) -> Result<Vec<EntitySummary>> {
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for class_shape in repository.classes_in_catalog() {
            let class_iri = shape::target_class(class_shape).unwrap_or(&class_shape.id);
            for summary in self.entities_of_type(class_iri).await? {
                if seen.insert(summary.id.clone()) {
                    result.push(summary);
                }
            }
        }
        Ok(result)
    }

    async fn fetch_graph(&self, subject: &str) -> Result<Graph> {
        let nodes = self
            .metadata
            .get(&StatementQuery::by_subject(subject))
            .await?;
        Ok(Graph::from_expanded(&JsonValue::Array(nodes))?)
    }

    async fn refresh_after_submit(
        &self,
        repository: &ShapeRepository,
        context: &mut EditingContext,
    ) -> Result<()> {
        // the patch has landed; whatever happens next, the session must not
        // stay in Submitting
        let refreshed = match self.fetch_graph(&context.subject).await {
            Ok(graph) => graph,
            Err(error) => {
                context.session.finish_submit_failure();
                return Err(error);
            }
        };
        let Some(node) = refreshed.node(&context.subject) else {
            context.session.finish_submit_failure();
            return Err(EngineError::NotFound(context.subject.clone()));
        };
        let types = node.types.clone();
        let descriptors = repository.descriptors_for_types(&types);
        let shapes = repository.property_shapes_for_types_with_inherited(&types);
        let mut base = from_graph(node, &shapes, &refreshed, repository);
        seed_defaults(&mut base, &descriptors);
        context.session.finish_submit_success(base);
        context.types = types;
        context.descriptors = descriptors;
        context.graph = refreshed;
        info!(subject = %context.subject, "Submission applied");
        Ok(())
    }
}

fn fragments_for(
    repository: &ShapeRepository,
    subject: &str,
    overlay: &ValuesByPredicate,
) -> Vec<JsonValue> {
    let mut fragments = Vec::new();
    for (key, values) in overlay {
        if key == TYPE {
            let ids: Vec<&str> = values.iter().filter_map(|v| v.id.as_deref()).collect();
            fragments.push(json!({ID: subject, TYPE: ids}));
            continue;
        }
        // referrer lists are edited from the referring side
        if key.starts_with(INVERSE_MARKER) {
            continue;
        }
        let property_shape = repository.property_shape_for_path(key);
        if let Some(fragment) = to_graph(subject, key, Some(values), property_shape) {
            fragments.push(fragment);
        }
    }
    fragments
}
