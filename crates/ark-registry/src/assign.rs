//! The assignment protocol.
//!
//! One run per entity requiring an identifier, invoked at entity-creation
//! time, before the entity is considered to exist. The caller guarantees a
//! single invocation point per entity; the protocol itself never runs
//! twice for the same one.
//!
//! Decision order:
//!
//! 1. a caller-chosen ARK string is validated and reserved as-is;
//! 2. otherwise, a caller-supplied canonical URI already carrying an
//!    `ark:/naan/name` form is reused without re-reservation;
//! 3. otherwise a fresh identifier is minted under the entity's resolved
//!    naming authority - a qualifier under the parent's name for child
//!    entities, a fresh name otherwise.

use std::sync::Arc;

use tracing::debug;

use ark_registry_core::{extract_ark_from_uri, parse_external, Ark};
use ark_registry_locator::{resolve_naan, EntityGraph, EntityId, PendingRelations};
use ark_registry_store::{AllocationStore, StoreError};

use crate::error::{AssignError, Result};
use crate::generator::{ArkGenerator, GeneratorConfig};

/// One entity's request for an identifier.
#[derive(Debug, Clone)]
pub struct AssignmentRequest<'a> {
    /// The entity about to be identified.
    pub entity: EntityId,
    /// Caller-chosen ARK string, validated in the permissive dialect.
    pub supplied_ark: Option<&'a str>,
    /// Caller-supplied canonical URI, possibly already encoding an ARK.
    pub cwuri: Option<&'a str>,
    /// Parent identifier when the entity is a child scoped under an
    /// already-identified parent; minting then extends the parent's name
    /// with a qualifier instead of minting a fresh name.
    pub parent: Option<&'a Ark>,
    /// Relationship values about to be set on the entity.
    pub pending: PendingRelations,
}

impl<'a> AssignmentRequest<'a> {
    /// Request a freshly minted identifier for an entity.
    pub fn mint(entity: EntityId) -> Self {
        Self {
            entity,
            supplied_ark: None,
            cwuri: None,
            parent: None,
            pending: PendingRelations::none(),
        }
    }

    /// Use a caller-chosen ARK string instead of minting.
    pub fn supplied_ark(mut self, ark: &'a str) -> Self {
        self.supplied_ark = Some(ark);
        self
    }

    /// Provide the entity's canonical URI.
    pub fn cwuri(mut self, uri: &'a str) -> Self {
        self.cwuri = Some(uri);
        self
    }

    /// Scope the new identifier under a parent's name.
    pub fn parent(mut self, parent: &'a Ark) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Attach not-yet-committed relationship values.
    pub fn pending(mut self, pending: PendingRelations) -> Self {
        self.pending = pending;
        self
    }
}

/// Outcome of a completed assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The canonical identifier, to be stored on the entity by the caller.
    pub ark: Ark,
    /// Default canonical URI (`ark:/...`) when the caller supplied no
    /// URI of their own; `None` when they did.
    pub cwuri: Option<String>,
}

/// The assignment protocol's single entry point.
///
/// Holds the allocation store, the entity graph, and a generator; one
/// assigner serves any number of entity creations concurrently.
pub struct ArkAssigner<S, G> {
    store: Arc<S>,
    graph: Arc<G>,
    generator: ArkGenerator<S>,
}

impl<S: AllocationStore, G: EntityGraph> ArkAssigner<S, G> {
    /// Create an assigner over a store and an entity graph.
    pub fn new(store: Arc<S>, graph: Arc<G>, config: GeneratorConfig) -> Self {
        let generator = ArkGenerator::new(Arc::clone(&store), config);
        Self {
            store,
            graph,
            generator,
        }
    }

    /// The underlying generator.
    pub fn generator(&self) -> &ArkGenerator<S> {
        &self.generator
    }

    /// Run the protocol for one entity.
    ///
    /// Returns the canonicalized identifier, or a typed failure; no
    /// failure leaves partial state in the store.
    pub async fn assign(&self, request: AssignmentRequest<'_>) -> Result<Assignment> {
        let had_cwuri = request.cwuri.is_some();
        let ark = self.resolve_request(request).await?;
        let cwuri = (!had_cwuri).then(|| ark.uri());
        Ok(Assignment { ark, cwuri })
    }

    async fn resolve_request(&self, request: AssignmentRequest<'_>) -> Result<Ark> {
        if let Some(raw) = request.supplied_ark {
            return self.reserve_supplied(raw).await;
        }

        if let Some(uri) = request.cwuri {
            if let Some(ark) = extract_ark_from_uri(uri) {
                // already reserved by whoever produced the URI
                debug!(entity = %request.entity, %ark, "reusing identifier from canonical URI");
                return Ok(ark);
            }
        }

        self.mint(&request).await
    }

    /// Validate and reserve a caller-chosen identifier.
    async fn reserve_supplied(&self, raw: &str) -> Result<Ark> {
        let ark =
            parse_external(raw).ok_or_else(|| AssignError::MalformedArk(raw.to_string()))?;

        match self
            .store
            .reserve_external(ark.naan(), ark.name(), ark.qualifier())
            .await
        {
            Ok(()) => Ok(ark),
            Err(StoreError::AlreadyExists { .. }) => Err(AssignError::DuplicateArk(ark)),
            Err(e) => Err(e.into()),
        }
    }

    /// Mint a fresh identifier under the entity's resolved authority.
    async fn mint(&self, request: &AssignmentRequest<'_>) -> Result<Ark> {
        let naan = resolve_naan(self.graph.as_ref(), request.entity, &request.pending)
            .map_err(|_| AssignError::NoAuthority(request.entity))?;

        let ark = match request.parent {
            Some(parent) => {
                let qualifier = self
                    .generator
                    .generate_qualifier(naan, parent.name())
                    .await?;
                Ark::with_qualifier(naan, parent.name(), qualifier)
            }
            None => {
                let name = self.generator.generate_name(naan).await?;
                Ark::new(naan, name)
            }
        };

        debug!(entity = %request.entity, %ark, "minted identifier");
        Ok(ark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_registry_core::Naan;
    use ark_registry_store::MemoryStore;
    use ark_registry_testkit::GraphFixture;

    fn assigner(
        store: Arc<MemoryStore>,
        graph: Arc<GraphFixture>,
    ) -> ArkAssigner<MemoryStore, GraphFixture> {
        ArkAssigner::new(store, graph, GeneratorConfig::default())
    }

    #[tokio::test]
    async fn test_supplied_ark_is_validated_and_reserved() {
        let store = Arc::new(MemoryStore::new());
        let graph = Arc::new(GraphFixture::new());
        let assigner = assigner(Arc::clone(&store), graph);

        let assignment = assigner
            .assign(AssignmentRequest::mint(EntityId::new(1)).supplied_ark("999/123456"))
            .await
            .unwrap();

        assert_eq!(assignment.ark.to_string(), "999/123456");
        assert_eq!(assignment.cwuri.as_deref(), Some("ark:/999/123456"));
        assert!(store
            .exists(Naan::new(999), "123456", None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_supplied_ark_malformed() {
        let store = Arc::new(MemoryStore::new());
        let graph = Arc::new(GraphFixture::new());
        let assigner = assigner(Arc::clone(&store), graph);

        for raw in ["string/name", "123"] {
            let err = assigner
                .assign(AssignmentRequest::mint(EntityId::new(1)).supplied_ark(raw))
                .await
                .unwrap_err();
            assert!(matches!(err, AssignError::MalformedArk(_)), "{raw}");
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_cwuri_with_embedded_ark_is_reused() {
        let store = Arc::new(MemoryStore::new());
        let graph = Arc::new(GraphFixture::new());
        let assigner = assigner(Arc::clone(&store), graph);

        let assignment = assigner
            .assign(
                AssignmentRequest::mint(EntityId::new(1))
                    .cwuri("http://dcf/res/ark:/67717/Matiere"),
            )
            .await
            .unwrap();

        assert_eq!(assignment.ark.to_string(), "67717/Matiere");
        // the caller keeps their own URI
        assert_eq!(assignment.cwuri, None);
        // no re-reservation happens
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_cwuri_without_ark_falls_through_to_minting() {
        let store = Arc::new(MemoryStore::new());
        let mut graph = GraphFixture::new();
        let org = graph.organization(Naan::new(5));
        let assigner = assigner(Arc::clone(&store), Arc::new(graph));

        let assignment = assigner
            .assign(AssignmentRequest::mint(org).cwuri("http://someuri/someagent"))
            .await
            .unwrap();

        assert_eq!(assignment.ark.naan(), Naan::new(5));
        assert_eq!(assignment.cwuri, None);
    }

    #[tokio::test]
    async fn test_mint_without_authority_fails() {
        let store = Arc::new(MemoryStore::new());
        let graph = Arc::new(GraphFixture::new());
        let assigner = assigner(Arc::clone(&store), graph);

        let err = assigner
            .assign(AssignmentRequest::mint(EntityId::new(404)))
            .await
            .unwrap_err();
        assert!(matches!(err, AssignError::NoAuthority(e) if e == EntityId::new(404)));
        assert!(store.is_empty());
    }
}
