//! The read surface of the external entity graph.
//!
//! The surrounding system owns the entities and their relationships; the
//! locator only reads a small set of typed edges through [`EntityGraph`].

use std::fmt;

use ark_registry_core::Naan;

/// Opaque handle naming an entity in the external graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create an entity id from its raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The closed set of entity kinds the locator can resolve.
///
/// Each kind encodes one resolution rule; dispatch is by declared kind,
/// never by walking arbitrary relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Carries its own authority relation (organizations, concept
    /// schemes, top-level archive containers).
    Direct,
    /// An agent or organizational sub-unit owned by an organization;
    /// resolves through the owner.
    Agent,
    /// An item belonging to a containing scheme; resolves through the
    /// scheme.
    Concept,
    /// A unit that may be nested inside a parent unit; resolves by
    /// walking the nesting chain upward.
    Unit,
    /// A reference node standing between a nested unit and its structural
    /// parent. Never resolved on its own; the parent walk unwraps exactly
    /// one such layer per hop.
    UnitAlternative,
}

/// Read access to the typed relationships the locator needs.
///
/// Every method answers from the persisted graph. Relationship values that
/// are about to be set on a not-yet-committed entity travel separately in
/// [`PendingRelations`](crate::pending::PendingRelations).
pub trait EntityGraph {
    /// The declared kind of an entity, or `None` for unknown entities.
    fn kind(&self, entity: EntityId) -> Option<EntityKind>;

    /// The entity's own authority relation, if declared.
    fn authority_naan(&self, entity: EntityId) -> Option<Naan>;

    /// The organization owning an agent-like entity.
    fn owning_organization(&self, entity: EntityId) -> Option<EntityId>;

    /// The scheme containing a concept-like entity.
    fn containing_scheme(&self, entity: EntityId) -> Option<EntityId>;

    /// The structural parent of a nested unit. May point at a
    /// [`EntityKind::UnitAlternative`] node rather than the parent itself.
    fn parent_unit(&self, entity: EntityId) -> Option<EntityId>;

    /// The target a reference node stands in for.
    fn alternative_target(&self, entity: EntityId) -> Option<EntityId>;
}

impl<G: EntityGraph + ?Sized> EntityGraph for &G {
    fn kind(&self, entity: EntityId) -> Option<EntityKind> {
        (**self).kind(entity)
    }

    fn authority_naan(&self, entity: EntityId) -> Option<Naan> {
        (**self).authority_naan(entity)
    }

    fn owning_organization(&self, entity: EntityId) -> Option<EntityId> {
        (**self).owning_organization(entity)
    }

    fn containing_scheme(&self, entity: EntityId) -> Option<EntityId> {
        (**self).containing_scheme(entity)
    }

    fn parent_unit(&self, entity: EntityId) -> Option<EntityId> {
        (**self).parent_unit(entity)
    }

    fn alternative_target(&self, entity: EntityId) -> Option<EntityId> {
        (**self).alternative_target(entity)
    }
}
