//! Test fixtures and helpers.
//!
//! An in-memory entity graph with a builder API, for wiring up the
//! resolution scenarios the locator and the assignment protocol need.

use std::collections::HashMap;

use ark_registry_core::Naan;
use ark_registry_locator::{EntityGraph, EntityId, EntityKind};

/// In-memory entity graph for tests.
///
/// Entities are created through the builder methods; relationship edges
/// can also be set directly for unusual shapes (cycles, dangling
/// references).
#[derive(Debug, Default)]
pub struct GraphFixture {
    next_id: u64,
    kinds: HashMap<EntityId, EntityKind>,
    naans: HashMap<EntityId, Naan>,
    owners: HashMap<EntityId, EntityId>,
    schemes: HashMap<EntityId, EntityId>,
    parents: HashMap<EntityId, EntityId>,
    targets: HashMap<EntityId, EntityId>,
}

impl GraphFixture {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bare entity of the given kind.
    pub fn add_entity(&mut self, kind: EntityKind) -> EntityId {
        self.next_id += 1;
        let id = EntityId::new(self.next_id);
        self.kinds.insert(id, kind);
        id
    }

    /// An organization (or any direct authority holder) with its NAAN.
    pub fn organization(&mut self, naan: Naan) -> EntityId {
        let id = self.add_entity(EntityKind::Direct);
        self.naans.insert(id, naan);
        id
    }

    /// A concept scheme with its NAAN.
    pub fn scheme(&mut self, naan: Naan) -> EntityId {
        self.organization(naan)
    }

    /// An agent owned by an organization.
    pub fn agent_of(&mut self, org: EntityId) -> EntityId {
        let id = self.add_entity(EntityKind::Agent);
        self.owners.insert(id, org);
        id
    }

    /// A concept contained in a scheme.
    pub fn concept_in(&mut self, scheme: EntityId) -> EntityId {
        let id = self.add_entity(EntityKind::Concept);
        self.schemes.insert(id, scheme);
        id
    }

    /// A unit with no parent.
    pub fn unit(&mut self) -> EntityId {
        self.add_entity(EntityKind::Unit)
    }

    /// A unit nested inside a parent.
    pub fn unit_in(&mut self, parent: EntityId) -> EntityId {
        let id = self.add_entity(EntityKind::Unit);
        self.parents.insert(id, parent);
        id
    }

    /// A reference node standing in for a target.
    pub fn alternative_of(&mut self, target: EntityId) -> EntityId {
        let id = self.add_entity(EntityKind::UnitAlternative);
        self.targets.insert(id, target);
        id
    }

    /// Set an entity's own authority relation.
    pub fn set_naan(&mut self, entity: EntityId, naan: Naan) {
        self.naans.insert(entity, naan);
    }

    /// Set an entity's owning organization.
    pub fn set_owner(&mut self, entity: EntityId, org: EntityId) {
        self.owners.insert(entity, org);
    }

    /// Set an entity's containing scheme.
    pub fn set_scheme(&mut self, entity: EntityId, scheme: EntityId) {
        self.schemes.insert(entity, scheme);
    }

    /// Set an entity's parent unit.
    pub fn set_parent(&mut self, entity: EntityId, parent: EntityId) {
        self.parents.insert(entity, parent);
    }
}

impl EntityGraph for GraphFixture {
    fn kind(&self, entity: EntityId) -> Option<EntityKind> {
        self.kinds.get(&entity).copied()
    }

    fn authority_naan(&self, entity: EntityId) -> Option<Naan> {
        self.naans.get(&entity).copied()
    }

    fn owning_organization(&self, entity: EntityId) -> Option<EntityId> {
        self.owners.get(&entity).copied()
    }

    fn containing_scheme(&self, entity: EntityId) -> Option<EntityId> {
        self.schemes.get(&entity).copied()
    }

    fn parent_unit(&self, entity: EntityId) -> Option<EntityId> {
        self.parents.get(&entity).copied()
    }

    fn alternative_target(&self, entity: EntityId) -> Option<EntityId> {
        self.targets.get(&entity).copied()
    }
}
