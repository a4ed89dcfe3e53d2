//! Not-yet-committed relationship values.
//!
//! Identifiers are assigned while the entity is still being constructed,
//! before its relationships are persisted. This context carries the
//! values about to be set so resolution can see them first.

use ark_registry_core::Naan;

use crate::entity::EntityId;

/// Relationship values about to be set on the entity under construction.
///
/// Consulted before the persisted graph, and only for the entity a
/// resolution starts from - ancestors reached during the walk are already
/// committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRelations {
    /// Authority relation about to be set.
    pub authority: Option<Naan>,
    /// Owning organization about to be set.
    pub owning_organization: Option<EntityId>,
    /// Containing scheme about to be set.
    pub containing_scheme: Option<EntityId>,
    /// Parent unit about to be set.
    pub parent_unit: Option<EntityId>,
}

impl PendingRelations {
    /// No pending values; resolution reads the persisted graph only.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the pending authority relation.
    pub fn authority(mut self, naan: Naan) -> Self {
        self.authority = Some(naan);
        self
    }

    /// Set the pending owning organization.
    pub fn owning_organization(mut self, org: EntityId) -> Self {
        self.owning_organization = Some(org);
        self
    }

    /// Set the pending containing scheme.
    pub fn containing_scheme(mut self, scheme: EntityId) -> Self {
        self.containing_scheme = Some(scheme);
        self
    }

    /// Set the pending parent unit.
    pub fn parent_unit(mut self, parent: EntityId) -> Self {
        self.parent_unit = Some(parent);
        self
    }
}
