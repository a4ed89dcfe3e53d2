//! Authority resolution rules, dispatched over entity kind.

use std::collections::HashSet;

use ark_registry_core::Naan;

use crate::entity::{EntityGraph, EntityId, EntityKind};
use crate::error::{LocatorError, Result};
use crate::pending::PendingRelations;

/// Determine the NAAN governing an entity about to be identified.
///
/// Dispatches on the entity's declared kind; see the per-rule helpers
/// below. Returns [`LocatorError::Unresolvable`] when no rule applies,
/// in which case minting must not proceed.
pub fn resolve_naan<G: EntityGraph + ?Sized>(
    graph: &G,
    entity: EntityId,
    pending: &PendingRelations,
) -> Result<Naan> {
    match graph.kind(entity) {
        Some(EntityKind::Direct) => resolve_direct(graph, entity, Some(pending)),
        Some(EntityKind::Agent) => resolve_agent(graph, entity, pending),
        Some(EntityKind::Concept) => resolve_concept(graph, entity, pending),
        Some(EntityKind::Unit) => resolve_unit(graph, entity, pending),
        // a reference node is never identified on its own
        Some(EntityKind::UnitAlternative) | None => Err(LocatorError::Unresolvable(entity)),
    }
}

/// Direct rule: the entity's own authority relation, pending first.
fn resolve_direct<G: EntityGraph + ?Sized>(
    graph: &G,
    entity: EntityId,
    pending: Option<&PendingRelations>,
) -> Result<Naan> {
    if let Some(naan) = pending.and_then(|p| p.authority) {
        return Ok(naan);
    }
    graph
        .authority_naan(entity)
        .ok_or(LocatorError::Unresolvable(entity))
}

/// Agent rule: resolve the owning organization's authority.
fn resolve_agent<G: EntityGraph + ?Sized>(
    graph: &G,
    entity: EntityId,
    pending: &PendingRelations,
) -> Result<Naan> {
    let org = pending
        .owning_organization
        .or_else(|| graph.owning_organization(entity))
        .ok_or(LocatorError::Unresolvable(entity))?;
    resolve_direct(graph, org, None)
}

/// Concept rule: resolve the containing scheme, recursively - the scheme
/// itself resolves via its own rule.
fn resolve_concept<G: EntityGraph + ?Sized>(
    graph: &G,
    entity: EntityId,
    pending: &PendingRelations,
) -> Result<Naan> {
    let scheme = pending
        .containing_scheme
        .or_else(|| graph.containing_scheme(entity))
        .ok_or(LocatorError::Unresolvable(entity))?;
    resolve_naan(graph, scheme, &PendingRelations::none())
        .map_err(|_| LocatorError::Unresolvable(entity))
}

/// Unit rule: walk the nesting chain upward to the top-level container,
/// then apply the direct rule there.
///
/// A parent link may point at a reference node standing in for the
/// structural parent; exactly one such indirection layer is unwrapped per
/// hop. A unit with no parent at all falls back to the direct rule on
/// itself, so the parent chain always takes precedence over a direct
/// relation when both exist.
fn resolve_unit<G: EntityGraph + ?Sized>(
    graph: &G,
    entity: EntityId,
    pending: &PendingRelations,
) -> Result<Naan> {
    let first_parent = pending.parent_unit.or_else(|| graph.parent_unit(entity));

    let Some(first_parent) = first_parent else {
        return resolve_direct(graph, entity, Some(pending));
    };

    let mut seen: HashSet<EntityId> = HashSet::from([entity]);
    let mut top = unwrap_alternative(graph, entity, first_parent)?;

    while let Some(parent) = graph.parent_unit(top) {
        let parent = unwrap_alternative(graph, entity, parent)?;
        if !seen.insert(top) {
            // cycle in the parent chain; refuse rather than loop
            return Err(LocatorError::Unresolvable(entity));
        }
        top = parent;
    }

    resolve_direct(graph, top, None)
}

/// Unwrap one reference-node indirection layer, if present.
fn unwrap_alternative<G: EntityGraph + ?Sized>(
    graph: &G,
    origin: EntityId,
    node: EntityId,
) -> Result<EntityId> {
    if graph.kind(node) == Some(EntityKind::UnitAlternative) {
        graph
            .alternative_target(node)
            .ok_or(LocatorError::Unresolvable(origin))
    } else {
        Ok(node)
    }
}
