//! # ARK Registry Locator
//!
//! Resolution of the naming authority governing an entity that is about
//! to receive an identifier.
//!
//! Entities live in a typed graph owned by the surrounding system; this
//! crate only needs read access to a handful of relationships, exposed
//! through the [`EntityGraph`] trait. Each entity kind encodes its own
//! resolution rule:
//!
//! - a kind that carries its own authority relation resolves directly;
//! - an agent resolves through its owning organization;
//! - a concept resolves through its containing scheme;
//! - a nested unit walks its parent chain to the top-level container,
//!   unwrapping one reference-node indirection per hop.
//!
//! Identifiers are typically assigned before the entity's row formally
//! exists, so resolution consults [`PendingRelations`] - the relationship
//! values about to be set - before the persisted graph.

pub mod entity;
pub mod error;
pub mod pending;
pub mod resolve;

pub use entity::{EntityGraph, EntityId, EntityKind};
pub use error::{LocatorError, Result};
pub use pending::PendingRelations;
pub use resolve::resolve_naan;
