//! # ARK Registry
//!
//! The unified API for minting and resolving ARK persistent identifiers -
//! globally citable, collision-resistant names for archival records.
//!
//! ## Overview
//!
//! - **Identifiers**: `naan/name[/qualifier]` values with an `ark:/` URI
//!   form and a two-dialect grammar (strict for locally minted names,
//!   permissive for foreign ones)
//! - **Allocation**: a uniqueness-enforcing store of reserved triples,
//!   where concurrent candidate races are decided
//! - **Authority resolution**: which naming authority governs an entity,
//!   resolved over the typed relationships of the surrounding graph
//! - **Assignment**: the entity-creation-time protocol deciding between a
//!   caller-chosen identifier, a URI-derived one, and a fresh mint
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ark_registry::{ArkAssigner, AssignmentRequest, GeneratorConfig};
//! use ark_registry::locator::EntityId;
//! use ark_registry::store::SqliteStore;
//! # use ark_registry::locator::{EntityGraph, EntityKind};
//! # use ark_registry::core::Naan;
//! # struct Graph;
//! # impl EntityGraph for Graph {
//! #     fn kind(&self, _: EntityId) -> Option<EntityKind> { None }
//! #     fn authority_naan(&self, _: EntityId) -> Option<Naan> { None }
//! #     fn owning_organization(&self, _: EntityId) -> Option<EntityId> { None }
//! #     fn containing_scheme(&self, _: EntityId) -> Option<EntityId> { None }
//! #     fn parent_unit(&self, _: EntityId) -> Option<EntityId> { None }
//! #     fn alternative_target(&self, _: EntityId) -> Option<EntityId> { None }
//! # }
//!
//! async fn example(graph: Arc<Graph>) {
//!     let store = Arc::new(SqliteStore::open("allocations.db").unwrap());
//!     let assigner = ArkAssigner::new(store, graph, GeneratorConfig::default());
//!
//!     let assignment = assigner
//!         .assign(AssignmentRequest::mint(EntityId::new(1)))
//!         .await
//!         .unwrap();
//!
//!     // the caller stores the string on the entity
//!     println!("{}", assignment.ark);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `ark_registry::core` - identifier values and the grammar
//! - `ark_registry::store` - the allocation store
//! - `ark_registry::locator` - naming-authority resolution

pub mod assign;
pub mod error;
pub mod generator;

// Re-export component crates
pub use ark_registry_core as core;
pub use ark_registry_locator as locator;
pub use ark_registry_store as store;

// Re-export main types for convenience
pub use assign::{ArkAssigner, Assignment, AssignmentRequest};
pub use error::{AssignError, GeneratorError, Result};
pub use generator::{ArkGenerator, GeneratorConfig};

// Re-export commonly used component types
pub use ark_registry_core::{Ark, ArkGrammar, Naan, NameShape, NamingAuthority};
pub use ark_registry_locator::{EntityGraph, EntityId, EntityKind, PendingRelations};
pub use ark_registry_store::{AllocationStore, MemoryStore, ReserveOutcome, SqliteStore};
