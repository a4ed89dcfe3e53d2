//! Store trait: the abstract interface for identifier reservation.
//!
//! This trait keeps the generator and the assignment protocol
//! storage-agnostic. Implementations include SQLite (primary) and
//! in-memory (for tests).

use async_trait::async_trait;
use ark_registry_core::Naan;

use crate::error::Result;

/// Result of attempting to reserve a candidate identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// The triple was absent and is now reserved by this caller.
    Reserved,
    /// The triple is already reserved (expected during candidate retry -
    /// not an error).
    Conflict,
}

impl ReserveOutcome {
    /// Whether this outcome reserved the triple.
    pub fn is_reserved(&self) -> bool {
        matches!(self, ReserveOutcome::Reserved)
    }
}

/// The allocation store: async interface for identifier reservation.
///
/// A reservation is one `(naan, name)` pair or one `(naan, name, qualifier)`
/// triple. Rows are append-only: created exactly once per successful
/// reservation, never updated, deleted only when the surrounding system
/// permanently purges the owning entity (via [`AllocationStore::release`]).
///
/// # Design Notes
///
/// - **Storage-layer uniqueness**: two simultaneous `reserve` calls with
///   the same candidate must not both observe [`ReserveOutcome::Reserved`].
///   Uniqueness lives in the storage layer, not in optimistic
///   application-level checks, because the random-candidate race is exactly
///   what the generator's retry loop is built to tolerate.
/// - **Expected conflicts**: `reserve` reports a collision as an outcome;
///   `reserve_external` reports it as a hard [`StoreError::AlreadyExists`]
///   because caller-chosen identifiers are never silently re-minted.
///
/// [`StoreError::AlreadyExists`]: crate::error::StoreError::AlreadyExists
#[async_trait]
pub trait AllocationStore: Send + Sync {
    /// Atomically reserve a generated candidate.
    ///
    /// Returns [`ReserveOutcome::Conflict`] when the triple is already
    /// taken, letting the generator retry with a fresh candidate.
    async fn reserve(
        &self,
        naan: Naan,
        name: &str,
        qualifier: Option<&str>,
    ) -> Result<ReserveOutcome>;

    /// Reserve a caller-supplied identifier.
    ///
    /// A collision is a hard error surfaced to the caller; it must not be
    /// retried with a different candidate.
    async fn reserve_external(
        &self,
        naan: Naan,
        name: &str,
        qualifier: Option<&str>,
    ) -> Result<()>;

    /// Whether a triple is currently reserved.
    ///
    /// Diagnostics and tests only; not on the allocation path.
    async fn exists(&self, naan: Naan, name: &str, qualifier: Option<&str>) -> Result<bool>;

    /// Remove a reservation when its owning entity is permanently purged.
    ///
    /// The deletion policy belongs to the surrounding system; this is the
    /// single-row delete it needs. Returns whether a row was removed.
    async fn release(&self, naan: Naan, name: &str, qualifier: Option<&str>) -> Result<bool>;
}

/// Render a triple for error messages.
pub(crate) fn format_triple(naan: Naan, name: &str, qualifier: Option<&str>) -> String {
    match qualifier {
        Some(q) => format!("{}/{}/{}", naan, name, q),
        None => format!("{}/{}", naan, name),
    }
}
