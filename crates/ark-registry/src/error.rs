//! Error types for generation and assignment.

use thiserror::Error;

use ark_registry_core::{Ark, Naan};
use ark_registry_locator::EntityId;
use ark_registry_store::StoreError;

/// Errors from the bounded-retry name/qualifier generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Every candidate in the retry budget collided.
    ///
    /// Fatal for the current assignment attempt, but leaves no partial
    /// state behind; the whole protocol is safe to retry later.
    #[error("no free identifier under NAAN {naan} after {attempts} attempts")]
    AllocationExhausted { naan: Naan, attempts: u32 },

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Errors surfaced by the assignment protocol.
#[derive(Debug, Error)]
pub enum AssignError {
    /// The caller-supplied ARK string does not parse in the permissive
    /// dialect.
    #[error("malformatted ARK identifier {0:?} (expecting [ark:/]NAAN/Name[/Qualifier])")]
    MalformedArk(String),

    /// The caller-supplied identifier is already reserved by another
    /// entity. Never silently overwritten or re-minted.
    #[error("{0} already exists")]
    DuplicateArk(Ark),

    /// No naming authority could be determined; the entity must not be
    /// created without one.
    #[error("an ARK identifier has to be generated but no naming authority applies to entity {0}")]
    NoAuthority(EntityId),

    /// The generator's retry budget ran out.
    #[error("no free identifier under NAAN {naan} after {attempts} attempts")]
    AllocationExhausted { naan: Naan, attempts: u32 },

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<GeneratorError> for AssignError {
    fn from(e: GeneratorError) -> Self {
        match e {
            GeneratorError::AllocationExhausted { naan, attempts } => {
                AssignError::AllocationExhausted { naan, attempts }
            }
            GeneratorError::Store(e) => AssignError::Store(e),
        }
    }
}

/// Result type for assignment operations.
pub type Result<T> = std::result::Result<T, AssignError>;
