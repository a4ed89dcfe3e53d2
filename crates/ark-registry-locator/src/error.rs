//! Error types for authority resolution.

use thiserror::Error;

use crate::entity::EntityId;

/// Errors that can occur during authority resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocatorError {
    /// No resolution rule yields an authority for this entity.
    ///
    /// Minting must not proceed: an identifier without a naming authority
    /// is not citable.
    #[error("no naming authority can be determined for entity {0}")]
    Unresolvable(EntityId),
}

/// Result type for locator operations.
pub type Result<T> = std::result::Result<T, LocatorError>;
