//! In-memory implementation of the AllocationStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use ark_registry_core::Naan;

use crate::error::{Result, StoreError};
use crate::traits::{format_triple, AllocationStore, ReserveOutcome};

/// Key for one reservation; the empty string encodes "no qualifier",
/// matching the SQLite column encoding.
type Triple = (Naan, String, String);

/// In-memory allocation store.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    allocations: RwLock<HashSet<Triple>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            allocations: RwLock::new(HashSet::new()),
        }
    }

    /// Number of reservations held.
    pub fn len(&self) -> usize {
        self.allocations.read().expect("lock poisoned").len()
    }

    /// Whether the store holds no reservations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn triple(naan: Naan, name: &str, qualifier: Option<&str>) -> Triple {
    (naan, name.to_string(), qualifier.unwrap_or("").to_string())
}

#[async_trait]
impl AllocationStore for MemoryStore {
    async fn reserve(
        &self,
        naan: Naan,
        name: &str,
        qualifier: Option<&str>,
    ) -> Result<ReserveOutcome> {
        let mut allocations = self.allocations.write().expect("lock poisoned");
        if allocations.insert(triple(naan, name, qualifier)) {
            Ok(ReserveOutcome::Reserved)
        } else {
            Ok(ReserveOutcome::Conflict)
        }
    }

    async fn reserve_external(
        &self,
        naan: Naan,
        name: &str,
        qualifier: Option<&str>,
    ) -> Result<()> {
        let mut allocations = self.allocations.write().expect("lock poisoned");
        if allocations.insert(triple(naan, name, qualifier)) {
            Ok(())
        } else {
            Err(StoreError::AlreadyExists {
                ark: format_triple(naan, name, qualifier),
            })
        }
    }

    async fn exists(&self, naan: Naan, name: &str, qualifier: Option<&str>) -> Result<bool> {
        let allocations = self.allocations.read().expect("lock poisoned");
        Ok(allocations.contains(&triple(naan, name, qualifier)))
    }

    async fn release(&self, naan: Naan, name: &str, qualifier: Option<&str>) -> Result<bool> {
        let mut allocations = self.allocations.write().expect("lock poisoned");
        Ok(allocations.remove(&triple(naan, name, qualifier)))
    }
}
