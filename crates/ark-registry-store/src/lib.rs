//! # ARK Registry Store
//!
//! The allocation store: a uniqueness-enforcing persistence layer over
//! reserved `(naan, name, qualifier)` triples. This is the only place
//! concurrent candidate races are resolved; the generator above it just
//! supplies candidates and retries.
//!
//! Backends:
//!
//! - [`SqliteStore`] - primary, uniqueness enforced by a SQLite constraint
//! - [`MemoryStore`] - same semantics in memory, for tests

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{AllocationStore, ReserveOutcome};
