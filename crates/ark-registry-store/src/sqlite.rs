//! SQLite implementation of the AllocationStore trait.
//!
//! This is the primary storage backend for the ARK registry. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.
//! Uniqueness is enforced by the `UNIQUE(naan, name, qualifier)` constraint,
//! so a race between two callers on the same candidate is decided inside
//! SQLite: exactly one insert succeeds.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode};
use tracing::debug;

use ark_registry_core::Naan;

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{format_triple, AllocationStore, ReserveOutcome};

/// SQLite-based allocation store.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Insert a triple, reporting a constraint violation as a conflict.
///
/// The reservation either fully succeeds or leaves no trace; a conflicting
/// insert is rejected by the constraint before any row is written.
fn try_insert(
    conn: &Connection,
    naan: Naan,
    name: &str,
    qualifier: Option<&str>,
) -> Result<ReserveOutcome> {
    let result = conn.execute(
        "INSERT INTO allocations (naan, name, qualifier, allocated_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            naan.get() as i64,
            name,
            qualifier.unwrap_or(""),
            now_millis(),
        ],
    );

    match result {
        Ok(_) => Ok(ReserveOutcome::Reserved),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation =>
        {
            Ok(ReserveOutcome::Conflict)
        }
        Err(e) => Err(e.into()),
    }
}

fn lock_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
        Some(format!("mutex poisoned: {}", e)),
    ))
}

fn join_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
        Some(format!("spawn_blocking failed: {}", e)),
    ))
}

#[async_trait]
impl AllocationStore for SqliteStore {
    async fn reserve(
        &self,
        naan: Naan,
        name: &str,
        qualifier: Option<&str>,
    ) -> Result<ReserveOutcome> {
        let name = name.to_string();
        let qualifier = qualifier.map(String::from);
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_error)?;
            let outcome = try_insert(&conn, naan, &name, qualifier.as_deref())?;
            if outcome == ReserveOutcome::Conflict {
                debug!(%naan, name, "reservation candidate already taken");
            }
            Ok(outcome)
        })
        .await
        .map_err(join_error)?
    }

    async fn reserve_external(
        &self,
        naan: Naan,
        name: &str,
        qualifier: Option<&str>,
    ) -> Result<()> {
        let name = name.to_string();
        let qualifier = qualifier.map(String::from);
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_error)?;
            match try_insert(&conn, naan, &name, qualifier.as_deref())? {
                ReserveOutcome::Reserved => Ok(()),
                ReserveOutcome::Conflict => Err(StoreError::AlreadyExists {
                    ark: format_triple(naan, &name, qualifier.as_deref()),
                }),
            }
        })
        .await
        .map_err(join_error)?
    }

    async fn exists(&self, naan: Naan, name: &str, qualifier: Option<&str>) -> Result<bool> {
        let name = name.to_string();
        let qualifier = qualifier.map(String::from);
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_error)?;
            let exists: bool = conn.query_row(
                "SELECT EXISTS(
                     SELECT 1 FROM allocations
                     WHERE naan = ?1 AND name = ?2 AND qualifier = ?3
                 )",
                params![
                    naan.get() as i64,
                    name,
                    qualifier.as_deref().unwrap_or(""),
                ],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
        .map_err(join_error)?
    }

    async fn release(&self, naan: Naan, name: &str, qualifier: Option<&str>) -> Result<bool> {
        let name = name.to_string();
        let qualifier = qualifier.map(String::from);
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_error)?;
            let removed = conn.execute(
                "DELETE FROM allocations
                 WHERE naan = ?1 AND name = ?2 AND qualifier = ?3",
                params![
                    naan.get() as i64,
                    name,
                    qualifier.as_deref().unwrap_or(""),
                ],
            )?;
            Ok(removed > 0)
        })
        .await
        .map_err(join_error)?
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reserve_and_exists() {
        let store = SqliteStore::open_memory().unwrap();
        let naan = Naan::new(5);

        let outcome = store.reserve(naan, "rfa1b2c3dg", None).await.unwrap();
        assert_eq!(outcome, ReserveOutcome::Reserved);

        assert!(store.exists(naan, "rfa1b2c3dg", None).await.unwrap());
        assert!(!store.exists(naan, "rfzzzzzzzg", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_reserve_conflict() {
        let store = SqliteStore::open_memory().unwrap();
        let naan = Naan::new(5);

        let first = store.reserve(naan, "rfa1b2c3dg", None).await.unwrap();
        assert_eq!(first, ReserveOutcome::Reserved);

        let second = store.reserve(naan, "rfa1b2c3dg", None).await.unwrap();
        assert_eq!(second, ReserveOutcome::Conflict);
    }

    #[tokio::test]
    async fn test_pair_and_triple_coexist() {
        let store = SqliteStore::open_memory().unwrap();
        let naan = Naan::new(5);

        // parent name, then children scoped under it
        assert!(store
            .reserve(naan, "rfa1b2c3dg", None)
            .await
            .unwrap()
            .is_reserved());
        assert!(store
            .reserve(naan, "rfa1b2c3dg", Some("child1"))
            .await
            .unwrap()
            .is_reserved());
        assert!(store
            .reserve(naan, "rfa1b2c3dg", Some("child2"))
            .await
            .unwrap()
            .is_reserved());

        // same qualifier twice collides
        let again = store
            .reserve(naan, "rfa1b2c3dg", Some("child1"))
            .await
            .unwrap();
        assert_eq!(again, ReserveOutcome::Conflict);
    }

    #[tokio::test]
    async fn test_qualifiers_scoped_per_parent_name() {
        let store = SqliteStore::open_memory().unwrap();
        let naan = Naan::new(5);

        // the same qualifier string under two different parent names is fine
        assert!(store
            .reserve(naan, "rfaaaaaaag", Some("q1"))
            .await
            .unwrap()
            .is_reserved());
        assert!(store
            .reserve(naan, "rfbbbbbbbg", Some("q1"))
            .await
            .unwrap()
            .is_reserved());
    }

    #[tokio::test]
    async fn test_reserve_external_duplicate_is_hard_error() {
        let store = SqliteStore::open_memory().unwrap();
        let naan = Naan::new(1);

        store.reserve_external(naan, "bob", None).await.unwrap();

        let err = store.reserve_external(naan, "bob", None).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
        assert!(err.to_string().contains("1/bob"));
    }

    #[tokio::test]
    async fn test_release() {
        let store = SqliteStore::open_memory().unwrap();
        let naan = Naan::new(5);

        store.reserve(naan, "rfa1b2c3dg", None).await.unwrap();
        assert!(store.release(naan, "rfa1b2c3dg", None).await.unwrap());
        assert!(!store.exists(naan, "rfa1b2c3dg", None).await.unwrap());

        // releasing again removes nothing
        assert!(!store.release(naan, "rfa1b2c3dg", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_reserve_single_winner() {
        let store = Arc::new(SqliteStore::open_memory().unwrap());
        let naan = Naan::new(5);

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.reserve(naan, "rfracedxyg", None).await.unwrap()
            }));
        }

        let mut reserved = 0;
        for handle in handles {
            if handle.await.unwrap().is_reserved() {
                reserved += 1;
            }
        }
        assert_eq!(reserved, 1);
    }

    #[tokio::test]
    async fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allocations.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .reserve(Naan::new(5), "rfa1b2c3dg", None)
                .await
                .unwrap();
        }

        // reservations survive reopening
        let store = SqliteStore::open(&path).unwrap();
        assert!(store
            .exists(Naan::new(5), "rfa1b2c3dg", None)
            .await
            .unwrap());
    }
}
