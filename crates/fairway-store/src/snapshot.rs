//! Raw key-value snapshot store backed by redb.
//!
//! One table, string keys, JSON string values. Every `put`/`remove` commits
//! before returning; redb's default `Durability::Immediate` means a commit
//! survives power loss, which is exactly what a POS terminal needs mid-shift.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, TableDefinition};

use crate::error::StoreResult;

/// All snapshots live in one table: key = snapshot name, value = JSON.
const SNAPSHOTS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("snapshots");

/// Snapshot key for the in-progress cart.
pub const CART_KEY: &str = "cart";

/// Snapshot key for the terminal settings.
pub const SETTINGS_KEY: &str = "settings";

/// Key-value snapshot store.
///
/// Cheap to clone; clones share the underlying database handle.
#[derive(Clone)]
pub struct SnapshotStore {
    db: Arc<Database>,
}

impl SnapshotStore {
    /// Opens (or creates) the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Opens a fresh in-memory store (tests and the demo binary).
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        // Create the table up front so reads never hit a missing table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SNAPSHOTS_TABLE)?;
        }
        write_txn.commit()?;
        Ok(SnapshotStore { db: Arc::new(db) })
    }

    /// Reads the raw JSON value under `key`, if any.
    pub fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    /// Writes (or replaces) the value under `key`. Committed on return.
    pub fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SNAPSHOTS_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Deletes the value under `key`, if any. Committed on return.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SNAPSHOTS_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
