//! SQLite-backed persistent storage.

use std::path::Path;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OptionalExtension;

use super::StorageBackend;
use super::paths;
use crate::error::StorageError;

/// A persistent key/value store backed by SQLite.
///
/// Values persist across process restarts. File databases use WAL journal mode.
///
/// # Example
///
/// ```
/// use listkit::storage::{SqliteStorage, StorageBackend};
///
/// let storage = SqliteStorage::open_in_memory()?;
/// storage.set_item("k", r#"{"a":1}"#)?;
/// assert_eq!(storage.get_item("k")?.as_deref(), Some(r#"{"a":1}"#));
/// # Ok::<(), listkit::error::StorageError>(())
/// ```
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens a SQLite store at the specified path.
    ///
    /// Creates the database file and table if they don't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens an in-memory SQLite store.
    ///
    /// Useful for testing. Data is lost when the store is dropped.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens the store in the platform data directory, creating it if needed.
    pub fn open_default() -> Result<Self, StorageError> {
        let path = paths::storage_db().ok_or(StorageError::NoDataDir)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        log::debug!("[storage] opening {}", path.display());
        Self::open(path)
    }

    /// Initializes the storage table schema.
    fn init_schema(conn: &Connection) -> Result<(), StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> Result<usize, StorageError> {
        let count = self
            .conn()
            .query_row("SELECT COUNT(*) FROM storage", [], |row| row.get::<_, i64>(0))?;
        Ok(count as usize)
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        self.len().map(|len| len == 0)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StorageBackend for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn()
            .query_row("SELECT value FROM storage WHERE key = ?", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn().execute(
            "INSERT OR REPLACE INTO storage (key, value) VALUES (?, ?)",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.conn().execute("DELETE FROM storage WHERE key = ?", [key])?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage").finish_non_exhaustive()
    }
}
