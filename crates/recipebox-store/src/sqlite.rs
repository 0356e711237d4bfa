// ABOUTME: SQLite-backed storage keeping every key in a single key-value table.
// ABOUTME: Each set is one upsert, so a value is always replaced whole.

use std::path::Path;

use recipebox_core::{Storage, StorageError};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Errors that can occur during SQLite storage operations.
#[derive(Debug, Error)]
pub enum SqliteStorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<SqliteStorageError> for StorageError {
    fn from(err: SqliteStorageError) -> Self {
        StorageError::backend(err)
    }
}

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open or create a database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, SqliteStorageError> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// A private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, SqliteStorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, SqliteStorageError> {
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(SqliteStorageError::from)?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(SqliteStorageError::from)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(SqliteStorageError::from)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv", [])
            .map_err(SqliteStorageError::from)?;
        Ok(())
    }
}
