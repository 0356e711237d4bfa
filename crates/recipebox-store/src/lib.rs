// ABOUTME: Persistence backends for recipebox implementing the core Storage trait.
// ABOUTME: Offers atomic per-key JSON files, a SQLite key-value table, and backend selection.

pub mod file;
pub mod open;
pub mod sqlite;

pub use file::{FileStorage, FileStorageError};
pub use open::{OpenError, StorageKind, open_storage};
pub use sqlite::{SqliteStorage, SqliteStorageError};
