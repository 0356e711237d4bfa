// ABOUTME: Backend selection for recipebox storage rooted at a home directory.
// ABOUTME: Maps a StorageKind to a boxed Storage so callers never name a concrete backend.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use recipebox_core::Storage;
use thiserror::Error;

use crate::file::{FileStorage, FileStorageError};
use crate::sqlite::{SqliteStorage, SqliteStorageError};

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("unknown storage backend {0:?} (expected \"file\" or \"sqlite\")")]
    UnknownKind(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    File(#[from] FileStorageError),

    #[error(transparent)]
    Sqlite(#[from] SqliteStorageError),
}

/// Which durable backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageKind {
    /// One JSON file per key under `<home>/data`.
    #[default]
    File,
    /// A single `<home>/recipebox.db` database.
    Sqlite,
}

impl FromStr for StorageKind {
    type Err = OpenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "json" => Ok(StorageKind::File),
            "sqlite" => Ok(StorageKind::Sqlite),
            other => Err(OpenError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::File => write!(f, "file"),
            StorageKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Open the selected backend under `home`, creating directories as needed.
/// Each call returns an independent handle onto the same durable data.
pub fn open_storage(kind: StorageKind, home: &Path) -> Result<Box<dyn Storage>, OpenError> {
    fs::create_dir_all(home)?;
    let storage: Box<dyn Storage> = match kind {
        StorageKind::File => Box::new(FileStorage::open(&home.join("data"))?),
        StorageKind::Sqlite => Box::new(SqliteStorage::open(&home.join("recipebox.db"))?),
    };
    tracing::debug!("opened {} storage in {}", kind, home.display());
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_core::RecipeStore;
    use tempfile::TempDir;

    #[test]
    fn parses_kind_names() {
        assert_eq!("file".parse::<StorageKind>().unwrap(), StorageKind::File);
        assert_eq!(" SQLite ".parse::<StorageKind>().unwrap(), StorageKind::Sqlite);
        let err = "redis".parse::<StorageKind>().unwrap_err();
        assert!(err.to_string().contains("redis"));
    }

    #[test]
    fn each_kind_lays_out_its_files() {
        let dir = TempDir::new().unwrap();

        let mut file = open_storage(StorageKind::File, dir.path()).unwrap();
        file.set("recipes", "[]").unwrap();
        assert!(dir.path().join("data").join("recipes.json").exists());

        let mut sqlite = open_storage(StorageKind::Sqlite, dir.path()).unwrap();
        sqlite.set("recipes", "[]").unwrap();
        assert!(dir.path().join("recipebox.db").exists());
    }

    #[test]
    fn handles_share_durable_state() {
        let dir = TempDir::new().unwrap();
        for kind in [StorageKind::File, StorageKind::Sqlite] {
            let mut writer = RecipeStore::open(open_storage(kind, dir.path()).unwrap()).unwrap();
            writer
                .import_merge(r#"[{"title":"Flan","ingredients":["lait"],"steps":["cuire"]}]"#)
                .unwrap();

            let reader = RecipeStore::open(open_storage(kind, dir.path()).unwrap()).unwrap();
            assert_eq!(reader.len(), 1, "backend {}", kind);
        }
    }
}
