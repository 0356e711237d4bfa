// ABOUTME: Shared application state for the recipebox HTTP server.
// ABOUTME: Holds the recipe store and preferences behind async mutexes, with prod and test constructors.

use std::path::PathBuf;
use std::sync::Arc;

use recipebox_core::{MemoryStorage, Preferences, RecipeStore, Storage, StoreError};
use recipebox_store::{OpenError, open_storage};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::RecipeboxConfig;

/// Storage handle type used by the server.
pub type DynStorage = Box<dyn Storage>;

#[derive(Debug, Error)]
pub enum AppStateError {
    #[error("failed to open storage: {0}")]
    Open(#[from] OpenError),

    #[error("failed to load recipes: {0}")]
    Store(#[from] StoreError),
}

/// Shared application state accessible by all Axum handlers.
/// Handlers lock the store for the whole of one operation, so each request
/// sees and writes a complete collection.
pub struct AppState {
    pub store: Mutex<RecipeStore<DynStorage>>,
    pub preferences: Mutex<Preferences<DynStorage>>,
    pub home: PathBuf,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        store: RecipeStore<DynStorage>,
        preferences: Preferences<DynStorage>,
        home: PathBuf,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            preferences: Mutex::new(preferences),
            home,
        }
    }

    /// Open the configured backend and load the collection.
    pub fn open(config: &RecipeboxConfig) -> Result<Self, AppStateError> {
        let store = RecipeStore::open(open_storage(config.backend, &config.home)?)?;
        let preferences = Preferences::new(open_storage(config.backend, &config.home)?);
        tracing::info!(
            "loaded {} recipes from {} ({} backend)",
            store.len(),
            config.home.display(),
            config.backend
        );
        Ok(Self::new(store, preferences, config.home.clone()))
    }

    /// State backed by volatile memory, for tests and throwaway runs.
    pub fn in_memory() -> Result<Self, AppStateError> {
        let store = RecipeStore::open(Box::new(MemoryStorage::new()) as DynStorage)?;
        let preferences = Preferences::new(Box::new(MemoryStorage::new()) as DynStorage);
        Ok(Self::new(
            store,
            preferences,
            std::env::temp_dir().join("recipebox-memory"),
        ))
    }
}
