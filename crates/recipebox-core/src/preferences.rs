// ABOUTME: Persisted UI preferences kept under their own storage key, independent of recipes.
// ABOUTME: Dark mode is stored as the text "true" or "false".

use crate::storage::{Storage, StorageError};

/// Storage key for the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

pub struct Preferences<S> {
    storage: S,
}

impl<S: Storage> Preferences<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Anything other than a stored "true" reads as light mode.
    pub fn dark_mode(&self) -> Result<bool, StorageError> {
        Ok(self.storage.get(DARK_MODE_KEY)?.as_deref() == Some("true"))
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), StorageError> {
        self.storage.set(DARK_MODE_KEY, if enabled { "true" } else { "false" })?;
        tracing::debug!(enabled, "dark mode preference saved");
        Ok(())
    }

    /// Flip the flag and return the new value.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, StorageError> {
        let enabled = !self.dark_mode()?;
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_to_light() {
        let prefs = Preferences::new(MemoryStorage::new());
        assert!(!prefs.dark_mode().unwrap());
    }

    #[test]
    fn unexpected_text_reads_as_light() {
        let mut storage = MemoryStorage::new();
        storage.set(DARK_MODE_KEY, "yes").unwrap();
        assert!(!Preferences::new(storage).dark_mode().unwrap());
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut prefs = Preferences::new(MemoryStorage::new());
        assert!(prefs.toggle_dark_mode().unwrap());
        assert_eq!(prefs.storage.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
        assert!(!prefs.toggle_dark_mode().unwrap());
        assert_eq!(prefs.storage.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }
}
