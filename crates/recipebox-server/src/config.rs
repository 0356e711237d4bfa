// ABOUTME: Configuration loading and validation for recipebox.
// ABOUTME: Reads RECIPEBOX_* environment variables and applies defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use recipebox_store::StorageKind;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RECIPEBOX_BIND is not a valid socket address: {0}")]
    InvalidBind(String),

    #[error("RECIPEBOX_BACKEND must be \"file\" or \"sqlite\", got {0:?}")]
    InvalidBackend(String),
}

/// Runtime configuration shared by the CLI and the server.
#[derive(Debug, Clone)]
pub struct RecipeboxConfig {
    pub home: PathBuf,
    pub bind: SocketAddr,
    pub backend: StorageKind,
}

impl RecipeboxConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - RECIPEBOX_HOME: data directory (default: ~/.recipebox)
    /// - RECIPEBOX_BIND: socket address to bind (default: 127.0.0.1:7340)
    /// - RECIPEBOX_BACKEND: storage backend, file or sqlite (default: file)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` but reading variables through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let home = var("RECIPEBOX_HOME").map(PathBuf::from).unwrap_or_else(|| {
            var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join(".recipebox")
        });

        let bind_str = var("RECIPEBOX_BIND").unwrap_or_else(|| "127.0.0.1:7340".to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        let backend = match var("RECIPEBOX_BACKEND") {
            Some(raw) => raw
                .parse::<StorageKind>()
                .map_err(|_| ConfigError::InvalidBackend(raw))?,
            None => StorageKind::default(),
        };

        Ok(Self {
            home,
            bind,
            backend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<RecipeboxConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RecipeboxConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn config_loads_defaults() {
        let config = load(&[("HOME", "/home/cook")]).unwrap();

        assert_eq!(config.home, PathBuf::from("/home/cook/.recipebox"));
        assert_eq!(config.bind, "127.0.0.1:7340".parse::<SocketAddr>().unwrap());
        assert_eq!(config.backend, StorageKind::File);
    }

    #[test]
    fn config_reads_overrides() {
        let config = load(&[
            ("RECIPEBOX_HOME", "/srv/recipes"),
            ("RECIPEBOX_BIND", "0.0.0.0:8080"),
            ("RECIPEBOX_BACKEND", "sqlite"),
        ])
        .unwrap();

        assert_eq!(config.home, PathBuf::from("/srv/recipes"));
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.backend, StorageKind::Sqlite);
    }

    #[test]
    fn config_rejects_bad_values() {
        let err = load(&[("RECIPEBOX_BIND", "localhost")]).unwrap_err();
        assert!(err.to_string().contains("RECIPEBOX_BIND"));

        let err = load(&[("RECIPEBOX_BACKEND", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBackend(ref b) if b == "postgres"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("RECIPEBOX_HOME", "  "), ("HOME", "/h"), ("RECIPEBOX_BACKEND", "")]).unwrap();
        assert_eq!(config.home, PathBuf::from("/h/.recipebox"));
        assert_eq!(config.backend, StorageKind::File);
    }
}
