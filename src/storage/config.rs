use crate::platform::Platform;
use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackendKind {
    /// In-memory store (web stand-in, tests)
    InMemory,
    /// File-backed app-scoped preferences document (native)
    Preferences,
}

/// Storage configuration
///
/// When no backend is named explicitly, the platform picks one: the native
/// shell gets the file-backed preferences document, the web shell gets the
/// in-memory store for the hosting shell to bridge or replace.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Backend override; `None` defers to the platform default
    #[serde(default)]
    pub backend: Option<StorageBackendKind>,

    /// Preferences document path; `None` uses the app-scoped default
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Load storage configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(backend) = get_env_with_prefix("STORAGE_BACKEND") {
            config.backend = match backend.to_lowercase().as_str() {
                "in_memory" | "memory" => Some(StorageBackendKind::InMemory),
                "preferences" | "file" => Some(StorageBackendKind::Preferences),
                other => {
                    tracing::warn!(backend = other, "Unknown storage backend, using platform default");
                    None
                }
            };
        }

        if let Some(path) = get_env_with_prefix("STORAGE_PATH") {
            config.path = Some(PathBuf::from(path));
        }

        config
    }

    /// The backend to construct for `platform`.
    pub fn backend_for(&self, platform: Platform) -> StorageBackendKind {
        self.backend.unwrap_or(match platform {
            Platform::Native => StorageBackendKind::Preferences,
            Platform::Web => StorageBackendKind::InMemory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_defaults() {
        let config = StorageConfig::default();
        assert_eq!(
            config.backend_for(Platform::Native),
            StorageBackendKind::Preferences
        );
        assert_eq!(config.backend_for(Platform::Web), StorageBackendKind::InMemory);
    }

    #[test]
    fn test_explicit_backend_wins() {
        let config = StorageConfig {
            backend: Some(StorageBackendKind::InMemory),
            path: None,
        };
        assert_eq!(
            config.backend_for(Platform::Native),
            StorageBackendKind::InMemory
        );
    }
}
