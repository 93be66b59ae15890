//! The error-swallowing storage facade.
//!
//! Everything above the backends goes through [`StorageAdapter`]. Its policy
//! is the crate's availability contract: a failed read is reported as
//! "value absent", a failed write is a logged no-op, malformed persisted JSON
//! is "no value". Nothing escapes to callers as an error.

use crate::error::Result;
use crate::platform::Platform;
use crate::storage::config::{StorageBackendKind, StorageConfig};
use crate::storage::in_memory::InMemoryStore;
use crate::storage::keys::KeySchema;
use crate::storage::preferences::PreferencesStore;
use crate::traits::storage::StorageBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Uniform async key-value access over the selected backend.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct StorageAdapter {
    backend: Arc<dyn StorageBackend>,
    keys: &'static KeySchema,
}

impl StorageAdapter {
    /// Wrap an existing backend with the key schema for `platform`.
    pub fn new(backend: Arc<dyn StorageBackend>, platform: Platform) -> Self {
        Self {
            backend,
            keys: KeySchema::for_platform(platform),
        }
    }

    /// Construct the backend named by `config` (or the platform default).
    ///
    /// Only the file-backed backend can fail to construct (unusable data
    /// directory); that failure is surfaced rather than swallowed, since
    /// nothing has been stored yet and the host should know at startup.
    pub async fn from_config(config: &StorageConfig, platform: Platform) -> Result<Self> {
        let backend: Arc<dyn StorageBackend> = match config.backend_for(platform) {
            StorageBackendKind::InMemory => Arc::new(InMemoryStore::new()),
            StorageBackendKind::Preferences => {
                let store = match &config.path {
                    Some(path) => PreferencesStore::open(path.clone()).await?,
                    None => PreferencesStore::open_default().await?,
                };
                Arc::new(store)
            }
        };

        Ok(Self::new(backend, platform))
    }

    /// The durable key names in effect for this adapter's platform.
    pub fn keys(&self) -> &'static KeySchema {
        self.keys
    }

    /// Read a string value; failures and absence both read as `None`.
    pub async fn get(&self, key: &str) -> Option<String> {
        match self.backend.get(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "Storage read failed, treating as absent");
                None
            }
        }
    }

    /// Write a string value; failures are logged and dropped.
    ///
    /// The write is awaited to completion before returning, so a subsequent
    /// read through this adapter observes it.
    pub async fn set(&self, key: &str, value: impl Into<String>) {
        if let Err(err) = self.backend.set(key, value.into()).await {
            tracing::warn!(key, error = %err, "Storage write failed, value dropped");
        }
    }

    /// Remove a key; failures are logged and dropped.
    pub async fn remove(&self, key: &str) {
        if let Err(err) = self.backend.remove(key).await {
            tracing::warn!(key, error = %err, "Storage remove failed");
        }
    }

    /// Read and parse a JSON value; parse failures read as `None`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "Malformed persisted JSON, treating as absent");
                None
            }
        }
    }

    /// Serialize and write a JSON value; failures are logged and dropped.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.set(key, raw).await,
            Err(err) => {
                tracing::warn!(key, error = %err, "Serialization failed, value dropped");
            }
        }
    }

    /// Whether the underlying backend is usable.
    pub fn is_healthy(&self) -> bool {
        self.backend.is_healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnteroomError;
    use async_trait::async_trait;
    use serde::Deserialize;

    /// Backend that fails every operation.
    struct BrokenStore;

    #[async_trait]
    impl StorageBackend for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(AnteroomError::storage("backend down"))
        }

        async fn set(&self, _key: &str, _value: String) -> Result<()> {
            Err(AnteroomError::storage("backend down"))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Err(AnteroomError::storage("backend down"))
        }

        async fn clear(&self) -> Result<()> {
            Err(AnteroomError::storage("backend down"))
        }

        fn is_healthy(&self) -> bool {
            false
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        id: u32,
    }

    #[tokio::test]
    async fn test_round_trip() {
        let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Web);
        adapter.set("token", "abc").await;
        assert_eq!(adapter.get("token").await, Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Web);
        adapter.set_json("payload", &Payload { id: 7 }).await;
        assert_eq!(
            adapter.get_json::<Payload>("payload").await,
            Some(Payload { id: 7 })
        );
    }

    #[tokio::test]
    async fn test_malformed_json_reads_as_none() {
        let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Web);
        adapter.set("payload", "{{{ not json").await;
        assert_eq!(adapter.get_json::<Payload>("payload").await, None);
    }

    #[tokio::test]
    async fn test_broken_backend_reads_as_absent() {
        let adapter = StorageAdapter::new(Arc::new(BrokenStore), Platform::Web);
        assert_eq!(adapter.get("token").await, None);
        assert_eq!(adapter.get_json::<Payload>("payload").await, None);
    }

    #[tokio::test]
    async fn test_broken_backend_writes_are_silent() {
        let adapter = StorageAdapter::new(Arc::new(BrokenStore), Platform::Web);
        // None of these may panic or surface an error
        adapter.set("token", "abc").await;
        adapter.set_json("payload", &Payload { id: 1 }).await;
        adapter.remove("token").await;
        assert!(!adapter.is_healthy());
    }

    #[tokio::test]
    async fn test_key_schema_follows_platform() {
        let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Native);
        assert_eq!(adapter.keys().token, "auth_token");

        let adapter = StorageAdapter::new(Arc::new(InMemoryStore::new()), Platform::Web);
        assert_eq!(adapter.keys().token, "token");
    }

    #[tokio::test]
    async fn test_from_config_in_memory() {
        let config = StorageConfig::default();
        let adapter = StorageAdapter::from_config(&config, Platform::Web).await.unwrap();
        adapter.set("k", "v").await;
        assert_eq!(adapter.get("k").await, Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_from_config_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: None,
            path: Some(dir.path().join("preferences.json")),
        };
        let adapter = StorageAdapter::from_config(&config, Platform::Native)
            .await
            .unwrap();
        adapter.set("auth_token", "tok").await;
        assert_eq!(adapter.get("auth_token").await, Some("tok".to_string()));
    }
}
