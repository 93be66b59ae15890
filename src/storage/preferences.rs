//! File-backed preferences storage.
//!
//! The native shell's app-scoped preferences store, kept as a single JSON
//! document:
//!
//! ```text
//! <data dir>/anteroom/preferences.json
//! ```
//!
//! The document is loaded once at construction; every write flushes the full
//! map back to disk with a write-to-temp-then-rename so a crash mid-write
//! never leaves a truncated document behind.

use crate::error::Result;
use crate::traits::storage::StorageBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

/// File-backed storage backend for the native platform.
///
/// Values are plain strings, persisted as one JSON object. There is no
/// encryption and no TTL; the store is app-scoped by its directory.
#[derive(Clone)]
pub struct PreferencesStore {
    path: PathBuf,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl PreferencesStore {
    /// Open (or create) the preferences document at `path`.
    ///
    /// A missing file starts the store empty. A corrupted document is logged
    /// and treated as empty rather than failing the construction; the next
    /// write replaces it.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let entries = match fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Corrupted preferences document, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Open the store at the default app-scoped location.
    pub async fn open_default() -> Result<Self> {
        Self::open(Self::default_path()).await
    }

    /// Default document location: `<data dir>/anteroom/preferences.json`.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("anteroom")
            .join("preferences.json")
    }

    /// The document path this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for PreferencesStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        self.flush(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        if entries.remove(key).is_some() {
            self.flush(&entries).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        self.flush(&entries).await
    }

    fn is_healthy(&self) -> bool {
        self.path.parent().map(Path::exists).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("preferences.json")
    }

    #[tokio::test]
    async fn test_get_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::open(doc_path(&dir)).await.unwrap();

        store.set("auth_token", "tok-1".to_string()).await.unwrap();
        assert_eq!(store.get("auth_token").await.unwrap(), Some("tok-1".to_string()));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = doc_path(&dir);

        {
            let store = PreferencesStore::open(&path).await.unwrap();
            store.set("auth_token", "tok-1".to_string()).await.unwrap();
            store.set("auth_user", "{}".to_string()).await.unwrap();
        }

        let reopened = PreferencesStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("auth_token").await.unwrap(),
            Some("tok-1".to_string())
        );
        assert_eq!(reopened.get("auth_user").await.unwrap(), Some("{}".to_string()));
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = doc_path(&dir);

        let store = PreferencesStore::open(&path).await.unwrap();
        store.set("auth_token", "tok-1".to_string()).await.unwrap();
        store.remove("auth_token").await.unwrap();

        let reopened = PreferencesStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("auth_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupted_document_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = doc_path(&dir);
        std::fs::write(&path, "not json at all {{{").unwrap();

        let store = PreferencesStore::open(&path).await.unwrap();
        assert_eq!(store.get("auth_token").await.unwrap(), None);

        // The next write replaces the corrupted document
        store.set("auth_token", "tok-2".to_string()).await.unwrap();
        let reopened = PreferencesStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("auth_token").await.unwrap(),
            Some("tok-2".to_string())
        );
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("preferences.json");

        let store = PreferencesStore::open(&path).await.unwrap();
        store.set("k", "v".to_string()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = doc_path(&dir);

        let store = PreferencesStore::open(&path).await.unwrap();
        store.set("a", "1".to_string()).await.unwrap();
        store.set("b", "2".to_string()).await.unwrap();
        store.clear().await.unwrap();

        let reopened = PreferencesStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("a").await.unwrap(), None);
        assert_eq!(reopened.get("b").await.unwrap(), None);
    }
}
