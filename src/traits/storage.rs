//! Storage backend trait
//!
//! This trait abstracts the durable key-value store, allowing the crate to
//! swap between the native preferences document, the in-memory local store,
//! or a host-provided implementation.

use crate::error::Result;
use async_trait::async_trait;

/// Durable key-value storage with a plain string contract.
///
/// Values cross this boundary as strings; JSON payloads are stringified and
/// parsed by the caller. Implementations persist nothing about types.
///
/// # Contract
///
/// - `get` on a missing key returns `Ok(None)`, never an error.
/// - `set` and `remove` must be fully applied before the returned future
///   resolves, so a subsequent `get` on the same key observes the write.
/// - No TTL, no eviction, no cross-key transactions.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any existing value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key in the store.
    async fn clear(&self) -> Result<()>;

    /// Check if the backend is usable.
    fn is_healthy(&self) -> bool;
}
