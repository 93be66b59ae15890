//! Durable storage: backends, key schema, and the adapter facade.
//!
//! Two backends ship with the crate — an in-memory map (web stand-in, tests)
//! and a file-backed preferences document (native). The backend is chosen at
//! construction time; nothing branches on platform per call.

mod adapter;
mod config;
mod in_memory;
mod keys;
mod preferences;

pub use adapter::StorageAdapter;
pub use config::{StorageBackendKind, StorageConfig};
pub use in_memory::InMemoryStore;
pub use keys::{KeySchema, NATIVE_KEYS, WEB_KEYS};
pub use preferences::PreferencesStore;
