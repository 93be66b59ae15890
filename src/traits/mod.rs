//! Trait definitions for extensible components
//!
//! These traits allow hosts to swap implementations or provide their own
//! for durable storage, the cart collaborator, and client-side navigation.

pub mod cart;
pub mod navigator;
pub mod storage;

pub use cart::CartGateway;
pub use navigator::Navigator;
pub use storage::StorageBackend;
