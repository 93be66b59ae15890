//! Anteroom - client-side session and gated-action coordination
//!
//! Anteroom is the waiting room between a storefront user and the actions
//! that require them to be signed in. It persists an authentication session
//! across pluggable storage backends, validates freshness against an
//! inactivity window, and defers a gated action across the login redirect,
//! replaying it once the user is in.
//!
//! # Features
//!
//! - **Storage**: one async key-value contract over a native preferences
//!   document or an in-memory local store, selected by platform at
//!   construction time
//! - **Sessions**: token/user persistence, sliding expiry, auto-login,
//!   keep-alive
//! - **Pending actions**: a single-slot, last-write-wins ledger that
//!   survives page reloads
//! - **Replay**: gate-and-redirect now, execute transparently after login
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use anteroom::{AnteroomContext, Config, PendingAction, ProductId};
//! use std::sync::Arc;
//!
//! # struct MyCart;
//! # #[async_trait::async_trait]
//! # impl anteroom::CartGateway for MyCart {
//! #     async fn add_to_cart(&self, _: &ProductId, _: u32) -> anteroom::Result<()> { Ok(()) }
//! # }
//! # struct MyRouter;
//! # impl anteroom::Navigator for MyRouter {
//! #     fn navigate(&self, _: &str) {}
//! # }
//! #[tokio::main]
//! async fn main() -> anteroom::Result<()> {
//!     // Initialize logging
//!     anteroom::init_tracing();
//!
//!     let context = AnteroomContext::builder(Config::from_env())
//!         .with_cart(Arc::new(MyCart))
//!         .with_navigator(Arc::new(MyRouter))
//!         .build()
//!         .await?;
//!
//!     // Gate an action behind authentication
//!     context
//!         .coordinator
//!         .execute_with_auth(
//!             || async { /* add to cart via the API */ Ok(()) },
//!             PendingAction::AddToCart {
//!                 product_id: ProductId::Number(42),
//!                 quantity: 1,
//!             },
//!             "/products/42",
//!         )
//!         .await;
//!     Ok(())
//! }
//! ```

mod config;
mod context;
pub mod coordinator;
mod error;
pub mod pending;
pub mod platform;
pub mod session;
pub mod storage;
pub mod traits;
pub mod utils;

// Re-exports for public API
pub use config::{Config, ConfigBuilder, LoggingConfig};
pub use context::{AnteroomContext, AnteroomContextBuilder};
pub use coordinator::{AuthCoordinator, GateOutcome, RouteConfig};
pub use error::{AnteroomError, ErrorContext, ErrorWithContext, Result};
pub use pending::{LedgerConfig, PendingAction, PendingActionLedger, ProductId};
pub use platform::Platform;
pub use session::{
    Role, SessionConfig, SessionRecord, SessionStore, TimeoutPolicy, TimeoutRule, UserProfile,
};
pub use storage::{
    InMemoryStore, KeySchema, PreferencesStore, StorageAdapter, StorageBackendKind, StorageConfig,
};
pub use traits::{CartGateway, Navigator, StorageBackend};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging with sensible defaults
///
/// This should be called early in your application, typically in main()
/// before building the context.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "anteroom=debug")
/// - `ANTEROOM_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("ANTEROOM_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Initialize tracing with a custom configuration
pub fn init_tracing_with_config(config: &Config) {
    let env_filter = EnvFilter::new(&config.logging.level);

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
