use std::sync::Arc;

use crate::config::Config;
use crate::coordinator::AuthCoordinator;
use crate::error::{AnteroomError, Result};
use crate::pending::PendingActionLedger;
use crate::session::SessionStore;
use crate::storage::StorageAdapter;
use crate::traits::cart::CartGateway;
use crate::traits::navigator::Navigator;
use crate::traits::storage::StorageBackend;

/// Application context wiring the crate's services together.
///
/// Constructed once at application start — there are no module-level
/// globals — and cloned into whoever needs it; clones share state. The two
/// collaborators (cart, navigator) are required; the storage backend
/// defaults to what the configured platform implies and can be overridden
/// with a host-provided implementation.
#[derive(Clone)]
pub struct AnteroomContext {
    pub storage: StorageAdapter,
    pub sessions: SessionStore,
    pub ledger: PendingActionLedger,
    pub coordinator: AuthCoordinator,
}

impl AnteroomContext {
    /// Builder pattern for constructing the context
    pub fn builder(config: Config) -> AnteroomContextBuilder {
        AnteroomContextBuilder::new(config)
    }
}

/// Builder for AnteroomContext
#[must_use = "builder does nothing until you call build()"]
pub struct AnteroomContextBuilder {
    config: Config,
    backend: Option<Arc<dyn StorageBackend>>,
    cart: Option<Arc<dyn CartGateway>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl AnteroomContextBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            backend: None,
            cart: None,
            navigator: None,
        }
    }

    /// Use a host-provided storage backend instead of the configured one.
    pub fn with_backend(mut self, backend: Arc<dyn StorageBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_cart(mut self, cart: Arc<dyn CartGateway>) -> Self {
        self.cart = Some(cart);
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Construct the context.
    ///
    /// Fails if a collaborator is missing or the configured storage backend
    /// cannot be opened.
    pub async fn build(self) -> Result<AnteroomContext> {
        let cart = self
            .cart
            .ok_or_else(|| AnteroomError::config("Cart collaborator not configured"))?;
        let navigator = self
            .navigator
            .ok_or_else(|| AnteroomError::config("Navigator collaborator not configured"))?;

        let platform = self.config.platform;
        let storage = match self.backend {
            Some(backend) => StorageAdapter::new(backend, platform),
            None => StorageAdapter::from_config(&self.config.storage, platform).await?,
        };

        let sessions = SessionStore::new(storage.clone(), self.config.session, platform);
        let ledger = PendingActionLedger::new(storage.clone(), self.config.ledger);
        let coordinator = AuthCoordinator::new(
            sessions.clone(),
            ledger.clone(),
            cart,
            navigator,
            self.config.routes,
        );

        Ok(AnteroomContext {
            storage,
            sessions,
            ledger,
            coordinator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pending::ProductId;

    struct NoopCart;

    #[async_trait::async_trait]
    impl CartGateway for NoopCart {
        async fn add_to_cart(&self, _product_id: &ProductId, _quantity: u32) -> Result<()> {
            Ok(())
        }
    }

    struct NoopNavigator;

    impl Navigator for NoopNavigator {
        fn navigate(&self, _path: &str) {}
    }

    #[tokio::test]
    async fn test_build_with_defaults() {
        let context = AnteroomContext::builder(Config::default())
            .with_cart(Arc::new(NoopCart))
            .with_navigator(Arc::new(NoopNavigator))
            .build()
            .await
            .unwrap();

        assert!(!context.sessions.is_authenticated().await);
        assert_eq!(context.ledger.get().await, None);
    }

    #[tokio::test]
    async fn test_missing_collaborator_fails() {
        let result = AnteroomContext::builder(Config::default())
            .with_navigator(Arc::new(NoopNavigator))
            .build()
            .await;

        assert!(matches!(result, Err(AnteroomError::Config(_))));
    }
}
