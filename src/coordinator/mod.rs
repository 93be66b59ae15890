//! Gating and replay of authenticated actions.
//!
//! The coordinator decides whether a gated action runs now or after a login
//! round-trip. Deferred actions are best-effort: a replay that fails is
//! logged and dropped, never retried, and no error surfaces to the user.

mod config;

pub use config::RouteConfig;

use crate::pending::{PendingAction, PendingActionLedger};
use crate::session::SessionStore;
use crate::storage::StorageAdapter;
use crate::traits::cart::CartGateway;
use crate::traits::navigator::Navigator;
use std::future::Future;
use std::sync::Arc;

/// What `execute_with_auth` did with the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The caller was authenticated; the action ran (successfully or not).
    Executed,
    /// The action was recorded and the user sent to login.
    Deferred,
}

/// Gates actions behind authentication and replays them after login.
///
/// Cheap to clone; clones share the session store, ledger, and
/// collaborators.
#[derive(Clone)]
pub struct AuthCoordinator {
    sessions: SessionStore,
    ledger: PendingActionLedger,
    cart: Arc<dyn CartGateway>,
    navigator: Arc<dyn Navigator>,
    routes: RouteConfig,
}

impl AuthCoordinator {
    pub fn new(
        sessions: SessionStore,
        ledger: PendingActionLedger,
        cart: Arc<dyn CartGateway>,
        navigator: Arc<dyn Navigator>,
        routes: RouteConfig,
    ) -> Self {
        Self {
            sessions,
            ledger,
            cart,
            navigator,
            routes,
        }
    }

    /// Run `action` now if authenticated, otherwise defer it behind login.
    ///
    /// The fast path consults only the session store's in-memory snapshot —
    /// no storage reads — and never touches the ledger. An action that
    /// errors is logged and swallowed; the caller still sees `Executed`.
    ///
    /// On the slow path, `descriptor` is persisted and the navigator is sent
    /// to the login route with `current_path` URL-encoded as the return
    /// target.
    pub async fn execute_with_auth<F, Fut>(
        &self,
        action: F,
        descriptor: PendingAction,
        current_path: &str,
    ) -> GateOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = crate::error::Result<()>>,
    {
        if self.sessions.current().await.is_some() {
            if let Err(err) = action().await {
                tracing::error!(error = %err, "Authenticated action failed");
            }
            return GateOutcome::Executed;
        }

        tracing::debug!(kind = descriptor.kind(), "Deferring gated action behind login");
        self.ledger.set(descriptor).await;
        self.redirect_to_login(current_path);
        GateOutcome::Deferred
    }

    /// Send the navigator to the login route, carrying `current_path` as the
    /// `returnTo` query parameter.
    pub fn redirect_to_login(&self, current_path: &str) {
        let url = format!(
            "{}?returnTo={}",
            self.routes.login,
            urlencoding::encode(current_path)
        );
        self.navigator.navigate(&url);
    }

    /// Replay the pending action after a successful login.
    ///
    /// Returns whether an action was executed; the login page uses false to
    /// fall back to its `returnTo` target or default route. Every exit path
    /// clears the ledger — pending actions are consumed exactly once,
    /// succeed or fail.
    pub async fn execute_pending_action(&self) -> bool {
        let Some(action) = self.ledger.get().await else {
            tracing::debug!("No pending action to execute");
            return false;
        };

        // The ledger may have survived a login that was then abandoned;
        // re-verify the credential before acting on the user's behalf.
        if self.sessions.token().await.is_none() {
            tracing::debug!("No token present, dropping pending action");
            self.ledger.clear().await;
            return false;
        }

        tracing::debug!(kind = action.kind(), "Replaying pending action");
        let executed = match action {
            PendingAction::AddToCart {
                product_id,
                quantity,
            } => match self.cart.add_to_cart(&product_id, quantity).await {
                Ok(()) => {
                    self.navigator.navigate(&self.routes.cart);
                    true
                }
                Err(err) => {
                    tracing::error!(
                        product_id = %product_id,
                        error = %err,
                        "Deferred add-to-cart failed"
                    );
                    false
                }
            },
            PendingAction::BuyNow(product) => {
                self.stage_buy_now(&product).await;
                // Hard navigation: checkout must start from a clean page state
                self.navigator.navigate_hard(&self.routes.checkout);
                true
            }
            PendingAction::ViewOrders => {
                self.navigator.navigate(&self.routes.orders);
                true
            }
            PendingAction::ViewProfile => {
                self.navigator.navigate(&self.routes.profile);
                true
            }
            PendingAction::Navigate { path } => {
                self.navigator.navigate(&path);
                true
            }
        };

        self.ledger.clear().await;
        executed
    }

    /// Write a product payload into the durable buy-now slot.
    pub async fn stage_buy_now(&self, product: &serde_json::Value) {
        let storage = self.storage();
        storage.set_json(storage.keys().buy_now, product).await;
    }

    /// Consume the buy-now slot: read it and clear it.
    ///
    /// The checkout page calls this once; a second call returns `None`.
    pub async fn take_buy_now(&self) -> Option<serde_json::Value> {
        let storage = self.storage();
        let product = storage.get_json(storage.keys().buy_now).await?;
        storage.remove(storage.keys().buy_now).await;
        Some(product)
    }

    /// The routes this coordinator navigates to.
    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    fn storage(&self) -> &StorageAdapter {
        self.sessions.storage()
    }
}
