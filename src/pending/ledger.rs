//! The single-slot pending-action ledger.

use crate::pending::action::{PendingAction, StoredAction};
use crate::pending::config::LedgerConfig;
use crate::storage::StorageAdapter;
use crate::utils::now_millis;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds at most one deferred action, in memory and in durable storage.
///
/// The durable copy exists so a full page reload during the login redirect
/// does not lose the action; the in-memory copy is the fast path. Setting a
/// new action overwrites any prior unexecuted one — the most recent user
/// intent wins, there is no queue.
#[derive(Clone)]
pub struct PendingActionLedger {
    storage: StorageAdapter,
    config: LedgerConfig,
    current: Arc<RwLock<Option<PendingAction>>>,
}

impl PendingActionLedger {
    pub fn new(storage: StorageAdapter, config: LedgerConfig) -> Self {
        Self {
            storage,
            config,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Record `action`, replacing whatever was pending.
    pub async fn set(&self, action: PendingAction) {
        let envelope = StoredAction {
            action: action.clone(),
            stored_at: now_millis(),
        };

        *self.current.write().await = Some(action);
        self.storage
            .set_json(self.storage.keys().pending_action, &envelope)
            .await;
        tracing::debug!(kind = envelope.action.kind(), "Pending action recorded");
    }

    /// The pending action, if one exists.
    ///
    /// Prefers the in-memory copy; otherwise hydrates from durable storage
    /// and caches the result. Malformed persisted JSON reads as "no action".
    /// When a maximum age is configured, a stale persisted action is
    /// discarded here rather than replayed.
    pub async fn get(&self) -> Option<PendingAction> {
        if let Some(action) = self.current.read().await.as_ref() {
            return Some(action.clone());
        }

        let envelope: StoredAction = self
            .storage
            .get_json(self.storage.keys().pending_action)
            .await?;

        if let Some(max_age) = self.config.max_age() {
            let age = now_millis().saturating_sub(envelope.stored_at);
            if age as u128 > max_age.as_millis() {
                tracing::debug!(
                    kind = envelope.action.kind(),
                    age_ms = age,
                    "Discarding stale pending action"
                );
                self.clear().await;
                return None;
            }
        }

        *self.current.write().await = Some(envelope.action.clone());
        Some(envelope.action)
    }

    /// Delete both copies. Idempotent.
    pub async fn clear(&self) {
        *self.current.write().await = None;
        self.storage.remove(self.storage.keys().pending_action).await;
    }
}
