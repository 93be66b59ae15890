//! The session store service.
//!
//! Pure local-state operations over the storage adapter: no network calls,
//! no token validation beyond the inactivity window. Staleness is discovered
//! lazily, when a caller asks — nothing here pushes a logout.

use crate::platform::Platform;
use crate::session::config::SessionConfig;
use crate::session::record::{Role, SessionRecord, UserProfile};
use crate::storage::StorageAdapter;
use crate::utils::now_millis;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Persistent authentication state.
///
/// Constructed once at application start and cloned into whoever needs it
/// (clones share state). Alongside the durable record the store keeps an
/// in-memory snapshot, primed by [`set_auth`](Self::set_auth) and the
/// restore paths, which the coordinator's fast path reads without touching
/// storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: StorageAdapter,
    config: SessionConfig,
    platform: Platform,
    snapshot: Arc<RwLock<Option<SessionRecord>>>,
}

impl SessionStore {
    pub fn new(storage: StorageAdapter, config: SessionConfig, platform: Platform) -> Self {
        Self {
            storage,
            config,
            platform,
            snapshot: Arc::new(RwLock::new(None)),
        }
    }

    /// Persist a token/user pair with `last_activity = now`.
    ///
    /// The pair is written together; after this resolves,
    /// [`is_authenticated`](Self::is_authenticated) reports true.
    pub async fn set_auth(&self, token: impl Into<String>, user: UserProfile) {
        let record = SessionRecord::new(token, user, now_millis());
        let keys = self.storage.keys();

        self.storage.set(keys.token, record.token.clone()).await;
        self.storage.set_json(keys.user, &record.user).await;
        self.storage
            .set(keys.last_activity, record.last_activity.to_string())
            .await;

        *self.snapshot.write().await = Some(record);
        tracing::debug!("Session stored");
    }

    /// The stored token, if any.
    pub async fn token(&self) -> Option<String> {
        if let Some(record) = self.snapshot.read().await.as_ref() {
            return Some(record.token.clone());
        }
        self.storage.get(self.storage.keys().token).await
    }

    /// The stored user profile, if any.
    pub async fn user(&self) -> Option<UserProfile> {
        if let Some(record) = self.snapshot.read().await.as_ref() {
            return Some(record.user.clone());
        }
        self.storage.get_json(self.storage.keys().user).await
    }

    /// The in-memory snapshot, without touching storage.
    ///
    /// `None` either means "logged out" or "not yet restored this process" —
    /// callers that need the durable truth use the accessors instead.
    pub async fn current(&self) -> Option<SessionRecord> {
        self.snapshot.read().await.clone()
    }

    /// True iff both token and user are present. No expiry check.
    pub async fn is_authenticated(&self) -> bool {
        if self.snapshot.read().await.is_some() {
            return true;
        }
        self.token().await.is_some() && self.user().await.is_some()
    }

    /// True iff the last recorded activity is within the inactivity window.
    ///
    /// Reads the durable timestamp, not the snapshot, so a staler copy
    /// written by another flow is honored. A missing or unparseable
    /// timestamp reads as invalid.
    pub async fn is_session_valid(&self) -> bool {
        let Some(last_activity) = self.last_activity().await else {
            return false;
        };

        let role = self.user().await.map(|u| u.user_type);
        let timeout = self.config.timeouts.timeout_for(self.platform, role);
        let elapsed = now_millis().saturating_sub(last_activity);
        elapsed as u128 <= timeout.as_millis()
    }

    /// The durable liveness timestamp, epoch milliseconds.
    pub async fn last_activity(&self) -> Option<u64> {
        let raw = self.storage.get(self.storage.keys().last_activity).await?;
        match raw.parse() {
            Ok(ms) => Some(ms),
            Err(_) => {
                tracing::warn!(value = %raw, "Unparseable activity timestamp, treating as absent");
                None
            }
        }
    }

    /// Refresh `last_activity` to now.
    pub async fn update_activity(&self) {
        let now = now_millis();
        self.storage
            .set(self.storage.keys().last_activity, now.to_string())
            .await;

        if let Some(record) = self.snapshot.write().await.as_mut() {
            record.last_activity = now;
        }
    }

    /// Re-establish an authenticated state from persisted credentials.
    ///
    /// Succeeds iff a token/user pair exists, the session is still valid,
    /// and the user's role is the configured persistent-session role; on
    /// success the activity window is refreshed and the snapshot primed.
    /// Any other outcome clears the session and reports false.
    pub async fn auto_login(&self) -> bool {
        let token = self.token().await;
        let user = self.user().await;

        if let (Some(token), Some(user)) = (token, user) {
            if user.user_type == self.config.persistent_role && self.is_session_valid().await {
                self.update_activity().await;
                let last_activity = self.last_activity().await.unwrap_or_else(now_millis);
                *self.snapshot.write().await =
                    Some(SessionRecord::new(token, user, last_activity));
                tracing::debug!("Auto-login succeeded");
                return true;
            }
        }

        tracing::debug!("Auto-login failed, clearing session");
        self.clear_auth().await;
        false
    }

    /// Restore-or-validate, used on app foreground.
    ///
    /// Unlike [`auto_login`](Self::auto_login) this never clears anything
    /// and ignores the persistent-role gate: any authenticated, still-valid
    /// session is kept alive and its snapshot primed.
    pub async fn ensure_authenticated(&self) -> bool {
        let token = self.token().await;
        let user = self.user().await;

        if let (Some(token), Some(user)) = (token, user) {
            if self.is_session_valid().await {
                self.update_activity().await;
                let last_activity = self.last_activity().await.unwrap_or_else(now_millis);
                *self.snapshot.write().await =
                    Some(SessionRecord::new(token, user, last_activity));
                return true;
            }
        }

        false
    }

    /// Refresh the activity window iff currently authenticated.
    ///
    /// Called periodically by the host while the app is foregrounded.
    pub async fn keep_alive(&self) {
        if self.is_authenticated().await {
            self.update_activity().await;
        }
    }

    /// Replace the stored profile without touching the token.
    pub async fn update_user(&self, user: UserProfile) {
        self.storage.set_json(self.storage.keys().user, &user).await;

        if let Some(record) = self.snapshot.write().await.as_mut() {
            record.user = user;
        }
    }

    /// Delete the session and its cached snapshots, idempotently.
    ///
    /// Removes token, user, liveness timestamp, and the cart/wishlist
    /// snapshots that only make sense for the signed-in user.
    pub async fn clear_auth(&self) {
        let keys = self.storage.keys();
        self.storage.remove(keys.token).await;
        self.storage.remove(keys.user).await;
        self.storage.remove(keys.last_activity).await;
        self.storage.remove(keys.cart).await;
        self.storage.remove(keys.wishlist).await;

        *self.snapshot.write().await = None;
        tracing::debug!("Session cleared");
    }

    /// Persist a cart snapshot.
    pub async fn set_cart(&self, cart: &[serde_json::Value]) {
        self.storage.set_json(self.storage.keys().cart, &cart).await;
    }

    /// The persisted cart snapshot; missing or malformed reads as empty.
    pub async fn cart(&self) -> Vec<serde_json::Value> {
        self.storage
            .get_json(self.storage.keys().cart)
            .await
            .unwrap_or_default()
    }

    /// Persist a wishlist snapshot.
    pub async fn set_wishlist(&self, wishlist: &[serde_json::Value]) {
        self.storage
            .set_json(self.storage.keys().wishlist, &wishlist)
            .await;
    }

    /// The persisted wishlist snapshot; missing or malformed reads as empty.
    pub async fn wishlist(&self) -> Vec<serde_json::Value> {
        self.storage
            .get_json(self.storage.keys().wishlist)
            .await
            .unwrap_or_default()
    }

    /// The storage adapter this store writes through.
    pub fn storage(&self) -> &StorageAdapter {
        &self.storage
    }

    /// The role whose sessions auto-login restores.
    pub fn persistent_role(&self) -> Role {
        self.config.persistent_role
    }
}
