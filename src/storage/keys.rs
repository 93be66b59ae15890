//! Durable storage key names.
//!
//! These names are stable across versions: records written by an older build
//! must stay readable. The web and native shells historically used different
//! names for the auth records, so the schema is selected by platform.

use crate::platform::Platform;

/// The set of durable keys used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySchema {
    pub token: &'static str,
    pub user: &'static str,
    pub last_activity: &'static str,
    pub pending_action: &'static str,
    pub cart: &'static str,
    pub wishlist: &'static str,
    pub buy_now: &'static str,
}

/// Key names used by the browser-hosted shell.
pub const WEB_KEYS: KeySchema = KeySchema {
    token: "token",
    user: "user",
    last_activity: "lastActivity",
    pending_action: "pendingAction",
    cart: "cart",
    wishlist: "wishlist",
    buy_now: "buyNowProduct",
};

/// Key names used by the native mobile shell.
pub const NATIVE_KEYS: KeySchema = KeySchema {
    token: "auth_token",
    user: "auth_user",
    last_activity: "last_activity",
    pending_action: "pendingAction",
    cart: "cart",
    wishlist: "wishlist",
    buy_now: "buyNowProduct",
};

impl KeySchema {
    /// The schema for a platform.
    pub fn for_platform(platform: Platform) -> &'static KeySchema {
        match platform {
            Platform::Native => &NATIVE_KEYS,
            Platform::Web => &WEB_KEYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_selects_schema() {
        assert_eq!(KeySchema::for_platform(Platform::Web).token, "token");
        assert_eq!(KeySchema::for_platform(Platform::Native).token, "auth_token");
    }

    #[test]
    fn test_auth_keys_differ_across_platforms() {
        assert_ne!(WEB_KEYS.token, NATIVE_KEYS.token);
        assert_ne!(WEB_KEYS.user, NATIVE_KEYS.user);
        assert_ne!(WEB_KEYS.last_activity, NATIVE_KEYS.last_activity);
    }

    #[test]
    fn test_shared_keys_match_across_platforms() {
        assert_eq!(WEB_KEYS.pending_action, NATIVE_KEYS.pending_action);
        assert_eq!(WEB_KEYS.cart, NATIVE_KEYS.cart);
        assert_eq!(WEB_KEYS.wishlist, NATIVE_KEYS.wishlist);
        assert_eq!(WEB_KEYS.buy_now, NATIVE_KEYS.buy_now);
    }
}
