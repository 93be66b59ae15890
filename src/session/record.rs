//! Session record types.
//!
//! A session is a token/user pair plus a liveness timestamp. The pair is
//! meaningful only together: a token without a user (or the reverse) reads
//! as "not authenticated".

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A role the storefront recognizes.
///
/// Unknown values deserialize to [`Role::Unknown`] rather than failing, so a
/// profile written by a newer backend stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Vendor,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
            Self::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = crate::error::AnteroomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "vendor" => Ok(Self::Vendor),
            other => Err(crate::error::AnteroomError::config(format!(
                "unknown role: {}",
                other
            ))),
        }
    }
}

/// The persisted user profile.
///
/// Only the fields this crate reasons about are typed; everything else the
/// backend sends (username, avatar, addresses, ...) is preserved verbatim in
/// `extra` and round-trips untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserProfile {
    /// The role the user is currently acting as.
    pub user_type: Role,

    /// Roles the user may switch to.
    #[serde(default)]
    pub available_roles: Vec<Role>,

    /// Profile fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// A minimal profile acting as `user_type` with no other roles.
    pub fn new(user_type: Role) -> Self {
        Self {
            user_type,
            available_roles: vec![user_type],
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an uninterpreted profile field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether the user currently is, or may switch to, `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.user_type == role || self.available_roles.contains(&role)
    }
}

/// The in-memory view of a persisted session.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionRecord {
    /// Opaque credential issued by the backend.
    pub token: String,

    /// The authenticated user's profile.
    pub user: UserProfile,

    /// Epoch milliseconds of the last confirmed liveness.
    pub last_activity: u64,
}

impl SessionRecord {
    pub fn new(token: impl Into<String>, user: UserProfile, last_activity: u64) -> Self {
        Self {
            token: token.into(),
            user,
            last_activity,
        }
    }

    /// Whether the record is fresh at `now` under `timeout`.
    pub fn is_fresh(&self, timeout: Duration, now: u64) -> bool {
        let elapsed = now.saturating_sub(self.last_activity);
        elapsed as u128 <= timeout.as_millis()
    }
}
