//! Runtime platform detection.
//!
//! The hosting shell runs either as a native mobile app or inside a browser.
//! The distinction is fixed for the lifetime of the process and decides which
//! storage backend and key schema the crate uses. It is resolved once, at
//! construction time, never re-checked per call.

use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};

/// The runtime platform the hosting application runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Native mobile shell with an app-scoped preferences store.
    Native,
    /// Browser-hosted shell with an origin-scoped local store.
    Web,
}

impl Default for Platform {
    fn default() -> Self {
        Self::Web
    }
}

impl Platform {
    /// Detect the platform from the environment.
    ///
    /// Reads `ANTEROOM_PLATFORM` (falling back to `PLATFORM`), accepting
    /// `native` or `web`. Anything else, or nothing, resolves to `Web`.
    pub fn detect() -> Self {
        match get_env_with_prefix("PLATFORM").as_deref() {
            Some("native") => Self::Native,
            Some("web") | None => Self::Web,
            Some(other) => {
                tracing::warn!(platform = other, "Unknown platform value, assuming web");
                Self::Web
            }
        }
    }

    pub fn is_native(self) -> bool {
        matches!(self, Self::Native)
    }
}
