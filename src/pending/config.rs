use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pending-action ledger configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Discard persisted actions older than this many seconds.
    ///
    /// Unset reproduces the reference behavior: a deferred action waits
    /// indefinitely for the login that replays it.
    #[serde(default)]
    pub max_age_seconds: Option<u64>,
}

impl LedgerConfig {
    /// Load ledger configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(age) = get_env_with_prefix("PENDING_MAX_AGE_SECS") {
            match age.parse() {
                Ok(seconds) => config.max_age_seconds = Some(seconds),
                Err(_) => {
                    tracing::warn!(value = %age, "Unparseable pending-action max age, ignoring");
                }
            }
        }

        config
    }

    /// The maximum age as a Duration, if one is configured.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age_seconds.map(Duration::from_secs)
    }
}
