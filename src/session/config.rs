use crate::platform::Platform;
use crate::session::record::Role;
use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One timeout rule: `None` fields match anything.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeoutRule {
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub role: Option<Role>,
    pub timeout_seconds: u64,
}

impl TimeoutRule {
    fn matches(&self, platform: Platform, role: Option<Role>) -> bool {
        let platform_ok = self.platform.map_or(true, |p| p == platform);
        let role_ok = match self.role {
            None => true,
            Some(wanted) => role == Some(wanted),
        };
        platform_ok && role_ok
    }
}

/// Ordered `(platform, role) -> timeout` lookup.
///
/// First matching rule wins; `fallback_seconds` applies when nothing
/// matches. The defaults reproduce the reference behavior — a multi-day
/// window on the native shell, a single day on the web, role ignored — but a
/// role-driven policy is just a different rule set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimeoutPolicy {
    #[serde(default)]
    pub rules: Vec<TimeoutRule>,

    #[serde(default = "default_web_timeout_seconds")]
    pub fallback_seconds: u64,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                TimeoutRule {
                    platform: Some(Platform::Native),
                    role: None,
                    timeout_seconds: default_native_timeout_seconds(),
                },
                TimeoutRule {
                    platform: Some(Platform::Web),
                    role: None,
                    timeout_seconds: default_web_timeout_seconds(),
                },
            ],
            fallback_seconds: default_web_timeout_seconds(),
        }
    }
}

impl TimeoutPolicy {
    /// A policy with no rules, always answering `fallback`.
    pub fn fixed(fallback: Duration) -> Self {
        Self {
            rules: Vec::new(),
            fallback_seconds: fallback.as_secs(),
        }
    }

    /// Append a rule (first match still wins).
    pub fn rule(
        mut self,
        platform: Option<Platform>,
        role: Option<Role>,
        timeout: Duration,
    ) -> Self {
        self.rules.push(TimeoutRule {
            platform,
            role,
            timeout_seconds: timeout.as_secs(),
        });
        self
    }

    /// The inactivity window for this platform/role combination.
    pub fn timeout_for(&self, platform: Platform, role: Option<Role>) -> Duration {
        let seconds = self
            .rules
            .iter()
            .find(|rule| rule.matches(platform, role))
            .map(|rule| rule.timeout_seconds)
            .unwrap_or(self.fallback_seconds);
        Duration::from_secs(seconds)
    }
}

/// Session configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Inactivity window lookup
    #[serde(default)]
    pub timeouts: TimeoutPolicy,

    /// The role whose sessions auto-login restores
    #[serde(default = "default_persistent_role")]
    pub persistent_role: Role,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeouts: TimeoutPolicy::default(),
            persistent_role: default_persistent_role(),
        }
    }
}

impl SessionConfig {
    /// Load session configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        let mut policy = TimeoutPolicy {
            rules: Vec::new(),
            fallback_seconds: default_web_timeout_seconds(),
        };

        let native = get_env_with_prefix("SESSION_NATIVE_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_native_timeout_seconds);
        let web = get_env_with_prefix("SESSION_WEB_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_web_timeout_seconds);

        policy.rules.push(TimeoutRule {
            platform: Some(Platform::Native),
            role: None,
            timeout_seconds: native,
        });
        policy.rules.push(TimeoutRule {
            platform: Some(Platform::Web),
            role: None,
            timeout_seconds: web,
        });
        policy.fallback_seconds = web;
        config.timeouts = policy;

        if let Some(role) = get_env_with_prefix("SESSION_PERSISTENT_ROLE") {
            match role.parse() {
                Ok(parsed) => config.persistent_role = parsed,
                Err(_) => {
                    tracing::warn!(%role, "Unknown persistent role, keeping default");
                }
            }
        }

        config
    }
}

fn default_native_timeout_seconds() -> u64 {
    7 * 24 * 3600 // 7 days
}

fn default_web_timeout_seconds() -> u64 {
    24 * 3600 // 24 hours
}

fn default_persistent_role() -> Role {
    Role::Vendor
}
