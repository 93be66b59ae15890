use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::coordinator::RouteConfig;
use crate::error::{AnteroomError, Result};
use crate::pending::LedgerConfig;
use crate::platform::Platform;
use crate::session::{Role, SessionConfig, TimeoutPolicy};
use crate::storage::{StorageBackendKind, StorageConfig};
use crate::utils::get_env_with_prefix;

/// Main configuration for an anteroom context
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub platform: Platform,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub ledger: LedgerConfig,
    pub routes: RouteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json")]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json() -> bool {
    false
}

impl Config {
    /// Load the full configuration from environment variables.
    ///
    /// The platform comes from `ANTEROOM_PLATFORM`; every section loads its
    /// own `ANTEROOM_*` variables.
    pub fn from_env() -> Self {
        Self {
            platform: Platform::detect(),
            logging: LoggingConfig {
                level: get_env_with_prefix("LOG_LEVEL").unwrap_or_else(default_log_level),
                json: get_env_with_prefix("LOG_JSON")
                    .map(|v| v.parse().unwrap_or(false))
                    .unwrap_or(false),
            },
            storage: StorageConfig::from_env(),
            session: SessionConfig::from_env(),
            ledger: LedgerConfig::from_env(),
            routes: RouteConfig::from_env(),
        }
    }

    /// Builder pattern for constructing and validating a Config
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for Config with validation at build time
#[must_use = "builder does nothing until you call build()"]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Start from the environment instead of defaults
    pub fn from_env() -> Self {
        Self {
            config: Config::from_env(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.config.platform = platform;
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackendKind) -> Self {
        self.config.storage.backend = Some(backend);
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage.path = Some(path.into());
        self
    }

    pub fn with_session_timeouts(mut self, timeouts: TimeoutPolicy) -> Self {
        self.config.session.timeouts = timeouts;
        self
    }

    pub fn with_persistent_role(mut self, role: Role) -> Self {
        self.config.session.persistent_role = role;
        self
    }

    pub fn with_pending_max_age(mut self, max_age: Duration) -> Self {
        self.config.ledger.max_age_seconds = Some(max_age.as_secs());
        self
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.config.routes.login = route.into();
        self
    }

    pub fn with_routes(mut self, routes: RouteConfig) -> Self {
        self.config.routes = routes;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.config.logging.json = json;
        self
    }

    /// Validate and produce the Config
    pub fn build(self) -> Result<Config> {
        let config = self.config;

        for (name, route) in [
            ("login", &config.routes.login),
            ("cart", &config.routes.cart),
            ("checkout", &config.routes.checkout),
            ("orders", &config.routes.orders),
            ("profile", &config.routes.profile),
        ] {
            if !route.starts_with('/') {
                return Err(AnteroomError::config(format!(
                    "Invalid {} route '{}': routes must start with '/'",
                    name, route
                )));
            }
        }

        if config.session.timeouts.fallback_seconds == 0 {
            return Err(AnteroomError::config(
                "Session timeout fallback must be nonzero",
            ));
        }
        if let Some(rule) = config
            .session
            .timeouts
            .rules
            .iter()
            .find(|r| r.timeout_seconds == 0)
        {
            return Err(AnteroomError::config(format!(
                "Session timeout rule for platform {:?} / role {:?} must be nonzero",
                rule.platform, rule.role
            )));
        }

        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(AnteroomError::config(format!(
                "Invalid log level '{}'",
                config.logging.level
            )));
        }

        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
