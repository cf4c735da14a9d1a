//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRAVEL_CONCIERGE` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a working
//! mock-backed server.
//!
//! # Example
//!
//! ```no_run
//! use travel_concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod chat;
mod error;
mod features;
mod inventory;
mod server;

pub use chat::ChatConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use inventory::{InventoryBackend, InventoryConfig};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat pipeline tuning (lookback window, card caps)
    #[serde(default)]
    pub chat: ChatConfig,

    /// Domain Service backend (mock or remote)
    #[serde(default)]
    pub inventory: InventoryConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TRAVEL_CONCIERGE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TRAVEL_CONCIERGE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TRAVEL_CONCIERGE__INVENTORY__BACKEND=remote` -> `inventory.backend = remote`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRAVEL_CONCIERGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.chat.validate()?;
        self.inventory.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "TRAVEL_CONCIERGE__SERVER__PORT",
        "TRAVEL_CONCIERGE__SERVER__ENVIRONMENT",
        "TRAVEL_CONCIERGE__CHAT__HISTORY_LOOKBACK",
        "TRAVEL_CONCIERGE__CHAT__RECORD_USER_MESSAGES",
        "TRAVEL_CONCIERGE__INVENTORY__BACKEND",
        "TRAVEL_CONCIERGE__INVENTORY__BASE_URL",
        "TRAVEL_CONCIERGE__FEATURES__VERBOSE_ERRORS",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_loads_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.chat.history_lookback, 10);
        assert_eq!(config.inventory.backend, InventoryBackend::Mock);
        assert!(config.features.enable_tracing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TRAVEL_CONCIERGE__SERVER__PORT", "3000");
        env::set_var("TRAVEL_CONCIERGE__CHAT__HISTORY_LOOKBACK", "25");
        env::set_var("TRAVEL_CONCIERGE__CHAT__RECORD_USER_MESSAGES", "false");
        env::set_var("TRAVEL_CONCIERGE__FEATURES__VERBOSE_ERRORS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.chat.history_lookback, 25);
        assert!(!config.chat.record_user_messages);
        assert!(config.features.verbose_errors);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TRAVEL_CONCIERGE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_remote_backend_without_url_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("TRAVEL_CONCIERGE__INVENTORY__BACKEND", "remote");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_invalid_chat_section_fails_validation() {
        let config = AppConfig {
            chat: ChatConfig {
                max_cards: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxCards));
    }
}
