//! Domain Service backend configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which Domain Service implementation to wire
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InventoryBackend {
    /// Seeded in-memory catalog
    #[default]
    Mock,
    /// REST inventory service
    Remote,
}

/// Inventory configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    #[serde(default)]
    pub backend: InventoryBackend,

    /// Base URL of the remote inventory (required for `remote`)
    pub base_url: Option<String>,

    /// API key for the remote inventory
    pub api_key: Option<Secret<String>>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl InventoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_remote(&self) -> bool {
        self.backend == InventoryBackend::Remote
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidInventoryTimeout);
        }
        if !self.is_remote() {
            return Ok(());
        }
        let url = self
            .base_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(ValidationError::MissingRequired("INVENTORY__BASE_URL"))?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidInventoryUrl);
        }
        Ok(())
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            backend: InventoryBackend::default(),
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_backend_needs_no_url() {
        let config = InventoryConfig::default();
        assert!(!config.is_remote());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn remote_backend_requires_base_url() {
        let config = InventoryConfig {
            backend: InventoryBackend::Remote,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("INVENTORY__BASE_URL"))
        );
    }

    #[test]
    fn remote_backend_requires_http_url() {
        let config = InventoryConfig {
            backend: InventoryBackend::Remote,
            base_url: Some("ftp://inventory.internal".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidInventoryUrl));

        let config = InventoryConfig {
            base_url: Some("https://inventory.internal".to_string()),
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn api_key_is_redacted_in_debug() {
        let config: InventoryConfig =
            serde_json::from_str(r#"{"backend": "remote", "api_key": "top-secret"}"#).unwrap();
        assert!(!format!("{:?}", config).contains("top-secret"));
    }
}
