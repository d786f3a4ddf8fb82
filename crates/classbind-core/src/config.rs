//! Registry configuration, loadable from YAML.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Attribute holding the comma-separated list of upgraded component names.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-upgraded-components";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Name of the marker attribute written on every upgraded element
    pub marker_attribute: String,
    /// Default filter for the tracing subscriber when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let attr = self.marker_attribute.as_str();
        if attr.is_empty() || attr.chars().any(|c| c.is_whitespace() || c == '=') {
            return Err(ConfigError::Invalid(format!(
                "marker_attribute must be a single attribute name, got {:?}",
                attr
            )));
        }
        Ok(())
    }
}
