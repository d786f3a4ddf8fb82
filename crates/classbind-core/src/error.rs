//! Unified Error Model
use thiserror::Error;

/// Errors raised synchronously by `Registry::register`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Missing or malformed `constructor`, `name` or `css_class`.
    #[error("invalid component configuration: {0}")]
    Config(String),

    /// The CSS class is already claimed by another definition.
    #[error("css class is already registered: {0}")]
    DuplicateClass(String),
}

/// Errors loading a [`crate::RegistryConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("CONFIG/IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("CONFIG/PARSE: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("CONFIG/INVALID: {0}")]
    Invalid(String),
}
