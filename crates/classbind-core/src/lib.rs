//! Classbind Core: host DOM contract, configuration and error model
//!
//! The registry never owns the page. Everything it needs from the host is
//! expressed by the [`Document`] trait; [`MemoryDocument`] is a small arena
//! implementation used by the demo binary and by tests.

pub mod config;
pub mod dom;
pub mod error;
pub mod memory;

pub use config::{RegistryConfig, DEFAULT_MARKER_ATTRIBUTE};
pub use dom::{Document, Event, Listener, NodeId};
pub use error::{ConfigError, RegistryError};
pub use memory::{ElementSnapshot, MemoryDocument};

/// Classbind version
pub const CLASSBIND_VERSION: &str = "1.0.0";
