//! Classbind Registry: binds DOM elements to components by CSS class
//!
//! Components are registered once with a name, a CSS class and a
//! constructor. Matching elements are later *upgraded* (an instance is built
//! and attached) and *downgraded* (the instance is torn down). Which
//! components live on an element is recorded in a comma-separated marker
//! attribute, `data-upgraded-components` by default.
//!
//! # Example
//!
//! ```
//! use classbind_core::{Document, MemoryDocument, NodeId};
//! use classbind_registry::{Component, ComponentConfig, Registry};
//!
//! struct Clock;
//! impl Component for Clock {}
//!
//! let mut registry = Registry::default();
//! registry
//!     .register(
//!         ComponentConfig::new()
//!             .name("Clock")
//!             .css_class("clock")
//!             .constructor(|_doc: &mut dyn Document, _el: NodeId| Clock),
//!     )
//!     .unwrap();
//!
//! let mut doc = MemoryDocument::new();
//! let el = doc.create_element("div", "clock");
//! registry.upgrade_all(&mut doc);
//!
//! assert_eq!(doc.attribute(el, "data-upgraded-components").as_deref(), Some("Clock"));
//! assert!(registry.instance_as::<Clock>(el, "Clock").is_some());
//!
//! registry.downgrade_all(&mut doc);
//! assert_eq!(doc.attribute(el, "data-upgraded-components"), None);
//! ```

pub mod definition;
pub mod instance;
pub mod marker;
pub mod registry;

pub use classbind_core::RegistryError;
pub use definition::{AsAny, Component, ComponentConfig, ComponentDefinition, Constructor};
pub use instance::{ComponentInstance, InstanceId};
pub use marker::MarkerList;
pub use registry::Registry;
