//! Host DOM contract
//!
//! The registry only ever talks to the page through [`Document`]. Handles are
//! plain [`NodeId`]s; a handle may point at a node that is not an element
//! (text, for instance), which callers must check with
//! [`Document::is_element`] before treating it as one.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-owning handle to a node of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Event delivered to listeners attached with [`Document::add_event_listener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: String,
    pub target: NodeId,
}

pub type Listener = Box<dyn FnMut(&Event)>;

/// Capabilities the registry and its components need from the page.
///
/// Read operations on a non-element node return empty values and write
/// operations on one are ignored.
pub trait Document {
    /// Whether `node` refers to a live element
    fn is_element(&self, node: NodeId) -> bool;

    /// All elements carrying `class`, in document order
    fn elements_by_class(&self, class: &str) -> Vec<NodeId>;

    /// All elements whose `attribute` value contains `needle`, in document
    /// order. This is a coarse substring query, like `[attr*="needle"]`.
    fn elements_with_attribute_containing(&self, attribute: &str, needle: &str) -> Vec<NodeId>;

    fn class_list(&self, element: NodeId) -> Vec<String>;

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.class_list(element).iter().any(|c| c == class)
    }

    fn add_class(&mut self, element: NodeId, class: &str);

    fn remove_class(&mut self, element: NodeId, class: &str);

    fn attribute(&self, element: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: NodeId, name: &str, value: &str);

    fn remove_attribute(&mut self, element: NodeId, name: &str);

    fn text(&self, element: NodeId) -> Option<String>;

    fn set_text(&mut self, element: NodeId, text: &str);

    fn add_event_listener(&mut self, element: NodeId, event: &str, listener: Listener);

    /// Drop every listener for `event` on `element`, returning how many were removed
    fn remove_event_listeners(&mut self, element: NodeId, event: &str) -> usize;
}
