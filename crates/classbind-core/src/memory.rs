//! In-memory document used by the demo binary and tests.
//!
//! Nodes live in a flat arena; creation order is document order.
use crate::dom::{Document, Event, Listener, NodeId};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

#[derive(Debug, Clone)]
enum Node {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
}

/// Serializable view of one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSnapshot {
    pub id: NodeId,
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    pub listeners: usize,
}

#[derive(Default)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    listeners: HashMap<(NodeId, String), Vec<Listener>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element with the given tag and whitespace-separated classes
    pub fn create_element(&mut self, tag: &str, classes: &str) -> NodeId {
        let mut element = ElementData {
            tag: tag.to_string(),
            ..ElementData::default()
        };
        for class in classes.split_whitespace() {
            if !element.classes.iter().any(|c| c == class) {
                element.classes.push(class.to_string());
            }
        }
        self.push(Node::Element(element))
    }

    /// Append a text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::Text(text.to_string()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Run every listener registered for `kind` on `target`, returning how many ran
    pub fn dispatch_event(&mut self, target: NodeId, kind: &str) -> usize {
        let key = (target, kind.to_string());
        let Some(mut listeners) = self.listeners.remove(&key) else {
            return 0;
        };
        let event = Event {
            kind: kind.to_string(),
            target,
        };
        for listener in listeners.iter_mut() {
            listener(&event);
        }
        let count = listeners.len();
        trace!(%target, kind, count, "dispatched event");
        self.listeners.insert(key, listeners);
        count
    }

    pub fn listener_count(&self, element: NodeId) -> usize {
        self.listeners
            .iter()
            .filter(|((id, _), _)| *id == element)
            .map(|(_, l)| l.len())
            .sum()
    }

    /// Snapshot of every element in document order
    pub fn snapshot(&self) -> Vec<ElementSnapshot> {
        self.elements()
            .map(|(id, el)| ElementSnapshot {
                id,
                tag: el.tag.clone(),
                classes: el.classes.clone(),
                attributes: el.attributes.clone(),
                text: el.text.clone(),
                listeners: self.listener_count(id),
            })
            .collect()
    }

    fn elements(&self) -> impl Iterator<Item = (NodeId, &ElementData)> {
        self.nodes.iter().enumerate().filter_map(|(i, node)| match node {
            Node::Element(el) => Some((NodeId(i as u32), el)),
            Node::Text(_) => None,
        })
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.nodes.get(id.0 as usize) {
            Some(Node::Element(el)) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id.0 as usize) {
            Some(Node::Element(el)) => Some(el),
            _ => None,
        }
    }
}

impl Document for MemoryDocument {
    fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.elements()
            .filter(|(_, el)| el.classes.iter().any(|c| c == class))
            .map(|(id, _)| id)
            .collect()
    }

    fn elements_with_attribute_containing(&self, attribute: &str, needle: &str) -> Vec<NodeId> {
        self.elements()
            .filter(|(_, el)| {
                el.attributes
                    .get(attribute)
                    .is_some_and(|value| value.contains(needle))
            })
            .map(|(id, _)| id)
            .collect()
    }

    fn class_list(&self, element: NodeId) -> Vec<String> {
        self.element(element)
            .map(|el| el.classes.clone())
            .unwrap_or_default()
    }

    fn add_class(&mut self, element: NodeId, class: &str) {
        if let Some(el) = self.element_mut(element) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: NodeId, class: &str) {
        if let Some(el) = self.element_mut(element) {
            el.classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<String> {
        self.element(element)
            .and_then(|el| el.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(element) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, element: NodeId, name: &str) {
        if let Some(el) = self.element_mut(element) {
            el.attributes.remove(name);
        }
    }

    fn text(&self, element: NodeId) -> Option<String> {
        self.element(element).map(|el| el.text.clone())
    }

    fn set_text(&mut self, element: NodeId, text: &str) {
        if let Some(el) = self.element_mut(element) {
            el.text = text.to_string();
        }
    }

    fn add_event_listener(&mut self, element: NodeId, event: &str, listener: Listener) {
        if !self.is_element(element) {
            return;
        }
        self.listeners
            .entry((element, event.to_string()))
            .or_default()
            .push(listener);
    }

    fn remove_event_listeners(&mut self, element: NodeId, event: &str) -> usize {
        self.listeners
            .remove(&(element, event.to_string()))
            .map(|l| l.len())
            .unwrap_or(0)
    }
}
