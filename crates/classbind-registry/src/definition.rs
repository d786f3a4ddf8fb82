//! Component definitions and the registration input they are validated from.
use classbind_core::{Document, NodeId, RegistryError};
use lazy_static::lazy_static;
use regex::Regex;
use std::any::Any;
use std::fmt;
use std::rc::Rc;

lazy_static! {
    /// A name is stored as one token of a comma-separated attribute
    static ref NAME: Regex = Regex::new(r"^[^\s,]+$").unwrap();

    /// A single CSS class identifier
    static ref CSS_CLASS: Regex = Regex::new(
        r"^-?[_a-zA-Z\x{00A0}-\x{10FFFF}][_a-zA-Z0-9\x{00A0}-\x{10FFFF}-]*$"
    ).unwrap();
}

/// Downcasting support for component instances.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior attached to an element by an upgrade.
///
/// Setup (attaching listeners, rendering) belongs in the constructor; the
/// registry never inspects it.
pub trait Component: AsAny {
    /// Called right before the instance is discarded by a downgrade
    fn downgrade(&mut self, _doc: &mut dyn Document, _element: NodeId) {}
}

/// Builds a component for one element.
///
/// Constructors get the document, never the registry, so they cannot
/// re-enter it while an upgrade is in progress.
pub type Constructor = Rc<dyn Fn(&mut dyn Document, NodeId) -> Box<dyn Component>>;

/// Unvalidated registration input, see [`crate::Registry::register`].
#[derive(Default, Clone)]
pub struct ComponentConfig {
    pub name: Option<String>,
    pub css_class: Option<String>,
    pub constructor: Option<Constructor>,
}

impl ComponentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = Some(css_class.into());
        self
    }

    pub fn constructor<F, C>(mut self, constructor: F) -> Self
    where
        F: Fn(&mut dyn Document, NodeId) -> C + 'static,
        C: Component,
    {
        self.constructor = Some(Rc::new(move |doc: &mut dyn Document, element: NodeId| {
            Box::new(constructor(doc, element)) as Box<dyn Component>
        }));
        self
    }

    /// Validate presence and shape of every field
    pub fn build(self) -> Result<ComponentDefinition, RegistryError> {
        let constructor = self
            .constructor
            .ok_or_else(|| RegistryError::Config("missing constructor".to_string()))?;

        let name = match self.name {
            Some(name) if NAME.is_match(&name) => name,
            Some(name) => {
                return Err(RegistryError::Config(format!(
                    "name must be a non-empty token without whitespace or commas, got {:?}",
                    name
                )))
            }
            None => return Err(RegistryError::Config("missing name".to_string())),
        };

        let css_class = match self.css_class {
            Some(class) if CSS_CLASS.is_match(&class) => class,
            Some(class) => {
                return Err(RegistryError::Config(format!(
                    "css_class must be a single CSS class, got {:?}",
                    class
                )))
            }
            None => return Err(RegistryError::Config("missing css_class".to_string())),
        };

        Ok(ComponentDefinition {
            name,
            css_class,
            constructor,
        })
    }
}

impl fmt::Debug for ComponentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("name", &self.name)
            .field("css_class", &self.css_class)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

/// A registered component. Immutable once registered.
#[derive(Clone)]
pub struct ComponentDefinition {
    name: String,
    css_class: String,
    constructor: Constructor,
}

impl ComponentDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn css_class(&self) -> &str {
        &self.css_class
    }

    pub(crate) fn construct(&self, doc: &mut dyn Document, element: NodeId) -> Box<dyn Component> {
        (self.constructor)(doc, element)
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("name", &self.name)
            .field("css_class", &self.css_class)
            .finish_non_exhaustive()
    }
}
