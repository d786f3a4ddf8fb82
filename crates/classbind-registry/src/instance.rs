//! Live component instances.
use crate::definition::{Component, ComponentDefinition};
use classbind_core::{Document, NodeId};
use std::fmt;
use std::rc::Rc;

/// Identifier of one instance, unique within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// A component attached to one element by one definition.
pub struct ComponentInstance {
    id: InstanceId,
    element: NodeId,
    definition: Rc<ComponentDefinition>,
    component: Box<dyn Component>,
}

impl ComponentInstance {
    pub(crate) fn new(
        id: InstanceId,
        element: NodeId,
        definition: Rc<ComponentDefinition>,
        component: Box<dyn Component>,
    ) -> Self {
        Self {
            id,
            element,
            definition,
            component,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn definition(&self) -> &ComponentDefinition {
        &self.definition
    }

    /// Name of the originating definition
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn component(&self) -> &dyn Component {
        self.component.as_ref()
    }

    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.component().as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        let component: &mut dyn Component = self.component.as_mut();
        component.as_any_mut().downcast_mut::<T>()
    }

    pub(crate) fn matches(&self, element: NodeId, name: &str) -> bool {
        self.element == element && self.name() == name
    }

    pub(crate) fn teardown(mut self, doc: &mut dyn Document) {
        let element = self.element;
        self.component.downgrade(doc, element);
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("id", &self.id)
            .field("element", &self.element)
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
