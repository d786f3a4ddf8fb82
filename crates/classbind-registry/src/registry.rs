//! The registry: registration table, instance table and the upgrade and
//! downgrade engines operating over a host [`Document`].
use crate::definition::{ComponentConfig, ComponentDefinition};
use crate::instance::{ComponentInstance, InstanceId};
use crate::marker::MarkerList;
use classbind_core::{Document, NodeId, RegistryConfig, RegistryError};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, debug_span, info, warn};

/// Lifecycle manager for class-bound components on one page.
///
/// Invariant: an element lists a name in its marker attribute iff the
/// instance table holds an instance for that (element, name) pair.
pub struct Registry {
    config: RegistryConfig,
    page_id: String,
    registered: Vec<Rc<ComponentDefinition>>,
    created: Vec<ComponentInstance>,
    /// (element, component name) -> instance
    properties: HashMap<(NodeId, String), InstanceId>,
    next_instance: u64,
    page_loaded: bool,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            page_id: uuid::Uuid::new_v4().to_string(),
            registered: Vec::new(),
            created: Vec::new(),
            properties: HashMap::new(),
            next_instance: 0,
            page_loaded: false,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Validate `config` and append it to the registration table.
    ///
    /// Fails with [`RegistryError::Config`] on a missing or malformed field
    /// and with [`RegistryError::DuplicateClass`] when the CSS class is
    /// already claimed. The table is unchanged on failure.
    pub fn register(&mut self, config: ComponentConfig) -> Result<(), RegistryError> {
        let definition = config.build()?;

        if self.definition_for_class(definition.css_class()).is_some() {
            return Err(RegistryError::DuplicateClass(
                definition.css_class().to_string(),
            ));
        }

        info!(
            name = definition.name(),
            css_class = definition.css_class(),
            "registered component"
        );
        self.registered.push(Rc::new(definition));
        Ok(())
    }

    pub fn definition_for_class(&self, css_class: &str) -> Option<&ComponentDefinition> {
        self.find_definition(css_class).map(|d| d.as_ref())
    }

    fn find_definition(&self, css_class: &str) -> Option<&Rc<ComponentDefinition>> {
        self.registered.iter().find(|d| d.css_class() == css_class)
    }

    // ------------------------------------------------------------------
    // Upgrade
    // ------------------------------------------------------------------

    /// Upgrade every element carrying `css_class`, returning how many
    /// instances were created. An unregistered class creates nothing.
    pub fn upgrade_by_class(&mut self, doc: &mut dyn Document, css_class: &str) -> usize {
        let _span = debug_span!("upgrade_by_class", page = %self.page_id, css_class).entered();
        let definitions: Vec<_> = self
            .registered
            .iter()
            .filter(|d| d.css_class() == css_class)
            .cloned()
            .collect();

        let created: usize = definitions
            .iter()
            .map(|definition| self.upgrade_definition(doc, definition))
            .sum();
        debug!(created, "upgrade by class finished");
        created
    }

    /// Upgrade every registered definition in registration order
    pub fn upgrade_all(&mut self, doc: &mut dyn Document) -> usize {
        let _span = debug_span!("upgrade_all", page = %self.page_id).entered();
        let definitions = self.registered.clone();

        let created: usize = definitions
            .iter()
            .map(|definition| self.upgrade_definition(doc, definition))
            .sum();
        debug!(created, definitions = definitions.len(), "upgrade all finished");
        created
    }

    /// Upgrade one element.
    ///
    /// With `css_class`, only that class's definition is attempted. Without
    /// it, every class on the element that resolves to a definition is
    /// upgraded, so one element may host several components. A node that
    /// is not an element is ignored.
    pub fn upgrade_element(
        &mut self,
        doc: &mut dyn Document,
        node: NodeId,
        css_class: Option<&str>,
    ) -> usize {
        if !doc.is_element(node) {
            return 0;
        }

        match css_class {
            Some(class) => match self.find_definition(class).cloned() {
                Some(definition) => usize::from(self.upgrade_pair(doc, node, &definition)),
                None => 0,
            },
            None => {
                let mut created = 0;
                for class in doc.class_list(node) {
                    if let Some(definition) = self.find_definition(&class).cloned() {
                        created += usize::from(self.upgrade_pair(doc, node, &definition));
                    }
                }
                created
            }
        }
    }

    /// Page-load hook: upgrades everything the first time only
    pub fn page_loaded(&mut self, doc: &mut dyn Document) -> usize {
        if self.page_loaded {
            debug!(page = %self.page_id, "page load already handled");
            return 0;
        }
        self.page_loaded = true;
        self.upgrade_all(doc)
    }

    fn upgrade_definition(
        &mut self,
        doc: &mut dyn Document,
        definition: &Rc<ComponentDefinition>,
    ) -> usize {
        doc.elements_by_class(definition.css_class())
            .into_iter()
            .filter(|&element| self.upgrade_pair(doc, element, definition))
            .count()
    }

    fn upgrade_pair(
        &mut self,
        doc: &mut dyn Document,
        element: NodeId,
        definition: &Rc<ComponentDefinition>,
    ) -> bool {
        if !doc.has_class(element, definition.css_class()) {
            warn!(
                %element,
                css_class = definition.css_class(),
                "element does not carry the component class, skipping upgrade"
            );
            return false;
        }

        let mut markers = self.markers(doc, element);
        if markers.contains(definition.name()) {
            return false;
        }
        markers.push(definition.name());

        let component = definition.construct(doc, element);

        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        self.properties
            .insert((element, definition.name().to_string()), id);
        self.write_markers(doc, element, &markers);
        self.created.push(ComponentInstance::new(
            id,
            element,
            Rc::clone(definition),
            component,
        ));

        debug!(%element, name = definition.name(), "upgraded element");
        true
    }

    // ------------------------------------------------------------------
    // Downgrade
    // ------------------------------------------------------------------

    /// Downgrade one element.
    ///
    /// With `css_class`, only that class's component is removed. Without
    /// it, every component recorded in the element's marker list is.
    pub fn downgrade_element(
        &mut self,
        doc: &mut dyn Document,
        node: NodeId,
        css_class: Option<&str>,
    ) -> usize {
        if !doc.is_element(node) {
            return 0;
        }

        match css_class {
            Some(class) => match self.definition_for_class(class) {
                Some(definition) => {
                    let name = definition.name().to_string();
                    usize::from(self.remove_pair(doc, node, &name))
                }
                None => 0,
            },
            None => {
                let markers = self.markers(doc, node);
                markers
                    .names()
                    .iter()
                    .filter(|name| self.remove_pair(doc, node, name))
                    .count()
            }
        }
    }

    /// Downgrade the component registered for `css_class` on every element
    /// whose marker list names it.
    pub fn downgrade_by_class(&mut self, doc: &mut dyn Document, css_class: &str) -> usize {
        let _span = debug_span!("downgrade_by_class", page = %self.page_id, css_class).entered();
        let Some(name) = self.definition_for_class(css_class).map(|d| d.name().to_string()) else {
            debug!("class is not registered");
            return 0;
        };

        let candidates =
            doc.elements_with_attribute_containing(&self.config.marker_attribute, &name);
        let removed = candidates
            .into_iter()
            .filter(|&element| {
                self.markers(doc, element).contains(&name) && self.remove_pair(doc, element, &name)
            })
            .count();
        debug!(removed, "downgrade by class finished");
        removed
    }

    /// Downgrade every live instance, oldest first
    pub fn downgrade_all(&mut self, doc: &mut dyn Document) -> usize {
        let _span = debug_span!("downgrade_all", page = %self.page_id).entered();
        let pairs: Vec<(NodeId, String)> = self
            .created
            .iter()
            .map(|instance| (instance.element(), instance.name().to_string()))
            .collect();

        let removed = pairs
            .iter()
            .filter(|(element, name)| self.remove_pair(doc, *element, name))
            .count();
        debug!(removed, remaining = self.created.len(), "downgrade all finished");
        removed
    }

    fn remove_pair(&mut self, doc: &mut dyn Document, element: NodeId, name: &str) -> bool {
        let mut markers = self.markers(doc, element);
        if !markers.remove(name) {
            return false;
        }
        self.write_markers(doc, element, &markers);

        if let Some(index) = self.created.iter().position(|i| i.matches(element, name)) {
            let instance = self.created.remove(index);
            instance.teardown(doc);
        }
        self.properties.remove(&(element, name.to_string()));

        debug!(%element, name, "downgraded element");
        true
    }

    // ------------------------------------------------------------------
    // Marker attribute
    // ------------------------------------------------------------------

    /// Component names recorded on `element`
    pub fn markers(&self, doc: &dyn Document, element: NodeId) -> MarkerList {
        doc.attribute(element, &self.config.marker_attribute)
            .map(|raw| MarkerList::parse(&raw))
            .unwrap_or_default()
    }

    fn write_markers(&self, doc: &mut dyn Document, element: NodeId, markers: &MarkerList) {
        if markers.is_empty() {
            doc.remove_attribute(element, &self.config.marker_attribute);
        } else {
            doc.set_attribute(element, &self.config.marker_attribute, &markers.to_string());
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Registered definitions in registration order
    pub fn registered(&self) -> impl ExactSizeIterator<Item = &ComponentDefinition> {
        self.registered.iter().map(|d| d.as_ref())
    }

    /// Live instances, oldest first
    pub fn created(&self) -> &[ComponentInstance] {
        &self.created
    }

    /// The instance `name` has attached to `element`, if any
    pub fn instance(&self, element: NodeId, name: &str) -> Option<&ComponentInstance> {
        let id = self.properties.get(&(element, name.to_string()))?;
        self.created.iter().find(|i| i.id() == *id)
    }

    pub fn instance_mut(&mut self, element: NodeId, name: &str) -> Option<&mut ComponentInstance> {
        let id = *self.properties.get(&(element, name.to_string()))?;
        self.created.iter_mut().find(|i| i.id() == id)
    }

    pub fn instance_as<T: crate::Component>(&self, element: NodeId, name: &str) -> Option<&T> {
        self.instance(element, name)?.downcast_ref::<T>()
    }
}
