//! Integration tests for the upgrade/downgrade lifecycle.
//!
//! Every test drives a fresh `Registry` over a `MemoryDocument`.

use classbind_core::{Document, MemoryDocument, NodeId, DEFAULT_MARKER_ATTRIBUTE};
use classbind_registry::{Component, ComponentConfig, Registry, RegistryError};
use std::cell::RefCell;
use std::rc::Rc;

const MARKER: &str = DEFAULT_MARKER_ATTRIBUTE;

/// Records constructor and teardown calls as "<Name>+#id" / "<Name>-#id"
type Journal = Rc<RefCell<Vec<String>>>;

struct Recorder {
    name: &'static str,
    journal: Journal,
}

impl Component for Recorder {
    fn downgrade(&mut self, _doc: &mut dyn Document, element: NodeId) {
        self.journal
            .borrow_mut()
            .push(format!("{}-{}", self.name, element));
    }
}

fn recorder(name: &'static str, class: &str, journal: &Journal) -> ComponentConfig {
    let journal = Rc::clone(journal);
    ComponentConfig::new()
        .name(name)
        .css_class(class)
        .constructor(move |_doc: &mut dyn Document, element: NodeId| {
            journal.borrow_mut().push(format!("{}+{}", name, element));
            Recorder {
                name,
                journal: Rc::clone(&journal),
            }
        })
}

fn setup(components: &[(&'static str, &str)]) -> (Registry, Journal) {
    let journal: Journal = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::default();
    for (name, class) in components {
        registry.register(recorder(name, class, &journal)).unwrap();
    }
    (registry, journal)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_clock_scenario() {
    struct Clock;
    impl Component for Clock {}

    let mut registry = Registry::default();
    registry
        .register(
            ComponentConfig::new()
                .name("Clock")
                .css_class("clock")
                .constructor(|_doc: &mut dyn Document, _el: NodeId| Clock),
        )
        .unwrap();

    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "clock");

    assert_eq!(registry.upgrade_all(&mut doc), 1);
    assert_eq!(doc.attribute(el, MARKER).as_deref(), Some("Clock"));
    assert!(registry.instance_as::<Clock>(el, "Clock").is_some());

    assert_eq!(registry.downgrade_all(&mut doc), 1);
    assert_eq!(doc.attribute(el, MARKER), None);
    assert!(registry.instance(el, "Clock").is_none());
    assert!(registry.created().is_empty());
}

#[test]
fn test_register_without_class_is_rejected() {
    let (mut registry, journal) = setup(&[("Clock", "clock")]);
    let config = ComponentConfig::new()
        .name("Timer")
        .constructor(|_doc: &mut dyn Document, _el: NodeId| Recorder {
            name: "Timer",
            journal: Rc::new(RefCell::new(Vec::new())),
        });

    let err = registry.register(config).unwrap_err();
    assert!(matches!(err, RegistryError::Config(_)));
    assert!(err.to_string().starts_with("invalid component configuration"));
    assert_eq!(registry.registered().len(), 1);
    assert!(journal.borrow().is_empty());
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_upgrade_is_idempotent() {
    let (mut registry, journal) = setup(&[("Clock", "clock")]);
    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "clock");

    assert_eq!(registry.upgrade_element(&mut doc, el, None), 1);
    assert_eq!(registry.upgrade_element(&mut doc, el, None), 0);
    assert_eq!(registry.upgrade_element(&mut doc, el, Some("clock")), 0);
    assert_eq!(registry.upgrade_all(&mut doc), 0);

    assert_eq!(registry.created().len(), 1);
    assert_eq!(doc.attribute(el, MARKER).as_deref(), Some("Clock"));
    assert_eq!(*journal.borrow(), vec!["Clock+#0"]);
}

#[test]
fn test_upgrade_downgrade_round_trip() {
    let (mut registry, journal) = setup(&[("Clock", "clock"), ("Badge", "badge")]);
    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "clock badge");

    registry.upgrade_element(&mut doc, el, None);
    assert_eq!(doc.attribute(el, MARKER).as_deref(), Some("Clock,Badge"));

    assert_eq!(registry.downgrade_element(&mut doc, el, Some("clock")), 1);
    assert!(registry.instance(el, "Clock").is_none());
    assert!(registry.instance(el, "Badge").is_some());
    assert_eq!(doc.attribute(el, MARKER).as_deref(), Some("Badge"));

    assert_eq!(
        *journal.borrow(),
        vec!["Clock+#0", "Badge+#0", "Clock-#0"]
    );
}

#[test]
fn test_duplicate_class_is_rejected() {
    let (mut registry, journal) = setup(&[("Clock", "clock")]);

    let err = registry.register(recorder("ClockPro", "clock", &journal)).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateClass("clock".to_string()));
    assert_eq!(registry.registered().len(), 1);

    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "clock");
    registry.upgrade_all(&mut doc);
    assert_eq!(doc.attribute(el, MARKER).as_deref(), Some("Clock"));
}

#[test]
fn test_multi_component_element() {
    let (mut registry, _journal) = setup(&[("Clock", "clock"), ("Badge", "badge")]);
    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "badge plain clock");

    assert_eq!(registry.upgrade_element(&mut doc, el, None), 2);
    assert_eq!(registry.created().len(), 2);

    let markers = registry.markers(&doc, el);
    assert!(markers.contains("Clock"));
    assert!(markers.contains("Badge"));
    assert_eq!(markers.len(), 2);
}

#[test]
fn test_downgrade_all_drains_everything() {
    let (mut registry, journal) = setup(&[("Clock", "clock"), ("Badge", "badge")]);
    let mut doc = MemoryDocument::new();
    let elements = [
        doc.create_element("div", "clock"),
        doc.create_element("div", "clock badge"),
        doc.create_element("span", "badge"),
    ];

    assert_eq!(registry.upgrade_all(&mut doc), 4);
    assert_eq!(registry.downgrade_all(&mut doc), 4);

    assert!(registry.created().is_empty());
    for el in elements {
        assert_eq!(doc.attribute(el, MARKER), None);
        assert!(registry.instance(el, "Clock").is_none());
        assert!(registry.instance(el, "Badge").is_none());
    }

    let journal = journal.borrow();
    let teardowns: Vec<_> = journal.iter().filter(|e| e.contains('-')).collect();
    assert_eq!(teardowns, ["Clock-#0", "Clock-#1", "Badge-#1", "Badge-#2"]);
}

// =============================================================================
// Ordering and bulk operations
// =============================================================================

#[test]
fn test_upgrade_all_follows_registration_then_document_order() {
    let (mut registry, journal) = setup(&[("Badge", "badge"), ("Clock", "clock")]);
    let mut doc = MemoryDocument::new();
    doc.create_element("div", "clock");
    doc.create_element("div", "badge");
    doc.create_element("div", "clock");

    registry.upgrade_all(&mut doc);
    assert_eq!(
        *journal.borrow(),
        vec!["Badge+#1", "Clock+#0", "Clock+#2"]
    );
}

#[test]
fn test_upgrade_by_class_only_touches_that_class() {
    let (mut registry, _journal) = setup(&[("Clock", "clock"), ("Badge", "badge")]);
    let mut doc = MemoryDocument::new();
    let clock = doc.create_element("div", "clock");
    let badge = doc.create_element("div", "badge");

    assert_eq!(registry.upgrade_by_class(&mut doc, "clock"), 1);
    assert!(registry.instance(clock, "Clock").is_some());
    assert_eq!(doc.attribute(badge, MARKER), None);

    assert_eq!(registry.upgrade_by_class(&mut doc, "unregistered"), 0);
}

#[test]
fn test_empty_results_are_not_errors() {
    let mut registry = Registry::default();
    let mut doc = MemoryDocument::new();
    assert_eq!(registry.upgrade_all(&mut doc), 0);
    assert_eq!(registry.downgrade_all(&mut doc), 0);
    assert_eq!(registry.downgrade_by_class(&mut doc, "clock"), 0);

    let (mut registry, _journal) = setup(&[("Clock", "clock")]);
    assert_eq!(registry.upgrade_by_class(&mut doc, "clock"), 0);
}

#[test]
fn test_downgrade_by_class_matches_exact_tokens() {
    let (mut registry, journal) = setup(&[("Clock", "clock"), ("ClockPro", "clock-pro")]);
    let mut doc = MemoryDocument::new();
    let plain = doc.create_element("div", "clock");
    let pro = doc.create_element("div", "clock-pro");

    registry.upgrade_all(&mut doc);
    assert_eq!(registry.downgrade_by_class(&mut doc, "clock"), 1);

    assert_eq!(doc.attribute(plain, MARKER), None);
    assert_eq!(doc.attribute(pro, MARKER).as_deref(), Some("ClockPro"));
    assert!(registry.instance(pro, "ClockPro").is_some());
    assert_eq!(journal.borrow().last().unwrap(), "Clock-#0");
}

// =============================================================================
// Silent no-ops
// =============================================================================

#[test]
fn test_non_element_nodes_are_ignored() {
    let (mut registry, journal) = setup(&[("Clock", "clock")]);
    let mut doc = MemoryDocument::new();
    let text = doc.create_text("12:00");

    assert_eq!(registry.upgrade_element(&mut doc, text, None), 0);
    assert_eq!(registry.upgrade_element(&mut doc, NodeId(99), Some("clock")), 0);
    assert_eq!(registry.downgrade_element(&mut doc, text, None), 0);
    assert!(journal.borrow().is_empty());
}

#[test]
fn test_downgrade_of_absent_pair_is_noop() {
    let (mut registry, journal) = setup(&[("Clock", "clock"), ("Badge", "badge")]);
    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "clock badge");

    assert_eq!(registry.downgrade_element(&mut doc, el, None), 0);
    assert_eq!(registry.downgrade_element(&mut doc, el, Some("clock")), 0);
    assert_eq!(registry.downgrade_element(&mut doc, el, Some("unregistered")), 0);

    registry.upgrade_element(&mut doc, el, Some("clock"));
    assert_eq!(registry.downgrade_element(&mut doc, el, Some("badge")), 0);
    assert_eq!(doc.attribute(el, MARKER).as_deref(), Some("Clock"));
    assert_eq!(*journal.borrow(), vec!["Clock+#0"]);
}

#[test]
fn test_downgrade_element_without_class_removes_all_recorded() {
    let (mut registry, _journal) = setup(&[("Clock", "clock"), ("Badge", "badge")]);
    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "clock badge");
    let other = doc.create_element("div", "clock");

    registry.upgrade_all(&mut doc);
    assert_eq!(registry.downgrade_element(&mut doc, el, None), 2);
    assert_eq!(doc.attribute(el, MARKER), None);
    assert_eq!(registry.created().len(), 1);
    assert_eq!(registry.created()[0].element(), other);
}

#[test]
fn test_single_recorded_component_is_downgraded() {
    let (mut registry, _journal) = setup(&[("Clock", "clock")]);
    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "clock");

    registry.upgrade_all(&mut doc);
    assert_eq!(registry.downgrade_element(&mut doc, el, None), 1);
    assert!(registry.created().is_empty());
}

#[test]
fn test_upgrade_appends_to_existing_marker() {
    let (mut registry, _journal) = setup(&[("Clock", "clock")]);
    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "clock");
    doc.set_attribute(el, MARKER, "Legacy");

    registry.upgrade_all(&mut doc);
    assert_eq!(doc.attribute(el, MARKER).as_deref(), Some("Legacy,Clock"));
}

// =============================================================================
// Page load and accessors
// =============================================================================

#[test]
fn test_page_load_upgrades_once() {
    let (mut registry, journal) = setup(&[("Clock", "clock")]);
    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "clock");

    assert_eq!(registry.page_loaded(&mut doc), 1);
    registry.downgrade_all(&mut doc);
    assert_eq!(registry.page_loaded(&mut doc), 0);

    assert_eq!(doc.attribute(el, MARKER), None);
    assert_eq!(*journal.borrow(), vec!["Clock+#0", "Clock-#0"]);
}

#[test]
fn test_accessors_expose_tables() {
    let (mut registry, _journal) = setup(&[("Clock", "clock"), ("Badge", "badge")]);
    let names: Vec<_> = registry.registered().map(|d| d.name()).collect();
    assert_eq!(names, ["Clock", "Badge"]);

    let mut doc = MemoryDocument::new();
    let el = doc.create_element("div", "badge clock");
    registry.upgrade_element(&mut doc, el, None);

    let created: Vec<_> = registry
        .created()
        .iter()
        .map(|i| (i.element(), i.name(), i.definition().css_class()))
        .collect();
    assert_eq!(created, [(el, "Badge", "badge"), (el, "Clock", "clock")]);

    let instance = registry.instance_mut(el, "Clock").unwrap();
    assert!(instance.downcast_mut::<Recorder>().is_some());
}
