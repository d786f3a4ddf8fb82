//! Classbind demo: a scripted page with clock components
pub mod clock;

pub use clock::{Clock, ClockFormat};

use classbind_core::{ElementSnapshot, MemoryDocument, NodeId, RegistryConfig, RegistryError};
use classbind_registry::Registry;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// What the scripted page looked like across its lifecycle.
#[derive(Debug, Serialize)]
pub struct PageReport {
    pub page_id: String,
    pub registered: Vec<String>,
    pub upgraded: usize,
    pub after_upgrade: Vec<ElementSnapshot>,
    pub downgraded: usize,
    pub after_downgrade: Vec<ElementSnapshot>,
}

/// Install the fmt subscriber; `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Populate `doc` with the demo markup, returning the clock elements
pub fn build_page(doc: &mut MemoryDocument) -> Vec<NodeId> {
    doc.create_element("h1", "title");
    doc.create_text("Local time");
    let clocks = vec![
        doc.create_element("div", "clock"),
        doc.create_element("div", "clock clock--compact"),
    ];
    doc.create_element("p", "footnote");
    clocks
}

/// Run the page: register, load, click the first clock, then tear down.
pub fn run(config: RegistryConfig) -> Result<PageReport, RegistryError> {
    let mut registry = Registry::new(config);
    registry.register(Clock::config())?;

    let mut doc = MemoryDocument::new();
    let clocks = build_page(&mut doc);

    let upgraded = registry.page_loaded(&mut doc);

    if let Some(&first) = clocks.first() {
        doc.dispatch_event(first, "click");
        if let Some(clock) = registry
            .instance_mut(first, Clock::NAME)
            .and_then(|instance| instance.downcast_mut::<Clock>())
        {
            clock.tick(&mut doc);
        }
    }
    let after_upgrade = doc.snapshot();

    let downgraded = registry.downgrade_all(&mut doc);
    let after_downgrade = doc.snapshot();

    Ok(PageReport {
        page_id: registry.page_id().to_string(),
        registered: registry.registered().map(|d| d.name().to_string()).collect(),
        upgraded,
        after_upgrade,
        downgraded,
        after_downgrade,
    })
}
