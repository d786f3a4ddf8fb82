//! Clock: renders the time into its element, click toggles 12h/24h.
use chrono::{Local, NaiveTime};
use classbind_core::{Document, Event, NodeId};
use classbind_registry::{Component, ComponentConfig};
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// Class added while the clock is attached
pub const ACTIVE_CLASS: &str = "is-ticking";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClockFormat {
    TwentyFourHour,
    TwelveHour,
}

impl ClockFormat {
    fn pattern(self) -> &'static str {
        match self {
            Self::TwentyFourHour => "%H:%M:%S",
            Self::TwelveHour => "%I:%M:%S %p",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::TwentyFourHour => Self::TwelveHour,
            Self::TwelveHour => Self::TwentyFourHour,
        }
    }
}

pub struct Clock {
    element: NodeId,
    format: Rc<Cell<ClockFormat>>,
    renders: u32,
}

impl Clock {
    pub const NAME: &'static str = "Clock";
    pub const CSS_CLASS: &'static str = "clock";

    pub fn config() -> ComponentConfig {
        ComponentConfig::new()
            .name(Self::NAME)
            .css_class(Self::CSS_CLASS)
            .constructor(|doc: &mut dyn Document, element: NodeId| {
                Clock::new(doc, element, Local::now().time())
            })
    }

    pub fn new(doc: &mut dyn Document, element: NodeId, now: NaiveTime) -> Self {
        let format = Rc::new(Cell::new(ClockFormat::TwentyFourHour));

        let toggle = Rc::clone(&format);
        doc.add_event_listener(
            element,
            "click",
            Box::new(move |_event: &Event| toggle.set(toggle.get().toggled())),
        );
        doc.add_class(element, ACTIVE_CLASS);

        let mut clock = Self {
            element,
            format,
            renders: 0,
        };
        clock.render(doc, now);
        clock
    }

    pub fn format(&self) -> ClockFormat {
        self.format.get()
    }

    pub fn renders(&self) -> u32 {
        self.renders
    }

    pub fn render(&mut self, doc: &mut dyn Document, now: NaiveTime) {
        let text = now.format(self.format.get().pattern()).to_string();
        doc.set_text(self.element, &text);
        self.renders += 1;
    }

    /// Re-render with the current local time
    pub fn tick(&mut self, doc: &mut dyn Document) {
        self.render(doc, Local::now().time());
    }
}

impl Component for Clock {
    fn downgrade(&mut self, doc: &mut dyn Document, element: NodeId) {
        let listeners = doc.remove_event_listeners(element, "click");
        doc.remove_class(element, ACTIVE_CLASS);
        doc.set_text(element, "");
        debug!(%element, listeners, renders = self.renders, "clock stopped");
    }
}
