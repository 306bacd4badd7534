//! Page enhancement routines
//!
//! Each routine is independent: it queries the subtree it is given, decorates
//! what it finds and registers listeners on a [`Page`]. Nothing matching is
//! never an error. [`initialize_page`] runs them all once.

mod back_to_top;
mod confirm;
mod counters;
mod dates;
mod fade_in;
mod smooth_scroll;
mod tooltips;
mod validation;

pub use back_to_top::{BACK_TO_TOP_ID, init_back_to_top};
pub use confirm::init_delete_confirmations;
pub use counters::{COUNTER_CLASS, init_character_counters};
pub use dates::{DateLocale, INVALID_DATE, format_date, format_dates, parse_datetime};
pub use fade_in::{FADE_IN_CLASS, FADE_IN_STYLES_ID, fade_in_content};
pub use smooth_scroll::init_smooth_scroll;
pub use tooltips::init_tooltips;
pub use validation::{
    METER_CLASS, form_is_valid, init_form_validation, render_strength_meter,
};

use crate::config::EnhancerConfig;
use crate::dom::{Document, DomError, NodeId};
use crate::host::Host;

/// An event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Submit { form: NodeId },
    Click { target: NodeId },
    /// Fired after the host stored the new value on `target`.
    Input { target: NodeId },
    Scroll { page_y_offset: f64 },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Submit { .. } => EventKind::Submit,
            Event::Click { .. } => EventKind::Click,
            Event::Input { .. } => EventKind::Input,
            Event::Scroll { .. } => EventKind::Scroll,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Submit,
    Click,
    Input,
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    Node(NodeId),
    Window,
}

/// What the listeners decided about an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl EventOutcome {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Handler {
    Validate,
    StrengthMeter { meter: NodeId },
    SmoothScroll,
    BackToTopVisibility { button: NodeId },
    BackToTop,
    CharacterCounter { counter: NodeId },
    Confirm { fallback: String },
}

#[derive(Debug, Clone)]
struct Listener {
    target: EventTarget,
    kind: EventKind,
    handler: Handler,
}

/// Listeners registered by the enhancement routines.
#[derive(Debug, Clone)]
pub struct Page {
    config: EnhancerConfig,
    listeners: Vec<Listener>,
}

impl Page {
    pub fn new(config: EnhancerConfig) -> Self {
        Self {
            config,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of listeners of `kind` registered on `target`.
    pub fn listeners_on(&self, target: EventTarget, kind: EventKind) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .count()
    }

    pub(crate) fn listen(&mut self, target: EventTarget, kind: EventKind, handler: Handler) {
        self.listeners.push(Listener {
            target,
            kind,
            handler,
        });
    }

    pub(crate) fn handlers(&self) -> impl Iterator<Item = &Handler> {
        self.listeners.iter().map(|l| &l.handler)
    }

    /// Delivers `event` to the registered listeners.
    ///
    /// Node events bubble from the target through its ancestors; listeners on
    /// the same node run in registration order, and a stopped propagation
    /// ends the walk once the current node is done.
    pub fn dispatch(
        &self,
        doc: &mut Document,
        host: &mut dyn Host,
        event: Event,
    ) -> Result<EventOutcome, DomError> {
        let path = match event {
            Event::Scroll { .. } => vec![EventTarget::Window],
            Event::Submit { form: node }
            | Event::Click { target: node }
            | Event::Input { target: node } => doc
                .ancestors_inclusive(node)?
                .into_iter()
                .map(EventTarget::Node)
                .collect(),
        };

        let kind = event.kind();
        let mut outcome = EventOutcome::default();
        for current in path {
            for listener in self
                .listeners
                .iter()
                .filter(|l| l.target == current && l.kind == kind)
            {
                self.run(doc, host, event, current, &listener.handler, &mut outcome)?;
            }
            if outcome.propagation_stopped {
                break;
            }
        }
        Ok(outcome)
    }

    fn run(
        &self,
        doc: &mut Document,
        host: &mut dyn Host,
        event: Event,
        current: EventTarget,
        handler: &Handler,
        outcome: &mut EventOutcome,
    ) -> Result<(), DomError> {
        let config = &self.config;
        match (handler, current) {
            (Handler::BackToTopVisibility { button }, _) => {
                if let Event::Scroll { page_y_offset } = event {
                    back_to_top::on_scroll(doc, *button, page_y_offset, config.back_to_top_threshold)?;
                }
                Ok(())
            }
            (Handler::Validate, EventTarget::Node(form)) => {
                validation::on_submit(doc, form, outcome)
            }
            (Handler::StrengthMeter { meter }, EventTarget::Node(input)) => {
                validation::on_password_input(doc, input, *meter)
            }
            (Handler::SmoothScroll, EventTarget::Node(anchor)) => {
                smooth_scroll::on_click(doc, host, anchor, config.scroll_offset, outcome)
            }
            (Handler::BackToTop, _) => {
                back_to_top::on_click(host);
                Ok(())
            }
            (Handler::CharacterCounter { counter }, EventTarget::Node(textarea)) => {
                counters::on_input(doc, textarea, *counter, config)
            }
            (Handler::Confirm { fallback }, EventTarget::Node(element)) => {
                confirm::on_trigger(doc, host, element, fallback, outcome)
            }
            (_, EventTarget::Window) => Ok(()),
        }
    }
}

/// Runs every enhancement routine once over the subtree of `root`.
///
/// Call after the tree is built. The returned [`Page`] receives the events
/// afterwards through [`Page::dispatch`].
pub fn initialize_page(
    doc: &mut Document,
    root: NodeId,
    host: &mut dyn Host,
    config: EnhancerConfig,
) -> Result<Page, DomError> {
    doc.node(root)?;
    let mut page = Page::new(config);

    init_tooltips(doc, root, host)?;
    init_form_validation(doc, root, &mut page)?;
    init_smooth_scroll(doc, root, &mut page)?;
    init_back_to_top(doc, &mut page)?;
    init_character_counters(doc, root, &mut page)?;
    init_delete_confirmations(doc, root, &mut page)?;
    fade_in_content(doc, root, page.config())?;
    format_dates(doc, root)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(listeners = page.listener_count(), "page initialized");

    Ok(page)
}
