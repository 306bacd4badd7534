//! Floating back-to-top control.

use super::{EventKind, EventTarget, Handler, Page};
use crate::dom::{Document, DomError, NodeId};
use crate::host::{Host, ScrollBehavior};

pub const BACK_TO_TOP_ID: &str = "back-to-top";

/// Creates the button once (or adopts an existing `#back-to-top`), then
/// wires its visibility to window scrolling and its click to the page top.
///
/// Returns the button.
pub fn init_back_to_top(doc: &mut Document, page: &mut Page) -> Result<NodeId, DomError> {
    let button = match doc.get_element_by_id(BACK_TO_TOP_ID) {
        Some(existing) => existing,
        None => create_button(doc, page)?,
    };

    page.listen(
        EventTarget::Window,
        EventKind::Scroll,
        Handler::BackToTopVisibility { button },
    );
    page.listen(EventTarget::Node(button), EventKind::Click, Handler::BackToTop);
    Ok(button)
}

fn create_button(doc: &mut Document, page: &Page) -> Result<NodeId, DomError> {
    let config = page.config();
    let body = doc.body();
    let button = doc.append_element(
        body,
        "button",
        "btn btn-primary btn-sm rounded-circle position-fixed",
    )?;
    doc.set_attr(button, "id", BACK_TO_TOP_ID)?;
    doc.set_style(button, "bottom", "20px")?;
    doc.set_style(button, "right", "20px")?;
    doc.set_style(button, "display", "none")?;
    doc.set_style(button, "z-index", "1000")?;
    doc.append_element(button, "i", "bi bi-arrow-up")?;
    doc.set_attr(button, "aria-label", &config.back_to_top_label)?;
    doc.set_attr(button, "title", &config.back_to_top_label)?;

    let root = doc.root();
    let has_icons = doc
        .select_first(root, |e| {
            e.is("link") && e.attr("href").is_some_and(|href| href.contains("bootstrap-icons"))
        })?
        .is_some();
    if !has_icons {
        let head = doc.head();
        let link = doc.append_element(head, "link", "")?;
        doc.set_attr(link, "rel", "stylesheet")?;
        doc.set_attr(link, "href", &config.icons_stylesheet_url)?;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(icons_added = !has_icons, "back-to-top button created");

    Ok(button)
}

pub(super) fn on_scroll(
    doc: &mut Document,
    button: NodeId,
    page_y_offset: f64,
    threshold: f64,
) -> Result<(), DomError> {
    let display = if page_y_offset > threshold { "block" } else { "none" };
    doc.set_style(button, "display", display)
}

pub(super) fn on_click(host: &mut dyn Host) {
    host.scroll_to(0.0, ScrollBehavior::Smooth);
}
