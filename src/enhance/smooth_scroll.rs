//! Smooth scrolling for same-page anchors.

use super::{EventKind, EventOutcome, EventTarget, Handler, Page};
use crate::dom::{Document, DomError, Element, NodeId};
use crate::host::{Host, ScrollBehavior};

/// Intercepts clicks on `a[href^="#"]:not([href="#"])` under `root`.
pub fn init_smooth_scroll(
    doc: &mut Document,
    root: NodeId,
    page: &mut Page,
) -> Result<usize, DomError> {
    let anchors = doc.select_all(root, is_fragment_link)?;
    for &anchor in &anchors {
        page.listen(EventTarget::Node(anchor), EventKind::Click, Handler::SmoothScroll);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(count = anchors.len(), "smooth scrolling wired");

    Ok(anchors.len())
}

fn is_fragment_link(element: &Element) -> bool {
    element.is("a")
        && element
            .attr("href")
            .is_some_and(|href| href.starts_with('#') && href != "#")
}

pub(super) fn on_click(
    doc: &mut Document,
    host: &mut dyn Host,
    anchor: NodeId,
    scroll_offset: f64,
    outcome: &mut EventOutcome,
) -> Result<(), DomError> {
    outcome.prevent_default();

    let Some(href) = doc.attr(anchor, "href")?.map(str::to_owned) else {
        return Ok(());
    };
    let Some(target) = href.strip_prefix('#').and_then(|id| doc.get_element_by_id(id)) else {
        return Ok(());
    };

    let top = host.offset_top(doc, target) - scroll_offset;
    host.scroll_to(top, ScrollBehavior::Smooth);
    host.push_state(&href);
    Ok(())
}
