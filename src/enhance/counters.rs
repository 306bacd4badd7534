//! Live character counters under text areas.

use super::{EventKind, EventTarget, Handler, Page};
use crate::config::EnhancerConfig;
use crate::dom::{Document, DomError, NodeId};

pub const COUNTER_CLASS: &str = "char-counter";
const LONG_CONTENT_CLASS: &str = "text-warning";

/// Inserts a counter after every `textarea` under `root` that does not have
/// one yet. Returns how many counters were added.
///
/// Counts are in UTF-16 code units, matching a browser field's length.
pub fn init_character_counters(
    doc: &mut Document,
    root: NodeId,
    page: &mut Page,
) -> Result<usize, DomError> {
    let textareas = doc.select_all(root, |e| e.is("textarea"))?;
    let mut added = 0;
    for textarea in textareas {
        if doc.parent(textarea)?.is_none() || has_counter(doc, textarea)? {
            continue;
        }

        let counter = doc.create_element("div");
        doc.add_class(counter, COUNTER_CLASS)?;
        doc.add_class(counter, "text-muted small mt-1")?;
        doc.insert_after(textarea, counter)?;
        update_counter(doc, textarea, counter, page.config())?;

        page.listen(
            EventTarget::Node(textarea),
            EventKind::Input,
            Handler::CharacterCounter { counter },
        );
        added += 1;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(count = added, "character counters added");

    Ok(added)
}

fn has_counter(doc: &Document, textarea: NodeId) -> Result<bool, DomError> {
    match doc.next_element_sibling(textarea)? {
        Some(sibling) => doc.has_class(sibling, COUNTER_CLASS),
        None => Ok(false),
    }
}

fn update_counter(
    doc: &mut Document,
    textarea: NodeId,
    counter: NodeId,
    config: &EnhancerConfig,
) -> Result<(), DomError> {
    let count = doc.value(textarea)?.encode_utf16().count();
    doc.set_text_content(counter, &format!("{} {}", count, config.counter_suffix))?;
    doc.toggle_class(counter, LONG_CONTENT_CLASS, count > config.long_content_threshold)
}

pub(super) fn on_input(
    doc: &mut Document,
    textarea: NodeId,
    counter: NodeId,
    config: &EnhancerConfig,
) -> Result<(), DomError> {
    update_counter(doc, textarea, counter, config)
}
