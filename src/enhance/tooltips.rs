//! Tooltip activation.

use crate::dom::{Document, DomError, NodeId};
use crate::host::Host;

/// Hands every `[data-bs-toggle="tooltip"]` element under `root` to the
/// host's tooltip widget. Returns how many were attached.
pub fn init_tooltips(
    doc: &mut Document,
    root: NodeId,
    host: &mut dyn Host,
) -> Result<usize, DomError> {
    let triggers = doc.select_all(root, |e| e.attr("data-bs-toggle") == Some("tooltip"))?;
    for &trigger in &triggers {
        host.attach_tooltip(doc, trigger)?;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(count = triggers.len(), "tooltips attached");

    Ok(triggers.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;

    #[test]
    fn test_tooltip_title_moves_to_widget_attribute() {
        let mut doc = Document::new();
        let body = doc.body();
        let link = doc.append_element(body, "a", "").unwrap();
        doc.set_attr(link, "data-bs-toggle", "tooltip").unwrap();
        doc.set_attr(link, "title", "Edit profile").unwrap();
        let plain = doc.append_element(body, "a", "").unwrap();
        doc.set_attr(plain, "title", "Untouched").unwrap();

        let count = init_tooltips(&mut doc, body, &mut RecordingHost::default()).unwrap();

        assert_eq!(count, 1);
        assert_eq!(doc.attr(link, "title").unwrap(), None);
        assert_eq!(doc.attr(link, "data-bs-original-title").unwrap(), Some("Edit profile"));
        assert_eq!(doc.attr(link, "aria-label").unwrap(), Some("Edit profile"));
        assert_eq!(doc.attr(plain, "title").unwrap(), Some("Untouched"));
    }

    #[test]
    fn test_existing_aria_label_is_kept() {
        let mut doc = Document::new();
        let button = doc.append_element(doc.body(), "button", "").unwrap();
        doc.set_attr(button, "data-bs-toggle", "tooltip").unwrap();
        doc.set_attr(button, "title", "Remove").unwrap();
        doc.set_attr(button, "aria-label", "Remove comment").unwrap();

        let root = doc.root();
        init_tooltips(&mut doc, root, &mut RecordingHost::default()).unwrap();

        assert_eq!(doc.attr(button, "aria-label").unwrap(), Some("Remove comment"));
    }

    #[test]
    fn test_no_triggers_is_a_no_op() {
        let mut doc = Document::new();
        let body = doc.body();
        assert_eq!(init_tooltips(&mut doc, body, &mut RecordingHost::default()).unwrap(), 0);
    }
}
