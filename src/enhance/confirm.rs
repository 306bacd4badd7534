//! Confirmation prompts before destructive actions.

use super::{EventKind, EventOutcome, EventTarget, Handler, Page};
use crate::dom::{Document, DomError, NodeId};
use crate::host::Host;

/// Guards `form[data-confirm]` submissions and `button[data-confirm]` /
/// `a[data-confirm]` clicks under `root` with a confirmation prompt.
pub fn init_delete_confirmations(
    doc: &mut Document,
    root: NodeId,
    page: &mut Page,
) -> Result<usize, DomError> {
    let forms = doc.select_all(root, |e| e.is("form") && e.has_attr("data-confirm"))?;
    let triggers = doc.select_all(root, |e| {
        (e.is("button") || e.is("a")) && e.has_attr("data-confirm")
    })?;

    let delete_message = page.config().delete_confirm_message.clone();
    for &form in &forms {
        page.listen(
            EventTarget::Node(form),
            EventKind::Submit,
            Handler::Confirm {
                fallback: delete_message.clone(),
            },
        );
    }

    let action_message = page.config().action_confirm_message.clone();
    for &trigger in &triggers {
        page.listen(
            EventTarget::Node(trigger),
            EventKind::Click,
            Handler::Confirm {
                fallback: action_message.clone(),
            },
        );
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(forms = forms.len(), triggers = triggers.len(), "confirmations wired");

    Ok(forms.len() + triggers.len())
}

pub(super) fn on_trigger(
    doc: &mut Document,
    host: &mut dyn Host,
    element: NodeId,
    fallback: &str,
    outcome: &mut EventOutcome,
) -> Result<(), DomError> {
    let message = doc
        .attr(element, "data-confirm")?
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string();
    if !host.confirm(&message) {
        outcome.prevent_default();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnhancerConfig;
    use crate::enhance::Event;
    use crate::host::RecordingHost;

    #[test]
    fn test_custom_message_and_decline() {
        let mut doc = Document::new();
        let link = doc.append_element(doc.body(), "a", "").unwrap();
        doc.set_attr(link, "data-confirm", "Remove this comment?").unwrap();
        let mut host = RecordingHost::answering(&[false]);
        let mut outcome = EventOutcome::default();

        on_trigger(&mut doc, &mut host, link, "fallback", &mut outcome).unwrap();

        assert!(outcome.default_prevented);
        assert_eq!(host.prompts, vec!["Remove this comment?".to_string()]);
    }

    #[test]
    fn test_accepted_prompt_lets_action_through() {
        let mut doc = Document::new();
        let button = doc.append_element(doc.body(), "button", "").unwrap();
        doc.set_attr(button, "data-confirm", "Sure?").unwrap();
        let mut host = RecordingHost::answering(&[true]);
        let mut outcome = EventOutcome::default();

        on_trigger(&mut doc, &mut host, button, "fallback", &mut outcome).unwrap();

        assert!(!outcome.default_prevented);
    }

    #[test]
    fn test_empty_attribute_uses_defaults() {
        let mut doc = Document::new();
        let body = doc.body();
        let form = doc.append_element(body, "form", "").unwrap();
        doc.set_attr(form, "data-confirm", "").unwrap();
        let button = doc.append_element(body, "button", "").unwrap();
        doc.set_attr(button, "data-confirm", "").unwrap();
        let plain = doc.append_element(body, "button", "").unwrap();

        let mut page = Page::new(EnhancerConfig::default());
        assert_eq!(init_delete_confirmations(&mut doc, body, &mut page).unwrap(), 2);

        let mut host = RecordingHost::answering(&[false, false]);
        let submit = page.dispatch(&mut doc, &mut host, Event::Submit { form }).unwrap();
        let click = page.dispatch(&mut doc, &mut host, Event::Click { target: button }).unwrap();
        let untouched = page.dispatch(&mut doc, &mut host, Event::Click { target: plain }).unwrap();

        assert!(submit.default_prevented);
        assert!(click.default_prevented);
        assert!(!untouched.default_prevented);
        assert_eq!(
            host.prompts,
            vec![
                "Are you sure you want to delete this item?".to_string(),
                "Are you sure you want to continue?".to_string(),
            ]
        );
    }

    #[test]
    fn test_unflagged_elements_are_ignored() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.append_element(body, "form", "").unwrap();
        let div = doc.append_element(body, "div", "").unwrap();
        doc.set_attr(div, "data-confirm", "Not a trigger").unwrap();

        let mut page = Page::new(EnhancerConfig::default());
        assert_eq!(init_delete_confirmations(&mut doc, body, &mut page).unwrap(), 0);
        assert_eq!(page.listener_count(), 0);
    }
}
