//! Form validation feedback and the live password strength meter.

use super::{EventKind, EventOutcome, EventTarget, Handler, Page};
use crate::dom::{Document, DomError, Element, NodeId};
use crate::evaluator::password_strength;
use crate::score::{PasswordScore, PasswordStrength};

pub const VALIDATED_CLASS: &str = "was-validated";
pub const METER_CLASS: &str = "password-strength-meter";

/// Wires submit validation on `form.needs-validation` and a strength meter on
/// every `input[type="password"]` under `root`.
pub fn init_form_validation(
    doc: &mut Document,
    root: NodeId,
    page: &mut Page,
) -> Result<usize, DomError> {
    let forms = doc.select_all(root, |e| e.is("form") && e.has_class("needs-validation"))?;
    for &form in &forms {
        page.listen(EventTarget::Node(form), EventKind::Submit, Handler::Validate);
    }

    let password_inputs = doc.select_all(root, is_password_input)?;
    let mut meters = 0;
    for input in password_inputs {
        if let Some(meter) = attach_meter(doc, input, page)? {
            page.listen(
                EventTarget::Node(input),
                EventKind::Input,
                Handler::StrengthMeter { meter },
            );
            meters += 1;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(forms = forms.len(), meters, "form validation wired");

    Ok(forms.len() + meters)
}

fn is_password_input(element: &Element) -> bool {
    element.is("input")
        && element
            .attr("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("password"))
}

/// Appends a meter to the input's parent, reusing one this page has not
/// claimed yet. Detached inputs get none.
fn attach_meter(doc: &mut Document, input: NodeId, page: &Page) -> Result<Option<NodeId>, DomError> {
    let Some(parent) = doc.parent(input)? else {
        return Ok(None);
    };

    let claimed: Vec<NodeId> = page
        .handlers()
        .filter_map(|h| match h {
            Handler::StrengthMeter { meter } => Some(*meter),
            _ => None,
        })
        .collect();
    let existing = doc
        .children(parent)?
        .iter()
        .copied()
        .find(|&c| {
            !claimed.contains(&c)
                && doc.element(c).is_ok_and(|e| e.has_class(METER_CLASS))
        });
    if let Some(meter) = existing {
        return Ok(Some(meter));
    }

    let meter = doc.append_element(parent, "div", METER_CLASS)?;
    doc.add_class(meter, "mt-1")?;
    Ok(Some(meter))
}

/// Native constraint validation over the form's enabled controls.
pub fn form_is_valid(doc: &Document, form: NodeId) -> Result<bool, DomError> {
    let controls = doc.select_all(form, |e| {
        (e.is("input") || e.is("textarea") || e.is("select")) && !e.has_attr("disabled")
    })?;
    for control in controls {
        if !control_is_valid(doc.element(control)?) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn control_is_valid(element: &Element) -> bool {
    let input_type = element
        .attr("type")
        .unwrap_or("text")
        .to_ascii_lowercase();
    if element.is("input") && matches!(input_type.as_str(), "hidden" | "submit" | "button" | "reset") {
        return true;
    }

    if element.is("input") && matches!(input_type.as_str(), "checkbox" | "radio") {
        return !element.has_attr("required") || element.has_attr("checked");
    }

    let value = element.value.as_str();
    if value.is_empty() {
        return !element.has_attr("required");
    }

    let len = value.encode_utf16().count();
    let limit = |name: &str| element.attr(name).and_then(|v| v.trim().parse::<usize>().ok());
    if limit("minlength").is_some_and(|min| len < min) {
        return false;
    }
    if limit("maxlength").is_some_and(|max| len > max) {
        return false;
    }

    if element.is("input") && input_type == "email" {
        return is_plausible_email(value);
    }
    true
}

fn is_plausible_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

pub(super) fn on_submit(
    doc: &mut Document,
    form: NodeId,
    outcome: &mut EventOutcome,
) -> Result<(), DomError> {
    if !form_is_valid(doc, form)? {
        outcome.prevent_default();
        outcome.stop_propagation();
    }
    doc.add_class(form, VALIDATED_CLASS)
}

pub(super) fn on_password_input(
    doc: &mut Document,
    input: NodeId,
    meter: NodeId,
) -> Result<(), DomError> {
    let score = password_strength(doc.value(input)?);
    render_strength_meter(doc, meter, score)
}

/// Replaces the meter's content with a progress bar and the tier label.
pub fn render_strength_meter(
    doc: &mut Document,
    meter: NodeId,
    score: PasswordScore,
) -> Result<(), DomError> {
    let strength = PasswordStrength::from_score(score);
    doc.clear_children(meter)?;

    let progress = doc.append_element(meter, "div", "progress")?;
    doc.set_style(progress, "height", "5px")?;

    let bar = doc.append_element(progress, "div", "progress-bar")?;
    doc.add_class(bar, strength.css_class())?;
    doc.set_attr(bar, "role", "progressbar")?;
    doc.set_style(bar, "width", &format!("{}%", score))?;
    doc.set_attr(bar, "aria-valuenow", &score.to_string())?;
    doc.set_attr(bar, "aria-valuemin", "0")?;
    doc.set_attr(bar, "aria-valuemax", "100")?;

    let label = doc.append_element(meter, "small", "text-muted")?;
    doc.set_text_content(label, strength.label())
}
