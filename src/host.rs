//! Platform services the enhancers call into but do not own.

use crate::dom::{Document, DomError, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// The embedding environment: prompts, window scrolling, history and layout.
pub trait Host {
    /// Shows a blocking confirmation prompt; `true` when the user accepts.
    fn confirm(&mut self, message: &str) -> bool;

    /// Scrolls the window so that its top edge sits at `top` pixels.
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Replaces the address fragment without navigating.
    fn push_state(&mut self, fragment: &str);

    /// Distance in pixels from the top of the page to `node`.
    fn offset_top(&self, doc: &Document, node: NodeId) -> f64;

    /// Attaches the tooltip widget to `node`.
    ///
    /// The default mirrors what the Bootstrap widget does to the markup: the
    /// `title` moves to `data-bs-original-title` so the native tooltip does
    /// not show twice, and an `aria-label` is added when missing.
    fn attach_tooltip(&mut self, doc: &mut Document, node: NodeId) -> Result<(), DomError> {
        let element = doc.element_mut(node)?;
        if let Some(title) = element.attrs.remove("title") {
            if !element.has_attr("aria-label") {
                element.attrs.insert("aria-label".to_string(), title.clone());
            }
            element
                .attrs
                .insert("data-bs-original-title".to_string(), title);
        }
        element
            .attrs
            .insert("data-tooltip-attached".to_string(), "true".to_string());
        Ok(())
    }
}

/// A host that records every call, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    /// Answers handed out by `confirm`, front first; accepts once exhausted.
    pub answers: std::collections::VecDeque<bool>,
    pub prompts: Vec<String>,
    pub scrolls: Vec<(f64, ScrollBehavior)>,
    pub fragments: Vec<String>,
    pub offsets: std::collections::HashMap<NodeId, f64>,
}

#[cfg(test)]
impl RecordingHost {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Host for RecordingHost {
    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.answers.pop_front().unwrap_or(true)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scrolls.push((top, behavior));
    }

    fn push_state(&mut self, fragment: &str) {
        self.fragments.push(fragment.to_string());
    }

    fn offset_top(&self, _doc: &Document, node: NodeId) -> f64 {
        self.offsets.get(&node).copied().unwrap_or(0.0)
    }
}
