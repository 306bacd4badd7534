//! Entrance animation for the main content region.

use crate::config::EnhancerConfig;
use crate::dom::{Document, DomError, NodeId};

pub const FADE_IN_CLASS: &str = "fade-in";
pub const FADE_IN_STYLES_ID: &str = "fade-in-styles";

const FADE_IN_CSS: &str = "\
@keyframes fadeIn {
    from { opacity: 0; transform: translateY(20px); }
    to { opacity: 1; transform: translateY(0); }
}
.fade-in {
    animation: fadeIn 0.6s ease-out forwards;
}
";

/// Animates the first element under `root` carrying every main-content
/// class. Returns the animated element, if any.
pub fn fade_in_content(
    doc: &mut Document,
    root: NodeId,
    config: &EnhancerConfig,
) -> Result<Option<NodeId>, DomError> {
    let classes = &config.main_content_classes;
    if classes.is_empty() {
        return Ok(None);
    }
    let Some(main) = doc.select_first(root, |e| classes.iter().all(|c| e.has_class(c)))? else {
        return Ok(None);
    };

    if doc.get_element_by_id(FADE_IN_STYLES_ID).is_none() {
        let head = doc.head();
        let style = doc.append_element(head, "style", "")?;
        doc.set_attr(style, "id", FADE_IN_STYLES_ID)?;
        doc.set_text_content(style, FADE_IN_CSS)?;
    }

    doc.add_class(main, FADE_IN_CLASS)?;
    Ok(Some(main))
}
