//! Password strength scoring and page enhancement routines
//!
//! This library scores candidate passwords with a small heuristic and
//! provides the page enhancements that surround a registration or editing
//! form: tooltips, validation feedback with a live strength meter, smooth
//! anchor scrolling, a back-to-top control, character counters, delete
//! confirmations, an entrance animation and localized dates.
//!
//! The enhancements operate on an explicit in-memory [`Document`] and call
//! into a [`Host`] for anything the platform owns (prompts, scrolling,
//! history, layout).
//!
//! # Features
//!
//! - `async` (default): Enables debounced async evaluation with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! See [`EnhancerConfig::from_env`] for the overrides it reads.
//!
//! # Example
//!
//! ```rust
//! use page_enhancer::{password_strength, PasswordStrength};
//!
//! let score = password_strength("P@ssw0rd!23");
//! assert_eq!(score.value(), 85);
//! assert_eq!(PasswordStrength::from_score(score), PasswordStrength::Strong);
//! ```

mod config;
mod dom;
mod enhance;
mod evaluator;
mod host;
mod score;
mod sections;

pub use config::{
    BACK_TO_TOP_THRESHOLD_VAR, ConfigError, EnhancerConfig, LONG_CONTENT_THRESHOLD_VAR,
    SCROLL_OFFSET_VAR,
};
pub use dom::{Document, DomError, Element, Node, NodeId, NodeType};
pub use enhance::{
    BACK_TO_TOP_ID, COUNTER_CLASS, DateLocale, Event, EventKind, EventOutcome, EventTarget,
    FADE_IN_CLASS, FADE_IN_STYLES_ID, INVALID_DATE, METER_CLASS, Page, fade_in_content,
    form_is_valid, format_date, format_dates, init_back_to_top, init_character_counters,
    init_delete_confirmations, init_form_validation, init_smooth_scroll, init_tooltips,
    initialize_page, parse_datetime, render_strength_meter,
};
pub use evaluator::{evaluate_password_strength, password_strength};
pub use host::{Host, ScrollBehavior};
pub use score::{MAX_SCORE, PasswordEvaluation, PasswordScore, PasswordStrength};

#[cfg(feature = "async")]
pub use evaluator::evaluate_password_strength_tx;
