//! Password scoring sections
//!
//! Each section scores one aspect of the password and may report a finding.

mod length;
mod pattern;
mod variety;

pub use length::length_section;
pub use pattern::repetition_section;
pub use variety::character_variety_section;

/// What a section contributes to the running total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionOutcome {
    /// Points added to (or, when negative, removed from) the score.
    pub points: i64,
    /// Human-readable finding, if the section found a weakness.
    pub reason: Option<String>,
}

impl SectionOutcome {
    pub fn points(points: i64) -> Self {
        Self { points, reason: None }
    }

    pub fn with_reason(points: i64, reason: impl Into<String>) -> Self {
        Self {
            points,
            reason: Some(reason.into()),
        }
    }
}

/// Result type for section evaluation functions.
/// - `Ok(outcome)` - Section scored, possibly with a finding
/// - `Err(())` - Fatal error during evaluation
pub type SectionResult = Result<SectionOutcome, ()>;
