//! Score, strength tier and evaluation types.

use std::fmt;

/// Upper bound of the strength score.
pub const MAX_SCORE: u8 = 100;

/// A password strength score, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PasswordScore(u8);

impl PasswordScore {
    /// Builds a score from a raw running total, clamping it to `0..=100`.
    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(0, MAX_SCORE as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PasswordScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strength tier shown next to a password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordStrength {
    NotEvaluated,
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Weak below 50, Medium from 50 to 79, Strong from 80.
    pub fn from_score(score: PasswordScore) -> Self {
        match score.value() {
            80.. => PasswordStrength::Strong,
            50..=79 => PasswordStrength::Medium,
            _ => PasswordStrength::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::NotEvaluated => "Not evaluated",
            PasswordStrength::Weak => "Weak",
            PasswordStrength::Medium => "Medium",
            PasswordStrength::Strong => "Strong",
        }
    }

    /// Background class of the progress bar for this tier.
    pub fn css_class(self) -> &'static str {
        match self {
            PasswordStrength::NotEvaluated => "bg-secondary",
            PasswordStrength::Weak => "bg-danger",
            PasswordStrength::Medium => "bg-warning",
            PasswordStrength::Strong => "bg-success",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a full evaluation: the score (absent when cancelled or failed)
/// and the findings that explain it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordEvaluation {
    pub score: Option<PasswordScore>,
    pub reasons: Vec<String>,
}

impl PasswordEvaluation {
    pub fn strength(&self) -> PasswordStrength {
        self.score
            .map(PasswordStrength::from_score)
            .unwrap_or(PasswordStrength::NotEvaluated)
    }
}
