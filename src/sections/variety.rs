//! Character variety section - lowercase, uppercase, digits, symbols.

use super::{SectionOutcome, SectionResult};

const LOWERCASE_POINTS: i64 = 10;
const UPPERCASE_POINTS: i64 = 10;
const DIGIT_POINTS: i64 = 10;
const SYMBOL_POINTS: i64 = 15;

/// Awards each character class once if it is present anywhere.
///
/// Anything outside `[a-zA-Z0-9]` counts as a symbol, accented letters included.
///
/// # Returns
/// - `Ok(outcome)` with a finding listing the missing classes, if any
pub fn character_variety_section(password: &str) -> SectionResult {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let classes = [
        (has_lower, LOWERCASE_POINTS, "lowercase"),
        (has_upper, UPPERCASE_POINTS, "uppercase"),
        (has_digit, DIGIT_POINTS, "numbers"),
        (has_symbol, SYMBOL_POINTS, "special characters"),
    ];

    let points: i64 = classes
        .iter()
        .filter(|(present, _, _)| *present)
        .map(|(_, points, _)| points)
        .sum();
    let missing: Vec<_> = classes
        .iter()
        .filter(|(present, _, _)| !present)
        .map(|(_, _, name)| *name)
        .collect();

    if !missing.is_empty() {
        return Ok(SectionOutcome::with_reason(
            points,
            format!("Missing: {}", missing.join(", ")),
        ));
    }
    Ok(SectionOutcome::points(points))
}
