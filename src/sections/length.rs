//! Length section - rewards longer passwords.

use super::{SectionOutcome, SectionResult};

/// Points per character.
const POINTS_PER_CHAR: i64 = 4;
/// Cap reached at ten characters.
const MAX_LENGTH_POINTS: i64 = 40;
/// Below this length a finding is reported.
const MIN_LENGTH: usize = 8;

/// Scores the password length: `min(length * 4, 40)`.
///
/// Length is measured in UTF-16 code units, the unit browsers report for a
/// field's value, so a character outside the BMP counts twice.
///
/// # Returns
/// - `Ok(outcome)` with a finding if the password is shorter than 8 characters
pub fn length_section(password: &str) -> SectionResult {
    let len = password.encode_utf16().count();
    let points = (len as i64 * POINTS_PER_CHAR).min(MAX_LENGTH_POINTS);
    if len < MIN_LENGTH {
        return Ok(SectionOutcome::with_reason(
            points,
            format!("Password must be at least {} characters", MIN_LENGTH),
        ));
    }
    Ok(SectionOutcome::points(points))
}
