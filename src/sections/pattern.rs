//! Pattern section - penalizes runs of a repeated character.

use super::{SectionOutcome, SectionResult};

const REPETITION_PENALTY: i64 = -10;
const RUN_LENGTH: usize = 3;

/// Subtracts 10 points once if any character repeats three or more times in a row.
///
/// Runs are compared per UTF-16 code unit, so the two halves of a surrogate
/// pair never form a run, and line terminators are never part of one.
///
/// # Returns
/// - `Ok(outcome)` with a finding if a repeated run was found
pub fn repetition_section(password: &str) -> SectionResult {
    let units: Vec<u16> = password.encode_utf16().collect();
    if units.len() < RUN_LENGTH {
        return Ok(SectionOutcome::default());
    }

    let has_run = units
        .windows(RUN_LENGTH)
        .any(|w| !is_line_terminator(w[0]) && w.iter().all(|&u| u == w[0]));
    if has_run {
        return Ok(SectionOutcome::with_reason(
            REPETITION_PENALTY,
            "Password contains repetitive patterns",
        ));
    }
    Ok(SectionOutcome::default())
}

/// `\n`, `\r`, U+2028 and U+2029.
fn is_line_terminator(unit: u16) -> bool {
    matches!(unit, 0x000A | 0x000D | 0x2028 | 0x2029)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repetition_section_triple() {
        let result = repetition_section("aaa").unwrap();
        assert_eq!(result.points, -10);
        assert!(result.reason.unwrap().contains("repetitive"));
    }

    #[test]
    fn test_repetition_section_run_in_the_middle() {
        assert_eq!(repetition_section("xy111z").unwrap().points, -10);
    }

    #[test]
    fn test_repetition_section_penalty_applied_once() {
        assert_eq!(repetition_section("aaaaBBBB1111").unwrap().points, -10);
    }

    #[test]
    fn test_repetition_section_pairs_are_fine() {
        assert_eq!(repetition_section("aabbcc"), Ok(SectionOutcome::default()));
    }

    #[test]
    fn test_repetition_section_ignores_line_terminators() {
        assert_eq!(repetition_section("\n\n\n"), Ok(SectionOutcome::default()));
        assert_eq!(repetition_section("\r\r\r\u{2028}\u{2028}\u{2028}"), Ok(SectionOutcome::default()));
    }

    #[test]
    fn test_repetition_section_surrogate_pairs_never_repeat() {
        let tripled = "\u{1F600}\u{1F600}\u{1F600}";
        assert_eq!(repetition_section(tripled), Ok(SectionOutcome::default()));
    }

    #[test]
    fn test_repetition_section_too_short() {
        assert_eq!(repetition_section("aa"), Ok(SectionOutcome::default()));
    }
}
