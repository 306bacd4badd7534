//! Password strength evaluator - main evaluation logic.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::score::{PasswordEvaluation, PasswordScore};
use crate::sections::{
    character_variety_section, length_section, repetition_section, SectionResult,
};

type Section = fn(&str) -> SectionResult;

const SECTIONS: [(&str, Section); 3] = [
    ("length", length_section),
    ("variety", character_variety_section),
    ("pattern", repetition_section),
];

/// Computes the 0..=100 strength score of `password`.
///
/// Pure: the same input always yields the same score.
///
/// ```
/// use page_enhancer::password_strength;
///
/// assert_eq!(password_strength("").value(), 0);
/// assert_eq!(password_strength("Password1").value(), 66);
/// ```
pub fn password_strength(password: &str) -> PasswordScore {
    run_sections(password, || false)
        .score
        .unwrap_or_default()
}

/// Evaluates password strength and returns a detailed evaluation.
///
/// # Arguments
/// * `password` - The password to evaluate
/// * `token` - Optional cancellation token (async feature only)
///
/// # Returns
/// A `PasswordEvaluation` containing score and reasons. The score is
/// `None` if the evaluation was cancelled or a section failed.
pub fn evaluate_password_strength(
    password: &SecretString,
    #[cfg(feature = "async")] token: Option<CancellationToken>,
) -> PasswordEvaluation {
    #[cfg(feature = "async")]
    let is_cancelled = || token.as_ref().is_some_and(|t| t.is_cancelled());

    #[cfg(not(feature = "async"))]
    let is_cancelled = || false;

    run_sections(password.expose_secret(), is_cancelled)
}

fn run_sections(pwd: &str, is_cancelled: impl Fn() -> bool) -> PasswordEvaluation {
    if pwd.is_empty() {
        return PasswordEvaluation {
            score: Some(PasswordScore::new(0)),
            reasons: vec!["Password is empty".to_string()],
        };
    }

    let mut reasons = Vec::new();
    let mut total: i64 = 0;

    // Orchestrator: execute sections in sequence
    for (section_name, section_fn) in SECTIONS {
        if is_cancelled() {
            reasons.push("Evaluation cancelled".to_string());
            return PasswordEvaluation {
                score: None,
                reasons,
            };
        }

        match section_fn(pwd) {
            Ok(outcome) => {
                total += outcome.points;
                reasons.extend(outcome.reason);
            }
            Err(()) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Fatal error in password evaluation section: {}", section_name);
                #[cfg(not(feature = "tracing"))]
                let _ = section_name;
                reasons.push("Error".to_string());
                return PasswordEvaluation {
                    score: None,
                    reasons,
                };
            }
        }
    }

    PasswordEvaluation {
        score: Some(PasswordScore::new(total)),
        reasons,
    }
}

/// Async version that sends evaluation result via channel.
///
/// Waits out a short debounce first so that a burst of keystrokes only
/// produces one evaluation once the caller cancels the stale tokens.
#[cfg(feature = "async")]
pub async fn evaluate_password_strength_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<PasswordEvaluation>,
) {
    use std::time::Duration;

    #[cfg(feature = "tracing")]
    tracing::info!("evaluation is about to start...");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let evaluation = evaluate_password_strength(password, Some(token));

    if let Err(e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::PasswordStrength;

    fn evaluate(pwd: &str) -> PasswordEvaluation {
        let pwd = SecretString::new(pwd.to_string().into());

        #[cfg(feature = "async")]
        let evaluation = evaluate_password_strength(&pwd, None);

        #[cfg(not(feature = "async"))]
        let evaluation = evaluate_password_strength(&pwd);

        evaluation
    }

    #[test]
    fn test_reference_scores() {
        let cases = [
            ("", 0),
            ("aaa", 12),
            ("aaaa", 16),
            ("password", 42),
            ("Password1", 66),
            ("P@ssw0rd!23", 85),
            ("\u{1F600}", 23),
            ("\u{1F600}\u{1F600}\u{1F600}", 39),
            ("\n\n\n", 27),
        ];
        for (pwd, expected) in cases {
            assert_eq!(
                password_strength(pwd).value(),
                expected,
                "unexpected score for {:?}",
                pwd
            );
        }
    }

    #[test]
    fn test_repeat_penalty_anywhere_and_once() {
        assert_eq!(password_strength("Abcdef1!xxx").value(), 75);
        assert_eq!(password_strength("aaabbbccc").value(), 36);
    }

    #[test]
    fn test_score_never_exceeds_bounds() {
        let long = "Zz9!".repeat(40);
        for pwd in ["a", "!!!", "a1", long.as_str(), "ééé", "\u{1F600}"] {
            assert!(password_strength(pwd).value() <= 100);
        }
    }

    #[test]
    fn test_monotone_in_length_up_to_cap() {
        let mut previous = 0;
        for len in 1..=12 {
            let pwd: String = "abcdefghijkl".chars().take(len).collect();
            let score = password_strength(&pwd).value();
            assert!(score >= previous, "score dropped at length {}", len);
            previous = score;
        }
        assert_eq!(password_strength("abcdefghij"), password_strength("abcdefghijkl"));
    }

    #[test]
    fn test_adding_a_class_never_decreases() {
        let base = ["abcdef", "ABCDEF", "123456", "abc123", "ABCdef"];
        let extras = ['a', 'Z', '7', '#'];
        for pwd in base {
            for extra in extras {
                let extended = format!("{}{}", pwd, extra);
                assert!(password_strength(&extended) >= password_strength(pwd));
            }
        }
    }

    #[test]
    fn test_scoring_is_pure() {
        assert_eq!(password_strength("Tr0ub4dor&3"), password_strength("Tr0ub4dor&3"));
    }

    #[test]
    fn test_evaluate_weak_short_password() {
        let evaluation = evaluate("abc");
        assert_eq!(evaluation.strength(), PasswordStrength::Weak);
        assert_eq!(evaluation.score.unwrap().value(), 22);
        assert!(!evaluation.reasons.is_empty());
    }

    #[test]
    fn test_evaluate_medium_password() {
        let evaluation = evaluate("Password1");
        assert_eq!(evaluation.strength(), PasswordStrength::Medium);
        assert_eq!(evaluation.reasons, vec!["Missing: special characters".to_string()]);
    }

    #[test]
    fn test_evaluate_strong_password() {
        let evaluation = evaluate("P@ssw0rd!23");
        assert_eq!(evaluation.strength(), PasswordStrength::Strong);
        assert!(evaluation.reasons.is_empty());
    }

    #[test]
    fn test_evaluate_empty_password() {
        let evaluation = evaluate("");
        assert_eq!(evaluation.strength(), PasswordStrength::Weak);
        assert_eq!(evaluation.score.unwrap().value(), 0);
        assert!(!evaluation.reasons.is_empty());
    }

    #[test]
    fn test_evaluate_matches_plain_score() {
        for pwd in ["aaaa", "password", "MyPass123!", "VeryStrongPassword123!@#"] {
            assert_eq!(evaluate(pwd).score, Some(password_strength(pwd)));
        }
    }
}

#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::score::PasswordStrength;

    #[tokio::test]
    async fn test_evaluate_with_cancellation() {
        let token = CancellationToken::new();
        token.cancel();

        let pwd = SecretString::new("SomePassword123!".to_string().into());
        let evaluation = evaluate_password_strength(&pwd, Some(token));

        assert_eq!(evaluation.strength(), PasswordStrength::NotEvaluated);
        assert!(evaluation.score.is_none());
        assert!(!evaluation.reasons.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_without_cancellation() {
        let token = CancellationToken::new();

        let pwd = SecretString::new("TestPass123!".to_string().into());
        let evaluation = evaluate_password_strength(&pwd, Some(token));

        assert_ne!(evaluation.strength(), PasswordStrength::NotEvaluated);
        assert_eq!(evaluation.score, Some(password_strength("TestPass123!")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_evaluate_password_strength_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        let pwd = SecretString::new("TestPass123!".to_string().into());

        evaluate_password_strength_tx(&pwd, token, tx).await;

        let evaluation = rx.recv().await.expect("Should receive evaluation");
        assert!(evaluation.score.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_evaluate_tx_cancelled_during_debounce() {
        use std::time::Duration;

        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        let pwd = SecretString::new("TestPass123!".to_string().into());

        let started = tokio::time::Instant::now();
        let evaluation = evaluate_password_strength_tx(&pwd, token.clone(), tx);
        let canceller = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            token.cancel();
        };
        assert!(!token.is_cancelled());
        tokio::join!(evaluation, canceller);

        assert!(started.elapsed() >= Duration::from_millis(300));
        let evaluation = rx.recv().await.expect("Should receive evaluation");
        assert!(evaluation.score.is_none());
        assert_eq!(evaluation.reasons, vec!["Evaluation cancelled".to_string()]);
    }
}
