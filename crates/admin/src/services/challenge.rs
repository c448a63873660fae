//! Login challenge: a small arithmetic question answered before credentials
//! are checked, to keep automated bots away from the password endpoint.
//!
//! The expected answer lives in the session between rendering the login page
//! and handling the submit; verification is purely local and runs before any
//! database access.

use rand::Rng;

/// An arithmetic challenge shown on the login page.
#[derive(Debug, Clone)]
pub struct LoginChallenge {
    /// Question text, e.g. `7 + 3 = ?`.
    pub question: String,
    /// Expected answer, e.g. `10`.
    pub answer: String,
}

impl LoginChallenge {
    /// Generate a fresh single-digit addition challenge.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let a: u8 = rng.random_range(1..=9);
        let b: u8 = rng.random_range(1..=9);
        Self {
            question: format!("{a} + {b} = ?"),
            answer: (u16::from(a) + u16::from(b)).to_string(),
        }
    }
}

/// Check a submitted answer against the expected one.
///
/// Surrounding whitespace on the submitted answer is ignored.
#[must_use]
pub fn verify(expected: &str, provided: &str) -> bool {
    provided.trim() == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_answer_matches_question() {
        for _ in 0..50 {
            let challenge = LoginChallenge::generate();
            let (lhs, rest) = challenge
                .question
                .split_once(" + ")
                .expect("question format");
            let (rhs, _) = rest.split_once(" = ").expect("question format");
            let sum: u16 =
                lhs.parse::<u16>().expect("lhs") + rhs.parse::<u16>().expect("rhs");
            assert_eq!(challenge.answer, sum.to_string());
        }
    }

    #[test]
    fn test_verify_accepts_exact_and_trimmed() {
        assert!(verify("10", "10"));
        assert!(verify("10", " 10 "));
    }

    #[test]
    fn test_verify_rejects_wrong_answer() {
        assert!(!verify("10", "wrong"));
        assert!(!verify("10", "11"));
        assert!(!verify("10", ""));
    }
}
