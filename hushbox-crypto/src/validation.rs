//! Password strength policy.
//!
//! Advisory only: no encryption operation consults this module. The report
//! is surfaced to the UI so the user can be nudged toward a stronger
//! password before sealing anything with a weak one.

use crate::error::{CryptoError, CryptoResult};
use serde::Serialize;

/// Minimum password length required for a valid password.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Coarse strength classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

/// Outcome of a strength check.
#[derive(Clone, Debug, Serialize)]
pub struct StrengthReport {
    /// All five criteria satisfied.
    pub is_valid: bool,
    pub strength: Strength,
    /// Human-readable description of each unmet criterion.
    pub feedback: Vec<String>,
}

impl StrengthReport {
    /// Turns an invalid report into an error, for callers that want to
    /// block on the policy instead of merely displaying it.
    pub fn require(&self) -> CryptoResult<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(CryptoError::Validation(self.feedback.join("; ")))
        }
    }
}

/// Checks a password against five criteria: minimum length plus presence
/// of an uppercase letter, a lowercase letter, a digit, and a
/// punctuation/symbol character.
///
/// All five satisfied is `Strong` and valid; three or four is `Medium`;
/// fewer is `Weak`. Only a `Strong` password is considered valid.
pub fn validate_password(password: &str) -> StrengthReport {
    let mut feedback = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        feedback.push(format!(
            "must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    if !password.chars().any(char::is_uppercase) {
        feedback.push("must contain an uppercase letter".to_string());
    }
    if !password.chars().any(char::is_lowercase) {
        feedback.push("must contain a lowercase letter".to_string());
    }
    if !password.chars().any(char::is_numeric) {
        feedback.push("must contain a digit".to_string());
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        feedback.push("must contain a punctuation or symbol character".to_string());
    }

    let satisfied = 5 - feedback.len();
    let strength = match satisfied {
        5 => Strength::Strong,
        3..=4 => Strength::Medium,
        _ => Strength::Weak,
    };

    StrengthReport {
        is_valid: satisfied == 5,
        strength,
        feedback,
    }
}
