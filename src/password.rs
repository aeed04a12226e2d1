//! Password hashing, verification, and strength scoring.

use serde::Serialize;

use crate::config::PasswordConfig;
use crate::error::SecurityError;

/// Special characters that count toward the strength score.
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Passwords rejected outright regardless of composition.
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "123456",
    "12345678",
    "123456789",
    "qwerty",
    "abc123",
    "111111",
    "letmein",
    "welcome",
    "iloveyou",
    "admin",
    "monkey",
];

/// Result of a strength check.
///
/// `score` is the raw heuristic: +1 per satisfied criterion, −2 for a
/// denylisted password, deliberately not clamped before the validity check.
/// `feedback` preserves the order the criteria were evaluated in.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordStrength {
    pub is_valid: bool,
    pub score: i32,
    pub feedback: Vec<String>,
}

/// Password hashing with a configured bcrypt work factor.
pub struct PasswordSecurity {
    cost: u32,
}

impl PasswordSecurity {
    pub fn new(config: &PasswordConfig) -> Self {
        Self {
            cost: config.bcrypt_cost,
        }
    }

    /// One-way adaptive hash of `password`. Accepts any string input.
    pub fn hash_password(&self, password: &str) -> Result<String, SecurityError> {
        bcrypt::hash(password, self.cost).map_err(SecurityError::Hashing)
    }

    /// Verify `password` against a stored hash.
    ///
    /// A malformed hash is a mismatch, not an error; the bcrypt verify
    /// primitive handles the timing-safe comparison.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

/// Score a password against five composition criteria and a common-password
/// denylist. `is_valid` requires at least 4 of the 5 criteria and a password
/// that is not denylisted (the −2 penalty puts even a perfect score below
/// the threshold).
pub fn validate_password_strength(password: &str) -> PasswordStrength {
    let mut score = 0i32;
    let mut feedback = Vec::new();

    let long_enough = password.chars().count() >= 8;
    if long_enough {
        score += 1;
    } else {
        feedback.push("Password must be at least 8 characters long".to_string());
    }

    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    } else {
        feedback.push("Add an uppercase letter".to_string());
    }

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    } else {
        feedback.push("Add a lowercase letter".to_string());
    }

    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    } else {
        feedback.push("Add a digit".to_string());
    }

    if password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        score += 1;
    } else {
        feedback.push("Add a special character".to_string());
    }

    let lowered = password.to_lowercase();
    if COMMON_PASSWORDS.contains(&lowered.as_str()) {
        score -= 2;
        feedback.push("Password is too common".to_string());
    }

    PasswordStrength {
        // Minimum length is mandatory; the score threshold alone would let a
        // short password through on composition criteria.
        is_valid: long_enough && score >= 4,
        score,
        feedback,
    }
}
