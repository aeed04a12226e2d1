//! Semantic configuration validation.
//!
//! Serde handles the syntax; this pass checks value ranges and key shapes.
//! Returns every violation so an operator can fix a config file in one pass.

use thiserror::Error;

use crate::config::schema::SecurityConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("rate limit window_ms must be positive")]
    ZeroWindow,

    #[error("rate limit max_requests must be positive")]
    ZeroMaxRequests,

    #[error("rate limit cleanup_interval_secs must be positive")]
    ZeroCleanupInterval,

    #[error("bcrypt cost must be between 4 and 31, got {0}")]
    BcryptCostOutOfRange(u32),

    #[error("token secret must not be empty")]
    EmptyTokenSecret,

    #[error("encryption key_hex must be 64 hex characters (32 bytes)")]
    BadEncryptionKey,
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &SecurityConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rate_limit.window_ms == 0 {
        errors.push(ValidationError::ZeroWindow);
    }
    if config.rate_limit.max_requests == 0 {
        errors.push(ValidationError::ZeroMaxRequests);
    }
    if config.rate_limit.cleanup_interval_secs == 0 {
        errors.push(ValidationError::ZeroCleanupInterval);
    }

    let cost = config.password.bcrypt_cost;
    if !(4..=31).contains(&cost) {
        errors.push(ValidationError::BcryptCostOutOfRange(cost));
    }

    if config.token.secret.is_empty() {
        errors.push(ValidationError::EmptyTokenSecret);
    }

    let key = &config.encryption.key_hex;
    if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
        errors.push(ValidationError::BadEncryptionKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SecurityConfig;

    fn valid_config() -> SecurityConfig {
        let mut config = SecurityConfig::default();
        config.token.secret = "test-secret".to_string();
        config.encryption.key_hex = "00".repeat(32);
        config
    }

    #[test]
    fn default_numeric_fields_pass() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn reports_all_errors_at_once() {
        let mut config = valid_config();
        config.rate_limit.window_ms = 0;
        config.rate_limit.max_requests = 0;
        config.password.bcrypt_cost = 2;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroWindow,
                ValidationError::ZeroMaxRequests,
                ValidationError::BcryptCostOutOfRange(2),
            ]
        );
    }

    #[test]
    fn rejects_short_or_non_hex_key() {
        let mut config = valid_config();
        config.encryption.key_hex = "abc123".to_string();
        assert!(validate_config(&config).is_err());

        config.encryption.key_hex = "zz".repeat(32);
        assert!(validate_config(&config).is_err());
    }
}
