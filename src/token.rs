//! JWT issuance and verification.

use std::sync::Arc;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use crate::clock::Clock;
use crate::config::TokenConfig;
use crate::error::SecurityError;

/// Open key-value claims map.
pub type Claims = Map<String, Value>;

/// HS256 token issuance under a fixed server secret.
pub struct JwtSecurity {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_secs: u64,
    clock: Arc<dyn Clock>,
}

impl JwtSecurity {
    pub fn new(config: &TokenConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            expiry_secs: config.expiry_secs,
            clock,
        }
    }

    /// Sign `claims` with the default expiry. `iat` and `exp` are stamped
    /// from the clock, overriding any caller-supplied values.
    pub fn generate_token(&self, claims: &Claims) -> Result<String, SecurityError> {
        let now_secs = self.clock.now_millis() / 1_000;
        let mut all = claims.clone();
        all.insert("iat".to_string(), Value::from(now_secs));
        all.insert("exp".to_string(), Value::from(now_secs + self.expiry_secs));

        encode(&Header::default(), &all, &self.encoding).map_err(SecurityError::TokenSigning)
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, SecurityError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(SecurityError::InvalidToken)
    }

    /// Decode without verifying the signature. For inspection only, never
    /// for authorization decisions. Malformed input yields `None`.
    pub fn decode_token(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .ok()
    }
}
