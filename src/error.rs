//! Error taxonomy for the security layer.
//!
//! Cryptographic and token failures are hard errors surfaced to the caller.
//! Sanitizers and validators return strings/booleans and never fail; a
//! rate-limit rejection is reported through the decision value, not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecurityError {
    /// Signature invalid or token expired.
    #[error("invalid or expired token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Token could not be signed.
    #[error("token signing failed")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),

    /// Ciphertext did not authenticate under the configured key.
    #[error("decryption failed")]
    Decryption,

    /// Payload is not of the `nonceHex:cipherHex` form.
    #[error("malformed encrypted payload")]
    MalformedPayload,

    /// Encryption key is not 32 bytes of hex.
    #[error("encryption key must be 64 hex characters (32 bytes)")]
    InvalidKey,

    /// The adaptive hash primitive rejected its input.
    #[error("password hashing failed")]
    Hashing(#[source] bcrypt::BcryptError),
}
