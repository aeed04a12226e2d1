//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the security layer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// Fixed-window rate limiting.
    pub rate_limit: RateLimitConfig,

    /// Password hashing work factor.
    pub password: PasswordConfig,

    /// JWT signing secret and expiry.
    pub token: TokenConfig,

    /// Symmetric encryption key.
    pub encryption: EncryptionConfig,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window length in milliseconds.
    pub window_ms: u64,

    /// Maximum requests per identifier per window.
    pub max_requests: u32,

    /// Interval between cleanup sweeps, in seconds.
    pub cleanup_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: 900_000, // 15 minutes
            max_requests: 100,
            cleanup_interval_secs: 3_600,
        }
    }
}

/// Password hashing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// bcrypt cost factor.
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// HMAC signing secret.
    pub secret: String,

    /// Default token lifetime in seconds.
    pub expiry_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expiry_secs: 604_800, // 7 days
        }
    }
}

/// Symmetric encryption configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EncryptionConfig {
    /// AES-256 key, hex encoded (64 characters).
    pub key_hex: String,
}
