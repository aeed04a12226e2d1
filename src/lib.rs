//! Palisade — in-process security toolkit for Axum services.
//!
//! Everything here runs inside the request lifecycle of a single server
//! process: no wire protocol of its own, no persistence. Route handlers
//! sanitize raw input, consult the rate limiter, do their work, then record
//! the outcome with the audit logger. Auth routes reach for the password,
//! token, and encryption helpers as needed.
//!
//! State is explicit: the [`RateLimiter`] is a plain struct shared via `Arc`,
//! never a module-level singleton, so tests can build an isolated instance
//! with a mock clock and production can later swap in an external store.

pub mod audit;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod error;
pub mod lifecycle;
pub mod middleware;
pub mod observability;
pub mod password;
pub mod rate_limit;
pub mod sanitize;
pub mod session;
pub mod token;

pub use audit::{SecurityAudit, Severity};
pub use clock::{Clock, SystemClock};
pub use config::SecurityConfig;
pub use crypto::DataEncryption;
pub use error::SecurityError;
pub use lifecycle::Shutdown;
pub use password::PasswordSecurity;
pub use rate_limit::{RateLimitDecision, RateLimiter};
pub use token::JwtSecurity;
