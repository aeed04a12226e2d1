//! Fixed-window rate limiting.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → handler builds an identifier ("<feature>-<client ip>")
//!     → RateLimiter::check (atomic per-key window update)
//!     → allowed: proceed; denied: 429, no counter side effect
//!
//! Background:
//!     sweeper.rs ticks every cleanup interval
//!     → cleanup() drops entries whose window has fully expired
//! ```
//!
//! # Design Decisions
//! - State is an injectable struct shared via `Arc`, not a global; a
//!   horizontally scaled deployment would swap in a shared external store
//! - DashMap entry API keeps check-then-increment atomic per identifier
//! - A denied check mutates nothing, so a burst of rejected traffic cannot
//!   extend a window

pub mod sweeper;

use std::sync::Arc;

use dashmap::DashMap;

use crate::clock::Clock;
use crate::config::RateLimitConfig;

/// Outcome of a single rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed.
    pub allowed: bool,
    /// Requests left in the current window (0 when denied).
    pub remaining: u32,
    /// When the current window ends, in epoch milliseconds.
    pub reset_at_ms: u64,
}

/// One counter window for an identifier.
#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    reset_at_ms: u64,
}

/// Per-identifier fixed-window request counter.
///
/// State lives for the process lifetime and is scoped to one instance;
/// separate server instances do not share counters.
pub struct RateLimiter {
    entries: DashMap<String, WindowEntry>,
    window_ms: u64,
    max_requests: u32,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            window_ms: config.window_ms,
            max_requests: config.max_requests,
            clock,
        }
    }

    /// Check and count one request for `identifier`.
    ///
    /// An empty identifier is an ordinary key; callers typically pass
    /// `"<feature>-<client ip>"`.
    pub fn check(&self, identifier: &str) -> RateLimitDecision {
        let now = self.clock.now_millis();

        // The entry guard holds the shard lock, so concurrent checks for the
        // same identifier cannot both observe a stale count.
        let mut entry = self
            .entries
            .entry(identifier.to_string())
            .or_insert(WindowEntry {
                count: 0,
                reset_at_ms: now + self.window_ms,
            });

        if now > entry.reset_at_ms {
            entry.count = 1;
            entry.reset_at_ms = now + self.window_ms;
            return RateLimitDecision {
                allowed: true,
                remaining: self.max_requests.saturating_sub(1),
                reset_at_ms: entry.reset_at_ms,
            };
        }

        if entry.count >= self.max_requests {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_at_ms: entry.reset_at_ms,
            };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: self.max_requests - entry.count,
            reset_at_ms: entry.reset_at_ms,
        }
    }

    /// Drop every entry whose window has fully expired.
    ///
    /// Safe to run concurrently with `check`: only entries whose
    /// `reset_at_ms` is strictly in the past at the moment of deletion are
    /// removed, so a freshly created or reset entry survives. Returns the
    /// number of entries removed.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now_millis();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.reset_at_ms >= now);
        before.saturating_sub(self.entries.len())
    }

    /// Number of tracked identifiers. Exposed for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
