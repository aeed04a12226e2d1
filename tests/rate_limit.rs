//! End-to-end rate limiting scenarios against the public API.

use std::sync::Arc;
use std::time::Duration;

use palisade::clock::ManualClock;
use palisade::config::RateLimitConfig;
use palisade::lifecycle::Shutdown;
use palisade::rate_limit::{sweeper::spawn_sweeper, RateLimiter};

fn login_limiter() -> (Arc<RateLimiter>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let config = RateLimitConfig::default(); // 100 requests / 15 min
    (
        Arc::new(RateLimiter::new(&config, clock.clone())),
        clock,
    )
}

#[test]
fn login_burst_hits_the_limit_and_recovers_after_the_window() {
    let (limiter, clock) = login_limiter();
    let identifier = "login-1.2.3.4";

    for i in 0..100 {
        let decision = limiter.check(identifier);
        assert!(decision.allowed, "call {} should be allowed", i + 1);
        assert_eq!(decision.remaining, 99 - i);
    }

    let denied = limiter.check(identifier);
    assert!(!denied.allowed);
    assert_eq!(denied.remaining, 0);

    // 15 minutes plus 1 ms: the window has passed and the counter resets.
    clock.advance(900_000 + 1);
    let decision = limiter.check(identifier);
    assert!(decision.allowed);
    assert_eq!(decision.remaining, 99);
}

#[test]
fn cleanup_bounds_memory_across_many_identifiers() {
    let (limiter, clock) = login_limiter();

    for i in 0..500 {
        limiter.check(&format!("signup-{i}"));
    }
    assert_eq!(limiter.len(), 500);

    clock.advance(900_001);
    limiter.check("signup-fresh"); // new window, must survive the sweep

    limiter.cleanup();
    assert_eq!(limiter.len(), 1);
    assert!(!limiter.is_empty());
}

#[tokio::test]
async fn sweeper_runs_on_its_interval_until_shutdown() {
    let clock = Arc::new(ManualClock::new(0));
    let config = RateLimitConfig {
        window_ms: 100,
        max_requests: 10,
        cleanup_interval_secs: 3_600,
    };
    let limiter = Arc::new(RateLimiter::new(&config, clock.clone()));
    let shutdown = Shutdown::new();

    limiter.check("a");
    limiter.check("b");
    clock.advance(1_000);

    let handle = spawn_sweeper(limiter.clone(), Duration::from_millis(5), &shutdown);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(limiter.is_empty());

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("sweeper exits after shutdown")
        .unwrap();
}
