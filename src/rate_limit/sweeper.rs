//! Background cleanup sweeper.
//!
//! An owned task with an explicit lifecycle: started by the host on init,
//! stopped through the [`Shutdown`] broadcast, instead of an unmanaged
//! interval that outlives its limiter.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;
use crate::rate_limit::RateLimiter;

/// Spawn the periodic cleanup task for `limiter`.
///
/// Ticks every `interval`, dropping expired windows. Exits when `shutdown`
/// triggers; the returned handle lets the host await a clean stop.
pub fn spawn_sweeper(
    limiter: Arc<RateLimiter>,
    interval: Duration,
    shutdown: &Shutdown,
) -> JoinHandle<()> {
    let mut rx = shutdown.subscribe();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; skip it so the sweeper
        // does not race startup traffic.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = limiter.cleanup();
                    if removed > 0 {
                        tracing::debug!(removed, tracked = limiter.len(), "rate limit sweep");
                    }
                }
                _ = rx.recv() => {
                    tracing::debug!("rate limit sweeper stopping");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::RateLimitConfig;

    #[tokio::test]
    async fn sweeper_cleans_and_stops_on_shutdown() {
        let clock = Arc::new(ManualClock::new(0));
        let config = RateLimitConfig {
            window_ms: 1_000,
            max_requests: 5,
            cleanup_interval_secs: 3_600,
        };
        let limiter = Arc::new(RateLimiter::new(&config, clock.clone()));
        let shutdown = Shutdown::new();

        limiter.check("stale");
        clock.advance(5_000);

        let handle = spawn_sweeper(limiter.clone(), Duration::from_millis(10), &shutdown);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(limiter.len(), 0);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop on shutdown")
            .unwrap();
    }
}
