//! Periodic eviction of expired rate-limit windows.
//!
//! Clients that never come back would otherwise keep their entry forever;
//! the lazy reset in `RateLimiter::check` only touches returning clients.

use std::sync::Arc;
use std::time::Duration;

use listdesk_core::rate_limit::RateLimiter;
use tokio_util::sync::CancellationToken;

/// Run the sweep loop every `every` until `cancel` is triggered.
pub async fn run(limiter: Arc<RateLimiter>, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Rate limit sweep started");

    let mut interval = tokio::time::interval(every);
    // The first tick completes immediately; nothing can have expired yet.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Rate limit sweep stopping");
                break;
            }
            _ = interval.tick() => {
                let removed = limiter.sweep();
                if removed > 0 {
                    tracing::debug!(removed, remaining = limiter.tracked_clients(), "Rate limit sweep: evicted expired entries");
                }
            }
        }
    }
}
