//! Fixed-window request counter keyed by client IP.
//!
//! State lives in process memory only: it does not survive a restart and is
//! not shared between instances, so it protects a single running server
//! from a single burst. Expired entries are dropped lazily on the next
//! request from the same client, or in bulk by [`RateLimiter::sweep`].

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Default ceiling per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 30;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

/// Result of a single [`RateLimiter::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Configured ceiling.
    pub limit: u32,
    /// Requests left in the current window after this one.
    pub remaining: u32,
    /// Time until the current window resets.
    pub reset_in: Duration,
}

pub struct RateLimiter {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_requests: max_requests.max(1),
            window,
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Count a request from `client` against its window.
    pub fn check(&self, client: &str) -> RateLimitDecision {
        self.check_at(client, Instant::now())
    }

    /// [`check`](Self::check) with an explicit clock reading.
    pub fn check_at(&self, client: &str, now: Instant) -> RateLimitDecision {
        let mut entries = self.lock();

        let entry = entries
            .entry(client.to_string())
            .and_modify(|e| {
                if self.is_expired(e, now) {
                    *e = RateLimitEntry {
                        count: 0,
                        window_start: now,
                    };
                }
            })
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        let reset_in = self
            .window
            .saturating_sub(now.saturating_duration_since(entry.window_start));

        if entry.count >= self.max_requests {
            return RateLimitDecision {
                allowed: false,
                limit: self.max_requests,
                remaining: 0,
                reset_in,
            };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            limit: self.max_requests,
            remaining: self.max_requests - entry.count,
            reset_in,
        }
    }

    /// Drop every entry whose window has elapsed. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| !self.is_expired(e, now));
        before - entries.len()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    fn is_expired(&self, entry: &RateLimitEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.window_start) >= self.window
    }

    // The map holds plain counters, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, RateLimitEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP: &str = "203.0.113.7";

    #[test]
    fn rejects_after_ceiling_with_zero_remaining() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let t0 = Instant::now();

        for expected_remaining in [2, 1, 0] {
            let d = limiter.check_at(IP, t0);
            assert!(d.allowed);
            assert_eq!(d.remaining, expected_remaining);
        }

        let rejected = limiter.check_at(IP, t0 + Duration::from_secs(1));
        assert!(!rejected.allowed);
        assert_eq!(rejected.remaining, 0);
        assert_eq!(rejected.reset_in, Duration::from_secs(59));
    }

    #[test]
    fn window_elapse_allows_and_resets() {
        let limiter = RateLimiter::new(2, Duration::from_secs(10));
        let t0 = Instant::now();
        limiter.check_at(IP, t0);
        limiter.check_at(IP, t0);
        assert!(!limiter.check_at(IP, t0 + Duration::from_secs(5)).allowed);

        let later = t0 + Duration::from_secs(10);
        let d = limiter.check_at(IP, later);
        assert!(d.allowed);
        assert_eq!(d.remaining, 1);
        assert_eq!(d.reset_in, Duration::from_secs(10));
    }

    #[test]
    fn rejected_requests_do_not_extend_the_count() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let t0 = Instant::now();
        assert!(limiter.check_at(IP, t0).allowed);
        for _ in 0..5 {
            assert!(!limiter.check_at(IP, t0).allowed);
        }
        assert!(limiter.check_at(IP, t0 + Duration::from_secs(10)).allowed);
    }

    #[test]
    fn clients_are_counted_independently() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let t0 = Instant::now();
        assert!(limiter.check_at("10.0.0.1", t0).allowed);
        assert!(limiter.check_at("10.0.0.2", t0).allowed);
        assert!(!limiter.check_at("10.0.0.1", t0).allowed);
    }

    #[test]
    fn sweep_removes_only_expired_windows() {
        let limiter = RateLimiter::new(5, Duration::from_secs(30));
        let t0 = Instant::now();
        limiter.check_at("10.0.0.1", t0);
        limiter.check_at("10.0.0.2", t0 + Duration::from_secs(20));
        assert_eq!(limiter.tracked_clients(), 2);

        let removed = limiter.sweep_at(t0 + Duration::from_secs(31));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_clients(), 1);
    }

    #[test]
    fn zero_ceiling_is_raised_to_one() {
        let limiter = RateLimiter::new(0, Duration::from_secs(1));
        assert_eq!(limiter.max_requests(), 1);
        assert!(limiter.check(IP).allowed);
    }
}
