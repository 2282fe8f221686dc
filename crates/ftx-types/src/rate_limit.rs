//! Client-side request throttling for the FTX API
//!
//! A [`RateWindow`] keeps the timestamps of recent requests. Before a request
//! is sent the dispatcher asks the window whether the recent history has
//! reached the cap; if so it pauses for a fixed delay. This is a blunt guard
//! against bursts, not a token bucket: it never guarantees compliance with
//! the exchange's limits, it only stops the process from hammering them.
//!
//! The window is shared, mutable state touched on every call, so it is
//! guarded by a mutex and is safe to share between tasks behind an `Arc`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default number of recorded requests that triggers a pause
pub const DEFAULT_MAX_REQUESTS: usize = 30;

/// Default length of the trailing history window
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Default pause applied when the cap is reached
pub const DEFAULT_PAUSE: Duration = Duration::from_millis(500);

/// Throttle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Recorded requests at which the next request pauses
    pub max_requests: usize,
    /// Entries older than this are forgotten
    pub window: Duration,
    /// Delay applied before a request when the cap is reached
    pub pause: Duration,
}

impl RateLimitConfig {
    /// Create a new throttle configuration
    pub const fn new(max_requests: usize, window: Duration, pause: Duration) -> Self {
        Self {
            max_requests,
            window,
            pause,
        }
    }

    /// Create a configuration that never pauses (for testing)
    pub const fn permissive() -> Self {
        Self::new(usize::MAX, DEFAULT_WINDOW, Duration::ZERO)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, DEFAULT_PAUSE)
    }
}

/// Result of a throttle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request may proceed immediately
    Allowed,
    /// Request should wait `wait` first; `recent` requests were observed
    Limited { wait: Duration, recent: usize },
}

impl RateLimitResult {
    /// Check if the request is allowed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Get the wait duration if rate limited
    pub fn wait_duration(&self) -> Option<Duration> {
        match self {
            Self::Allowed => None,
            Self::Limited { wait, .. } => Some(*wait),
        }
    }
}

/// Bounded, time-ordered history of recent requests
#[derive(Debug)]
pub struct RateWindow {
    config: RateLimitConfig,
    timestamps: Mutex<VecDeque<Instant>>,
}

impl RateWindow {
    /// Create an empty window
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            timestamps: Mutex::new(VecDeque::new()),
        }
    }

    /// Get the configuration of this window
    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Check whether a request made now should pause first
    pub fn check(&self) -> RateLimitResult {
        self.check_at(Instant::now())
    }

    /// Check whether a request made at `now` should pause first
    pub fn check_at(&self, now: Instant) -> RateLimitResult {
        let recent = self.recent_at(now);
        if recent >= self.config.max_requests {
            RateLimitResult::Limited {
                wait: self.config.pause,
                recent,
            }
        } else {
            RateLimitResult::Allowed
        }
    }

    /// Record a request attempt made now
    pub fn record(&self) {
        self.record_at(Instant::now());
    }

    /// Record a request attempt made at `now`
    pub fn record_at(&self, now: Instant) {
        let mut timestamps = self.timestamps.lock();
        Self::prune(&mut timestamps, now, self.config.window);
        timestamps.push_back(now);
        while timestamps.len() > self.config.max_requests {
            timestamps.pop_front();
        }
    }

    /// Number of requests recorded within the trailing window
    pub fn recent(&self) -> usize {
        self.recent_at(Instant::now())
    }

    /// Number of requests recorded within the window trailing `now`
    pub fn recent_at(&self, now: Instant) -> usize {
        let mut timestamps = self.timestamps.lock();
        Self::prune(&mut timestamps, now, self.config.window);
        timestamps.len()
    }

    /// Forget all recorded requests
    pub fn reset(&self) {
        self.timestamps.lock().clear();
    }

    fn prune(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(oldest) = timestamps.front() {
            if now.saturating_duration_since(*oldest) >= window {
                timestamps.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for RateWindow {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(max_requests: usize) -> RateWindow {
        RateWindow::new(RateLimitConfig::new(
            max_requests,
            Duration::from_secs(60),
            Duration::from_millis(500),
        ))
    }

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 30);
        assert_eq!(config.window, Duration::from_secs(60));
        assert_eq!(config.pause, Duration::from_millis(500));
    }

    #[test]
    fn test_allows_below_cap() {
        let window = window(3);
        let now = Instant::now();

        window.record_at(now);
        window.record_at(now);
        assert!(window.check_at(now).is_allowed());
    }

    #[test]
    fn test_limits_at_cap() {
        let window = window(3);
        let now = Instant::now();

        for _ in 0..3 {
            window.record_at(now);
        }

        let result = window.check_at(now);
        assert_eq!(
            result,
            RateLimitResult::Limited {
                wait: Duration::from_millis(500),
                recent: 3
            }
        );
        assert_eq!(result.wait_duration(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_history_is_capped() {
        let window = window(3);
        let now = Instant::now();

        for _ in 0..10 {
            window.record_at(now);
        }
        assert_eq!(window.recent_at(now), 3);
    }

    #[test]
    fn test_entries_expire_after_window() {
        let window = window(3);
        let start = Instant::now();

        for _ in 0..3 {
            window.record_at(start);
        }
        assert!(!window.check_at(start + Duration::from_secs(59)).is_allowed());
        assert!(window.check_at(start + Duration::from_secs(60)).is_allowed());
        assert_eq!(window.recent_at(start + Duration::from_secs(60)), 0);
    }

    #[test]
    fn test_reset() {
        let window = window(2);
        window.record();
        window.record();
        assert!(!window.check().is_allowed());

        window.reset();
        assert!(window.check().is_allowed());
    }

    #[test]
    fn test_permissive_never_limits() {
        let window = RateWindow::new(RateLimitConfig::permissive());
        for _ in 0..100 {
            window.record();
        }
        assert!(window.check().is_allowed());
    }
}
