//! Fixed-window rate limiting
//!
//! Per-client request counters with a fixed window: the first request of a
//! window stamps its deadline, later requests within the window increment
//! the counter, and requests past the limit are rejected with a retry hint.
//! Expired windows are purged opportunistically when the tracked-key count
//! grows past a bound; there is no background sweeper.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MasarError, Result};

/// Configuration for the rate limiter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Requests admitted per window (default: 100)
    pub max_requests: u32,
    /// Window length in seconds (default: 60)
    pub window_secs: i64,
    /// Purge trigger: tracked keys before expired windows are swept
    pub max_tracked_keys: usize,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 60,
            max_tracked_keys: 4096,
        }
    }
}

impl RateLimiterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_requests == 0 {
            return Err(MasarError::Config(
                "max_requests must be greater than 0".to_string(),
            ));
        }
        if self.window_secs <= 0 {
            return Err(MasarError::Config(
                "window_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_tracked_keys == 0 {
            return Err(MasarError::Config(
                "max_tracked_keys must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a rate check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum RateDecision {
    /// Request admitted; `remaining` requests left in the current window
    Allowed { remaining: u32 },
    /// Request rejected; retry after the window resets
    Limited { retry_after_secs: u64 },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }
}

#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_ends_at: DateTime<Utc>,
}

/// Fixed-window per-key rate limiter
pub struct RateLimiter {
    windows: DashMap<String, WindowState>,
    config: RateLimiterConfig,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self {
            windows: DashMap::new(),
            config: RateLimiterConfig::default(),
        }
    }
}

impl RateLimiter {
    /// Build a limiter with a validated configuration
    pub fn new(config: RateLimiterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            windows: DashMap::new(),
            config,
        })
    }

    /// Check a request against the client's current window, wall clock
    pub fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Utc::now())
    }

    /// Check a request at an explicit instant
    pub fn check_at(&self, key: &str, now: DateTime<Utc>) -> RateDecision {
        let window = Duration::seconds(self.config.window_secs);

        if let Some(mut entry) = self.windows.get_mut(key) {
            let state = entry.value_mut();
            if now > state.window_ends_at {
                state.count = 1;
                state.window_ends_at = now + window;
                return RateDecision::Allowed {
                    remaining: self.config.max_requests - 1,
                };
            }
            if state.count >= self.config.max_requests {
                let retry = (state.window_ends_at - now).num_seconds().max(1) as u64;
                warn!(key, "rate limit exceeded");
                return RateDecision::Limited {
                    retry_after_secs: retry,
                };
            }
            state.count += 1;
            return RateDecision::Allowed {
                remaining: self.config.max_requests - state.count,
            };
        }

        if self.windows.len() >= self.config.max_tracked_keys {
            self.purge_expired_at(now);
        }

        self.windows.insert(
            key.to_string(),
            WindowState {
                count: 1,
                window_ends_at: now + window,
            },
        );
        RateDecision::Allowed {
            remaining: self.config.max_requests - 1,
        }
    }

    /// Drop windows whose deadline has passed
    pub fn purge_expired_at(&self, now: DateTime<Utc>) {
        self.windows.retain(|_, state| state.window_ends_at > now);
    }

    /// Number of client keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}
