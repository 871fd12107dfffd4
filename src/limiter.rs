// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window rate limiter for contact submissions.
//!
//! Each client gets `max_requests` submissions per window. The window starts
//! at the client's first request and is reset by the first request arriving
//! after it has fully elapsed. This is a fixed window, not a sliding one: a
//! client can burst up to twice the limit across a window boundary.
//!
//! Window state lives behind [`WindowStore`] so the in-process map can be
//! swapped for a shared store without touching callers.

use crate::clock::{Clock, SystemClock};
use crate::config::RateLimitConfig;
use async_trait::async_trait;
use axum::http::HeaderMap;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed
    Allowed {
        /// Remaining requests in current window
        remaining: u32,
        /// Time until window resets
        reset_in: Duration,
    },
    /// Request is rate limited
    Limited {
        /// Time until the window resets
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Counter state for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    pub count: u32,
    pub window_start: Instant,
}

/// Limit and window length.
#[derive(Debug, Clone, Copy)]
pub struct WindowPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl WindowPolicy {
    /// Apply one request to a client's window.
    ///
    /// Returns the state to store and the decision. A rejected request leaves
    /// the state untouched.
    pub fn step(&self, slot: Option<WindowState>, now: Instant) -> (WindowState, RateLimitResult) {
        match slot {
            Some(state) if now.saturating_duration_since(state.window_start) <= self.window => {
                let elapsed = now.saturating_duration_since(state.window_start);
                let reset_in = self.window.saturating_sub(elapsed);
                if state.count >= self.max_requests {
                    (state, RateLimitResult::Limited { retry_after: reset_in })
                } else {
                    let next = WindowState {
                        count: state.count + 1,
                        ..state
                    };
                    (
                        next,
                        RateLimitResult::Allowed {
                            remaining: self.max_requests.saturating_sub(next.count),
                            reset_in,
                        },
                    )
                }
            }
            // first sight, or the window has fully elapsed
            _ => (
                WindowState {
                    count: 1,
                    window_start: now,
                },
                RateLimitResult::Allowed {
                    remaining: self.max_requests.saturating_sub(1),
                    reset_in: self.window,
                },
            ),
        }
    }

    /// Whether a window has fully elapsed at `now`.
    pub fn is_expired(&self, state: &WindowState, now: Instant) -> bool {
        now.saturating_duration_since(state.window_start) > self.window
    }
}

/// Storage for per-client windows.
///
/// `hit` must apply [`WindowPolicy::step`] atomically for a key: concurrent
/// requests from one client must never both observe the same count.
#[async_trait]
pub trait WindowStore: Send + Sync {
    /// Record one request for `key` and return the decision.
    async fn hit(&self, key: &str, now: Instant, policy: &WindowPolicy) -> RateLimitResult;

    /// Drop windows that have fully elapsed. Returns how many were removed.
    async fn evict_expired(&self, now: Instant, policy: &WindowPolicy) -> usize;

    /// Number of tracked clients.
    async fn len(&self) -> usize;
}

/// Process-local window store.
#[derive(Debug, Default)]
pub struct InMemoryWindowStore {
    windows: Mutex<HashMap<String, WindowState>>,
}

impl InMemoryWindowStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WindowStore for InMemoryWindowStore {
    async fn hit(&self, key: &str, now: Instant, policy: &WindowPolicy) -> RateLimitResult {
        let mut windows = self.windows.lock().await;
        let (state, result) = policy.step(windows.get(key).copied(), now);
        windows.insert(key.to_string(), state);
        result
    }

    async fn evict_expired(&self, now: Instant, policy: &WindowPolicy) -> usize {
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, state| !policy.is_expired(state, now));
        before - windows.len()
    }

    async fn len(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Thread-safe rate limiter.
pub struct RateLimiter {
    policy: WindowPolicy,
    store: Arc<dyn WindowStore>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    /// Create a limiter with an in-memory store and the system clock.
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_store(
            config,
            Arc::new(InMemoryWindowStore::new()),
            Arc::new(SystemClock),
        )
    }

    /// Create a limiter over an explicit store and clock.
    pub fn with_store(
        config: RateLimitConfig,
        store: Arc<dyn WindowStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            policy: WindowPolicy {
                max_requests: config.max_requests,
                window: config.window_duration(),
            },
            store,
            clock,
        }
    }

    /// Check rate limit for a client address.
    pub async fn check(&self, client: IpAddr) -> RateLimitResult {
        self.check_key(&client.to_string()).await
    }

    /// Check rate limit for an arbitrary client key.
    pub async fn check_key(&self, key: &str) -> RateLimitResult {
        let result = self.store.hit(key, self.clock.now(), &self.policy).await;
        match &result {
            RateLimitResult::Allowed { remaining, .. } => {
                debug!(client = %key, remaining, "Within rate limit");
            }
            RateLimitResult::Limited { retry_after } => {
                warn!(client = %key, retry_after_secs = retry_after.as_secs(), "Rate limit exceeded");
            }
        }
        result
    }

    /// Clean up expired windows (should be called periodically).
    pub async fn cleanup(&self) -> usize {
        let removed = self
            .store
            .evict_expired(self.clock.now(), &self.policy)
            .await;
        if removed > 0 {
            debug!(removed, "Evicted expired rate windows");
        }
        removed
    }
}

/// Resolve the client address used as the rate limit key.
///
/// With `trust_forwarded_for` the first parseable `X-Forwarded-For` hop wins;
/// only enable it behind a proxy that overwrites the header.
pub fn client_ip(peer: IpAddr, headers: &HeaderMap, trust_forwarded_for: bool) -> IpAddr {
    if !trust_forwarded_for {
        return peer;
    }
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|hop| hop.trim().parse().ok())
        .unwrap_or(peer)
}
