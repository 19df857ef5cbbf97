//! Fixed-window counter state and the admit decision.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::Timestamp;

/// Counter for one identity within one fixed window.
///
/// # Invariants
///
/// - once `now >= reset_at` the window is logically absent, whether or not
///   it has been purged from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateWindow {
    count: u32,
    reset_at: Timestamp,
}

impl RateWindow {
    /// Opens a fresh window holding the first admitted action.
    pub fn open(now: Timestamp, window: Duration) -> Self {
        Self {
            count: 1,
            reset_at: now.plus(window),
        }
    }

    /// Number of actions admitted in this window.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// When this window expires.
    pub fn reset_at(&self) -> Timestamp {
        self.reset_at
    }

    /// True once `now` has reached the expiry instant.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.reset_at
    }

    /// Applies one admit attempt to the current state of a key.
    ///
    /// Returns the state to store and the decision for the caller. Must run
    /// inside the store's per-key critical section.
    pub fn admit(
        current: Option<RateWindow>,
        limit: u32,
        window: Duration,
        now: Timestamp,
    ) -> (RateWindow, RateLimitDecision) {
        match current.filter(|w| !w.is_expired(now)) {
            None => {
                let fresh = RateWindow::open(now, window);
                let decision = RateLimitDecision::allowed(limit, limit.saturating_sub(1), fresh.reset_at);
                (fresh, decision)
            }
            Some(existing) if existing.count >= limit => {
                (existing, RateLimitDecision::denied(limit, existing.reset_at))
            }
            Some(mut existing) => {
                existing.count += 1;
                let remaining = limit.saturating_sub(existing.count);
                (existing, RateLimitDecision::allowed(limit, remaining, existing.reset_at))
            }
        }
    }

    /// Reports the decision a caller would see without consuming a slot.
    pub fn peek(
        current: Option<RateWindow>,
        limit: u32,
        window: Duration,
        now: Timestamp,
    ) -> RateLimitDecision {
        match current.filter(|w| !w.is_expired(now)) {
            None => RateLimitDecision::allowed(limit, limit, now.plus(window)),
            Some(existing) => {
                let remaining = limit.saturating_sub(existing.count);
                RateLimitDecision {
                    allowed: remaining > 0,
                    limit,
                    remaining,
                    reset_at: existing.reset_at,
                }
            }
        }
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitDecision {
    /// Whether the action was admitted.
    pub allowed: bool,
    /// The limit the check ran against.
    pub limit: u32,
    /// Slots left in the current window.
    pub remaining: u32,
    /// Expiry of the current window.
    pub reset_at: Timestamp,
}

impl RateLimitDecision {
    fn allowed(limit: u32, remaining: u32, reset_at: Timestamp) -> Self {
        Self {
            allowed: true,
            limit,
            remaining,
            reset_at,
        }
    }

    fn denied(limit: u32, reset_at: Timestamp) -> Self {
        Self {
            allowed: false,
            limit,
            remaining: 0,
            reset_at,
        }
    }

    /// Whole seconds a rejected caller should wait, never less than one.
    pub fn retry_after_secs(&self, now: Timestamp) -> u64 {
        let millis = self.reset_at.millis_since(&now).max(0) as u64;
        ((millis + 999) / 1_000).max(1)
    }
}
