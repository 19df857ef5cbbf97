//! ThrottleLedger - admit-or-reject decisions for costly actions.
//!
//! Two independent counters share this service:
//!
//! - a **fixed-window** counter per caller identity (e.g. an IP address)
//! - a **lifetime** cap of AI turns per demo fingerprint
//!
//! Each check runs as one [`ThrottleStore::update`] call, so the read of
//! the current count and the increment happen in the same critical section
//! of the store. Expiry is checked lazily on every call; the background
//! reaper only bounds memory.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::throttle::{
    require_key, DemoQuota, DemoQuotaDecision, RateLimitDecision, RateWindow, ThrottleError,
};
use crate::ports::{Clock, ThrottleStore};

/// Current entry counts, for operational visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThrottleStats {
    /// Stored rate windows, including expired ones not yet reaped.
    pub rate_windows: usize,
    /// Stored demo quotas.
    pub demo_quotas: usize,
}

/// Throttle ledger over injected stores.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct ThrottleLedger {
    windows: Arc<dyn ThrottleStore<RateWindow>>,
    demo_quotas: Arc<dyn ThrottleStore<DemoQuota>>,
    clock: Arc<dyn Clock>,
}

impl ThrottleLedger {
    pub fn new(
        windows: Arc<dyn ThrottleStore<RateWindow>>,
        demo_quotas: Arc<dyn ThrottleStore<DemoQuota>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            windows,
            demo_quotas,
            clock,
        }
    }

    /// Current time as seen by this ledger.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rate windows
    // ─────────────────────────────────────────────────────────────────────────

    /// Admit or reject one action for `identity`.
    ///
    /// - no entry, or an expired one: a fresh window with count 1
    /// - count already at `limit`: rejected, window untouched
    /// - otherwise: count incremented
    ///
    /// Fixed window semantics: up to `2 * limit` actions can be admitted
    /// around a window boundary.
    ///
    /// # Errors
    ///
    /// - `EmptyKey` for a blank identity
    /// - `ZeroLimit` / `ZeroWindow` for degenerate limits
    pub fn check_rate_limit(
        &self,
        identity: &str,
        limit: u32,
        window: Duration,
    ) -> Result<RateLimitDecision, ThrottleError> {
        let identity = require_key("identity", identity)?;
        validate_limits(limit, window)?;
        let now = self.clock.now();

        let mut decision = None;
        self.windows.update(identity, &mut |current: Option<RateWindow>| {
            let (next, outcome) = RateWindow::admit(current, limit, window, now);
            decision = Some(outcome);
            Some(next)
        });

        let decision = decision.unwrap_or_else(|| {
            tracing::error!(identity, "throttle store skipped update; rejecting");
            RateLimitDecision {
                allowed: false,
                limit,
                remaining: 0,
                reset_at: now.plus(window),
            }
        });

        if !decision.allowed {
            tracing::debug!(
                identity,
                limit,
                reset_at = %decision.reset_at,
                "rate limit exceeded"
            );
        }
        Ok(decision)
    }

    /// Report the current window for `identity` without consuming a slot.
    pub fn rate_limit_status(
        &self,
        identity: &str,
        limit: u32,
        window: Duration,
    ) -> Result<RateLimitDecision, ThrottleError> {
        let identity = require_key("identity", identity)?;
        validate_limits(limit, window)?;
        let now = self.clock.now();
        Ok(RateWindow::peek(self.windows.get(identity), limit, window, now))
    }

    /// Clear the window for `identity`, restoring its full quota.
    ///
    /// Returns true if a window existed.
    pub fn reset_rate_limit(&self, identity: &str) -> Result<bool, ThrottleError> {
        let identity = require_key("identity", identity)?;
        Ok(self.windows.delete(identity))
    }

    /// Evict every window whose expiry has passed.
    ///
    /// Runs under the store's lock, so a window refreshed concurrently is
    /// never evicted. Returns the number of windows removed.
    pub fn reap_expired(&self) -> usize {
        let now = self.clock.now();
        self.windows
            .retain(&mut |_: &str, window: &RateWindow| !window.is_expired(now))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Demo quotas
    // ─────────────────────────────────────────────────────────────────────────

    /// Admit or reject one demo AI turn for `fingerprint`.
    ///
    /// No time dimension: once `limit` turns are used the fingerprint stays
    /// exhausted until [`reset_demo_message_count`](Self::reset_demo_message_count).
    pub fn check_demo_message_limit(
        &self,
        fingerprint: &str,
        limit: u32,
    ) -> Result<DemoQuotaDecision, ThrottleError> {
        let fingerprint = require_key("fingerprint", fingerprint)?;

        let mut decision = None;
        self.demo_quotas.update(fingerprint, &mut |current: Option<DemoQuota>| {
            let (next, outcome) = DemoQuota::consume(current, limit);
            decision = Some(outcome);
            Some(next)
        });

        let decision = decision.unwrap_or(DemoQuotaDecision {
            allowed: false,
            remaining: 0,
        });
        if !decision.allowed {
            tracing::debug!(fingerprint, limit, "demo message limit reached");
        }
        Ok(decision)
    }

    /// Clear the demo quota for one fingerprint. Idempotent.
    pub fn reset_demo_message_count(&self, fingerprint: &str) -> Result<(), ThrottleError> {
        let fingerprint = require_key("fingerprint", fingerprint)?;
        if self.demo_quotas.delete(fingerprint) {
            tracing::debug!(fingerprint, "demo message count reset");
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Stats
    // ─────────────────────────────────────────────────────────────────────────

    pub fn stats(&self) -> ThrottleStats {
        ThrottleStats {
            rate_windows: self.windows.len(),
            demo_quotas: self.demo_quotas.len(),
        }
    }
}

fn validate_limits(limit: u32, window: Duration) -> Result<(), ThrottleError> {
    if limit == 0 {
        return Err(ThrottleError::ZeroLimit);
    }
    if window.is_zero() {
        return Err(ThrottleError::ZeroWindow);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::throttle::InMemoryThrottleStore;

    const MINUTE: Duration = Duration::from_secs(60);

    fn ledger() -> (ThrottleLedger, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::at_millis(1_700_000_000_000));
        let ledger = ThrottleLedger::new(
            Arc::new(InMemoryThrottleStore::new()),
            Arc::new(InMemoryThrottleStore::new()),
            clock.clone(),
        );
        (ledger, clock)
    }

    fn pairs(ledger: &ThrottleLedger, identity: &str, limit: u32, calls: usize) -> Vec<(bool, u32)> {
        (0..calls)
            .map(|_| {
                let d = ledger.check_rate_limit(identity, limit, MINUTE).unwrap();
                (d.allowed, d.remaining)
            })
            .collect()
    }

    // ─── Rate Limit Tests ──────────────────────────────────────────────

    #[test]
    fn fourth_call_against_limit_three_is_rejected() {
        let (ledger, _) = ledger();
        assert_eq!(
            pairs(&ledger, "ip-1", 3, 4),
            vec![(true, 2), (true, 1), (true, 0), (false, 0)]
        );
    }

    #[test]
    fn rejection_reports_existing_expiry() {
        let (ledger, clock) = ledger();
        let first = ledger.check_rate_limit("ip-1", 1, MINUTE).unwrap();
        clock.advance(Duration::from_secs(20));
        let denied = ledger.check_rate_limit("ip-1", 1, MINUTE).unwrap();

        assert!(!denied.allowed);
        assert_eq!(denied.reset_at, first.reset_at);
        assert_eq!(denied.retry_after_secs(ledger.now()), 40);
    }

    #[test]
    fn window_expiry_starts_fresh_window() {
        let (ledger, clock) = ledger();
        pairs(&ledger, "ip-1", 2, 3);

        clock.advance(MINUTE);
        let decision = ledger.check_rate_limit("ip-1", 2, MINUTE).unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
    }

    #[test]
    fn expired_window_is_reused_without_reaper() {
        let (ledger, clock) = ledger();
        pairs(&ledger, "ip-1", 1, 1);
        clock.advance(MINUTE * 2);

        assert!(ledger.check_rate_limit("ip-1", 1, MINUTE).unwrap().allowed);
        assert_eq!(ledger.stats().rate_windows, 1);
    }

    #[test]
    fn fixed_window_admits_burst_across_boundary() {
        let (ledger, clock) = ledger();
        clock.advance(Duration::from_secs(59));
        // First window opens here and closes one minute later.
        assert!(pairs(&ledger, "ip-1", 3, 3).iter().all(|(allowed, _)| *allowed));
        clock.advance(MINUTE);
        assert!(pairs(&ledger, "ip-1", 3, 3).iter().all(|(allowed, _)| *allowed));
    }

    #[test]
    fn identities_are_isolated() {
        let (ledger, _) = ledger();
        pairs(&ledger, "ip-1", 2, 3);
        let other = ledger.check_rate_limit("ip-2", 2, MINUTE).unwrap();
        assert!(other.allowed);
        assert_eq!(other.remaining, 1);
    }

    #[test]
    fn status_does_not_consume() {
        let (ledger, _) = ledger();
        ledger.check_rate_limit("ip-1", 5, MINUTE).unwrap();
        let status = ledger.rate_limit_status("ip-1", 5, MINUTE).unwrap();
        assert_eq!(status.remaining, 4);
        let status = ledger.rate_limit_status("ip-1", 5, MINUTE).unwrap();
        assert_eq!(status.remaining, 4);
    }

    #[test]
    fn reset_rate_limit_restores_quota() {
        let (ledger, _) = ledger();
        pairs(&ledger, "ip-1", 1, 2);
        assert!(ledger.reset_rate_limit("ip-1").unwrap());
        assert!(ledger.check_rate_limit("ip-1", 1, MINUTE).unwrap().allowed);
        assert!(!ledger.reset_rate_limit("ip-unknown").unwrap());
    }

    #[test]
    fn rejects_invalid_arguments() {
        let (ledger, _) = ledger();
        assert_eq!(
            ledger.check_rate_limit("", 3, MINUTE),
            Err(ThrottleError::EmptyKey { field: "identity" })
        );
        assert_eq!(
            ledger.check_rate_limit("ip-1", 0, MINUTE),
            Err(ThrottleError::ZeroLimit)
        );
        assert_eq!(
            ledger.check_rate_limit("ip-1", 3, Duration::ZERO),
            Err(ThrottleError::ZeroWindow)
        );
        assert_eq!(ledger.stats().rate_windows, 0);
    }

    #[test]
    fn reap_expired_evicts_only_expired_windows() {
        let (ledger, clock) = ledger();
        ledger.check_rate_limit("old", 3, MINUTE).unwrap();
        clock.advance(Duration::from_secs(30));
        ledger.check_rate_limit("new", 3, MINUTE).unwrap();
        clock.advance(Duration::from_secs(30));

        assert_eq!(ledger.reap_expired(), 1);
        assert_eq!(ledger.stats().rate_windows, 1);
        assert_eq!(ledger.rate_limit_status("new", 3, MINUTE).unwrap().remaining, 2);
    }

    // ─── Demo Quota Tests ──────────────────────────────────────────────

    #[test]
    fn demo_limit_admits_exactly_limit_turns() {
        let (ledger, _) = ledger();
        for expected in (0..10).rev() {
            let decision = ledger.check_demo_message_limit("fp-1", 10).unwrap();
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected);
        }
        let decision = ledger.check_demo_message_limit("fp-1", 10).unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.remaining, 0);
    }

    #[test]
    fn demo_limit_never_expires_with_time() {
        let (ledger, clock) = ledger();
        ledger.check_demo_message_limit("fp-1", 1).unwrap();
        clock.advance(Duration::from_secs(60 * 60 * 24 * 365));
        assert!(!ledger.check_demo_message_limit("fp-1", 1).unwrap().allowed);
    }

    #[test]
    fn demo_reset_restarts_from_zero_and_is_idempotent() {
        let (ledger, _) = ledger();
        for _ in 0..3 {
            ledger.check_demo_message_limit("fp-1", 2).unwrap();
        }
        ledger.reset_demo_message_count("fp-1").unwrap();
        ledger.reset_demo_message_count("fp-1").unwrap();

        let decision = ledger.check_demo_message_limit("fp-1", 2).unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
    }

    #[test]
    fn demo_quotas_are_isolated_from_each_other_and_from_windows() {
        let (ledger, _) = ledger();
        ledger.check_demo_message_limit("shared", 1).unwrap();
        assert!(ledger.check_demo_message_limit("other", 1).unwrap().allowed);
        assert!(ledger.check_rate_limit("shared", 1, MINUTE).unwrap().allowed);
    }

    #[test]
    fn demo_rejects_blank_fingerprint() {
        let (ledger, _) = ledger();
        assert_eq!(
            ledger.check_demo_message_limit(" ", 10),
            Err(ThrottleError::EmptyKey { field: "fingerprint" })
        );
        assert!(ledger.reset_demo_message_count("").is_err());
    }

    #[test]
    fn stats_counts_entries() {
        let (ledger, _) = ledger();
        ledger.check_rate_limit("ip-1", 3, MINUTE).unwrap();
        ledger.check_rate_limit("ip-2", 3, MINUTE).unwrap();
        ledger.check_demo_message_limit("fp-1", 3).unwrap();
        assert_eq!(
            ledger.stats(),
            ThrottleStats {
                rate_windows: 2,
                demo_quotas: 1
            }
        );
    }
}
