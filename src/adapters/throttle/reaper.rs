//! ThrottleReaper - background eviction of expired rate windows.
//!
//! Expired windows are already ignored by every check, so this service only
//! bounds memory. It can be delayed, skipped or stopped without affecting
//! any decision the ledger makes.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 5 min | How often to sweep for expired windows |
//!
//! ## Graceful Shutdown
//!
//! The service listens for a shutdown signal and stops after the sweep in
//! progress, if any.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::application::throttle::ThrottleLedger;

/// Configuration for the ThrottleReaper service.
#[derive(Debug, Clone)]
pub struct ThrottleReaperConfig {
    /// How often to sweep.
    pub interval: Duration,
}

impl Default for ThrottleReaperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5 * 60),
        }
    }
}

impl ThrottleReaperConfig {
    /// Create config with custom sweep interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Background service that evicts expired rate windows.
pub struct ThrottleReaper {
    ledger: Arc<ThrottleLedger>,
    config: ThrottleReaperConfig,
}

impl ThrottleReaper {
    /// Create a reaper with the default five-minute interval.
    pub fn new(ledger: Arc<ThrottleLedger>) -> Self {
        Self::with_config(ledger, ThrottleReaperConfig::default())
    }

    pub fn with_config(ledger: Arc<ThrottleLedger>, config: ThrottleReaperConfig) -> Self {
        Self { ledger, config }
    }

    /// Run the sweep loop until the shutdown signal flips to `true` or its
    /// sender is dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it so a fresh process
        // does not sweep an empty map.
        interval.tick().await;

        tracing::info!(interval_secs = self.config.interval.as_secs(), "throttle reaper started");
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("throttle reaper stopped");
                        return;
                    }
                }
                _ = interval.tick() => {
                    self.sweep_once();
                }
            }
        }
    }

    /// Spawn [`run`](Self::run) on the current tokio runtime.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    /// Perform exactly one sweep. Returns the number of windows evicted.
    pub fn sweep_once(&self) -> usize {
        let evicted = self.ledger.reap_expired();
        let stats = self.ledger.stats();
        tracing::debug!(
            evicted,
            rate_windows = stats.rate_windows,
            demo_quotas = stats.demo_quotas,
            "throttle reaper sweep"
        );
        evicted
    }
}
