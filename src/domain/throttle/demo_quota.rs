//! Lifetime cap on AI turns for one demo fingerprint.

use serde::{Deserialize, Serialize};

/// Turn limit applied when the caller does not override it.
pub const DEFAULT_DEMO_MESSAGE_LIMIT: u32 = 10;

/// AI turns consumed by one demo fingerprint.
///
/// Never expires; only an explicit reset clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoQuota {
    used: u32,
}

impl DemoQuota {
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Applies one turn attempt to the current quota of a fingerprint.
    ///
    /// Must run inside the store's per-key critical section.
    pub fn consume(current: Option<DemoQuota>, limit: u32) -> (DemoQuota, DemoQuotaDecision) {
        let quota = current.unwrap_or_default();
        if quota.used >= limit {
            return (
                quota,
                DemoQuotaDecision {
                    allowed: false,
                    remaining: 0,
                },
            );
        }

        let next = DemoQuota { used: quota.used + 1 };
        let decision = DemoQuotaDecision {
            allowed: true,
            remaining: limit - next.used,
        };
        (next, decision)
    }
}

/// Outcome of a demo turn check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemoQuotaDecision {
    pub allowed: bool,
    pub remaining: u32,
}
