//! Throttle domain - fixed-window rate limits and demo turn quotas.
//!
//! Holds the pure state transitions. Atomicity and storage are provided by
//! the `ThrottleStore` port; orchestration lives in
//! `application::throttle::ThrottleLedger`.

mod demo_quota;
mod errors;
mod rate_window;

pub use demo_quota::{DemoQuota, DemoQuotaDecision, DEFAULT_DEMO_MESSAGE_LIMIT};
pub use errors::ThrottleError;
pub(crate) use errors::require_key;
pub use rate_window::{RateLimitDecision, RateWindow};
