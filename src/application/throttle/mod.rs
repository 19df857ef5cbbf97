//! Throttle application service.

mod ledger;

pub use ledger::{ThrottleLedger, ThrottleStats};
