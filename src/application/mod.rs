//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//!
//! - `throttle` - The throttle ledger service (synchronous, hot path)
//! - `handlers` - Commitment command and query handlers (async, store-backed)

pub mod handlers;
pub mod throttle;

pub use handlers::commitment::{
    CreateCommitmentCommand, CreateCommitmentHandler, DispatchRemindersHandler,
    DispatchRemindersResult, GetRemindersHandler, GetRemindersQuery, MarkMissedCommand,
    MarkMissedHandler, RemindersView, UpdateProgressCommand, UpdateProgressHandler,
};
pub use throttle::{ThrottleLedger, ThrottleStats};
