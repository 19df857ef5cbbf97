//! Commitment domain - lifecycle of user-declared commitments.
//!
//! # Module Organization
//!
//! - `aggregate` - The `Commitment` entity and its progress history
//! - `status` - Lifecycle status and progress-based inference
//! - `reminders` - Read-time urgency classification and day counts
//! - `errors` - Commitment-specific errors

mod aggregate;
mod errors;
mod reminders;
mod status;

pub use aggregate::{Commitment, ProgressEntry, MAX_ACTION_LENGTH};
pub use errors::CommitmentError;
pub use reminders::{
    classify_reminders, classify_reminders_within, days_overdue, days_until, ReminderBuckets,
    Urgency, DEFAULT_UPCOMING_HORIZON_DAYS,
};
pub use status::CommitmentStatus;
