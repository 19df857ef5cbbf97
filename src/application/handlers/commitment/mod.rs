//! Commitment command and query handlers.

mod create_commitment;
mod dispatch_reminders;
mod get_reminders;
mod mark_missed;
mod update_progress;

pub use create_commitment::{CreateCommitmentCommand, CreateCommitmentHandler};
pub use dispatch_reminders::{DispatchRemindersHandler, DispatchRemindersResult};
pub use get_reminders::{GetRemindersHandler, GetRemindersQuery, RemindersView};
pub use mark_missed::{MarkMissedCommand, MarkMissedHandler};
pub use update_progress::{UpdateProgressCommand, UpdateProgressHandler};
