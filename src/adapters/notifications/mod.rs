//! Reminder delivery adapters.

mod tracing_dispatcher;

pub use tracing_dispatcher::TracingReminderDispatcher;
