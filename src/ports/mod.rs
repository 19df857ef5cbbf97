//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Throttle Ports
//!
//! - `ThrottleStore` - Keyed state with an atomic per-key update primitive
//! - `Clock` - Source of "now" for window expiry and classification
//!
//! ## Commitment Ports
//!
//! - `CommitmentRepository` - Load-all / save-one persistence
//! - `ReminderDispatcher` - Hand-off of reminder digests for delivery

mod clock;
mod commitment_repository;
mod reminder_dispatcher;
mod throttle_store;

pub use clock::Clock;
pub use commitment_repository::CommitmentRepository;
pub use reminder_dispatcher::{ReminderDigest, ReminderDispatcher, ReminderItem};
pub use throttle_store::ThrottleStore;
