//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the throttling and commitment domains.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CommitmentId, UserId};
pub use percentage::Percentage;
pub use timestamp::{Timestamp, MILLIS_PER_DAY};
