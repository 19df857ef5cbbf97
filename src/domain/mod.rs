//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `throttle` - Fixed-window rate limits and demo turn quotas
//! - `commitment` - Commitment lifecycle and reminder classification

pub mod commitment;
pub mod foundation;
pub mod throttle;
