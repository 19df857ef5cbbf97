//! Adapters - Implementations of ports for specific technologies.
//!
//! - `clock` - System and manual clocks
//! - `commitment` - Commitment persistence
//! - `http` - axum routes and middleware
//! - `notifications` - Reminder delivery
//! - `throttle` - Throttle store and reaper

pub mod clock;
pub mod commitment;
pub mod http;
pub mod notifications;
pub mod throttle;
