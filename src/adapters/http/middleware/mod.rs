//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `rate_limit` - Per-IP fixed-window rate limiting
//! - `demo_quota` - Per-fingerprint demo turn quota

pub mod demo_quota;
pub mod rate_limit;

pub use demo_quota::{demo_quota_middleware, DemoQuotaState};
pub use rate_limit::{rate_limit_middleware, RateLimitState};
