//! HTTP adapter for throttle endpoints.

mod handlers;
mod routes;

pub use handlers::{DemoTurnResponse, ResetRateLimitResponse, ThrottleHandlers};
pub use routes::{demo_routes, throttle_ops_routes};
