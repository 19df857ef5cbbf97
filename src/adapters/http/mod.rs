//! HTTP adapters - REST API implementations.
//!
//! Each concern has its own HTTP adapter; `router` assembles them.

pub mod commitment;
pub mod error;
pub mod middleware;
pub mod router;
pub mod throttle;

// Re-export key types for convenience
pub use commitment::CommitmentHandlers;
pub use error::ErrorResponse;
pub use router::{app_router, AppState};
pub use throttle::ThrottleHandlers;
