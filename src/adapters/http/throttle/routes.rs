//! HTTP routes for throttle endpoints.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    get_stats, reserve_demo_turn, reset_demo_quota, reset_rate_limit, ThrottleHandlers,
};
use crate::adapters::http::middleware::{demo_quota_middleware, DemoQuotaState};

/// Operator endpoints, mounted under `/internal/throttle`.
pub fn throttle_ops_routes(handlers: ThrottleHandlers) -> Router {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/identities/:identity", delete(reset_rate_limit))
        .with_state(handlers)
}

/// Demo endpoints, mounted under `/api/demo`.
///
/// Only turn reservation is metered; resetting a quota is not.
pub fn demo_routes(handlers: ThrottleHandlers, demo_quota: DemoQuotaState) -> Router {
    let metered = Router::new()
        .route("/turns", post(reserve_demo_turn))
        .layer(middleware::from_fn_with_state(demo_quota, demo_quota_middleware));

    Router::new()
        .route("/:fingerprint/quota", delete(reset_demo_quota))
        .with_state(handlers)
        .merge(metered)
}
