//! HTTP handlers for throttle endpoints.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::adapters::http::error::ErrorResponse;
use crate::application::{ThrottleLedger, ThrottleStats};
use crate::domain::throttle::DemoQuotaDecision;

/// Shared state for throttle endpoints.
#[derive(Clone)]
pub struct ThrottleHandlers {
    ledger: Arc<ThrottleLedger>,
}

impl ThrottleHandlers {
    pub fn new(ledger: Arc<ThrottleLedger>) -> Self {
        Self { ledger }
    }
}

/// Response after resetting a rate window.
#[derive(Debug, Clone, Serialize)]
pub struct ResetRateLimitResponse {
    pub identity: String,
    pub existed: bool,
}

/// Response for an admitted demo turn.
#[derive(Debug, Clone, Serialize)]
pub struct DemoTurnResponse {
    pub allowed: bool,
    pub remaining: u32,
}

/// GET /internal/throttle/stats - Entry counts
pub async fn get_stats(State(handlers): State<ThrottleHandlers>) -> Json<ThrottleStats> {
    Json(handlers.ledger.stats())
}

/// DELETE /internal/throttle/identities/:identity - Restore an identity's quota
pub async fn reset_rate_limit(
    State(handlers): State<ThrottleHandlers>,
    Path(identity): Path<String>,
) -> Response {
    match handlers.ledger.reset_rate_limit(&identity) {
        Ok(existed) => {
            tracing::info!(identity = %identity, existed, "rate limit reset");
            (
                StatusCode::OK,
                Json(ResetRateLimitResponse { identity, existed }),
            )
                .into_response()
        }
        Err(e) => (StatusCode::BAD_REQUEST, Json(ErrorResponse::throttle(&e))).into_response(),
    }
}

/// DELETE /api/demo/:fingerprint/quota - Clear a fingerprint's demo count
pub async fn reset_demo_quota(
    State(handlers): State<ThrottleHandlers>,
    Path(fingerprint): Path<String>,
) -> Response {
    match handlers.ledger.reset_demo_message_count(&fingerprint) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, Json(ErrorResponse::throttle(&e))).into_response(),
    }
}

/// POST /api/demo/turns - Reserve one demo turn
///
/// Runs behind `demo_quota_middleware`, which has already consumed the turn.
pub async fn reserve_demo_turn(Extension(decision): Extension<DemoQuotaDecision>) -> Response {
    (
        StatusCode::OK,
        Json(DemoTurnResponse {
            allowed: decision.allowed,
            remaining: decision.remaining,
        }),
    )
        .into_response()
}
