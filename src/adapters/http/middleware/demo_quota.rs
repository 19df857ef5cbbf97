//! Demo quota middleware.
//!
//! Anonymous demo visitors get a fixed number of AI turns, tracked per
//! browser fingerprint sent in `X-Demo-Fingerprint`. The admitted decision
//! is placed in the request extensions for the handler, and the remaining
//! count is echoed in `X-Demo-Remaining`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::ThrottleLedger;
use crate::domain::foundation::ErrorCode;

pub static X_DEMO_FINGERPRINT: HeaderName = HeaderName::from_static("x-demo-fingerprint");
pub static X_DEMO_REMAINING: HeaderName = HeaderName::from_static("x-demo-remaining");

/// Demo quota middleware state.
#[derive(Clone)]
pub struct DemoQuotaState {
    ledger: Arc<ThrottleLedger>,
    limit: u32,
}

impl DemoQuotaState {
    pub fn new(ledger: Arc<ThrottleLedger>, limit: u32) -> Self {
        Self { ledger, limit }
    }
}

/// Consumes one demo turn for the request's fingerprint.
///
/// - missing or blank fingerprint: 400
/// - quota exhausted: 429 `DEMO_LIMIT_REACHED`
pub async fn demo_quota_middleware(
    State(state): State<DemoQuotaState>,
    mut request: Request,
    next: Next,
) -> Response {
    let fingerprint = request
        .headers()
        .get(&X_DEMO_FINGERPRINT)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string);

    let Some(fingerprint) = fingerprint else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("X-Demo-Fingerprint header is required")),
        )
            .into_response();
    };

    let decision = match state.ledger.check_demo_message_limit(&fingerprint, state.limit) {
        Ok(decision) => decision,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::throttle(&e))).into_response();
        }
    };

    if !decision.allowed {
        let body = ErrorResponse::new(
            ErrorCode::DemoLimitReached,
            "Demo message limit reached. Sign up to keep going.",
        )
        .with_details(serde_json::json!({ "limit": state.limit }));
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        response
            .headers_mut()
            .insert(X_DEMO_REMAINING.clone(), HeaderValue::from(0u32));
        return response;
    }

    request.extensions_mut().insert(decision);
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(X_DEMO_REMAINING.clone(), HeaderValue::from(decision.remaining));
    response
}
