//! Rate limiting middleware for axum.
//!
//! Gates each request on the caller's fixed-window budget in the
//! `ThrottleLedger`. The caller is identified by client IP.
//!
//! Rate limit status is returned in standard HTTP headers:
//! - `X-RateLimit-Limit`: Maximum requests allowed in the window
//! - `X-RateLimit-Remaining`: Requests remaining in the current window
//! - `X-RateLimit-Reset`: Unix timestamp when the window resets
//! - `Retry-After`: Seconds to wait (only on 429 response)
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::post, middleware};
//!
//! let state = RateLimitState::new(ledger, 60, Duration::from_secs(60));
//!
//! let app = Router::new()
//!     .route("/api/resource", post(handler))
//!     .layer(middleware::from_fn_with_state(state, rate_limit_middleware));
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::ThrottleLedger;
use crate::domain::foundation::ErrorCode;
use crate::domain::throttle::RateLimitDecision;

/// Standard rate limit header names.
pub mod headers {
    use super::HeaderName;

    /// Maximum requests allowed in the window.
    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    /// Requests remaining in the current window.
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    /// Unix timestamp when the window resets.
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// Rate limiter middleware state.
#[derive(Clone)]
pub struct RateLimitState {
    ledger: Arc<ThrottleLedger>,
    limit: u32,
    window: Duration,
}

impl RateLimitState {
    pub fn new(ledger: Arc<ThrottleLedger>, limit: u32, window: Duration) -> Self {
        Self {
            ledger,
            limit,
            window,
        }
    }
}

/// Rate limiting middleware keyed by client IP.
///
/// This middleware:
/// 1. Extracts client IP from forwarded headers or `ConnectInfo`
/// 2. Consumes one slot from that IP's window
/// 3. Returns 429 Too Many Requests once the window is exhausted
/// 4. Adds rate limit headers to admitted responses
///
/// Requests whose IP cannot be determined are passed through unmetered.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(client_ip) = extract_client_ip(&request, connect_info.as_ref()) else {
        return next.run(request).await;
    };

    let decision = match state
        .ledger
        .check_rate_limit(&client_ip, state.limit, state.window)
    {
        Ok(decision) => decision,
        Err(e) => {
            tracing::warn!("Rate limit check failed for {}: {}", client_ip, e);
            return next.run(request).await;
        }
    };

    if !decision.allowed {
        let retry_after_secs = decision.retry_after_secs(state.ledger.now());
        return rate_limit_response(&decision, retry_after_secs);
    }

    let mut response = next.run(request).await;
    add_rate_limit_headers(&mut response, &decision);
    response
}

/// Extract client IP from request, checking forwarded headers first.
///
/// Order of precedence:
/// 1. X-Forwarded-For header (first IP in list)
/// 2. X-Real-IP header
/// 3. ConnectInfo socket address
pub(crate) fn extract_client_ip<B>(
    request: &axum::http::Request<B>,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    // Check X-Forwarded-For first (for reverse proxy setups)
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        // Take the first IP (client IP, before any proxies)
        if let Some(first_ip) = forwarded.split(',').next().map(str::trim) {
            if !first_ip.is_empty() {
                return Some(first_ip.to_string());
            }
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
    {
        if !real_ip.is_empty() {
            return Some(real_ip.to_string());
        }
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}

/// Create a 429 Too Many Requests response.
fn rate_limit_response(decision: &RateLimitDecision, retry_after_secs: u64) -> Response {
    let body = ErrorResponse::new(ErrorCode::RateLimited, "Rate limit exceeded")
        .with_details(serde_json::json!({ "retry_after_secs": retry_after_secs }));
    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    add_rate_limit_headers(&mut response, decision);
    response
        .headers_mut()
        .insert("Retry-After", HeaderValue::from(retry_after_secs));
    response
}

/// Add rate limit headers to a response.
fn add_rate_limit_headers(response: &mut Response, decision: &RateLimitDecision) {
    let headers = response.headers_mut();
    headers.insert(
        headers::X_RATELIMIT_LIMIT.clone(),
        HeaderValue::from(decision.limit),
    );
    headers.insert(
        headers::X_RATELIMIT_REMAINING.clone(),
        HeaderValue::from(decision.remaining),
    );
    headers.insert(
        headers::X_RATELIMIT_RESET.clone(),
        HeaderValue::from(decision.reset_at.as_unix_secs()),
    );
}
