//! Top-level router assembly.

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::application::handlers::commitment::{
    CreateCommitmentHandler, DispatchRemindersHandler, GetRemindersHandler, MarkMissedHandler,
    UpdateProgressHandler,
};
use crate::application::ThrottleLedger;
use crate::config::AppConfig;
use crate::ports::{Clock, CommitmentRepository, ReminderDispatcher};

use super::commitment::{commitment_routes, reminder_ops_routes, CommitmentHandlers};
use super::middleware::{rate_limit_middleware, DemoQuotaState, RateLimitState};
use super::throttle::{demo_routes, throttle_ops_routes, ThrottleHandlers};

/// Everything the router needs.
#[derive(Clone)]
pub struct AppState {
    pub commitments: CommitmentHandlers,
    pub throttle: ThrottleHandlers,
    pub rate_limit: RateLimitState,
    pub demo_quota: DemoQuotaState,
}

impl AppState {
    /// Wires every handler from its collaborators and the loaded config.
    pub fn new(
        config: &AppConfig,
        ledger: Arc<ThrottleLedger>,
        repository: Arc<dyn CommitmentRepository>,
        dispatcher: Arc<dyn ReminderDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let horizon_days = config.reminders.upcoming_horizon_days;
        let commitments = CommitmentHandlers::new(
            Arc::new(CreateCommitmentHandler::new(repository.clone(), clock.clone())),
            Arc::new(UpdateProgressHandler::new(repository.clone(), clock.clone())),
            Arc::new(MarkMissedHandler::new(repository.clone(), clock.clone())),
            Arc::new(GetRemindersHandler::new(
                repository.clone(),
                clock.clone(),
                horizon_days,
            )),
            Arc::new(DispatchRemindersHandler::new(
                repository,
                dispatcher,
                clock,
                horizon_days,
            )),
        );

        Self {
            commitments,
            throttle: ThrottleHandlers::new(ledger.clone()),
            rate_limit: RateLimitState::new(
                ledger.clone(),
                config.throttle.requests_per_window,
                config.throttle.window(),
            ),
            demo_quota: DemoQuotaState::new(ledger, config.throttle.demo_message_limit),
        }
    }
}

/// Builds the application router.
///
/// `/api` routes are rate limited per client IP; `/internal` and `/health`
/// are not.
pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/commitments", commitment_routes(state.commitments.clone()))
        .nest("/demo", demo_routes(state.throttle.clone(), state.demo_quota))
        .layer(middleware::from_fn_with_state(
            state.rate_limit,
            rate_limit_middleware,
        ));

    let internal = Router::new()
        .nest("/throttle", throttle_ops_routes(state.throttle))
        .nest("/reminders", reminder_ops_routes(state.commitments));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .nest("/internal", internal)
}

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
