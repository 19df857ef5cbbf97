//! HTTP routes for commitment endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    create_commitment, dispatch_reminders, get_reminders, mark_missed, update_progress,
    CommitmentHandlers,
};

/// Public commitment endpoints, mounted under `/api/commitments`.
pub fn commitment_routes(handlers: CommitmentHandlers) -> Router {
    Router::new()
        .route("/", post(create_commitment))
        .route("/reminders", get(get_reminders))
        .route("/:id/progress", patch(update_progress))
        .route("/:id/missed", post(mark_missed))
        .with_state(handlers)
}

/// Operator endpoints, mounted under `/internal/reminders`.
pub fn reminder_ops_routes(handlers: CommitmentHandlers) -> Router {
    Router::new()
        .route("/dispatch", post(dispatch_reminders))
        .with_state(handlers)
}
