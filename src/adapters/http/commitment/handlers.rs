//! HTTP handlers for commitment endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::commitment::{
    CreateCommitmentCommand, CreateCommitmentHandler, DispatchRemindersHandler,
    GetRemindersHandler, GetRemindersQuery, MarkMissedCommand, MarkMissedHandler,
    UpdateProgressCommand, UpdateProgressHandler,
};
use crate::domain::commitment::CommitmentError;
use crate::domain::foundation::{CommitmentId, ErrorCode, UserId, ValidationError};

use super::dto::{
    CommitmentResponse, CreateCommitmentRequest, MarkMissedRequest, RemindersQueryParams,
    UpdateProgressRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CommitmentHandlers {
    create_handler: Arc<CreateCommitmentHandler>,
    progress_handler: Arc<UpdateProgressHandler>,
    missed_handler: Arc<MarkMissedHandler>,
    reminders_handler: Arc<GetRemindersHandler>,
    dispatch_handler: Arc<DispatchRemindersHandler>,
}

impl CommitmentHandlers {
    pub fn new(
        create_handler: Arc<CreateCommitmentHandler>,
        progress_handler: Arc<UpdateProgressHandler>,
        missed_handler: Arc<MarkMissedHandler>,
        reminders_handler: Arc<GetRemindersHandler>,
        dispatch_handler: Arc<DispatchRemindersHandler>,
    ) -> Self {
        Self {
            create_handler,
            progress_handler,
            missed_handler,
            reminders_handler,
            dispatch_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/commitments - Create a commitment
pub async fn create_commitment(
    State(handlers): State<CommitmentHandlers>,
    Json(req): Json<CreateCommitmentRequest>,
) -> Response {
    let owner = match UserId::new(req.owner) {
        Ok(owner) => owner,
        Err(e) => return validation_response(&e),
    };

    let cmd = CreateCommitmentCommand {
        owner,
        action: req.action,
        deadline: req.deadline,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(commitment) => (
            StatusCode::CREATED,
            Json(CommitmentResponse::from(commitment)),
        )
            .into_response(),
        Err(e) => handle_commitment_error(e),
    }
}

/// PATCH /api/commitments/:id/progress - Record progress
pub async fn update_progress(
    State(handlers): State<CommitmentHandlers>,
    Path(commitment_id): Path<String>,
    Json(req): Json<UpdateProgressRequest>,
) -> Response {
    let commitment_id = match commitment_id.parse::<CommitmentId>() {
        Ok(id) => id,
        Err(e) => return validation_response(&e),
    };

    let progress = match req.progress() {
        Ok(progress) => progress,
        Err(e) => return validation_response(&e),
    };

    let cmd = UpdateProgressCommand {
        commitment_id,
        progress,
        status: req.status,
        note: req.note,
    };

    match handlers.progress_handler.handle(cmd).await {
        Ok(commitment) => (StatusCode::OK, Json(CommitmentResponse::from(commitment))).into_response(),
        Err(e) => handle_commitment_error(e),
    }
}

/// POST /api/commitments/:id/missed - Mark a commitment missed
pub async fn mark_missed(
    State(handlers): State<CommitmentHandlers>,
    Path(commitment_id): Path<String>,
    Json(req): Json<MarkMissedRequest>,
) -> Response {
    let commitment_id = match commitment_id.parse::<CommitmentId>() {
        Ok(id) => id,
        Err(e) => return validation_response(&e),
    };

    let cmd = MarkMissedCommand {
        commitment_id,
        note: req.note,
    };

    match handlers.missed_handler.handle(cmd).await {
        Ok(commitment) => (StatusCode::OK, Json(CommitmentResponse::from(commitment))).into_response(),
        Err(e) => handle_commitment_error(e),
    }
}

/// GET /api/commitments/reminders?owner= - Overdue and upcoming commitments
pub async fn get_reminders(
    State(handlers): State<CommitmentHandlers>,
    Query(params): Query<RemindersQueryParams>,
) -> Response {
    let owner = match UserId::new(params.owner) {
        Ok(owner) => owner,
        Err(e) => return validation_response(&e),
    };

    match handlers
        .reminders_handler
        .handle(GetRemindersQuery { owner })
        .await
    {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_commitment_error(e),
    }
}

/// POST /internal/reminders/dispatch - Run one reminder batch
pub async fn dispatch_reminders(State(handlers): State<CommitmentHandlers>) -> Response {
    match handlers.dispatch_handler.handle().await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => handle_commitment_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn validation_response(error: &ValidationError) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::validation(error))).into_response()
}

fn handle_commitment_error(error: CommitmentError) -> Response {
    match error {
        CommitmentError::Validation(e) => validation_response(&e),
        CommitmentError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(
                ErrorCode::CommitmentNotFound,
                format!("Commitment not found: {}", id),
            )),
        )
            .into_response(),
        CommitmentError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "commitment store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(msg)),
            )
                .into_response()
        }
    }
}
