//! HTTP adapter for commitment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CommitmentResponse, CreateCommitmentRequest, MarkMissedRequest, RemindersQueryParams,
    UpdateProgressRequest,
};
pub use handlers::CommitmentHandlers;
pub use routes::{commitment_routes, reminder_ops_routes};
