//! Commitment-specific error types.

use thiserror::Error;

use crate::domain::foundation::{CommitmentId, DomainError, ErrorCode, ValidationError};

/// Commitment-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitmentError {
    /// Input failed validation (progress range, empty action).
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No commitment with this id in the loaded set.
    #[error("Commitment not found: {0}")]
    NotFound(CommitmentId),

    /// The surrounding store failed; never produced by the domain itself.
    #[error("Error: {0}")]
    Infrastructure(String),
}

impl CommitmentError {
    pub fn not_found(id: CommitmentId) -> Self {
        CommitmentError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CommitmentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CommitmentError::Validation(_) => ErrorCode::ValidationFailed,
            CommitmentError::NotFound(_) => ErrorCode::CommitmentNotFound,
            CommitmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for CommitmentError {
    fn from(err: DomainError) -> Self {
        CommitmentError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_code() {
        let err = CommitmentError::not_found(CommitmentId::new(9));
        assert_eq!(err.code(), ErrorCode::CommitmentNotFound);
        assert_eq!(err.to_string(), "Commitment not found: 9");
    }

    #[test]
    fn validation_wraps_field_error() {
        let err: CommitmentError = ValidationError::out_of_range("progress", 0, 100, 101).into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(err.to_string().contains("progress"));
    }

    #[test]
    fn domain_error_becomes_infrastructure() {
        let err: CommitmentError = DomainError::new(ErrorCode::DatabaseError, "down").into();
        assert!(matches!(err, CommitmentError::Infrastructure(_)));
    }
}
