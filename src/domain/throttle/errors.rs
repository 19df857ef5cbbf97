//! Throttle-specific error types.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Validation failures for throttle operations.
///
/// A denial is a decision, never one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThrottleError {
    #[error("{field} cannot be empty")]
    EmptyKey { field: &'static str },

    #[error("rate limit must be at least 1")]
    ZeroLimit,

    #[error("rate window must be longer than zero")]
    ZeroWindow,
}

impl ThrottleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ThrottleError::EmptyKey { .. } => ErrorCode::EmptyField,
            ThrottleError::ZeroLimit | ThrottleError::ZeroWindow => ErrorCode::OutOfRange,
        }
    }
}

/// Rejects blank identities and fingerprints.
pub(crate) fn require_key<'a>(field: &'static str, key: &'a str) -> Result<&'a str, ThrottleError> {
    if key.trim().is_empty() {
        return Err(ThrottleError::EmptyKey { field });
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_key_rejects_blank() {
        assert_eq!(
            require_key("identity", "  "),
            Err(ThrottleError::EmptyKey { field: "identity" })
        );
        assert_eq!(require_key("identity", "ip-1"), Ok("ip-1"));
    }

    #[test]
    fn errors_map_to_codes() {
        assert_eq!(ThrottleError::ZeroLimit.code(), ErrorCode::OutOfRange);
        assert_eq!(
            ThrottleError::EmptyKey { field: "fingerprint" }.to_string(),
            "fingerprint cannot be empty"
        );
    }
}
