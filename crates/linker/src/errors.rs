//! Error types for calls that cross the host boundary.
//!
//! The extractor and upserter cannot fail on string input, so the only errors
//! in this crate describe host operations: fetching the pull request's commits
//! and writing its description back. Adapters map their transport failures
//! onto [`HostError`]; the orchestration layer decides which of them halt a
//! run and which are only logged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed call to the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum HostError {
    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("{operation} request failed: {message}")]
    Transport {
        /// Short label of the host operation (e.g. `"list pull request commits"`).
        operation: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The host answered with a non-success HTTP status.
    #[error("{operation} failed with status {status}: {body}")]
    Status {
        operation: String,
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },

    /// The host answered successfully but the payload could not be decoded.
    #[error("failed to decode {operation} response: {message}")]
    Decode { operation: String, message: String },
}

impl HostError {
    /// Label of the host operation that failed.
    pub fn operation(&self) -> &str {
        match self {
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }

    /// HTTP status returned by the host, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reports_operation_and_code() {
        let err = HostError::Status {
            operation: "update pull request".into(),
            status: 422,
            body: "Validation Failed".into(),
        };
        assert_eq!(err.operation(), "update pull request");
        assert_eq!(err.status(), Some(422));
        assert_eq!(
            err.to_string(),
            "update pull request failed with status 422: Validation Failed"
        );
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = HostError::Transport {
            operation: "list pull request commits".into(),
            message: "connection refused".into(),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection refused"));
    }
}
