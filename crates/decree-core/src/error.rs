//! Error taxonomy for policy service calls and workflow transitions.

use reqwest::StatusCode;

use crate::workflow::WorkflowState;

/// Result type for decree-core operations.
pub type Result<T> = std::result::Result<T, DecreeError>;

/// Errors surfaced by the policy service, token service and workflows.
#[derive(Debug, thiserror::Error)]
pub enum DecreeError {
    /// Transport failure: connection refused, TLS, timeout from the transport.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP 401. Usually a missing "Code" scope grant or a permission problem.
    #[error("not authorized to call {url}")]
    Authorization { url: String },

    /// HTTP 404.
    #[error("resource not found at {url}")]
    NotFound { url: String },

    /// Any other non-success status.
    #[error("request to {url} failed with HTTP {status}")]
    Http { status: StatusCode, url: String },

    /// The response body could not be decoded.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// No access token could be obtained.
    #[error("no access token available: environment variable {0} is not set")]
    MissingToken(String),

    /// The policy id is not part of the current listing.
    #[error("policy {0} is not in the current listing")]
    UnknownPolicy(i64),

    /// A workflow was asked to move along an edge its state machine lacks.
    #[error("cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: WorkflowState,
        to: WorkflowState,
    },

    /// The organization URL cannot address a project.
    #[error("invalid organization URL: {0}")]
    InvalidUrl(String),
}

impl DecreeError {
    /// Whether the failure was an HTTP 401.
    pub fn is_authorization(&self) -> bool {
        matches!(self, DecreeError::Authorization { .. })
    }

    /// Whether the failure was an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DecreeError::NotFound { .. })
    }

    /// Map a non-success status into the matching error kind.
    pub(crate) fn from_status(status: StatusCode, url: &str) -> Self {
        let url = url.to_string();
        match status {
            StatusCode::UNAUTHORIZED => DecreeError::Authorization { url },
            StatusCode::NOT_FOUND => DecreeError::NotFound { url },
            status => DecreeError::Http { status, url },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_authorization() {
        let err = DecreeError::from_status(StatusCode::UNAUTHORIZED, "http://x");
        assert!(err.is_authorization());
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let err = DecreeError::from_status(StatusCode::NOT_FOUND, "http://x");
        assert!(err.is_not_found());
    }

    #[test]
    fn other_status_keeps_code() {
        let err = DecreeError::from_status(StatusCode::BAD_REQUEST, "http://x");
        match err {
            DecreeError::Http { status, .. } => assert_eq!(status, StatusCode::BAD_REQUEST),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
