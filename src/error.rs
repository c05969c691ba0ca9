use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong talking to the backend.
///
/// A missing record (`NotFound`) is kept apart from a backend that could not
/// be reached (`Transport`, `Unavailable`) so views can tell the user which
/// one happened.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("backend temporarily unavailable, requests are paused")]
    Unavailable,

    #[error("request cancelled by navigation")]
    Cancelled,

    #[error("invalid input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),

    #[error("could not encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

impl ApiError {
    /// Failures that say something about the backend's health, as opposed to
    /// the request itself.
    pub fn is_backend_failure(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => status.is_server_error(),
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_server_side_failures_count_against_the_backend() {
        let server = ApiError::Status { status: StatusCode::BAD_GATEWAY, body: String::new() };
        let client = ApiError::Status { status: StatusCode::BAD_REQUEST, body: String::new() };
        assert!(server.is_backend_failure());
        assert!(!client.is_backend_failure());
        assert!(!ApiError::NotFound("movie 3".into()).is_backend_failure());
        assert!(!ApiError::Cancelled.is_backend_failure());
    }
}
