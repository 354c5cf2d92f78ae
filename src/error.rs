use std::sync::Arc;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the client.
///
/// Every error is returned to the direct caller of the operation that
/// triggered it; the client never retries, backs off or substitutes
/// fallback values.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or empty credential at construction time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Token acquisition failed. The underlying failure is memoized, so
    /// every operation on this client returns the same cause until a
    /// fresh client is constructed.
    #[error("authentication failed: {0}")]
    Auth(Arc<ApiError>),

    /// The server answered with a non-zero envelope code.
    #[error("api error {code}: {message}")]
    Api { code: i64, message: String },

    /// The server answered with a non-success HTTP status.
    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected envelope shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A pagination safety guard tripped (repeated cursor or page cap).
    #[error("pagination aborted: {0}")]
    Pagination(String),
}

impl ApiError {
    /// True when the error stems from token acquisition; callers seeing
    /// this need a fresh client with working credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ApiError::Configuration(_))
    }
}
