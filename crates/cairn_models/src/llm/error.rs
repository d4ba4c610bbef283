//! Failures of model calls.

use core::time::Duration;

/// Failure to obtain a typed value from a model reply.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The model replied with nothing but whitespace.
    #[error("model reply was empty")]
    Empty,

    /// The reply is not JSON of the expected shape.
    #[error("model reply did not match the expected shape: {source}")]
    Malformed {
        /// The reply as received.
        raw: String,
        /// Why decoding failed.
        #[source]
        source: serde_json::Error,
    },

    /// No JSON schema could be produced for the expected type.
    #[error("could not build output schema: {0}")]
    Schema(String),

    /// The model call itself failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Failure of a single model call.
///
/// None of these are retried by this crate.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The request never produced a response (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A payload could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Credentials were missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The provider asked the caller to slow down.
    #[error("rate limited{}", .retry_after.map(|d| format!(", retry after {}s", d.as_secs())).unwrap_or_default())]
    RateLimited {
        /// How long the provider asked to wait, when it said.
        retry_after: Option<Duration>,
    },

    /// The request could not be built for the provider.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider answered, but not in a form this crate understands.
    #[error("malformed response: {0}")]
    InvalidResponse(String),

    /// The model declined to answer.
    #[error("model refused the request: {0}")]
    Refusal(String),

    /// The provider rejected the request.
    #[error("provider error{}: {message}", .code.as_ref().map(|c| format!(" ({c})")).unwrap_or_default())]
    Api {
        /// Machine-readable error code, when the provider sent one.
        code: Option<String>,
        /// The provider's explanation.
        message: String,
    },
}
