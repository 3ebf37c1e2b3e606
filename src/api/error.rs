use thiserror::Error;

/// Failures an update or fetch call can surface.
///
/// All variants are handled identically at the call site: the optimistic
/// change is rolled back, the busy indicator is cleared and a transient
/// notification is shown. Nothing is retried automatically.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network/transport failure before a body could be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status with no parseable JSON body.
    #[error("server returned HTTP {status}")]
    Http { status: u16 },

    /// Server answered with `success: false`; carries its `error` string.
    #[error("{0}")]
    Rejected(String),

    /// Response body was not valid JSON of the expected shape.
    #[error("malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}
