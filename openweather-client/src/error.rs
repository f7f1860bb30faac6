use reqwest::StatusCode;

/// Failure modes of a single API call. Nothing is retried or recovered
/// internally; every variant surfaces to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport-level failure: DNS, timeout, connection refused, TLS.
    #[error("request to the weather service failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The service answered with a non-2xx status, e.g. 404 for an unknown
    /// city or 401 for a bad API key. `body` is truncated for display.
    #[error("weather service returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body did not match the expected schema.
    #[error("failed to decode weather service response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// Status code of an HTTP-level failure, if that is what this is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
