use thiserror::Error;

/// Error type for upstream openFDA calls
#[derive(Error, Debug)]
pub enum FdaError {
    /// Upstream answered 404, which openFDA uses for "no matching labels"
    #[error("No matching labels found upstream")]
    NotFound,

    /// Upstream answered 429
    #[error("Upstream rate limit exceeded")]
    RateLimited,

    /// Any other non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// Connection, timeout or TLS failure
    #[error("Upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body could not be decoded as a label response
    #[error("Malformed upstream response: {0}")]
    Decode(String),

    /// Client could not be built from its configuration
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl FdaError {
    /// HTTP status equivalent of this error, if the upstream produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FdaError::NotFound => Some(404),
            FdaError::RateLimited => Some(429),
            FdaError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FdaError {
    fn from(error: serde_json::Error) -> Self {
        FdaError::Decode(error.to_string())
    }
}
