use thiserror::Error;

/// Errors produced by the remote service clients.
///
/// The taxonomy mirrors what can actually go wrong on the wire: the request
/// never completed, the service answered non-2xx with an `{error}` body, or
/// the service answered 2xx with a body we cannot decode.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the decoded `{error}` body, or the raw
    /// body text when that decoding fails.
    #[error("Service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// HTTP status of an applicative rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;
