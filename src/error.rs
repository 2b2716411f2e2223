//! Error types for formsync

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// How a failed submission is classified when it is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not be built (bad method, bad URL)
    Request,
    /// The server answered with a status of 300 or above
    Status,
    /// The exchange itself failed or the body was not a usable payload
    Payload,
    /// Configuration or local I/O problem
    Local,
}

/// Errors produced by formsync
#[derive(Debug, Error)]
pub enum Error {
    /// Server answered with a non-success status
    #[error("submit request failed with status {status} {status_text}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase (may be empty)
        status_text: String,
    },

    /// Network-level failure from the HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-HTTP transport
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body was not valid JSON
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Response JSON did not have a usable shape
    #[error("invalid response payload: {0}")]
    Payload(String),

    /// Form method is neither GET nor POST and the policy rejects it
    #[error("unsupported form method: {0}")]
    UnsupportedMethod(String),

    /// A URL could not be parsed or resolved
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    /// Local I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify this error for reporting
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Status { .. } => FailureKind::Status,
            Self::Http(_) | Self::Transport(_) | Self::Json(_) | Self::Payload(_) => {
                FailureKind::Payload
            }
            Self::UnsupportedMethod(_) | Self::Url(_) => FailureKind::Request,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => FailureKind::Local,
        }
    }

    /// Status code for status failures
    pub const fn status(&self) -> Option<u16> {
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
    fn test_status_error_message() {
        let err = Error::Status {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "submit request failed with status 404 Not Found"
        );
        assert_eq!(err.kind(), FailureKind::Status);
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_parse_failure_is_payload_kind() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{nope")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), FailureKind::Payload);
        assert_eq!(err.status(), None);
    }
}
