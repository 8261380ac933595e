use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Error raised by a transport or handler. Completion failures are values, see [`CompletionError`].
#[derive(Error, Debug)]
pub enum EssayError {
    #[error("Bot error: {0}")]
    Bot(String),
}

pub type Result<T> = std::result::Result<T, EssayError>;

/// Category of a failed completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NetworkError,
    Timeout,
    UpstreamError,
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::NetworkError => "NetworkError",
            FailureKind::Timeout => "Timeout",
            FailureKind::UpstreamError => "UpstreamError",
            FailureKind::MalformedResponse => "MalformedResponse",
        };
        f.write_str(name)
    }
}

/// Failure of a single completion request. Returned as a value, never raised past the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: no response within {0:?}")]
    Timeout(Duration),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CompletionError::Network(_) => FailureKind::NetworkError,
            CompletionError::Timeout(_) => FailureKind::Timeout,
            CompletionError::Upstream { .. } => FailureKind::UpstreamError,
            CompletionError::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }
}

/// Outcome of one completion request: generated text or a typed failure.
pub type CompletionResult = std::result::Result<String, CompletionError>;
