// src/error.rs
//! Application error types.
//!
//! Every failure in the fetch/assemble path surfaces as an `AppError`.
//! Nothing in the assembler recovers locally, so the variant tells the
//! caller exactly which boundary gave way.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Notion answered with a non-2xx status.
    ///
    /// `headers` is the JSON serialization of the response headers as
    /// `{name: [values...]}`; `body` is `None` when the body itself could
    /// not be read.
    #[error(
        "Notion API error ({})\n{headers}\n{}",
        .status.as_u16(),
        .body.as_deref().unwrap_or("null")
    )]
    RemoteApi {
        status: reqwest::StatusCode,
        headers: String,
        body: Option<String>,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// HTTP status of a remote failure, if this error came from Notion itself.
    pub fn remote_status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::InvalidConfiguration(format!("Invalid base URL: {}", err))
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
