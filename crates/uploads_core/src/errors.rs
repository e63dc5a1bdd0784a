use std::io;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadsError {
    #[error("invalid channel reference: {0}")]
    InvalidReference(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("platform API error (code={code}, message={message})")]
    Api { code: u16, message: String },
    #[error("HTTP request failed with status {status}")]
    Http { status: StatusCode },
    #[error("invalid API response: {0}")]
    InvalidResponse(String),
    #[error("file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Other(String),
}

impl UploadsError {
    /// True for transport and platform-reported failures, the "HTTP error"
    /// category shown to the user.
    pub fn is_platform(&self) -> bool {
        matches!(
            self,
            UploadsError::Request(_) | UploadsError::Api { .. } | UploadsError::Http { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("channel export failed: {0}")]
    Core(#[from] UploadsError),
    #[error("{0}")]
    Context(String),
}

impl ExportError {
    pub fn context<T: Into<String>>(self, message: T) -> Self {
        let message = message.into();
        match self {
            ExportError::Core(err) => ExportError::Context(format!("{message}: {err}")),
            ExportError::Context(existing) => {
                ExportError::Context(format!("{message}: {existing}"))
            }
        }
    }

    pub fn is_platform(&self) -> bool {
        match self {
            ExportError::Core(err) => err.is_platform(),
            ExportError::Context(_) => false,
        }
    }
}
