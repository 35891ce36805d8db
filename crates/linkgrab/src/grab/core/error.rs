//! Error types for the grab system

use thiserror::Error;

/// Custom error types for the grab pipeline
#[derive(Error, Debug)]
pub enum GrabError {
    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("browser protocol error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not persist download: {0}")]
    Save(String),

    #[error("browser session error: {0}")]
    Session(String),
}

pub type Result<T> = std::result::Result<T, GrabError>;

impl GrabError {
    /// Check whether the error is fatal to the whole batch.
    ///
    /// Only session-level failures abort a run; everything else is scoped to
    /// the link that produced it and the batch keeps going.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(self, GrabError::Session(_))
    }

    /// Get error category for metrics
    pub fn category(&self) -> &'static str {
        match self {
            GrabError::Navigation(_) => "navigation",
            GrabError::Browser(_) => "browser",
            GrabError::Io(_) => "io",
            GrabError::Save(_) => "save",
            GrabError::Session(_) => "session",
        }
    }
}
