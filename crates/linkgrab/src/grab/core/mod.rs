//! Core types used throughout the grab system
//!
//! This module contains the fundamental types that all other modules depend on.
//! By organizing these in a core module, we make the dependency relationships clear.

pub mod error;
pub mod progress;

// Re-export main types for convenience
pub use error::{GrabError, Result};
pub use progress::{
    CompositeProgressReporter, ConsoleProgressReporter, IntoProgressCallback,
    NullProgressReporter, ProgressCallback, ProgressEvent, ProgressReporter,
};

use std::path::PathBuf;

use serde::Serialize;

use crate::grab::session::DownloadSignal;

/// One link's unit of work through the grab protocol
///
/// Tasks are created by iterating a link list in order; the index is 1-based
/// and only used for reporting and fallback file naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTask {
    pub index: usize,
    pub url: String,
}

impl LinkTask {
    pub fn new<S: Into<String>>(index: usize, url: S) -> Self {
        Self {
            index,
            url: url.into(),
        }
    }
}

/// What the detection race produced for one task
///
/// Exactly one variant exists per task that reached the race stage. The
/// signal carries the completion handle for the persist step.
pub enum RaceOutcome {
    Detected(Box<dyn DownloadSignal>),
    TimedOut,
}

/// Terminal state of one link task
///
/// Every task ends in exactly one of these; none of them stops the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// The page could not be loaded within the navigation timeout
    NavigationFailed { reason: String },
    /// The page loaded but never announced a download within the window
    NoDownloadDetected,
    /// A download started but could not be persisted
    SaveFailed { reason: String },
    /// The downloaded file was persisted at the given path
    Saved { path: PathBuf },
}

impl LinkOutcome {
    /// Short outcome tag for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            LinkOutcome::NavigationFailed { .. } => "navigation_failed",
            LinkOutcome::NoDownloadDetected => "no_download_detected",
            LinkOutcome::SaveFailed { .. } => "save_failed",
            LinkOutcome::Saved { .. } => "saved",
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, LinkOutcome::Saved { .. })
    }
}

/// Per-link record emitted by a batch run, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    pub index: usize,
    pub url: String,
    pub outcome: LinkOutcome,
}
