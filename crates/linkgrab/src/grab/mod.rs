//! Grab module
//!
//! This module contains all the batch grab functionality including core
//! types, configuration, link parsing, the browser session seam and the
//! orchestration loop.

pub mod batch;
pub mod config;
pub mod core;
pub mod links;
pub mod session;
pub mod r#lib;
mod utils;

// Re-export main types for convenience
pub use r#lib::BatchGrabber;
pub use self::core::{
    GrabError, LinkOutcome, LinkReport, LinkTask, RaceOutcome, Result,
    ProgressCallback, ProgressEvent, ProgressReporter, IntoProgressCallback,
    ConsoleProgressReporter, NullProgressReporter, CompositeProgressReporter,
};
pub use config::{GrabConfig, DEFAULT_DETECT_WINDOW, DEFAULT_NAV_TIMEOUT};
pub use batch::{GrabMetrics, GrabMetricsSnapshot};
pub use links::{parse_link_list, read_link_file};

// Re-export session types
pub use session::{BrowserSession, ChromeSession, ChromeSessionConfig, DownloadSignal};
