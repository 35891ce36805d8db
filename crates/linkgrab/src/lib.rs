//! Linkgrab Library
//!
//! This library batch-downloads files by driving a real browser over an
//! ordered list of page links. Each link is expected to trigger a file
//! download when loaded; the library navigates to it, waits a bounded
//! window for the download to start, and persists the file under a
//! deterministic name. Links whose page fails to load or never starts a
//! download are skipped with a recorded outcome, never retried, and never
//! stop the rest of the batch.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use linkgrab::{
//!     BatchGrabber, ChromeSession, ChromeSessionConfig, GrabConfig,
//!     LinkTask, ProgressEvent,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> linkgrab::Result<()> {
//! // Launch a browser session that routes downloads into ./downloads
//! let session = ChromeSession::launch(ChromeSessionConfig {
//!     download_dir: "downloads".into(),
//!     ..Default::default()
//! })
//! .await?;
//!
//! // Default timeouts: 15s to load a page, 1.5s for a download to start
//! let config = GrabConfig {
//!     download_dir: "downloads".into(),
//!     ..Default::default()
//! };
//!
//! let grabber = BatchGrabber::new(Box::new(session), config);
//!
//! // Set up progress callback (optional)
//! let progress = Arc::new(|event: ProgressEvent| {
//!     if let ProgressEvent::Saved { index, path, .. } = event {
//!         println!("#{} saved to {}", index, path.display());
//!     }
//! });
//!
//! let tasks = vec![
//!     LinkTask::new(1, "https://example.com/get/report"),
//!     LinkTask::new(2, "https://example.com/get/archive"),
//! ];
//!
//! let reports = grabber.grab_batch(&tasks, Some(progress)).await;
//! for report in &reports {
//!     println!("#{} {} -> {}", report.index, report.url, report.outcome.kind());
//! }
//!
//! println!("saved {} of {} links", grabber.metrics().snapshot().files_saved, reports.len());
//! grabber.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Browser-driven transfers**: downloads are performed by a real
//!   Chromium, so pages that gate files behind scripts or redirects work
//! - **Bounded waits**: a navigation timeout and a detection window are the
//!   only timers; a quiet page costs at most their sum
//! - **Skip, never retry**: per-link failures become recorded outcomes and
//!   the batch continues
//! - **Deterministic naming**: server-suggested filenames when present, a
//!   collision-free derived name otherwise
//! - **Progress reporting**: per-link events with console and composite
//!   reporters
//! - **Async/await**: full async support with the Tokio runtime

pub mod grab;

// Re-export commonly used types for convenience
pub use grab::{
    BatchGrabber, BrowserSession, ChromeSession, ChromeSessionConfig,
    ConsoleProgressReporter, DownloadSignal, GrabConfig, GrabError, GrabMetrics,
    GrabMetricsSnapshot, IntoProgressCallback, LinkOutcome, LinkReport, LinkTask,
    ProgressCallback, ProgressEvent, ProgressReporter, Result,
    parse_link_list, read_link_file,
};
