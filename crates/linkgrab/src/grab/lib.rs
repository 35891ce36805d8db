//! Main entry point for the batch grabber
//!
//! This module provides the primary `BatchGrabber` interface that users
//! interact with. The call chain flows as follows:
//!
//! User Code
//! ↓
//! BatchGrabber (this file)
//! ↓
//! batch:: functions (batch.rs)
//! ↓
//! BrowserSession implementation (session/*)

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::grab::{
    batch::{self, GrabMetrics},
    config::GrabConfig,
    core::{LinkOutcome, LinkReport, LinkTask, ProgressCallback, Result},
    session::BrowserSession,
};

/// Batch grabber owning one browser session for a whole run
///
/// The session is held exclusively for the grabber's lifetime and released
/// by [`BatchGrabber::close`]. Tasks are always processed sequentially; the
/// shared page makes interleaved navigation ambiguous, so there is no
/// concurrent mode.
pub struct BatchGrabber {
    session: Box<dyn BrowserSession>,
    config: GrabConfig,
    metrics: Arc<GrabMetrics>,
}

impl BatchGrabber {
    /// Create a grabber over an already-launched session
    pub fn new(session: Box<dyn BrowserSession>, config: GrabConfig) -> Self {
        Self {
            session,
            config,
            metrics: Arc::new(GrabMetrics::default()),
        }
    }

    /// Get access to built-in performance metrics
    pub fn metrics(&self) -> &GrabMetrics {
        &self.metrics
    }

    /// Process a single link through the full protocol
    pub async fn grab(
        &self,
        task: &LinkTask,
        progress_callback: Option<ProgressCallback>,
    ) -> LinkOutcome {
        batch::grab_link(
            self.session.as_ref(),
            task,
            1,
            &self.config,
            &self.metrics,
            progress_callback.as_ref(),
        )
        .await
    }

    /// Process every task in order, producing one report per task
    pub async fn grab_batch(
        &self,
        tasks: &[LinkTask],
        progress_callback: Option<ProgressCallback>,
    ) -> Vec<LinkReport> {
        batch::grab_batch(
            self.session.as_ref(),
            tasks,
            &self.config,
            &self.metrics,
            progress_callback,
            None,
        )
        .await
    }

    /// Like [`BatchGrabber::grab_batch`], but stops before the next task
    /// once `cancel` is triggered
    pub async fn grab_batch_with_cancel(
        &self,
        tasks: &[LinkTask],
        progress_callback: Option<ProgressCallback>,
        cancel: &CancellationToken,
    ) -> Vec<LinkReport> {
        batch::grab_batch(
            self.session.as_ref(),
            tasks,
            &self.config,
            &self.metrics,
            progress_callback,
            Some(cancel),
        )
        .await
    }

    /// Release the browser session
    pub async fn close(mut self) -> Result<()> {
        self.session.close().await
    }
}
