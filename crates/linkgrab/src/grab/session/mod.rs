//! Browser session seam between orchestration and the real browser
//!
//! The trait pair below is the boundary the orchestrator drives. A session
//! owns one page that every task in a batch reuses; a signal represents one
//! browser-initiated file transfer on that page.

pub mod chrome;

pub use chrome::{ChromeSession, ChromeSessionConfig};

use std::path::Path;

use async_trait::async_trait;

use crate::grab::core::error::Result;

/// One browser-initiated file transfer
///
/// Returned by [`BrowserSession::await_download_signal`] the moment the
/// browser announces a transfer. `save_as` consumes the signal, so a
/// completion handle can be used at most once.
#[async_trait]
pub trait DownloadSignal: Send {
    /// The filename the server suggested, if it suggested one.
    ///
    /// An empty suggestion is reported as `None`.
    fn suggested_filename(&self) -> Option<String>;

    /// Wait for the transfer to finish and persist its bytes at `dest`.
    async fn save_as(self: Box<Self>, dest: &Path) -> Result<()>;
}

/// A controllable browser session
///
/// Implementations do not enforce timeouts; the orchestrator bounds both
/// `navigate` and `await_download_signal` externally, so a dropped future
/// must cleanly abandon whatever it was waiting on. In particular, each
/// `await_download_signal` call must set up a fresh subscription that is
/// released when its future is dropped, so a stale signal from one task can
/// never be handed to a later one.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Load `url` in the session's page and wait for the load event.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Wait for the next download to start on the session's page.
    async fn await_download_signal(&self) -> Result<Box<dyn DownloadSignal>>;

    /// Release the underlying browser. Idempotent.
    async fn close(&mut self) -> Result<()>;
}
