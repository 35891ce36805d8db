//! Chromium-backed browser session
//!
//! Drives a local Chromium over the DevTools protocol via chromiumoxide.
//! Downloads are routed into a staging directory under their CDP GUID
//! (`allowAndName`), then atomically renamed to their final destination once
//! the browser reports the transfer complete.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    DownloadProgressState, EventDownloadProgress, EventDownloadWillBegin,
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::grab::core::error::{GrabError, Result};
use crate::grab::session::{BrowserSession, DownloadSignal};

/// Name of the staging directory Chromium writes in-flight transfers to,
/// created inside the download directory
const STAGING_DIR_NAME: &str = ".incoming";

/// Configuration for launching a [`ChromeSession`]
#[derive(Debug, Clone)]
pub struct ChromeSessionConfig {
    /// Directory completed downloads end up in; staging lives beneath it
    pub download_dir: PathBuf,
    /// Run the browser without a visible window
    pub headless: bool,
    /// Optional window size for headed runs
    pub window: Option<(u32, u32)>,
}

impl Default for ChromeSessionConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("downloads"),
            headless: false,
            window: None,
        }
    }
}

/// A launched Chromium with one page reused for a whole batch
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    staging_dir: PathBuf,
    closed: bool,
}

impl ChromeSession {
    /// Launch Chromium, enable download events and open the batch's page.
    pub async fn launch(config: ChromeSessionConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some((width, height)) = config.window {
            builder = builder.window_size(width, height);
        }
        let browser_config = builder.build().map_err(GrabError::Session)?;

        let (browser, mut handler) = Browser::launch(browser_config).await?;
        // The handler must be polled for the whole session lifetime or no
        // command ever completes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    warn!("browser handler error: {}", err);
                }
            }
        });

        let staging_dir = config.download_dir.join(STAGING_DIR_NAME);
        tokio::fs::create_dir_all(&staging_dir).await?;

        browser
            .execute(
                SetDownloadBehaviorParams::builder()
                    .behavior(SetDownloadBehaviorBehavior::AllowAndName)
                    .download_path(staging_dir.to_string_lossy().into_owned())
                    .events_enabled(true)
                    .build()
                    .map_err(GrabError::Session)?,
            )
            .await?;

        let page = browser.new_page("about:blank").await?;
        debug!(
            "browser session ready, staging downloads in {}",
            staging_dir.display()
        );

        Ok(Self {
            browser,
            page,
            handler_task,
            staging_dir,
            closed: false,
        })
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn await_download_signal(&self) -> Result<Box<dyn DownloadSignal>> {
        // Subscribe to progress before the begin event so a transfer that
        // finishes immediately cannot slip between the two subscriptions.
        // Both streams are scoped to this call; dropping them unsubscribes.
        let progress = self
            .browser
            .event_listener::<EventDownloadProgress>()
            .await?
            .boxed();
        let mut begins = self.browser.event_listener::<EventDownloadWillBegin>().await?;

        let begin = begins
            .next()
            .await
            .ok_or_else(|| GrabError::Session("download event stream closed".to_string()))?;

        let suggested = begin.suggested_filename.trim();
        debug!("download started: guid={} suggested={:?}", begin.guid, suggested);

        Ok(Box::new(ChromeDownloadSignal {
            guid: begin.guid.clone(),
            suggested: (!suggested.is_empty()).then(|| suggested.to_string()),
            progress,
            staging_dir: self.staging_dir.clone(),
        }))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        // Abandoned transfers stay keyed by GUID in staging; nothing in there
        // is referenced once the batch is over.
        if let Err(err) = tokio::fs::remove_dir_all(&self.staging_dir).await {
            debug!("staging cleanup skipped: {}", err);
        }

        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

/// Completion handle for one Chromium download
struct ChromeDownloadSignal {
    guid: String,
    suggested: Option<String>,
    progress: BoxStream<'static, Arc<EventDownloadProgress>>,
    staging_dir: PathBuf,
}

#[async_trait]
impl DownloadSignal for ChromeDownloadSignal {
    fn suggested_filename(&self) -> Option<String> {
        self.suggested.clone()
    }

    async fn save_as(mut self: Box<Self>, dest: &Path) -> Result<()> {
        while let Some(event) = self.progress.next().await {
            if event.guid != self.guid {
                continue;
            }
            match event.state {
                DownloadProgressState::InProgress => {
                    debug!(
                        "download {}: {} / {} bytes",
                        self.guid, event.received_bytes, event.total_bytes
                    );
                }
                DownloadProgressState::Completed => {
                    let staged = self.staging_dir.join(&self.guid);
                    tokio::fs::rename(&staged, dest).await?;
                    debug!("download {} persisted at {}", self.guid, dest.display());
                    return Ok(());
                }
                DownloadProgressState::Canceled => {
                    return Err(GrabError::Save(format!(
                        "browser canceled download {}",
                        self.guid
                    )));
                }
            }
        }
        Err(GrabError::Save(
            "download event stream ended before completion".to_string(),
        ))
    }
}
