//! Batch grab orchestration with per-link outcome conversion and metrics
//!
//! This is the heart of the system: the three-phase protocol every link goes
//! through. Phase 1 loads the page within the navigation timeout. Phase 2
//! races a download subscription against the detection window and drops
//! whichever side loses. Phase 3 waits for the detected transfer to finish
//! and persists it under its suggested name, or a derived one when the
//! server suggested nothing. Each phase failure becomes a terminal outcome
//! for that link only; the batch always moves on to the next link.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::grab::config::GrabConfig;
use crate::grab::core::{
    LinkOutcome, LinkReport, LinkTask, ProgressCallback, ProgressEvent, RaceOutcome,
};
use crate::grab::session::BrowserSession;
use crate::grab::utils::{fallback_filename, sanitize_filename};

/// Performance counters for a batch run
#[derive(Debug, Default)]
pub struct GrabMetrics {
    pub links_processed: AtomicU64,
    pub navigation_failures: AtomicU64,
    pub no_download_detected: AtomicU64,
    pub files_saved: AtomicU64,
    pub save_failures: AtomicU64,
    pub bytes_saved: AtomicU64,
}

impl GrabMetrics {
    pub fn record_link_processed(&self) {
        self.links_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_navigation_failure(&self) {
        self.navigation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_no_download(&self) {
        self.no_download_detected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_saved(&self, size: u64) {
        self.files_saved.fetch_add(1, Ordering::Relaxed);
        self.bytes_saved.fetch_add(size, Ordering::Relaxed);
    }

    pub fn record_save_failure(&self) {
        self.save_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get metrics snapshot
    pub fn snapshot(&self) -> GrabMetricsSnapshot {
        GrabMetricsSnapshot {
            links_processed: self.links_processed.load(Ordering::Relaxed),
            navigation_failures: self.navigation_failures.load(Ordering::Relaxed),
            no_download_detected: self.no_download_detected.load(Ordering::Relaxed),
            files_saved: self.files_saved.load(Ordering::Relaxed),
            save_failures: self.save_failures.load(Ordering::Relaxed),
            bytes_saved: self.bytes_saved.load(Ordering::Relaxed),
        }
    }
}

/// Immutable snapshot of batch counters
#[derive(Debug, Clone, serde::Serialize)]
pub struct GrabMetricsSnapshot {
    pub links_processed: u64,
    pub navigation_failures: u64,
    pub no_download_detected: u64,
    pub files_saved: u64,
    pub save_failures: u64,
    pub bytes_saved: u64,
}

impl GrabMetricsSnapshot {
    pub fn success_rate(&self) -> f64 {
        if self.links_processed == 0 {
            0.0
        } else {
            self.files_saved as f64 / self.links_processed as f64
        }
    }
}

/// Drive one link through navigate, detect and persist.
///
/// Never returns an error: every failure inside the protocol is converted to
/// the matching terminal [`LinkOutcome`] so the caller's loop cannot be
/// aborted by a single link.
pub async fn grab_link(
    session: &dyn BrowserSession,
    task: &LinkTask,
    total: usize,
    config: &GrabConfig,
    metrics: &GrabMetrics,
    progress_callback: Option<&ProgressCallback>,
) -> LinkOutcome {
    info!("processing link #{}/{}: {}", task.index, total, task.url);
    metrics.record_link_processed();
    if let Some(callback) = progress_callback {
        callback(ProgressEvent::LinkStarted {
            index: task.index,
            total,
            url: task.url.clone(),
        });
    }

    // Phase 1: reach the page's load event within the navigation timeout.
    // Not retried; a link that cannot be loaded is skipped for this run.
    let navigation = tokio::time::timeout(config.nav_timeout, session.navigate(&task.url)).await;
    match navigation {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            warn!("navigation failed for #{}: {}", task.index, err);
            metrics.record_navigation_failure();
            let reason = err.to_string();
            if let Some(callback) = progress_callback {
                callback(ProgressEvent::NavigationFailed {
                    index: task.index,
                    url: task.url.clone(),
                    reason: reason.clone(),
                });
            }
            return LinkOutcome::NavigationFailed { reason };
        }
        Err(_) => {
            let reason = format!("timed out after {}ms", config.nav_timeout.as_millis());
            warn!("navigation failed for #{}: {}", task.index, reason);
            metrics.record_navigation_failure();
            if let Some(callback) = progress_callback {
                callback(ProgressEvent::NavigationFailed {
                    index: task.index,
                    url: task.url.clone(),
                    reason: reason.clone(),
                });
            }
            return LinkOutcome::NavigationFailed { reason };
        }
    }

    // Phase 2: race the download subscription against the detection window.
    // First resolution wins and the losing future is dropped, which also
    // releases its subscription. An error while waiting on the subscription
    // is indistinguishable from "no signal" here and is folded into the
    // timed-out arm.
    let raced = tokio::select! {
        signal = session.await_download_signal() => match signal {
            Ok(signal) => RaceOutcome::Detected(signal),
            Err(err) => {
                debug!("signal wait failed for #{}, treating as timeout: {}", task.index, err);
                RaceOutcome::TimedOut
            }
        },
        _ = tokio::time::sleep(config.detect_window) => RaceOutcome::TimedOut,
    };

    let signal = match raced {
        RaceOutcome::Detected(signal) => signal,
        RaceOutcome::TimedOut => {
            info!("no download detected for #{} within the window", task.index);
            metrics.record_no_download();
            if let Some(callback) = progress_callback {
                callback(ProgressEvent::NoDownloadDetected {
                    index: task.index,
                    url: task.url.clone(),
                });
            }
            return LinkOutcome::NoDownloadDetected;
        }
    };

    // Phase 3: wait for the transfer to finish and persist it.
    let suggested = signal.suggested_filename();
    if let Some(callback) = progress_callback {
        callback(ProgressEvent::DownloadDetected {
            index: task.index,
            url: task.url.clone(),
            suggested_filename: suggested.clone(),
        });
    }

    let filename = match suggested {
        Some(name) if !name.trim().is_empty() => sanitize_filename(&name),
        _ => fallback_filename(task.index),
    };
    let dest = config.download_dir.join(filename);

    match signal.save_as(&dest).await {
        Ok(()) => {
            let size = tokio::fs::metadata(&dest).await.map(|m| m.len()).unwrap_or(0);
            info!("saved #{} to {} ({} bytes)", task.index, dest.display(), size);
            metrics.record_saved(size);
            if let Some(callback) = progress_callback {
                callback(ProgressEvent::Saved {
                    index: task.index,
                    url: task.url.clone(),
                    path: dest.clone(),
                });
            }
            LinkOutcome::Saved { path: dest }
        }
        Err(err) => {
            warn!("save failed for #{}: {}", task.index, err);
            metrics.record_save_failure();
            let reason = err.to_string();
            if let Some(callback) = progress_callback {
                callback(ProgressEvent::SaveFailed {
                    index: task.index,
                    url: task.url.clone(),
                    reason: reason.clone(),
                });
            }
            LinkOutcome::SaveFailed { reason }
        }
    }
}

/// Process every task strictly in order, one at a time.
///
/// Reports come back in input order, one per task. Cancellation is only
/// observed between tasks; a link that has started always runs to its
/// terminal outcome.
pub async fn grab_batch(
    session: &dyn BrowserSession,
    tasks: &[LinkTask],
    config: &GrabConfig,
    metrics: &GrabMetrics,
    progress_callback: Option<ProgressCallback>,
    cancel: Option<&CancellationToken>,
) -> Vec<LinkReport> {
    let total = tasks.len();
    let mut reports = Vec::with_capacity(total);

    for task in tasks {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                info!(
                    "batch cancelled after {} of {} links",
                    reports.len(),
                    total
                );
                break;
            }
        }

        let outcome = grab_link(
            session,
            task,
            total,
            config,
            metrics,
            progress_callback.as_ref(),
        )
        .await;

        reports.push(LinkReport {
            index: task.index,
            url: task.url.clone(),
            outcome,
        });
    }

    reports
}
