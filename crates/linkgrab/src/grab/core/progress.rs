//! Progress tracking and outcome reporting for batch grabs

use std::path::PathBuf;
use std::sync::Arc;

/// Progress callback for grab operations
pub type ProgressCallback = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

/// Events emitted while a batch is processed
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    LinkStarted {
        index: usize,
        total: usize,
        url: String,
    },
    NavigationFailed {
        index: usize,
        url: String,
        reason: String,
    },
    NoDownloadDetected {
        index: usize,
        url: String,
    },
    DownloadDetected {
        index: usize,
        url: String,
        suggested_filename: Option<String>,
    },
    Saved {
        index: usize,
        url: String,
        path: PathBuf,
    },
    SaveFailed {
        index: usize,
        url: String,
        reason: String,
    },
}

/// Trait for progress reporting with more granular control
pub trait ProgressReporter: Send + Sync {
    fn on_link_started(&self, _index: usize, _total: usize, _url: &str) {}
    fn on_navigation_failed(&self, _index: usize, _url: &str, _reason: &str) {}
    fn on_no_download_detected(&self, _index: usize, _url: &str) {}
    fn on_download_detected(&self, _index: usize, _url: &str, _suggested: Option<&str>) {}
    fn on_saved(&self, _index: usize, _url: &str, _path: &std::path::Path) {}
    fn on_save_failed(&self, _index: usize, _url: &str, _reason: &str) {}
}

/// Extension trait to convert ProgressReporter to ProgressCallback
pub trait IntoProgressCallback {
    fn into_callback(self) -> ProgressCallback;
}

impl<T: ProgressReporter + 'static> IntoProgressCallback for T {
    fn into_callback(self) -> ProgressCallback {
        Arc::new(move |event| match event {
            ProgressEvent::LinkStarted { index, total, url } => {
                self.on_link_started(index, total, &url);
            }
            ProgressEvent::NavigationFailed { index, url, reason } => {
                self.on_navigation_failed(index, &url, &reason);
            }
            ProgressEvent::NoDownloadDetected { index, url } => {
                self.on_no_download_detected(index, &url);
            }
            ProgressEvent::DownloadDetected { index, url, suggested_filename } => {
                self.on_download_detected(index, &url, suggested_filename.as_deref());
            }
            ProgressEvent::Saved { index, url, path } => {
                self.on_saved(index, &url, &path);
            }
            ProgressEvent::SaveFailed { index, url, reason } => {
                self.on_save_failed(index, &url, &reason);
            }
        })
    }
}

/// Console reporter printing one audit line per link outcome
///
/// Every link produces exactly one terminal line regardless of how it ended,
/// so a finished run can be reviewed by scanning the output top to bottom.
#[derive(Debug, Default)]
pub struct ConsoleProgressReporter {
    pub verbose: bool,
}

impl ConsoleProgressReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for ConsoleProgressReporter {
    fn on_link_started(&self, index: usize, total: usize, url: &str) {
        if self.verbose {
            println!("📥 #{}/{} {}", index, total, url);
        }
    }

    fn on_navigation_failed(&self, index: usize, url: &str, reason: &str) {
        println!("❌ #{} {}: navigation failed: {}", index, url, reason);
    }

    fn on_no_download_detected(&self, index: usize, url: &str) {
        println!("⚠️ #{} {}: no download detected, skipping", index, url);
    }

    fn on_download_detected(&self, index: usize, url: &str, suggested: Option<&str>) {
        if self.verbose {
            match suggested {
                Some(name) => println!("📥 #{} {}: download started ({})", index, url, name),
                None => println!("📥 #{} {}: download started", index, url),
            }
        }
    }

    fn on_saved(&self, index: usize, url: &str, path: &std::path::Path) {
        println!("✅ #{} {}: saved to {}", index, url, path.display());
    }

    fn on_save_failed(&self, index: usize, url: &str, reason: &str) {
        println!("❌ #{} {}: save failed: {}", index, url, reason);
    }
}

/// Reporter that discards all events
#[derive(Debug, Default)]
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {}

/// Reporter that fans events out to several inner reporters
#[derive(Default)]
pub struct CompositeProgressReporter {
    reporters: Vec<Box<dyn ProgressReporter>>,
}

impl CompositeProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<R: ProgressReporter + 'static>(mut self, reporter: R) -> Self {
        self.reporters.push(Box::new(reporter));
        self
    }
}

impl ProgressReporter for CompositeProgressReporter {
    fn on_link_started(&self, index: usize, total: usize, url: &str) {
        for r in &self.reporters {
            r.on_link_started(index, total, url);
        }
    }

    fn on_navigation_failed(&self, index: usize, url: &str, reason: &str) {
        for r in &self.reporters {
            r.on_navigation_failed(index, url, reason);
        }
    }

    fn on_no_download_detected(&self, index: usize, url: &str) {
        for r in &self.reporters {
            r.on_no_download_detected(index, url);
        }
    }

    fn on_download_detected(&self, index: usize, url: &str, suggested: Option<&str>) {
        for r in &self.reporters {
            r.on_download_detected(index, url, suggested);
        }
    }

    fn on_saved(&self, index: usize, url: &str, path: &std::path::Path) {
        for r in &self.reporters {
            r.on_saved(index, url, path);
        }
    }

    fn on_save_failed(&self, index: usize, url: &str, reason: &str) {
        for r in &self.reporters {
            r.on_save_failed(index, url, reason);
        }
    }
}
