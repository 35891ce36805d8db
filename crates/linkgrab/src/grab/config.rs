//! Configuration types for the grab system

use std::path::PathBuf;
use std::time::Duration;

/// How long a page load may take before the link is skipped
pub const DEFAULT_NAV_TIMEOUT: Duration = Duration::from_millis(15_000);

/// How long to wait for a download to start after the page has loaded
pub const DEFAULT_DETECT_WINDOW: Duration = Duration::from_millis(1_500);

/// Configuration for grab operations
///
/// Both timeouts are one-shot and scoped to their phase; there is no overall
/// batch timeout.
#[derive(Debug, Clone)]
pub struct GrabConfig {
    /// Maximum time to reach the page's load event
    pub nav_timeout: Duration,
    /// Detection window for the download signal, measured from the moment
    /// navigation completed
    pub detect_window: Duration,
    /// Directory downloaded files are persisted into; must exist before a
    /// batch starts
    pub download_dir: PathBuf,
}

impl Default for GrabConfig {
    fn default() -> Self {
        Self {
            nav_timeout: DEFAULT_NAV_TIMEOUT,
            detect_window: DEFAULT_DETECT_WINDOW,
            download_dir: PathBuf::from("downloads"),
        }
    }
}
