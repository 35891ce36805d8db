//! Example demonstrating a batch grab over a handful of links
//!
//! Each link is loaded in a real Chromium and given a short window to start
//! a download; files land in a scratch directory that is printed before the
//! run starts.
//!
//! Run this example with:
//! ```
//! cargo run --example batch_grab_example -- https://example.com/get/a https://example.com/get/b
//! ```

use linkgrab::{
    BatchGrabber, ChromeSession, ChromeSessionConfig, ConsoleProgressReporter, GrabConfig,
    IntoProgressCallback, LinkTask,
};
use tempfile::tempdir;

#[tokio::main]
async fn main() -> linkgrab::Result<()> {
    // Add this line to enable tracing logs
    tracing_subscriber::fmt::init();

    let tasks: Vec<LinkTask> = std::env::args()
        .skip(1)
        .enumerate()
        .map(|(i, url)| LinkTask::new(i + 1, url))
        .collect();
    if tasks.is_empty() {
        eprintln!("usage: batch_grab_example <url> [<url>...]");
        return Ok(());
    }

    let download_dir = tempdir().expect("failed to create a scratch directory");
    println!("📁 Download directory: {}", download_dir.path().display());

    let session = ChromeSession::launch(ChromeSessionConfig {
        download_dir: download_dir.path().to_path_buf(),
        headless: true,
        window: None,
    })
    .await?;

    let grabber = BatchGrabber::new(
        Box::new(session),
        GrabConfig {
            download_dir: download_dir.path().to_path_buf(),
            ..GrabConfig::default()
        },
    );

    let reporter = ConsoleProgressReporter::new(true);
    let reports = grabber
        .grab_batch(&tasks, Some(reporter.into_callback()))
        .await;

    let summary = grabber.metrics().snapshot();
    println!(
        "🏁 {} of {} links produced a file ({} bytes total)",
        summary.files_saved,
        reports.len(),
        summary.bytes_saved
    );

    grabber.close().await?;
    Ok(())
}
