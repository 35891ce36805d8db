//! Command-line front end for batch link grabbing
//!
//! Reads a newline-separated link list, drives a local Chromium over it and
//! saves every triggered download into the output directory. One line is
//! printed per link regardless of how it ended, so a finished run can be
//! audited from the output alone.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use linkgrab::{
    BatchGrabber, ChromeSession, ChromeSessionConfig, ConsoleProgressReporter, GrabConfig,
    IntoProgressCallback, read_link_file,
};
use tokio_util::sync::CancellationToken;

#[derive(Parser, Debug)]
#[command(
    name = "linkgrab",
    about = "Batch-download files by driving a browser over a list of links"
)]
struct Args {
    /// Newline-separated list of links, one per line
    #[arg(default_value = "links.txt")]
    links: PathBuf,

    /// Directory downloaded files are saved into (created if absent)
    #[arg(short, long, default_value = "downloads")]
    out_dir: PathBuf,

    /// Maximum time to load a page, in milliseconds
    #[arg(long, default_value_t = 15_000)]
    nav_timeout_ms: u64,

    /// How long to wait for a download to start after the page loads, in milliseconds
    #[arg(long, default_value_t = 1_500)]
    detect_window_ms: u64,

    /// Run the browser without a visible window
    #[arg(long)]
    headless: bool,

    /// Write a JSON report of every link outcome to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Per-link progress output beyond the terminal outcome lines
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let tasks = read_link_file(&args.links)
        .await
        .with_context(|| format!("failed to read link list {}", args.links.display()))?;
    println!("processing {} links from {}", tasks.len(), args.links.display());

    tokio::fs::create_dir_all(&args.out_dir)
        .await
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    // Chromium wants an absolute download path
    let out_dir = tokio::fs::canonicalize(&args.out_dir)
        .await
        .with_context(|| format!("failed to resolve {}", args.out_dir.display()))?;

    let session = ChromeSession::launch(ChromeSessionConfig {
        download_dir: out_dir.clone(),
        headless: args.headless,
        window: None,
    })
    .await
    .context("failed to launch the browser session")?;

    let grabber = BatchGrabber::new(
        Box::new(session),
        GrabConfig {
            nav_timeout: Duration::from_millis(args.nav_timeout_ms),
            detect_window: Duration::from_millis(args.detect_window_ms),
            download_dir: out_dir,
        },
    );

    // Ctrl-C stops after the current link; an in-flight save always finishes
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("interrupt received, stopping after the current link");
                cancel.cancel();
            }
        });
    }

    let reporter = ConsoleProgressReporter::new(args.verbose);
    let reports = grabber
        .grab_batch_with_cancel(&tasks, Some(reporter.into_callback()), &cancel)
        .await;

    let summary = grabber.metrics().snapshot();
    grabber
        .close()
        .await
        .context("failed to close the browser session")?;

    println!(
        "done: {} saved, {} without a download, {} navigation failures, {} save failures ({} bytes)",
        summary.files_saved,
        summary.no_download_detected,
        summary.navigation_failures,
        summary.save_failures,
        summary.bytes_saved,
    );

    if let Some(report_path) = args.report {
        let report = serde_json::json!({
            "links": reports,
            "summary": summary,
        });
        tokio::fs::write(&report_path, serde_json::to_vec_pretty(&report)?)
            .await
            .with_context(|| format!("failed to write report {}", report_path.display()))?;
        println!("report written to {}", report_path.display());
    }

    Ok(())
}
