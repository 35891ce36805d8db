//! Link list parsing
//!
//! The input is a plain text source of newline-separated URLs. Blank lines
//! and surrounding whitespace are ignored; order is significant and
//! preserved. URLs are treated as opaque strings, no semantic validation.

use std::path::Path;

use crate::grab::core::{LinkTask, Result};

/// Parse a newline-separated link list into ordered tasks.
///
/// Indices are 1-based and assigned after blank lines are dropped, so they
/// match what a human counting non-empty lines would expect.
pub fn parse_link_list(content: &str) -> Vec<LinkTask> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, url)| LinkTask::new(i + 1, url))
        .collect()
}

/// Read and parse a link list file.
pub async fn read_link_file<P: AsRef<Path>>(path: P) -> Result<Vec<LinkTask>> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    Ok(parse_link_list(&content))
}
