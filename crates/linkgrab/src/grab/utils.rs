use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix timestamp in milliseconds
pub fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Destination name for a download that carried no filename suggestion.
///
/// The timestamp keeps repeated runs from overwriting each other's files;
/// the task index keeps two suggestion-less saves within one run distinct
/// even when they land in the same millisecond.
pub fn fallback_filename(index: usize) -> String {
    format!("download_{}_{}", index, unix_millis())
}

/// Sanitize a suggested filename to remove path separators and other
/// characters that are invalid on common filesystems
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
