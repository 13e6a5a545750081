//! Shared utility functions used across multiple modules.

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Current Unix timestamp in seconds.
pub fn unix_timestamp_now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Extract the final path component of an asset address.
///
/// Used to derive the storage key for a preset from its image address,
/// e.g. `assets/pic/usokki0185.svg` yields `usokki0185.svg`.
pub fn file_name_from_address(address: &str) -> Option<String> {
    let trimmed = address.trim().trim_end_matches('/');
    let name = trimmed.rsplit('/').next()?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
