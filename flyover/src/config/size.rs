//! Human-readable size parsing (e.g., "16MB", "512KB").

use thiserror::Error;

/// Error parsing a size string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid size '{input}' - expected format like '16MB', '512KB', or '1GB'")]
pub struct SizeParseError {
    input: String,
}

impl SizeParseError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Bare numbers are bytes; `K`/`KB`, `M`/`MB` and `G`/`GB` suffixes are
/// powers of 1024. Case-insensitive, whitespace tolerant.
///
/// # Examples
///
/// ```
/// use flyover::config::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("16MB").unwrap(), 16 * 1024 * 1024);
/// assert_eq!(parse_size("2 kb").unwrap(), 2048);
/// ```
pub fn parse_size(s: &str) -> Result<usize, SizeParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SizeParseError::new(s));
    }

    let upper = trimmed.to_uppercase();
    let upper = upper.strip_suffix('B').unwrap_or(&upper);
    let (num_str, multiplier) = if let Some(n) = upper.strip_suffix('G') {
        (n, 1024_usize * 1024 * 1024)
    } else if let Some(n) = upper.strip_suffix('M') {
        (n, 1024_usize * 1024)
    } else if let Some(n) = upper.strip_suffix('K') {
        (n, 1024_usize)
    } else {
        (upper, 1_usize)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| SizeParseError::new(trimmed))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| SizeParseError::new(trimmed))
}

/// Format a byte count as a human-readable string.
///
/// ```
/// use flyover::config::format_size;
///
/// assert_eq!(format_size(16 * 1024 * 1024), "16MB");
/// assert_eq!(format_size(1536), "1536B");
/// ```
pub fn format_size(bytes: usize) -> String {
    const GB: usize = 1024 * 1024 * 1024;
    const MB: usize = 1024 * 1024;
    const KB: usize = 1024;

    if bytes >= GB && bytes % GB == 0 {
        format!("{}GB", bytes / GB)
    } else if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        format!("{}B", bytes)
    }
}
