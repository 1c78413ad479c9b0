//
//  atlas-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Common helpers used throughout the CLI.
//!
//! ## Categories
//!
//! - **List Flags**: [`parse_csv`] for comma-separated flag values with
//!   explicit-clear semantics
//! - **Key Validation**: [`validate_issue_key`], [`validate_project_key`],
//!   [`validate_estimate`], all local checks that run before any network call
//! - **Display**: [`format_timestamp`], [`format_size`], [`truncate`]
//!
//! ## Example
//!
//! ```rust
//! use atlas_cli::util::{parse_csv, truncate};
//!
//! // Comma-separated flag values
//! assert_eq!(parse_csv("safari, auth"), vec!["safari", "auth"]);
//!
//! // An explicitly empty value means "clear", not "untouched"
//! assert!(parse_csv("").is_empty());
//!
//! // Column-friendly truncation
//! assert_eq!(truncate("hello world", 8), "hello...");
//! ```

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::Fault;

/// Regular expression for issue keys.
///
/// An issue key is a project key, a dash, and a numeric sequence
/// (e.g. `PROJ-123`).
static ISSUE_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*-\d+$").unwrap());

/// Regular expression for project keys.
///
/// A project key starts with a letter and continues with letters, digits
/// or underscores (e.g. `PROJ`, `OPS2`).
static PROJECT_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// Regular expression for time estimates.
///
/// Accepts the tracker's duration notation: one or more `<n><unit>` terms
/// with units weeks/days/hours/minutes (e.g. `2h`, `3d 4h`, `1w 30m`).
static ESTIMATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*\d+[wdhm])+\s*$").unwrap());

/// Splits a comma-separated flag value into its items.
///
/// Items are trimmed and empty segments dropped, so `"a, b"` and `"a,b"`
/// are equivalent. An empty (or whitespace-only) input yields an empty
/// vector; callers use that to express an explicit clear, which is
/// distinct from not passing the flag at all.
///
/// # Example
///
/// ```rust
/// use atlas_cli::util::parse_csv;
///
/// assert_eq!(parse_csv("safari,auth"), vec!["safari", "auth"]);
/// assert_eq!(parse_csv(" one , two "), vec!["one", "two"]);
/// assert!(parse_csv("").is_empty());
/// assert_eq!(parse_csv("a,,b"), vec!["a", "b"]);
/// ```
pub fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validates an issue key against the key grammar.
///
/// # Errors
///
/// [`Fault::InvalidArguments`] naming the offending value. Runs locally,
/// before any network call.
///
/// # Example
///
/// ```rust
/// use atlas_cli::util::validate_issue_key;
///
/// assert!(validate_issue_key("PROJ-123").is_ok());
/// assert!(validate_issue_key("PROJ").is_err());
/// assert!(validate_issue_key("123-PROJ").is_err());
/// ```
pub fn validate_issue_key(key: &str) -> Result<(), Fault> {
    if ISSUE_KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(Fault::InvalidArguments(format!(
            "'{key}' is not a valid issue key (expected e.g. PROJ-123)"
        )))
    }
}

/// Validates a project key against the key grammar.
///
/// # Errors
///
/// [`Fault::InvalidArguments`] naming the offending value.
pub fn validate_project_key(key: &str) -> Result<(), Fault> {
    if PROJECT_KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(Fault::InvalidArguments(format!(
            "'{key}' is not a valid project key (expected e.g. PROJ)"
        )))
    }
}

/// Validates a time estimate in the tracker's duration notation.
///
/// # Errors
///
/// [`Fault::InvalidArguments`] when the value does not match the
/// `<n>w <n>d <n>h <n>m` shape.
///
/// # Example
///
/// ```rust
/// use atlas_cli::util::validate_estimate;
///
/// assert!(validate_estimate("2h").is_ok());
/// assert!(validate_estimate("3d 4h").is_ok());
/// assert!(validate_estimate("soon").is_err());
/// ```
pub fn validate_estimate(estimate: &str) -> Result<(), Fault> {
    if ESTIMATE_PATTERN.is_match(estimate) {
        Ok(())
    } else {
        Err(Fault::InvalidArguments(format!(
            "'{estimate}' is not a valid estimate (expected e.g. 2h, 3d 4h)"
        )))
    }
}

/// Formats a service timestamp into a local datetime string.
///
/// Both services emit ISO-8601 timestamps, but with different zone
/// spellings (`...+0000` on the tracker, `...Z` on the wiki); both are
/// accepted. Values that parse as neither are returned unchanged so no
/// information is dropped.
///
/// # Returns
///
/// `"YYYY-MM-DD HH:MM"` in the local timezone, or the input as-is when it
/// cannot be parsed.
pub fn format_timestamp(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.3f%z"));

    match parsed {
        Ok(dt) => {
            let local: DateTime<Local> = dt.into();
            local.format("%Y-%m-%d %H:%M").to_string()
        }
        Err(_) => raw.to_string(),
    }
}

/// Truncates a string to a maximum length, adding an ellipsis if needed.
///
/// Shortens a string to fit within a column limit while adding "..." to
/// indicate truncation occurred.
///
/// # Example
///
/// ```rust
/// use atlas_cli::util::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("déjà vu encore", 9), "déjà...");
/// assert_eq!(truncate("short", 3), "sho"); // No room for ellipsis
/// ```
///
/// # Notes
///
/// - When `max_len` is 3 or less, the string is simply cut (no room).
/// - Lengths are in bytes, but the cut always lands on a character
///   boundary, so multi-byte text never splits mid-character.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let budget = if max_len > 3 { max_len - 3 } else { max_len };
    let mut end = budget;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    if max_len > 3 {
        format!("{}...", &s[..end])
    } else {
        s[..end].to_string()
    }
}

/// Formats a byte count as a human-readable size string.
///
/// # Example
///
/// ```rust
/// use atlas_cli::util::format_size;
///
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.0 KB");
/// assert_eq!(format_size(1536), "1.5 KB");
/// ```
///
/// # Notes
///
/// Uses binary units (1 KB = 1024 bytes). Values under 1 KB are shown as
/// whole bytes; larger values with one decimal place.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        assert_eq!(parse_csv("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(parse_csv(" one , two "), vec!["one", "two"]);
        assert_eq!(parse_csv("a,,b"), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_csv_empty_is_clear() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("   ").is_empty());
    }

    #[test]
    fn test_validate_issue_key() {
        assert!(validate_issue_key("PROJ-123").is_ok());
        assert!(validate_issue_key("ops_2-9").is_ok());
        assert!(validate_issue_key("PROJ").is_err());
        assert!(validate_issue_key("-123").is_err());
        assert!(validate_issue_key("PROJ-12a").is_err());
    }

    #[test]
    fn test_validate_project_key() {
        assert!(validate_project_key("PROJ").is_ok());
        assert!(validate_project_key("OPS2").is_ok());
        assert!(validate_project_key("2OPS").is_err());
        assert!(validate_project_key("").is_err());
    }

    #[test]
    fn test_validate_estimate() {
        assert!(validate_estimate("2h").is_ok());
        assert!(validate_estimate("3d 4h").is_ok());
        assert!(validate_estimate("1w 2d 3h 30m").is_ok());
        assert!(validate_estimate("soon").is_err());
        assert!(validate_estimate("2 hours").is_err());
    }

    #[test]
    fn test_format_timestamp_accepts_both_dialects() {
        // Tracker spelling
        let t = format_timestamp("2026-01-12T10:30:00.000+0000");
        assert!(t.starts_with("2026-01-1"));
        // Wiki spelling
        let w = format_timestamp("2026-01-12T10:30:00.000Z");
        assert!(w.starts_with("2026-01-1"));
        // Unparseable values pass through
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_lands_on_char_boundaries() {
        // The budget falls inside a two-byte character; the cut steps back
        let accented = "é".repeat(60);
        let cut = truncate(&accented, 60);
        assert_eq!(cut, format!("{}...", "é".repeat(28)));
        assert!(cut.len() <= 60);

        assert_eq!(truncate("ééééé", 8), "éé...");
        // Tight limits cut without the ellipsis, still on a boundary
        assert_eq!(truncate("ééééé", 3), "é");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
    }
}
