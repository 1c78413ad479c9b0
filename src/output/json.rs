//
//  atlas-cli
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! This module provides utilities for serializing data to JSON format,
//! designed for scripting and automation use cases where machine-readable
//! output is required.
//!
//! ## Output Shapes
//!
//! | Function | Description | Use Case |
//! |----------|-------------|----------|
//! | [`write_json`] | Pretty-printed JSON | Command results |
//! | [`write_json_to`] | Pretty-printed JSON to any writer | Files, buffers |
//! | [`error_json`] | Compact `{"error": ...}` object | Fault reporting |
//!
//! ## Example
//!
//! ```rust,ignore
//! use atlas_cli::output::{write_json, error_json};
//!
//! write_json(&issue)?;
//!
//! // Faults keep stdout parseable for scripts
//! println!("{}", error_json("Resource not found: PROJ-999"));
//! ```
//!
//! ## Notes
//!
//! JSON output is ideal for:
//! - Piping to `jq` for further processing
//! - Parsing in shell scripts
//! - Integration with other CLI tools and automation pipelines

use serde::Serialize;
use std::io::Write;

/// Writes a value as pretty-printed JSON to stdout.
///
/// The output is formatted with indentation and newlines for human
/// readability.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::write_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Page {
///     id: String,
///     title: String,
/// }
///
/// write_json(&Page { id: "42".into(), title: "Runbook".into() })?;
/// // Output:
/// // {
/// //   "id": "42",
/// //   "title": "Runbook"
/// // }
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized to JSON.
pub fn write_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Writes a value as pretty-printed JSON to a custom writer.
///
/// This function allows writing JSON to any destination implementing
/// [`Write`], such as files or buffers.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json_to<W: Write, T: Serialize>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Builds the compact single-line fault object for JSON mode.
///
/// The message lands under the sole `error` key, properly escaped, so a
/// script reading stdout always sees either the requested result or this
/// object.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::error_json;
///
/// assert_eq!(
///     error_json("Resource not found: PROJ-999"),
///     r#"{"error":"Resource not found: PROJ-999"}"#
/// );
/// ```
pub fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_json_is_compact_single_line() {
        let json = error_json("Service unavailable: request failed");
        assert_eq!(json, r#"{"error":"Service unavailable: request failed"}"#);
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_error_json_escapes_message() {
        let json = error_json(r#"cannot read "notes.txt""#);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed["error"].as_str().unwrap(),
            r#"cannot read "notes.txt""#
        );
    }

    #[test]
    fn test_write_json_to_buffer_ends_with_newline() {
        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &serde_json::json!({"key": "DOCS"})).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("\"key\": \"DOCS\""));
        assert!(output.ends_with('\n'));
    }
}
