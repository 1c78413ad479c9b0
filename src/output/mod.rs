//
//  atlas-cli
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! This module renders command results in the two supported output modes:
//!
//! - **Text format**: human-readable output for interactive terminal use
//! - **JSON format**: machine-readable output for scripting and automation
//!
//! Every command builds one normalized value and hands it to an
//! [`OutputWriter`]; the writer picks the rendering. Both renderings carry
//! the same fields, so nothing is visible in one mode that the other hides.
//!
//! ## Architecture
//!
//! The module is organized into two submodules:
//! - [`table`]: table formatting utilities using `comfy_table`
//! - [`json`]: JSON serialization utilities using `serde_json`
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: Enum representing the available output formats
//! - [`OutputWriter`]: Main entry point for writing formatted output
//! - [`TextOutput`]: Trait for types that can be rendered as text
//!
//! ## Example
//!
//! ```rust,ignore
//! use atlas_cli::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//!
//! // Write a serializable value
//! writer.write(&my_data)?;
//!
//! // Write status messages
//! writer.write_success("Issue PROJ-42 created");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use serde::Serialize;

/// Represents the available output formats for CLI output.
///
/// # Variants
///
/// * `Text` - Human-readable format, best for interactive terminal sessions
/// * `Json` - Machine-readable format, ideal for scripting and piping
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::OutputFormat;
///
/// let format = if json_flag { OutputFormat::Json } else { OutputFormat::Text };
/// ```
///
/// # Notes
///
/// The default output format is [`OutputFormat::Text`], which provides the
/// best experience for interactive terminal use with color support.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    /// Human-readable text with optional color support.
    ///
    /// Lists are rendered as aligned columns or tables; single entities
    /// as labeled fields.
    Text,
    /// JSON format for scripting and automation.
    ///
    /// Results are pretty-printed; fault objects are emitted compact on
    /// a single line.
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

/// A unified output writer that handles both output formats.
///
/// `OutputWriter` is the primary interface for writing formatted output.
/// It abstracts away the rendering details and provides a consistent API
/// for writing data, status messages and faults.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::OutputWriter;
///
/// let writer = OutputWriter::text();
///
/// writer.write(&issue)?;
/// writer.write_success("Transitioned PROJ-42 to Done");
/// ```
///
/// # Notes
///
/// Color output is automatically detected based on terminal capabilities.
/// Colors are disabled when output is piped or redirected.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    /// Creates a new output writer with the specified format.
    ///
    /// The writer automatically detects whether color output is supported
    /// based on terminal capabilities.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Creates a new output writer configured for JSON output.
    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    /// Creates a new output writer configured for text output.
    pub fn text() -> Self {
        Self::new(OutputFormat::Text)
    }

    /// Checks if color output is enabled.
    ///
    /// # Notes
    ///
    /// Colors are typically disabled when:
    /// - Output is piped to another program
    /// - The `NO_COLOR` environment variable is set
    /// - The terminal does not support ANSI colors
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Returns the output format configured for this writer.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a value to stdout using the configured output format.
    ///
    /// The value must implement both [`Serialize`] (for JSON output) and
    /// [`TextOutput`] (for text output). Both renderings read the same
    /// value, so switching formats never changes which fields appear.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails (only applicable for
    /// JSON format).
    pub fn write<T: Serialize + TextOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)?;
                println!("{}", json);
            }
            OutputFormat::Text => {
                value.print_text(self.color);
            }
        }
        Ok(())
    }

    /// Writes a list of values to stdout using the configured output format.
    ///
    /// For JSON format, the entire list is serialized as a JSON array; an
    /// empty list prints `[]`. For text format, each value is rendered
    /// individually.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails (only applicable for
    /// JSON format).
    pub fn write_list<T: Serialize + TextOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(values)?;
                println!("{}", json);
            }
            OutputFormat::Text => {
                for value in values {
                    value.print_text(self.color);
                }
            }
        }
        Ok(())
    }

    /// Writes a fault in the configured output format.
    ///
    /// In JSON mode the fault goes to **stdout** as a compact
    /// `{"error": ...}` object, keeping stdout parseable for scripts that
    /// asked for JSON. In text mode it goes to stderr as a single
    /// `error:` line.
    pub fn write_fault(&self, msg: &str) {
        match self.format {
            OutputFormat::Json => println!("{}", error_json(msg)),
            OutputFormat::Text => self.write_error(msg),
        }
    }

    /// Writes an error message to stderr.
    ///
    /// The message is prefixed with "error:" and styled in red when color
    /// output is enabled.
    ///
    /// # Notes
    ///
    /// Error messages are always written to stderr, regardless of output
    /// format; use [`write_fault`](OutputWriter::write_fault) for
    /// format-aware fault reporting.
    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    /// Writes a warning message to stderr.
    ///
    /// The message is prefixed with "warning:" and styled in yellow when
    /// color output is enabled.
    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Writes an informational message to stdout.
    ///
    /// The message is printed without any prefix or styling.
    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Writes a success message to stdout.
    ///
    /// The message is prefixed with a green checkmark when color output
    /// is enabled.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// A trait for types that can be rendered as human-readable text.
///
/// Types implementing this trait can be written through an
/// [`OutputWriter`]. For JSON output, types must also implement
/// [`Serialize`]; an implementation must render exactly the fields the
/// serialization carries.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::{TextOutput, print_field, print_header};
///
/// struct Issue {
///     key: String,
///     status: String,
/// }
///
/// impl TextOutput for Issue {
///     fn print_text(&self, color: bool) {
///         print_header(&self.key);
///         print_field("Status", &self.status, color);
///         println!();
///     }
/// }
/// ```
pub trait TextOutput {
    /// Renders the type as a text row or section.
    ///
    /// # Notes
    ///
    /// Implementations should use the `color` parameter to conditionally
    /// apply styling. Use helper functions like [`format_status`] and
    /// [`format_bool`] for consistent styling.
    fn print_text(&self, color: bool);
}

impl TextOutput for String {
    fn print_text(&self, _color: bool) {
        println!("{}", self);
    }
}

/// Prints a styled header with an underline.
///
/// The header text is printed in bold, followed by a dashed underline
/// of the same length.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::print_header;
///
/// print_header("PROJ-42");
/// // Output:
/// // PROJ-42
/// // -------
/// ```
pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.len()));
}

/// Prints a key-value pair with optional styling.
///
/// The key is dimmed when color is enabled to provide visual separation
/// from the value.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::print_field;
///
/// print_field("Status", "In Progress", true);
/// print_field("Assignee", "dev@example.com", true);
/// ```
pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
