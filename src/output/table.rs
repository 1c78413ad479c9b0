//
//  atlas-cli
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! This module provides utilities for creating and formatting tabular output
//! in the terminal. It uses the `comfy_table` crate for rendering Unicode
//! tables with dynamic content arrangement.
//!
//! ## Features
//!
//! - Builder pattern for constructing tables with headers and rows
//! - Automatic color detection and application
//! - Status-aware formatting with semantic colors
//! - Boolean formatting as human-readable Yes/No
//!
//! ## Example
//!
//! ```rust,ignore
//! use atlas_cli::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["Key", "Name", "Released"])
//!     .row(["10000", "1.4.0", "Yes"])
//!     .row(["10001", "1.5.0", "No"])
//!     .print();
//! ```
//!
//! ## Notes
//!
//! Tables are rendered using UTF-8 box-drawing characters for a clean,
//! modern appearance. Content is dynamically arranged to fit the terminal
//! width.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Creates a new styled table with default settings.
///
/// The table is configured with:
/// - UTF-8 full border preset for clean visual appearance
/// - Dynamic content arrangement to fit terminal width
///
/// # Notes
///
/// For most use cases, prefer using [`TableBuilder`] which provides
/// a more ergonomic builder pattern interface.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A builder for constructing formatted tables with a fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::TableBuilder;
///
/// TableBuilder::new()
///     .color(false)
///     .headers(["Id", "Title"])
///     .rows(vec![
///         vec!["2201", "Release checklist"],
///         vec!["2208", "Rollback runbook"],
///     ])
///     .print();
/// ```
///
/// # Notes
///
/// The builder automatically detects terminal color support on creation.
/// Use the [`color`](TableBuilder::color) method to override this
/// detection.
pub struct TableBuilder {
    table: Table,
    headers: Vec<String>,
    color: bool,
}

impl TableBuilder {
    /// Creates a new table builder with default settings.
    pub fn new() -> Self {
        Self {
            table: create_table(),
            headers: Vec::new(),
            color: console::colors_enabled(),
        }
    }

    /// Sets whether color output is enabled.
    ///
    /// By default, color support is auto-detected based on terminal
    /// capabilities. Use this method to override the detection.
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the table headers.
    ///
    /// Headers are displayed in cyan when color is enabled.
    ///
    /// # Notes
    ///
    /// Headers should be set before adding rows for correct table
    /// structure.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(|s| s.into()).collect();
        if self.color {
            let header_cells: Vec<Cell> = self
                .headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect();
            self.table.set_header(header_cells);
        } else {
            self.table.set_header(&self.headers);
        }
        self
    }

    /// Adds a single row to the table.
    ///
    /// # Notes
    ///
    /// The number of cells should match the number of headers for
    /// proper table alignment.
    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(|s| s.into()).collect();
        self.table.add_row(row);
        self
    }

    /// Adds multiple rows to the table at once.
    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(|s| s.into()).collect();
            self.table.add_row(row);
        }
        self
    }

    /// Builds and prints the table to stdout.
    ///
    /// This is a terminal operation that consumes the builder.
    pub fn print(self) {
        println!("{}", self.table);
    }

    /// Builds and returns the underlying table.
    ///
    /// Use this when you need direct access to the `comfy_table::Table`
    /// for further customization or non-stdout output.
    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a workflow or lifecycle status with semantic colors.
///
/// Different status values are colored based on their meaning:
/// - **Green**: open, to do, reopened, current
/// - **Yellow**: in progress, in review, pending, draft, waiting
/// - **Blue**: done, resolved, closed, released
/// - **Red**: blocked, failed, trashed
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::format_status;
///
/// let colored = format_status("In Progress", true);  // yellow
/// let plain = format_status("In Progress", false);
/// assert_eq!(plain, "In Progress");
/// ```
///
/// # Notes
///
/// Status matching is case-insensitive. Unknown status values are
/// returned without color formatting.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_lowercase().as_str() {
        "open" | "to do" | "reopened" | "current" => style(status).green().to_string(),
        "in progress" | "in review" | "pending" | "draft" | "waiting" => {
            style(status).yellow().to_string()
        }
        "done" | "resolved" | "closed" | "released" => style(status).blue().to_string(),
        "blocked" | "failed" | "trashed" => style(status).red().to_string(),
        _ => status.to_string(),
    }
}

/// Formats a boolean value as a human-readable Yes/No string.
///
/// # Returns
///
/// - `"Yes"` (green if colored) for `true`
/// - `"No"` (dimmed if colored) for `false`
///
/// # Example
///
/// ```rust,ignore
/// use atlas_cli::output::format_bool;
///
/// println!("Released: {}", format_bool(version.released, true));
/// ```
pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("Yes").green().to_string()
        } else {
            style("No").dim().to_string()
        }
    } else if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}
