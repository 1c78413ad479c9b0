//
//  atlas-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Atlas CLI Library
//!
//! A command-line interface library that unifies two REST-backed
//! collaboration services (an issue tracker and a wiki) behind one
//! structured command surface.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `atlas` CLI tool.
//! One binary drives both service families from the terminal: issues,
//! projects, versions, transitions, links and comments on the tracker side;
//! pages, spaces, labels, comments and attachments on the wiki side.
//!
//! ## Features
//!
//! - **Unified Command Surface**: `issue`, `version` and `project` nouns for
//!   the tracker, `page` and `space` nouns for the wiki, one global `--json`
//!   switch for machine-readable output
//! - **Query Passthrough**: native search queries (JQL, CQL) forwarded to
//!   the services verbatim, with transparent pagination
//! - **Streaming Uploads**: attachments are streamed as multipart form data
//!   rather than buffered in memory
//! - **Consistent Faults**: every failure is normalized into a closed set of
//!   error kinds with a single-line message and a uniform exit code
//! - **Scriptable**: human-oriented tables by default, lossless JSON under
//!   `--json`, faults as `{"error": ...}` on stdout for automation
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: HTTP transport, fault taxonomy, and the two resource adapters
//! - [`config`]: Credential resolution from the environment
//! - [`output`]: Output formatting (text sections/tables, JSON)
//! - [`util`]: Utility functions
//!
//! ## Environment Contract
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `ATLAS_BASE_URL` | Site base URL, e.g. `https://company.example.com` |
//! | `ATLAS_EMAIL` | Principal identity the token belongs to |
//! | `ATLAS_API_TOKEN` | Issued API token |
//! | `ATLAS_DEBUG` | Optional tracing filter (defaults to `warn`) |
//!
//! All three credential values are required; resolution fails fast naming
//! whichever are missing, before any network traffic.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use atlas_cli::Credentials;
//!
//! // Resolve credentials from the environment
//! let credentials = Credentials::resolve().expect("environment not configured");
//! println!("talking to {}", credentials.base_url);
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the
/// clap derive API. Each command module handles parsing and execution of its
/// respective noun.
pub mod cli;

/// API transport and resource adapters.
///
/// This module provides:
/// - the authenticated HTTP transport with bounded retry
/// - the closed [`Fault`](api::Fault) taxonomy
/// - the tracker adapter (issues, projects, versions)
/// - the wiki adapter (pages, spaces)
/// - the streaming attachment uploader
pub mod api;

/// Credential resolution.
///
/// Reads the three required environment variables and validates the base
/// URL. There is no configuration file and no stored profile: the
/// environment is the whole configuration surface.
pub mod config;

/// Output formatting for the two supported modes.
///
/// Provides formatters for:
/// - Text format: human-readable sections and tables for interactive use
/// - JSON format: structured output for scripting and automation
pub mod output;

/// Utility functions and helpers.
///
/// Common utilities used throughout the codebase including:
/// - Comma-separated list parsing with explicit-clear semantics
/// - Issue/project key validation
/// - Timestamp, size and string formatting
pub mod util;

/// Re-export of the main CLI struct for convenient access.
///
/// The [`Cli`] struct represents the root command and is the entry point
/// for parsing command-line arguments.
pub use cli::Cli;

/// Re-export of the resolved credential set.
///
/// [`Credentials`] carries the base URL, identity and token read from the
/// environment.
pub use config::Credentials;

/// Re-export of the fault taxonomy.
///
/// Every failure the engine can surface is one of the closed set of
/// [`Fault`] kinds.
pub use api::Fault;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and completion
/// generation.
///
/// # Value
///
/// `"atlas"`
pub const APP_NAME: &str = "atlas";

/// Application version constant.
///
/// The current version of the CLI, automatically derived from Cargo.toml
/// at compile time using the `CARGO_PKG_VERSION` environment variable.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// The engine uses a deliberately binary exit model so scripts can branch
/// on success without decoding a ladder of codes: the fault taxonomy shapes
/// the message, never the exit code.
///
/// # Example
///
/// ```rust,no_run
/// use atlas_cli::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::SUCCESS);
/// ```
pub mod exit_codes {
    /// Successful execution.
    ///
    /// The subcommand's dispatch step returned success.
    ///
    /// # Value
    ///
    /// `0`
    pub const SUCCESS: i32 = 0;

    /// Any fault.
    ///
    /// Covers every fault kind: missing configuration, invalid arguments,
    /// and all service-side failures. The single-line message on the error
    /// stream (or the `{"error": ...}` object under `--json`) carries the
    /// detail.
    ///
    /// # Value
    ///
    /// `1`
    pub const FAULT: i32 = 1;
}
