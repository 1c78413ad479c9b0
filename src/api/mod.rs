//
//  atlas-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Layer
//!
//! HTTP transport, fault taxonomy, and the two resource adapter families.
//!
//! ## Architecture
//!
//! - [`transport`]: Authenticated HTTP client with bounded retry
//! - [`fault`]: The closed [`Fault`] taxonomy every failure collapses into
//! - [`upload`]: Streamed multipart form construction for attachments
//! - [`tracker`]: Issue-tracker adapter (issues, projects, versions)
//! - [`wiki`]: Wiki adapter (pages, spaces)
//!
//! The two adapter families share the transport and the fault taxonomy but
//! nothing else: their schemas do not overlap, so each maps its own wire
//! types into its own normalized entities.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlas_cli::api::{tracker::TrackerApi, Transport};
//! use atlas_cli::config::Credentials;
//!
//! # async fn example() -> Result<(), atlas_cli::api::Fault> {
//! let transport = Transport::new(Credentials::resolve()?)?;
//! let tracker = TrackerApi::new(&transport);
//! let issue = tracker.get_issue("PROJ-123").await?;
//! println!("{}: {}", issue.key, issue.summary);
//! # Ok(())
//! # }
//! ```

/// Authenticated HTTP transport shared by both adapters.
///
/// Handles credential attachment, retry with exponential backoff on
/// transient failures, JSON decoding, and service error-body mining.
pub mod transport;

/// The closed fault taxonomy.
///
/// Every failure, from local validation to credential resolution to
/// transport, is one of the [`Fault`] kinds.
pub mod fault;

/// Streamed multipart upload construction.
pub mod upload;

/// Issue-tracker adapter.
///
/// Issues, projects, issue types, transitions, comments, links, remote
/// links, and versions over the tracker's REST dialect.
pub mod tracker;

/// Wiki adapter.
///
/// Pages, spaces, labels, comments, attachments, and page trees over the
/// wiki's REST dialect.
pub mod wiki;

/// Re-export of the shared HTTP transport.
pub use transport::Transport;

/// Re-export of the fault taxonomy.
pub use fault::Fault;
