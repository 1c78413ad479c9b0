//
//  atlas-cli
//  api/fault.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Fault Taxonomy
//!
//! Every failure the engine can surface, from local validation and
//! credential resolution to service responses, is normalized into one of the
//! closed set of [`Fault`] kinds defined here. The kind shapes the message
//! printed at the process edge; it never changes the exit code, which is
//! uniformly [`crate::exit_codes::FAULT`].
//!
//! # Overview
//!
//! | Kind | Raised by | Typical trigger |
//! |------|-----------|-----------------|
//! | `MissingConfiguration` | credential resolver | unset/blank environment variable |
//! | `InvalidArguments` | router, adapters | malformed flag, bad key grammar, unreadable file |
//! | `NotFound` | transport, adapters | HTTP 404, unmatched transition or link |
//! | `PermissionDenied` | transport | HTTP 401/403 |
//! | `Conflict` | transport | HTTP 409, stale page version |
//! | `ServiceUnavailable` | transport | HTTP 5xx or network failure after retries |
//! | `Unknown` | anywhere | anything unclassified |
//!
//! # Example
//!
//! ```rust
//! use atlas_cli::api::Fault;
//!
//! fn handle<T>(result: Result<T, Fault>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(Fault::NotFound(resource)) => println!("no such resource: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - Local kinds (`MissingConfiguration`, `InvalidArguments`) are raised
//!   before any network call; a malformed command never causes a partial
//!   remote mutation
//! - The CLI layer composes over `anyhow::Result`; [`Fault::normalize`]
//!   recovers the kind at the process edge

use thiserror::Error;

/// Closed set of failure kinds for every engine operation.
///
/// Each variant carries a human-readable detail string. Display output is a
/// single line suitable for the error stream or the `{"error": ...}` JSON
/// object.
///
/// # Example
///
/// ```rust
/// use atlas_cli::api::Fault;
///
/// let fault = Fault::NotFound("issue PROJ-999".to_string());
/// assert_eq!(fault.to_string(), "Resource not found: issue PROJ-999");
/// ```
#[derive(Error, Debug)]
pub enum Fault {
    /// A required configuration value is unset or blank.
    ///
    /// The detail names every missing environment variable so one fix
    /// round-trip suffices. Raised before any network traffic.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// The command line or a locally validated parameter is malformed.
    ///
    /// Raised before any network call; no partial side effects occur for
    /// malformed commands.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The requested resource does not exist (HTTP 404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The credential is not allowed to perform the operation (HTTP 401/403).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The service rejected the mutation as conflicting (HTTP 409).
    ///
    /// Seen on stale wiki page version numbers and tracker version-name
    /// clashes. The caller must re-fetch current state and retry; the engine
    /// never silently overwrites.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The service stayed unreachable or kept failing after bounded retries.
    ///
    /// The only kind preceded by automatic retry inside the transport.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Anything unclassified.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl Fault {
    /// Maps a non-retryable HTTP status to a fault kind.
    ///
    /// | Status | Kind |
    /// |--------|------|
    /// | 401, 403 | `PermissionDenied` |
    /// | 404 | `NotFound` |
    /// | 409 | `Conflict` |
    /// | 5xx | `ServiceUnavailable` |
    /// | other | `Unknown` (message keeps the status) |
    ///
    /// # Parameters
    ///
    /// * `status` - The HTTP status code of the response
    /// * `message` - The mined service error message (or raw body)
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        use reqwest::StatusCode;
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Fault::PermissionDenied(message),
            StatusCode::NOT_FOUND => Fault::NotFound(message),
            StatusCode::CONFLICT => Fault::Conflict(message),
            s if s.is_server_error() => Fault::ServiceUnavailable(message),
            s => Fault::Unknown(format!("service error ({}): {}", s, message)),
        }
    }

    /// Recovers the fault kind from an `anyhow::Error` at the process edge.
    ///
    /// The CLI layer propagates everything as `anyhow::Result`; whatever is
    /// not a [`Fault`] underneath collapses into [`Fault::Unknown`] so no
    /// failure escapes the taxonomy.
    pub fn normalize(err: anyhow::Error) -> Fault {
        match err.downcast::<Fault>() {
            Ok(fault) => fault,
            Err(other) => Fault::Unknown(format!("{other:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            Fault::from_status(StatusCode::UNAUTHORIZED, "x".into()),
            Fault::PermissionDenied(_)
        ));
        assert!(matches!(
            Fault::from_status(StatusCode::FORBIDDEN, "x".into()),
            Fault::PermissionDenied(_)
        ));
        assert!(matches!(
            Fault::from_status(StatusCode::NOT_FOUND, "x".into()),
            Fault::NotFound(_)
        ));
        assert!(matches!(
            Fault::from_status(StatusCode::CONFLICT, "x".into()),
            Fault::Conflict(_)
        ));
        assert!(matches!(
            Fault::from_status(StatusCode::BAD_GATEWAY, "x".into()),
            Fault::ServiceUnavailable(_)
        ));
    }

    #[test]
    fn test_unmapped_status_keeps_code_in_message() {
        let fault = Fault::from_status(StatusCode::BAD_REQUEST, "field is required".into());
        match fault {
            Fault::Unknown(msg) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("field is required"));
            }
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_recovers_fault() {
        let err = anyhow::Error::new(Fault::Conflict("stale version".into()));
        assert!(matches!(Fault::normalize(err), Fault::Conflict(_)));
    }

    #[test]
    fn test_normalize_wraps_foreign_errors() {
        let err = anyhow::anyhow!("something else entirely");
        match Fault::normalize(err) {
            Fault::Unknown(msg) => assert!(msg.contains("something else")),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }
}
