//
//  atlas-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Credential Resolution
//!
//! The engine has no configuration file and no stored profiles: the
//! environment is the entire configuration surface. This module reads the
//! three required values, validates the base URL, and fails fast (naming
//! every missing variable) before a single network request is issued.
//!
//! ## Environment Variables
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `ATLAS_BASE_URL` | Site base URL serving both services |
//! | `ATLAS_EMAIL` | Principal identity the token belongs to |
//! | `ATLAS_API_TOKEN` | Issued API token |
//!
//! Blank values (empty or whitespace-only) count as missing. A set of
//! credentials is resolved as a whole; the resolver never proceeds with a
//! partial set.
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlas_cli::config::Credentials;
//!
//! let creds = Credentials::resolve()?;
//! println!("site: {}", creds.base_url);
//! # Ok::<(), atlas_cli::api::Fault>(())
//! ```

use url::Url;

use crate::api::Fault;

/// Environment variable holding the site base URL.
pub const BASE_URL_VAR: &str = "ATLAS_BASE_URL";

/// Environment variable holding the principal identity.
pub const EMAIL_VAR: &str = "ATLAS_EMAIL";

/// Environment variable holding the API token.
pub const API_TOKEN_VAR: &str = "ATLAS_API_TOKEN";

/// The resolved credential set.
///
/// Produced only as a complete unit by [`Credentials::resolve`]; the fields
/// are plain strings ready for the transport layer.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `base_url` | Validated site base URL, trailing slash stripped |
/// | `email` | Identity used as the Basic auth username |
/// | `token` | API token used as the Basic auth password |
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Validated site base URL with no trailing slash.
    pub base_url: String,
    /// Principal identity (Basic auth username).
    pub email: String,
    /// API token (Basic auth password).
    pub token: String,
}

impl Credentials {
    /// Resolves the credential set from the process environment.
    ///
    /// # Returns
    ///
    /// The complete [`Credentials`] on success.
    ///
    /// # Errors
    ///
    /// [`Fault::MissingConfiguration`] naming every unset or blank variable,
    /// or naming `ATLAS_BASE_URL` when its value is not an absolute
    /// `http`/`https` URL.
    ///
    /// # Notes
    ///
    /// A trailing `/` on the base URL is tolerated and stripped so path
    /// joining stays uniform.
    pub fn resolve() -> Result<Self, Fault> {
        Self::resolve_with(|name| std::env::var(name).ok())
    }

    fn resolve_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Fault> {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = read(BASE_URL_VAR);
        let email = read(EMAIL_VAR);
        let token = read(API_TOKEN_VAR);

        match (base_url, email, token) {
            (Some(base_url), Some(email), Some(token)) => Ok(Self {
                base_url: validate_base_url(&base_url)?,
                email,
                token,
            }),
            (base_url, email, token) => {
                let mut missing = Vec::new();
                if base_url.is_none() {
                    missing.push(BASE_URL_VAR);
                }
                if email.is_none() {
                    missing.push(EMAIL_VAR);
                }
                if token.is_none() {
                    missing.push(API_TOKEN_VAR);
                }
                Err(Fault::MissingConfiguration(missing.join(", ")))
            }
        }
    }
}

/// Checks that the configured base URL is an absolute `http`/`https` URL
/// with a host, and strips any trailing slash.
fn validate_base_url(raw: &str) -> Result<String, Fault> {
    let parsed = Url::parse(raw).map_err(|_| {
        Fault::MissingConfiguration(format!("{BASE_URL_VAR} is not a valid URL: {raw}"))
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(Fault::MissingConfiguration(format!(
            "{BASE_URL_VAR} must be an absolute http(s) URL: {raw}"
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn resolve(vars: &HashMap<String, String>) -> Result<Credentials, Fault> {
        Credentials::resolve_with(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_resolves_complete_set() {
        let vars = env(&[
            (BASE_URL_VAR, "https://company.example.com/"),
            (EMAIL_VAR, "dev@example.com"),
            (API_TOKEN_VAR, "tok-123"),
        ]);
        let creds = resolve(&vars).unwrap();
        assert_eq!(creds.base_url, "https://company.example.com");
        assert_eq!(creds.email, "dev@example.com");
        assert_eq!(creds.token, "tok-123");
    }

    #[test]
    fn test_names_all_missing_variables() {
        let vars = env(&[(EMAIL_VAR, "dev@example.com")]);
        match resolve(&vars) {
            Err(Fault::MissingConfiguration(msg)) => {
                assert!(msg.contains(BASE_URL_VAR));
                assert!(msg.contains(API_TOKEN_VAR));
                assert!(!msg.contains(EMAIL_VAR));
            }
            other => panic!("expected MissingConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let vars = env(&[
            (BASE_URL_VAR, "https://company.example.com"),
            (EMAIL_VAR, "   "),
            (API_TOKEN_VAR, "tok-123"),
        ]);
        match resolve(&vars) {
            Err(Fault::MissingConfiguration(msg)) => assert_eq!(msg, EMAIL_VAR),
            other => panic!("expected MissingConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_malformed_base_url() {
        let vars = env(&[
            (BASE_URL_VAR, "not a url"),
            (EMAIL_VAR, "dev@example.com"),
            (API_TOKEN_VAR, "tok-123"),
        ]);
        match resolve(&vars) {
            Err(Fault::MissingConfiguration(msg)) => assert!(msg.contains(BASE_URL_VAR)),
            other => panic!("expected MissingConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let vars = env(&[
            (BASE_URL_VAR, "ftp://company.example.com"),
            (EMAIL_VAR, "dev@example.com"),
            (API_TOKEN_VAR, "tok-123"),
        ]);
        assert!(matches!(
            resolve(&vars),
            Err(Fault::MissingConfiguration(_))
        ));
    }
}
