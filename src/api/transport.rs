//
//  atlas-cli
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/09.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The single authenticated HTTP client both resource adapters share. It
//! owns request construction (method, path, query, body), credential
//! attachment, bounded retry, JSON decoding, and the translation of non-2xx
//! responses into [`Fault`]s.
//!
//! ## Retry Policy
//!
//! | Outcome | Behavior |
//! |---------|----------|
//! | 2xx | decoded and returned |
//! | 4xx | fault immediately, never retried (caller error) |
//! | 5xx | retried up to [`MAX_RETRIES`] with exponential backoff |
//! | network failure / timeout | retried like 5xx |
//!
//! Backoff starts at 200 ms and doubles per attempt, capped at 2 s.
//! Multipart uploads are exempt from retry: an attachment upload is one
//! atomic request, and a failure means the whole command is rerun.
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlas_cli::api::Transport;
//! use atlas_cli::config::Credentials;
//!
//! # async fn example() -> Result<(), atlas_cli::api::Fault> {
//! let transport = Transport::new(Credentials::resolve()?)?;
//! let me: serde_json::Value = transport.get("/rest/api/2/myself", &[]).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Credentials;

use super::Fault;

/// Bound on every request, including connection establishment.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of retries after the initial attempt for transient failures.
pub const MAX_RETRIES: u32 = 3;

/// First backoff delay in milliseconds; doubles per retry.
const INITIAL_BACKOFF_MS: u64 = 200;

/// Backoff ceiling in milliseconds.
const MAX_BACKOFF_MS: u64 = 2_000;

/// Authenticated HTTP client shared by the tracker and wiki adapters.
///
/// One instance per process run; reuses connections within the run and
/// holds no other state. Every request carries HTTP Basic credentials from
/// the resolved [`Credentials`].
pub struct Transport {
    http: Client,
    credentials: Credentials,
}

impl Transport {
    /// Builds the transport around a resolved credential set.
    ///
    /// # Errors
    ///
    /// [`Fault::Unknown`] if the underlying HTTP client cannot be
    /// constructed (effectively unreachable with a valid TLS stack).
    pub fn new(credentials: Credentials) -> Result<Self, Fault> {
        let http = Client::builder()
            .user_agent(format!("atlas/{}", crate::VERSION))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Fault::Unknown(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, credentials })
    }

    /// The validated site base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.credentials.base_url
    }

    /// GET `path`, decoding the JSON response into `T`.
    ///
    /// # Parameters
    ///
    /// * `path` - The request path below the site base URL
    /// * `query` - Pairs appended to any query string already embedded in
    ///   `path` (continuation paths arrive with their own)
    ///
    /// # Returns
    ///
    /// Returns `Ok(T)` on a decodable success body, or the [`Fault`] the
    /// status and error body map to.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, Fault> {
        let response = self
            .send_with_retry(|| self.request(Method::GET, path).query(query))
            .await?;
        decode(response).await
    }

    /// POST a JSON `body` to `path`, decoding the JSON response into `T`.
    ///
    /// # Parameters
    ///
    /// * `path` - The request path below the site base URL
    /// * `body` - Serialized as the JSON request body
    ///
    /// # Returns
    ///
    /// Returns `Ok(T)` on a decodable success body, or the [`Fault`] the
    /// status and error body map to.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Fault> {
        let response = self
            .send_with_retry(|| self.request(Method::POST, path).json(body))
            .await?;
        decode(response).await
    }

    /// POST a JSON `body` to `path`, expecting an empty (204) response.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on any success status; the body, if any, is
    /// discarded.
    pub async fn post_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<(), Fault> {
        self.send_with_retry(|| self.request(Method::POST, path).json(body))
            .await?;
        Ok(())
    }

    /// PUT a JSON `body` to `path`, decoding the JSON response into `T`.
    ///
    /// # Parameters
    ///
    /// * `path` - The request path below the site base URL
    /// * `body` - Serialized as the JSON request body
    ///
    /// # Returns
    ///
    /// Returns `Ok(T)` on a decodable success body, or the [`Fault`] the
    /// status and error body map to.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Fault> {
        let response = self
            .send_with_retry(|| self.request(Method::PUT, path).json(body))
            .await?;
        decode(response).await
    }

    /// PUT a JSON `body` to `path`, expecting an empty (204) response.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on any success status; the body, if any, is
    /// discarded.
    pub async fn put_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<(), Fault> {
        self.send_with_retry(|| self.request(Method::PUT, path).json(body))
            .await?;
        Ok(())
    }

    /// DELETE `path` with optional `query` pairs.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` on any success status; the body, if any, is
    /// discarded.
    pub async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<(), Fault> {
        self.send_with_retry(|| self.request(Method::DELETE, path).query(query))
            .await?;
        Ok(())
    }

    /// POST a multipart `form` to `path`, decoding the JSON response into `T`.
    ///
    /// Uploads are a single atomic request: the streamed form cannot be
    /// replayed, so transient failures surface immediately instead of being
    /// retried. The `X-Atlassian-Token: nocheck` header disables the
    /// services' XSRF check for non-browser clients.
    ///
    /// # Parameters
    ///
    /// * `path` - The request path below the site base URL
    /// * `form` - The multipart form, consumed by the single attempt
    ///
    /// # Returns
    ///
    /// Returns `Ok(T)` on a decodable success body, or
    /// [`Fault::ServiceUnavailable`] when the upload itself fails.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, Fault> {
        let response = self
            .request(Method::POST, path)
            .header("X-Atlassian-Token", "nocheck")
            .multipart(form)
            .send()
            .await
            .map_err(|e| Fault::ServiceUnavailable(format!("upload failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Fault::from_status(status, service_error_message(status, &body)));
        }

        decode(response).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.credentials.base_url, path);
        self.http
            .request(method, url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.token))
            .header("Accept", "application/json")
    }

    /// Sends a request, retrying transient failures with exponential backoff.
    ///
    /// A fresh request is built per attempt via `build`. 4xx responses are
    /// mapped through [`Fault::from_status`] and returned on first
    /// occurrence; 5xx responses and network-level errors are retried up to
    /// [`MAX_RETRIES`] times before surfacing as
    /// [`Fault::ServiceUnavailable`].
    async fn send_with_retry(
        &self,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<Response, Fault> {
        let mut attempt: u32 = 0;
        let mut delay_ms = INITIAL_BACKOFF_MS;

        loop {
            attempt += 1;

            match build().send().await {
                Ok(response) if response.status().is_server_error() => {
                    let status = response.status();
                    if attempt > MAX_RETRIES {
                        let body = response.text().await.unwrap_or_default();
                        return Err(Fault::ServiceUnavailable(format!(
                            "{} (giving up after {} retries)",
                            service_error_message(status, &body),
                            MAX_RETRIES
                        )));
                    }
                    tracing::debug!(attempt, %status, "server error, retrying in {}ms", delay_ms);
                }
                Ok(response) if !response.status().is_success() => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    return Err(Fault::from_status(status, service_error_message(status, &body)));
                }
                Ok(response) => return Ok(response),
                Err(err) => {
                    if attempt > MAX_RETRIES {
                        return Err(Fault::ServiceUnavailable(format!(
                            "request failed after {} retries: {}",
                            MAX_RETRIES, err
                        )));
                    }
                    tracing::debug!(attempt, error = %err, "network failure, retrying in {}ms", delay_ms);
                }
            }

            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            delay_ms = std::cmp::min(delay_ms * 2, MAX_BACKOFF_MS);
        }
    }
}

/// Decodes a successful response body as JSON.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Fault> {
    response
        .json::<T>()
        .await
        .map_err(|e| Fault::Unknown(format!("malformed service response: {e}")))
}

/// Mines a service error body for a human-readable message.
///
/// The tracker reports errors as:
/// ```json
/// {"errorMessages": ["..."], "errors": {"field": "..."}}
/// ```
///
/// The wiki reports errors as:
/// ```json
/// {"statusCode": 409, "message": "..."}
/// ```
///
/// Both shapes are understood; whatever fragments are present are joined
/// into one line. If parsing fails, falls back to the raw body (flattened
/// to one line) prefixed with the status.
pub fn service_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let mut parts: Vec<String> = Vec::new();

        // Tracker format: {"errorMessages": ["..."]}
        if let Some(messages) = json.get("errorMessages").and_then(|m| m.as_array()) {
            parts.extend(
                messages
                    .iter()
                    .filter_map(|m| m.as_str())
                    .map(str::to_string),
            );
        }

        // Tracker format: {"errors": {"field": "..."}}
        if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
            parts.extend(
                errors
                    .iter()
                    .filter_map(|(field, msg)| msg.as_str().map(|m| format!("{field}: {m}"))),
            );
        }

        // Wiki format: {"message": "..."}
        if parts.is_empty() {
            if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
                parts.push(message.to_string());
            }
        }

        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    // Fallback to the raw body if parsing fails
    let flattened = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.is_empty() {
        format!("API error ({})", status)
    } else {
        format!("API error ({}): {}", status, flattened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(base_url: &str) -> Credentials {
        Credentials {
            base_url: base_url.to_string(),
            email: "dev@example.com".to_string(),
            token: "tok-123".to_string(),
        }
    }

    #[test]
    fn test_service_error_message_tracker_shape() {
        let body = r#"{"errorMessages":["Issue does not exist"],"errors":{}}"#;
        let msg = service_error_message(StatusCode::NOT_FOUND, body);
        assert_eq!(msg, "Issue does not exist");
    }

    #[test]
    fn test_service_error_message_field_errors() {
        let body = r#"{"errorMessages":[],"errors":{"summary":"You must specify a summary"}}"#;
        let msg = service_error_message(StatusCode::BAD_REQUEST, body);
        assert_eq!(msg, "summary: You must specify a summary");
    }

    #[test]
    fn test_service_error_message_wiki_shape() {
        let body = r#"{"statusCode":409,"message":"Version must be incremented on update"}"#;
        let msg = service_error_message(StatusCode::CONFLICT, body);
        assert_eq!(msg, "Version must be incremented on update");
    }

    #[test]
    fn test_service_error_message_fallback_is_single_line() {
        let msg = service_error_message(StatusCode::BAD_GATEWAY, "upstream\nfell\nover");
        assert_eq!(msg, "API error (502 Bad Gateway): upstream fell over");
    }

    #[test]
    fn test_service_error_message_empty_body() {
        let msg = service_error_message(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(msg, "API error (503 Service Unavailable)");
    }

    #[tokio::test]
    async fn test_get_decodes_json_and_sends_basic_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/2/myself")
            .match_header("authorization", mockito::Matcher::Regex("^Basic ".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"dev"}"#)
            .create_async()
            .await;

        let transport = Transport::new(credentials(&server.url())).unwrap();
        let value: serde_json::Value = transport.get("/rest/api/2/myself", &[]).await.unwrap();

        assert_eq!(value["name"], "dev");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/api/2/issue/PROJ-999")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errorMessages":["Issue does not exist"],"errors":{}}"#)
            .expect(1)
            .create_async()
            .await;

        let transport = Transport::new(credentials(&server.url())).unwrap();
        let result: Result<serde_json::Value, Fault> =
            transport.get("/rest/api/2/issue/PROJ-999", &[]).await;

        match result {
            Err(Fault::NotFound(msg)) => assert!(msg.contains("does not exist")),
            other => panic!("expected NotFound, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_errors_retry_then_surface_once() {
        let mut server = mockito::Server::new_async().await;
        // Initial attempt plus MAX_RETRIES retries, all failing.
        let mock = server
            .mock("GET", "/rest/api/2/project")
            .with_status(503)
            .expect(1 + MAX_RETRIES as usize)
            .create_async()
            .await;

        let transport = Transport::new(credentials(&server.url())).unwrap();
        let result: Result<serde_json::Value, Fault> =
            transport.get("/rest/api/2/project", &[]).await;

        assert!(matches!(result, Err(Fault::ServiceUnavailable(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_conflict_maps_from_409() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PUT", "/wiki/rest/api/content/123")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"statusCode":409,"message":"Version must be incremented"}"#)
            .create_async()
            .await;

        let transport = Transport::new(credentials(&server.url())).unwrap();
        let result = transport
            .put_no_content("/wiki/rest/api/content/123", &serde_json::json!({}))
            .await;

        match result {
            Err(Fault::Conflict(msg)) => assert!(msg.contains("incremented")),
            other => panic!("expected Conflict, got {other:?}"),
        }
    }
}
