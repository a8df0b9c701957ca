//! Typed API client for the visitor management backends.
//!
//! One submodule per backend resource group, each exposing one async method
//! per operation on [`ApiClient`]. All response interpretation funnels through
//! [`handle_response`] (primary API envelope) or [`handle_admin_response`]
//! (secondary admin-style API), so status-code handling, including the
//! session-expiration teardown on 401, lives in exactly one place.
//!
//! The client holds no session state: bearer tokens are passed explicitly to
//! every authenticated operation.

pub mod access_control;
pub mod admin;
pub mod admin_visits;
pub mod analytics;
pub mod auth;
pub mod documents;
pub mod notifications;
pub mod sites;
pub mod training;
pub mod visitors;

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, GENERIC_SERVER_ERROR};
use crate::session::SessionManager;

/// Standard `{success, data, message?}` wrapper used by the primary backend.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[allow(dead_code)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Normalizes a primary-API response into the typed payload or an [`ApiError`].
///
/// Status interpretation, in order:
/// - 401: invoke the session-expiration handler, then fail `SessionExpired`
///   regardless of body content
/// - 403: fail `AccessDenied`
/// - 2xx: parse the envelope and return its `data` field; a malformed body
///   is a `Parse` error, as is a missing `data` when the caller expects a
///   typed payload (void operations accept an empty envelope)
/// - anything else: fail with the server-supplied `message`, or the generic
///   fallback when the body carries none
pub fn handle_response<T: DeserializeOwned>(
    session: &SessionManager,
    status: StatusCode,
    body: &str,
) -> Result<T, ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        session.notify_expired();
        return Err(ApiError::SessionExpired);
    }
    if status == StatusCode::FORBIDDEN {
        return Err(ApiError::AccessDenied);
    }

    if status.is_success() {
        let envelope: Envelope<T> =
            serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;
        return match envelope.data {
            Some(data) => Ok(data),
            // Void operations (deletes, password flows) deserialize into a
            // plain JSON value, which accepts null; an empty success
            // envelope only fails callers that expect a typed payload.
            None => serde_json::from_value(serde_json::Value::Null)
                .map_err(|_| ApiError::Parse("response envelope carried no data".into())),
        };
    }

    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
    Err(ApiError::Server(message))
}

/// Normalizes a secondary admin-API response.
///
/// That backend returns raw JSON directly (no envelope) on success and an
/// `{error}` body on non-2xx. Its endpoints also carry no bearer token, so a
/// 401 there never tears the session down.
pub fn handle_admin_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<T, ApiError> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()));
    }

    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
    Err(ApiError::Server(message))
}

/// Query-string builder that drops absent filters.
///
/// A `None` or empty value never reaches the wire; there is no Rust
/// equivalent of `key=undefined` by construction.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key/value pair unconditionally.
    pub fn push(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    /// Appends a pair only when the value is present and non-empty.
    pub fn push_opt(&mut self, key: &str, value: Option<impl Into<String>>) -> &mut Self {
        if let Some(value) = value {
            let value = value.into();
            if !value.is_empty() {
                self.pairs.push((key.to_string(), value));
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The accumulated pairs, in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Percent-encoded `key=value&...` form, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Typed client over both visitor-management backends.
///
/// Cheap to clone; the inner `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Arc<SessionManager>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn primary_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.api_base_url)
    }

    pub(crate) fn admin_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.admin_base_url)
    }

    /// Sends a primary-API request and normalizes the enveloped response.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        handle_response(&self.session, status, &body)
    }

    /// Sends a secondary admin-API request and normalizes the raw response.
    pub(crate) async fn execute_admin<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        handle_admin_response(status, &body)
    }

    /// Sends a request whose success payload is a binary blob (e.g. the
    /// Excel export). Error statuses still go through the envelope handler.
    pub(crate) async fn execute_bytes(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.bytes().await?.to_vec());
        }
        let body = response.text().await?;
        // Reuse the envelope error mapping; the Ok arm is unreachable for a
        // non-2xx status.
        match handle_response::<serde_json::Value>(&self.session, status, &body) {
            Ok(_) => Err(ApiError::Parse("expected binary response".into())),
            Err(e) => Err(e),
        }
    }
}
