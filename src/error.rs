//! Error types shared by the API client and the scan pipeline.
//!
//! The variants mirror the failure kinds callers are expected to present
//! inline: a server-supplied message, one of the two fixed session/permission
//! strings, or a transport-level description. UI code pattern-matches on
//! substrings of these messages (e.g. "expired" to trigger a refresh), so the
//! `SessionExpired` and `AccessDenied` texts must not change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback message used when a non-2xx response carries no `message` field.
pub const GENERIC_SERVER_ERROR: &str = "Something went wrong. Please try again.";

/// Errors surfaced by every API client operation.
///
/// The client never retries automatically and never swallows a failure; each
/// operation either resolves with its typed payload or returns one of these.
#[derive(Debug, Serialize, Deserialize, Error)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum ApiError {
    /// HTTP 401. The registered session-expiration handler has already been
    /// invoked by the time this is returned.
    #[error("Session expired. Please log in again.")]
    SessionExpired,

    /// HTTP 403.
    #[error("Access denied. You do not have permission to perform this action.")]
    AccessDenied,

    /// Any other non-2xx status; carries the server's `message` verbatim, or
    /// [`GENERIC_SERVER_ERROR`] when the body had none.
    #[error("{0}")]
    Server(String),

    /// Network failure before a status was obtained (DNS, connect, TLS, body
    /// read).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body was not the JSON shape we expected.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// A client-side precondition failed (missing field, oversized file, no
    /// file selected). No network call was made.
    #[error("{0}")]
    Validation(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Errors surfaced by the QR scan pipeline.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Camera access was refused. Terminal for the scanner instance; callers
    /// should offer the manual-entry fallback.
    #[error("Camera permission denied. Please enable camera access.")]
    CameraPermissionDenied,

    /// The camera stream failed after it was acquired.
    #[error("Camera error: {0}")]
    Camera(String),

    /// No identifier could be extracted from a decoded payload. Requires new
    /// input; the scanner does not resume on its own.
    #[error("Invalid QR format")]
    InvalidFormat,

    /// Server validation explicitly rejected the code.
    #[error("Invalid QR code. Access denied.")]
    AccessDenied,

    /// The pipeline's cancellation token fired before a code was found.
    #[error("Scan cancelled")]
    Cancelled,
}
