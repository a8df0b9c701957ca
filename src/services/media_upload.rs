//! Direct-to-host media uploads.
//!
//! Photos, training videos, and training documents go straight to the
//! third-party media host with an unsigned upload preset; only the resulting
//! URL is ever sent to our backend. Size limits are enforced here, before any
//! bytes leave the device, because the host bills per upload attempt.

use log::info;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, GENERIC_SERVER_ERROR};

/// Dedicated client for the media host; kept separate from the API client so
/// large uploads do not share connection pools with interactive requests.
static UPLOAD_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// What is being uploaded; determines the size ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Visitor photos and identity documents.
    Photo,
    /// Training module videos.
    TrainingVideo,
    /// Training module slide decks and PDFs.
    TrainingDocument,
}

impl MediaKind {
    /// Maximum accepted payload in bytes.
    pub fn max_bytes(self) -> usize {
        match self {
            MediaKind::Photo => 5 * 1024 * 1024,
            MediaKind::TrainingVideo => 100 * 1024 * 1024,
            MediaKind::TrainingDocument => 20 * 1024 * 1024,
        }
    }

    fn limit_label(self) -> &'static str {
        match self {
            MediaKind::Photo => "5MB",
            MediaKind::TrainingVideo => "100MB",
            MediaKind::TrainingDocument => "20MB",
        }
    }
}

/// Successful upload response; only the hosted URL matters downstream.
#[derive(Debug, Deserialize)]
pub struct UploadedMedia {
    pub secure_url: String,
}

/// Uploads one file to the configured media host.
///
/// Rejects empty and oversized payloads with [`ApiError::Validation`] before
/// making any network call. The file is sent as a base64 data URL in a
/// multipart form together with the unsigned preset.
pub async fn upload_media(
    config: &ClientConfig,
    kind: MediaKind,
    mime_type: &str,
    bytes: &[u8],
) -> Result<UploadedMedia, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::Validation("No file selected".into()));
    }
    if bytes.len() > kind.max_bytes() {
        return Err(ApiError::Validation(format!(
            "File is too large. Maximum size is {}.",
            kind.limit_label()
        )));
    }

    use base64::Engine as _;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    let data_url = format!("data:{mime_type};base64,{encoded}");

    let form = reqwest::multipart::Form::new()
        .text("file", data_url)
        .text("upload_preset", config.media_upload_preset.clone());

    let response = UPLOAD_CLIENT
        .post(&config.media_upload_url)
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::Server(upload_error_message(&body)));
    }

    let uploaded: UploadedMedia =
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
    info!("Uploaded {} bytes of media ({kind:?})", bytes.len());
    Ok(uploaded)
}

/// Pulls the host's `error.message` out of a failure body, if present.
fn upload_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")?
                .get("message")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string())
}
