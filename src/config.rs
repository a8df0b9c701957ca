//! Client configuration loaded from the environment.
//!
//! Two distinct backends are addressed by this system: the primary REST API
//! (enveloped responses, bearer auth) and a secondary admin-style API (raw
//! JSON, no envelope). Both base URLs are configurable, as is the third-party
//! media upload endpoint used for document/photo/video storage.

use std::env;

use anyhow::Context;

/// Shared configuration for all client operations.
///
/// Constructed once at application start and passed by reference to
/// [`crate::api::ApiClient`]. Holds no session state; tokens are supplied per
/// call.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the primary REST API (e.g. `https://api.example.com/api`)
    pub api_base_url: String,
    /// Base URL of the secondary admin-style API
    pub admin_base_url: String,
    /// Third-party media hosting upload endpoint
    pub media_upload_url: String,
    /// Fixed upload preset identifier sent with every media upload
    pub media_upload_preset: String,
}

impl ClientConfig {
    /// Reads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GATEPASS_API_URL`: primary REST API base URL (required)
    /// - `GATEPASS_ADMIN_API_URL`: secondary admin API base URL (required)
    /// - `GATEPASS_MEDIA_UPLOAD_URL`: media host upload endpoint (required)
    /// - `GATEPASS_MEDIA_UPLOAD_PRESET`: upload preset identifier (required)
    ///
    /// # Errors
    ///
    /// Fails when any required variable is missing. Call
    /// `dotenv::dotenv().ok()` first when using a `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = env::var("GATEPASS_API_URL").context("GATEPASS_API_URL must be set")?;
        let admin_base_url =
            env::var("GATEPASS_ADMIN_API_URL").context("GATEPASS_ADMIN_API_URL must be set")?;
        let media_upload_url =
            env::var("GATEPASS_MEDIA_UPLOAD_URL").context("GATEPASS_MEDIA_UPLOAD_URL must be set")?;
        let media_upload_preset = env::var("GATEPASS_MEDIA_UPLOAD_PRESET")
            .context("GATEPASS_MEDIA_UPLOAD_PRESET must be set")?;

        Ok(Self {
            api_base_url,
            admin_base_url,
            media_upload_url,
            media_upload_preset,
        })
    }

    /// Builds a configuration directly, mainly for tests and embedding.
    pub fn new(
        api_base_url: impl Into<String>,
        admin_base_url: impl Into<String>,
        media_upload_url: impl Into<String>,
        media_upload_preset: impl Into<String>,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            admin_base_url: admin_base_url.into(),
            media_upload_url: media_upload_url.into(),
            media_upload_preset: media_upload_preset.into(),
        }
    }
}
