//! QR validation and generation against the primary API.
//!
//! The validation endpoint has drifted across backend deployments and may
//! answer in any of several shapes. Rather than probing properties ad hoc,
//! the shapes are decoded into one tagged union ([`QrValidationResponse`])
//! and collapsed to a verdict in a single exhaustive match, so the accepted
//! contract is auditable in one place.

use serde::Deserialize;

use super::{ApiClient, Envelope, handle_response};
use crate::error::ApiError;
use crate::models::QrCode;

/// Every response shape the validation endpoint is known to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QrValidationResponse {
    /// `{valid, visitorId}`
    Valid {
        valid: bool,
        #[serde(rename = "visitorId")]
        visitor_id: Option<String>,
    },
    /// `{accessGranted, visitorId}`
    AccessGranted {
        #[serde(rename = "accessGranted")]
        access_granted: bool,
        #[serde(rename = "visitorId")]
        visitor_id: Option<String>,
    },
    /// `{data: {visitorId}}`
    WrappedData { data: WrappedVisitorId },
    /// Anything else the backend sends back.
    Unrecognized(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct WrappedVisitorId {
    #[serde(rename = "visitorId")]
    pub visitor_id: Option<String>,
}

/// Collapsed validation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrVerdict {
    /// Validation succeeded and named a visitor.
    Granted { visitor_id: String },
    /// Explicit denial, an absent visitor id, or an unrecognized shape.
    Denied,
}

impl QrValidationResponse {
    /// Maps every known shape to a verdict.
    ///
    /// An explicit falsy flag, a missing visitor id, or an unrecognized
    /// shape are all treated as denial.
    pub fn verdict(self) -> QrVerdict {
        match self {
            QrValidationResponse::Valid {
                valid: true,
                visitor_id: Some(visitor_id),
            } => QrVerdict::Granted { visitor_id },
            QrValidationResponse::Valid { .. } => QrVerdict::Denied,
            QrValidationResponse::AccessGranted {
                access_granted: true,
                visitor_id: Some(visitor_id),
            } => QrVerdict::Granted { visitor_id },
            QrValidationResponse::AccessGranted { .. } => QrVerdict::Denied,
            QrValidationResponse::WrappedData {
                data:
                    WrappedVisitorId {
                        visitor_id: Some(visitor_id),
                    },
            } => QrVerdict::Granted { visitor_id },
            QrValidationResponse::WrappedData { .. } => QrVerdict::Denied,
            QrValidationResponse::Unrecognized(_) => QrVerdict::Denied,
        }
    }
}

/// Seam between the scan pipeline and the validation endpoint, so the
/// pipeline can be driven with a stub in tests.
pub trait QrValidator {
    /// Validates a raw decoded QR payload (not the extracted identifier).
    async fn validate_qr(&self, raw_payload: &str, token: &str) -> Result<QrVerdict, ApiError>;
}

impl QrValidator for ApiClient {
    #[tracing::instrument(skip(self, raw_payload, token))]
    async fn validate_qr(&self, raw_payload: &str, token: &str) -> Result<QrVerdict, ApiError> {
        let response = self
            .http()
            .post(self.primary_url("/access-control/validate-qr"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "qrData": raw_payload }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Reuses the envelope error mapping (401 teardown included); the
            // Ok arm cannot be reached for a non-2xx status.
            return match handle_response::<serde_json::Value>(self.session(), status, &body) {
                Ok(_) => Ok(QrVerdict::Denied),
                Err(e) => Err(e),
            };
        }

        // The endpoint sometimes wraps its answer in the standard envelope
        // and sometimes returns it bare; accept both.
        let parsed = match serde_json::from_str::<Envelope<QrValidationResponse>>(&body) {
            Ok(envelope) if envelope.data.is_some() => envelope
                .data
                .ok_or_else(|| ApiError::Parse("empty validation envelope".into()))?,
            _ => serde_json::from_str::<QrValidationResponse>(&body)
                .map_err(|e| ApiError::Parse(e.to_string()))?,
        };

        Ok(parsed.verdict())
    }
}

impl ApiClient {
    /// Requests a printable QR code for a scheduled visitor.
    pub async fn generate_qr(&self, token: &str, visitor_id: &str) -> Result<QrCode, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url("/access-control/generate-qr"))
                .bearer_auth(token)
                .json(&serde_json::json!({ "visitorId": visitor_id })),
        )
        .await
    }
}
