//! Visitor document operations against the primary API.

use reqwest::multipart::{Form, Part};

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Document, DocumentType};

/// Client-side ceiling for document and photo uploads.
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

impl ApiClient {
    /// Uploads a document for a visitor as multipart form data.
    ///
    /// Files over [`MAX_DOCUMENT_BYTES`] are rejected locally without a
    /// network call. The multipart encoder sets its own content type; no
    /// JSON header is attached.
    #[tracing::instrument(skip(self, token, bytes), fields(file_name, size = bytes.len()))]
    pub async fn upload_document(
        &self,
        token: &str,
        visitor_id: &str,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
        document_type: DocumentType,
        description: Option<&str>,
    ) -> Result<Document, ApiError> {
        if bytes.is_empty() {
            return Err(ApiError::Validation("No file selected".into()));
        }
        if bytes.len() as u64 > MAX_DOCUMENT_BYTES {
            return Err(ApiError::Validation(
                "File is too large. Documents must be 5MB or smaller.".into(),
            ));
        }

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| ApiError::Validation(format!("Unrecognized file type: {e}")))?;

        let mut form = Form::new()
            .text("visitorId", visitor_id.to_string())
            .text("documentType", document_type.as_str())
            .part("file", part);
        if let Some(description) = description {
            form = form.text("description", description.to_string());
        }

        self.execute(
            self.http()
                .post(self.primary_url("/documents/upload"))
                .bearer_auth(token)
                .multipart(form),
        )
        .await
    }

    pub async fn list_documents_by_visitor(
        &self,
        token: &str,
        visitor_id: &str,
    ) -> Result<Vec<Document>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/documents"))
                .query(&[("visitorId", visitor_id)])
                .bearer_auth(token),
        )
        .await
    }

    pub async fn get_document(&self, token: &str, document_id: &str) -> Result<Document, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url(&format!("/documents/{document_id}")))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn delete_document(&self, token: &str, document_id: &str) -> Result<(), ApiError> {
        self.execute::<serde_json::Value>(
            self.http()
                .delete(self.primary_url(&format!("/documents/{document_id}")))
                .bearer_auth(token),
        )
        .await
        .map(|_| ())
    }
}
