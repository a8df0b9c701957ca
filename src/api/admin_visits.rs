//! Operations against the secondary admin-style backend.
//!
//! This backend predates the primary API and keeps its own conventions: it
//! returns raw JSON with no `{success, data}` envelope, reports failures as
//! an `{error}` body, and its mutation endpoints are called **without** a
//! bearer token. Whether the missing token is intentional (public endpoints
//! behind a network boundary) or a latent gap is an open product question;
//! the behavior is preserved here rather than silently fixed so the two
//! deployments stay in sync.

use serde_json::Value;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Visitor, VisitorCategory, VisitorForm, VisitorStatus};

impl ApiClient {
    /// Lists all visitors known to the admin backend.
    pub async fn admin_list_visitors(&self) -> Result<Vec<Visitor>, ApiError> {
        self.execute_admin(self.http().get(self.admin_url("/admin/visitors")))
            .await
    }

    pub async fn admin_get_visitor(&self, visitor_id: &str) -> Result<Visitor, ApiError> {
        self.execute_admin(
            self.http()
                .get(self.admin_url(&format!("/admin/visitor/{visitor_id}"))),
        )
        .await
    }

    /// Fetches the completed-visit history.
    pub async fn admin_visit_history(&self) -> Result<Vec<Visitor>, ApiError> {
        self.execute_admin(self.http().get(self.admin_url("/admin/visit-history")))
            .await
    }

    /// Fetches currently active visits.
    pub async fn admin_active_visits(&self) -> Result<Vec<Visitor>, ApiError> {
        self.execute_admin(self.http().get(self.admin_url("/admin/visits")))
            .await
    }

    /// Approves or cancels a visit, discriminated by person type.
    #[tracing::instrument(skip(self), fields(category = category.as_str(), status = status.as_str()))]
    pub async fn admin_update_status(
        &self,
        category: VisitorCategory,
        visitor_id: &str,
        status: VisitorStatus,
    ) -> Result<Visitor, ApiError> {
        self.execute_admin(
            self.http()
                .put(self.admin_url(&format!(
                    "/admin/updateStatus/{}/{visitor_id}",
                    category.as_str()
                )))
                .json(&serde_json::json!({ "status": status })),
        )
        .await
    }

    /// Edits a visit's form data, discriminated by person type.
    pub async fn admin_edit_visitor(
        &self,
        category: VisitorCategory,
        visitor_id: &str,
        form: &VisitorForm,
    ) -> Result<Visitor, ApiError> {
        self.execute_admin(
            self.http()
                .put(self.admin_url(&format!(
                    "/admin/edit/{}/{visitor_id}",
                    category.as_str()
                )))
                .json(form),
        )
        .await
    }

    /// Checks a visitor out through the admin backend.
    pub async fn admin_checkout_visitor(&self, visitor_id: &str) -> Result<Value, ApiError> {
        self.execute_admin(
            self.http()
                .post(self.admin_url(&format!("/visitors/{visitor_id}/checkout"))),
        )
        .await
    }
}
