//! System administration operations: users, settings, audit log, licenses.

use validator::Validate;

use super::{ApiClient, QueryParams};
use crate::error::ApiError;
use crate::models::{
    AdminUser, AuditLogEntry, AuditLogFilters, CreateUserRequest, License, SystemSettings,
    UpdateUserRequest,
};

impl ApiClient {
    pub async fn list_users(&self, token: &str) -> Result<Vec<AdminUser>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/admin/users"))
                .bearer_auth(token),
        )
        .await
    }

    #[tracing::instrument(skip(self, token, request), fields(email = %request.email))]
    pub async fn create_user(
        &self,
        token: &str,
        request: &CreateUserRequest,
    ) -> Result<AdminUser, ApiError> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute(
            self.http()
                .post(self.primary_url("/admin/users"))
                .bearer_auth(token)
                .json(request),
        )
        .await
    }

    pub async fn update_user(
        &self,
        token: &str,
        user_id: &str,
        request: &UpdateUserRequest,
    ) -> Result<AdminUser, ApiError> {
        self.execute(
            self.http()
                .put(self.primary_url(&format!("/admin/users/{user_id}")))
                .bearer_auth(token)
                .json(request),
        )
        .await
    }

    pub async fn delete_user(&self, token: &str, user_id: &str) -> Result<(), ApiError> {
        self.execute::<serde_json::Value>(
            self.http()
                .delete(self.primary_url(&format!("/admin/users/{user_id}")))
                .bearer_auth(token),
        )
        .await
        .map(|_| ())
    }

    pub async fn get_system_settings(&self, token: &str) -> Result<SystemSettings, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/admin/settings"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn update_system_settings(
        &self,
        token: &str,
        settings: &SystemSettings,
    ) -> Result<SystemSettings, ApiError> {
        self.execute(
            self.http()
                .put(self.primary_url("/admin/settings"))
                .bearer_auth(token)
                .json(settings),
        )
        .await
    }

    /// Queries the audit trail with optional date-range, user, and action
    /// filters. Absent filters are omitted from the query string.
    pub async fn query_audit_log(
        &self,
        token: &str,
        filters: &AuditLogFilters,
    ) -> Result<Vec<AuditLogEntry>, ApiError> {
        let params = audit_log_query(filters);
        self.execute(
            self.http()
                .get(self.primary_url("/admin/audit-log"))
                .query(params.pairs())
                .bearer_auth(token),
        )
        .await
    }

    pub async fn list_licenses(&self, token: &str) -> Result<Vec<License>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/admin/licenses"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn add_license(&self, token: &str, key: &str) -> Result<License, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url("/admin/licenses"))
                .bearer_auth(token)
                .json(&serde_json::json!({ "key": key })),
        )
        .await
    }
}

/// Builds the audit-log query, skipping absent filters.
pub fn audit_log_query(filters: &AuditLogFilters) -> QueryParams {
    let mut params = QueryParams::new();
    params
        .push_opt("startDate", filters.start_date.map(|d| d.to_rfc3339()))
        .push_opt("endDate", filters.end_date.map(|d| d.to_rfc3339()))
        .push_opt("user", filters.user.clone())
        .push_opt("action", filters.action.clone());
    params
}
