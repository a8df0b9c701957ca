//! Site, department, and meeting-location configuration operations.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Department, MeetingLocation, Site, SiteSettings};

impl ApiClient {
    pub async fn list_sites(&self, token: &str) -> Result<Vec<Site>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/sites"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn create_site(&self, token: &str, name: &str) -> Result<Site, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url("/sites"))
                .bearer_auth(token)
                .json(&serde_json::json!({ "name": name })),
        )
        .await
    }

    pub async fn delete_site(&self, token: &str, site_id: &str) -> Result<(), ApiError> {
        self.execute::<serde_json::Value>(
            self.http()
                .delete(self.primary_url(&format!("/sites/{site_id}")))
                .bearer_auth(token),
        )
        .await
        .map(|_| ())
    }

    pub async fn list_departments(&self, token: &str) -> Result<Vec<Department>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/sites/departments"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn create_department(
        &self,
        token: &str,
        name: &str,
        site_id: Option<&str>,
    ) -> Result<Department, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url("/sites/departments"))
                .bearer_auth(token)
                .json(&serde_json::json!({ "name": name, "siteId": site_id })),
        )
        .await
    }

    pub async fn delete_department(&self, token: &str, department_id: &str) -> Result<(), ApiError> {
        self.execute::<serde_json::Value>(
            self.http()
                .delete(self.primary_url(&format!("/sites/departments/{department_id}")))
                .bearer_auth(token),
        )
        .await
        .map(|_| ())
    }

    pub async fn list_meeting_locations(
        &self,
        token: &str,
        site_id: &str,
    ) -> Result<Vec<MeetingLocation>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url(&format!("/sites/{site_id}/meeting-locations")))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn create_meeting_location(
        &self,
        token: &str,
        site_id: &str,
        name: &str,
    ) -> Result<MeetingLocation, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url(&format!("/sites/{site_id}/meeting-locations")))
                .bearer_auth(token)
                .json(&serde_json::json!({ "name": name })),
        )
        .await
    }

    pub async fn delete_meeting_location(
        &self,
        token: &str,
        site_id: &str,
        location_id: &str,
    ) -> Result<(), ApiError> {
        self.execute::<serde_json::Value>(
            self.http()
                .delete(self.primary_url(&format!(
                    "/sites/{site_id}/meeting-locations/{location_id}"
                )))
                .bearer_auth(token),
        )
        .await
        .map(|_| ())
    }

    /// Fetches the per-site configuration toggles.
    pub async fn get_site_settings(
        &self,
        token: &str,
        site_id: &str,
    ) -> Result<SiteSettings, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url(&format!("/sites/{site_id}/settings")))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn update_site_settings(
        &self,
        token: &str,
        site_id: &str,
        settings: &SiteSettings,
    ) -> Result<SiteSettings, ApiError> {
        self.execute(
            self.http()
                .put(self.primary_url(&format!("/sites/{site_id}/settings")))
                .bearer_auth(token)
                .json(settings),
        )
        .await
    }
}
