//! Notification delivery and settings operations.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Notification, NotificationSettings, NotificationType};

impl ApiClient {
    /// Sends a lifecycle notification to a visitor.
    #[tracing::instrument(skip(self, token))]
    pub async fn notify_visitor(
        &self,
        token: &str,
        visitor_id: &str,
        kind: NotificationType,
    ) -> Result<Notification, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url("/notifications/visitor"))
                .bearer_auth(token)
                .json(&serde_json::json!({ "visitorId": visitor_id, "type": kind })),
        )
        .await
    }

    /// Sends a lifecycle notification to a host employee.
    pub async fn notify_host(
        &self,
        token: &str,
        host_email: &str,
        visitor_id: &str,
        kind: NotificationType,
    ) -> Result<Notification, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url("/notifications/host"))
                .bearer_auth(token)
                .json(&serde_json::json!({
                    "hostEmail": host_email,
                    "visitorId": visitor_id,
                    "type": kind,
                })),
        )
        .await
    }

    pub async fn notification_history(&self, token: &str) -> Result<Vec<Notification>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/notifications/history"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn get_notification_settings(
        &self,
        token: &str,
    ) -> Result<NotificationSettings, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/notifications/settings"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn update_notification_settings(
        &self,
        token: &str,
        settings: &NotificationSettings,
    ) -> Result<NotificationSettings, ApiError> {
        self.execute(
            self.http()
                .put(self.primary_url("/notifications/settings"))
                .bearer_auth(token)
                .json(settings),
        )
        .await
    }
}
