//! Dashboard analytics queries.
//!
//! The backend returns pre-aggregated JSON shaped for the charts that render
//! it; the client performs no aggregation of its own, so these come back as
//! opaque values.

use serde_json::Value;

use super::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn visitor_stats(&self, token: &str) -> Result<Value, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/analytics/visitor-stats"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn access_metrics(&self, token: &str) -> Result<Value, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/analytics/access-metrics"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn training_metrics(&self, token: &str) -> Result<Value, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/analytics/training-metrics"))
                .bearer_auth(token),
        )
        .await
    }
}
