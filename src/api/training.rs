//! Training course and quiz operations against the primary API.
//!
//! Scoring is server-authoritative: [`ApiClient::submit_training`] returns
//! the backend's verdict. [`estimate_score`] mirrors the same rule for
//! optimistic UI display only and must never be persisted.

use validator::Validate;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{
    EnrollmentStatus, SubmissionResponse, Training, TrainingForm, TrainingSubmission,
};

/// Local optimistic score estimate: `round(100 · correct / total)`, passed
/// when the score meets the required threshold.
///
/// This duplicates the server rule on purpose so the quiz screen can show an
/// immediate result while the submission is in flight; the
/// [`SubmissionResponse`] that comes back is the source of truth.
pub fn estimate_score(correct: usize, total: usize, required_score: u32) -> (u32, bool) {
    if total == 0 {
        return (0, required_score == 0);
    }
    let score = ((100.0 * correct as f64) / total as f64).round() as u32;
    (score, score >= required_score)
}

impl ApiClient {
    pub async fn list_trainings(&self, token: &str) -> Result<Vec<Training>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/training"))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn create_training(
        &self,
        token: &str,
        form: &TrainingForm,
    ) -> Result<Training, ApiError> {
        form.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute(
            self.http()
                .post(self.primary_url("/training"))
                .bearer_auth(token)
                .json(form),
        )
        .await
    }

    pub async fn get_training(&self, token: &str, training_id: &str) -> Result<Training, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url(&format!("/training/{training_id}")))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn update_training(
        &self,
        token: &str,
        training_id: &str,
        form: &TrainingForm,
    ) -> Result<Training, ApiError> {
        form.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute(
            self.http()
                .put(self.primary_url(&format!("/training/{training_id}")))
                .bearer_auth(token)
                .json(form),
        )
        .await
    }

    pub async fn delete_training(&self, token: &str, training_id: &str) -> Result<(), ApiError> {
        self.execute::<serde_json::Value>(
            self.http()
                .delete(self.primary_url(&format!("/training/{training_id}")))
                .bearer_auth(token),
        )
        .await
        .map(|_| ())
    }

    /// Submits quiz answers for server-side scoring.
    #[tracing::instrument(skip(self, token, submission), fields(answer_count = submission.answers.len()))]
    pub async fn submit_training(
        &self,
        token: &str,
        training_id: &str,
        visitor_id: &str,
        submission: &TrainingSubmission,
    ) -> Result<SubmissionResponse, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url(&format!("/training/{training_id}/submit")))
                .bearer_auth(token)
                .json(&serde_json::json!({
                    "visitorId": visitor_id,
                    "answers": submission.answers,
                })),
        )
        .await
    }

    pub async fn enrollment_status(
        &self,
        token: &str,
        training_id: &str,
        visitor_id: &str,
    ) -> Result<EnrollmentStatus, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url(&format!("/training/{training_id}/enrollment")))
                .query(&[("visitorId", visitor_id)])
                .bearer_auth(token),
        )
        .await
    }

    pub async fn enroll(
        &self,
        token: &str,
        training_id: &str,
        visitor_id: &str,
    ) -> Result<EnrollmentStatus, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url(&format!("/training/{training_id}/enroll")))
                .bearer_auth(token)
                .json(&serde_json::json!({ "visitorId": visitor_id })),
        )
        .await
    }

    /// Generates a completion certificate (PDF bytes).
    pub async fn training_certificate(
        &self,
        token: &str,
        training_id: &str,
        visitor_id: &str,
    ) -> Result<Vec<u8>, ApiError> {
        self.execute_bytes(
            self.http()
                .get(self.primary_url(&format!("/training/{training_id}/certificate")))
                .query(&[("visitorId", visitor_id)])
                .bearer_auth(token),
        )
        .await
    }
}
