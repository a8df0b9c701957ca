//! Visitor scheduling and lifecycle operations against the primary API.

use validator::Validate;

use super::{ApiClient, QueryParams};
use crate::error::ApiError;
use crate::models::{Visitor, VisitorFilters, VisitorForm, VisitorStatus};

impl ApiClient {
    /// Schedules a new visit.
    #[tracing::instrument(skip(self, token, form), fields(email = %form.email, category = form.category.as_str()))]
    pub async fn schedule_visitor(
        &self,
        token: &str,
        form: &VisitorForm,
    ) -> Result<Visitor, ApiError> {
        form.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute(
            self.http()
                .post(self.primary_url("/visitors"))
                .bearer_auth(token)
                .json(form),
        )
        .await
    }

    /// Lists visitors matching the given filters.
    ///
    /// Absent filters are omitted from the query string entirely.
    pub async fn list_visitors(
        &self,
        token: &str,
        filters: &VisitorFilters,
    ) -> Result<Vec<Visitor>, ApiError> {
        let params = visitor_query(filters);
        self.execute(
            self.http()
                .get(self.primary_url("/visitors"))
                .query(params.pairs())
                .bearer_auth(token),
        )
        .await
    }

    /// Lists visitors hosted by a particular employee.
    pub async fn list_visitors_by_host(
        &self,
        token: &str,
        host_email: &str,
    ) -> Result<Vec<Visitor>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/visitors/by-host"))
                .query(&[("hostEmail", host_email)])
                .bearer_auth(token),
        )
        .await
    }

    pub async fn get_visitor(&self, token: &str, visitor_id: &str) -> Result<Visitor, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url(&format!("/visitors/{visitor_id}")))
                .bearer_auth(token),
        )
        .await
    }

    /// Updates a scheduled visit's details.
    pub async fn update_visitor(
        &self,
        token: &str,
        visitor_id: &str,
        form: &VisitorForm,
    ) -> Result<Visitor, ApiError> {
        form.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute(
            self.http()
                .put(self.primary_url(&format!("/visitors/{visitor_id}")))
                .bearer_auth(token)
                .json(form),
        )
        .await
    }

    /// Checks a visitor in.
    #[tracing::instrument(skip(self, token))]
    pub async fn check_in_visitor(
        &self,
        token: &str,
        visitor_id: &str,
    ) -> Result<Visitor, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url(&format!("/visitors/{visitor_id}/check-in")))
                .bearer_auth(token),
        )
        .await
    }

    /// Checks a visitor out.
    #[tracing::instrument(skip(self, token))]
    pub async fn check_out_visitor(
        &self,
        token: &str,
        visitor_id: &str,
    ) -> Result<Visitor, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url(&format!("/visitors/{visitor_id}/check-out")))
                .bearer_auth(token),
        )
        .await
    }

    pub async fn search_visitors_by_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<Vec<Visitor>, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/visitors/search"))
                .query(&[("email", email)])
                .bearer_auth(token),
        )
        .await
    }

    /// Approves a pending visit.
    ///
    /// The lifecycle is checked locally first: approval is only reachable
    /// from `pending`, so e.g. a checked-out visitor is rejected without a
    /// network call.
    pub async fn approve_visitor(&self, token: &str, visitor: &Visitor) -> Result<Visitor, ApiError> {
        self.transition_visitor(token, visitor, VisitorStatus::Approved, "approve")
            .await
    }

    /// Rejects (cancels) a pending or approved visit.
    pub async fn reject_visitor(&self, token: &str, visitor: &Visitor) -> Result<Visitor, ApiError> {
        self.transition_visitor(token, visitor, VisitorStatus::Cancelled, "reject")
            .await
    }

    async fn transition_visitor(
        &self,
        token: &str,
        visitor: &Visitor,
        next: VisitorStatus,
        action: &str,
    ) -> Result<Visitor, ApiError> {
        if !visitor.status.can_transition_to(next) {
            return Err(ApiError::Validation(format!(
                "Cannot {action} a visitor in status '{}'",
                visitor.status.as_str()
            )));
        }

        self.execute(
            self.http()
                .post(self.primary_url(&format!("/visitors/{}/{action}", visitor.id)))
                .bearer_auth(token),
        )
        .await
    }

    /// Exports the filtered visitor list as an Excel workbook.
    ///
    /// The success payload is the raw file bytes, not an envelope.
    pub async fn export_visitors_excel(
        &self,
        token: &str,
        filters: &VisitorFilters,
    ) -> Result<Vec<u8>, ApiError> {
        let params = visitor_query(filters);
        self.execute_bytes(
            self.http()
                .get(self.primary_url("/visitors/export"))
                .query(params.pairs())
                .bearer_auth(token),
        )
        .await
    }
}

/// Builds the shared visitor-listing query, skipping absent filters.
pub fn visitor_query(filters: &VisitorFilters) -> QueryParams {
    let mut params = QueryParams::new();
    params
        .push_opt("status", filters.status.map(VisitorStatus::as_str))
        .push_opt("category", filters.category.map(|c| c.as_str()))
        .push_opt("department", filters.department.clone())
        .push_opt("search", filters.search.clone())
        .push_opt("startDate", filters.start_date.map(|d| d.to_rfc3339()))
        .push_opt("endDate", filters.end_date.map(|d| d.to_rfc3339()));
    params
}
