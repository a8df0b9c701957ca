//! Authentication operations against the primary API.
//!
//! Input payloads are validated locally before any network call; validation
//! failures surface as [`ApiError::Validation`] without touching the wire.

use validator::Validate;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AuthUser, ChangePasswordRequest, Credentials, ForgotPasswordRequest, LoginResponse,
    ResetPasswordRequest, SignupRequest, TokenPair,
};

impl ApiClient {
    /// Authenticates with email and password.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResponse)`: tokens plus the user's identity and role
    /// * `Err(ApiError)`: validation, transport, or server failure
    #[tracing::instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        credentials
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute(
            self.http()
                .post(self.primary_url("/auth/login"))
                .json(credentials),
        )
        .await
    }

    /// Registers a new account.
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<LoginResponse, ApiError> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute(
            self.http()
                .post(self.primary_url("/auth/signup"))
                .json(request),
        )
        .await
    }

    /// Exchanges a refresh token for a fresh token pair.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        self.execute(
            self.http()
                .post(self.primary_url("/auth/refresh-token"))
                .json(&serde_json::json!({ "refreshToken": refresh_token })),
        )
        .await
    }

    /// Fetches the authenticated user's profile.
    pub async fn profile(&self, token: &str) -> Result<AuthUser, ApiError> {
        self.execute(
            self.http()
                .get(self.primary_url("/auth/profile"))
                .bearer_auth(token),
        )
        .await
    }

    /// Requests a password-reset email.
    pub async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<(), ApiError> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute::<serde_json::Value>(
            self.http()
                .post(self.primary_url("/auth/forgot-password"))
                .json(request),
        )
        .await
        .map(|_| ())
    }

    /// Completes a password reset with the emailed token.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute::<serde_json::Value>(
            self.http()
                .post(self.primary_url("/auth/reset-password"))
                .json(request),
        )
        .await
        .map(|_| ())
    }

    /// Changes the authenticated user's password.
    pub async fn change_password(
        &self,
        token: &str,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError> {
        request
            .validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        self.execute::<serde_json::Value>(
            self.http()
                .post(self.primary_url("/auth/change-password"))
                .bearer_auth(token)
                .json(request),
        )
        .await
        .map(|_| ())
    }
}
