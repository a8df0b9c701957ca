//! Diagnostic binary for exercising the client against live backends.
//!
//! Logs in with credentials from the environment, fetches the operator
//! profile and current visitor list, and optionally runs a QR payload given
//! as the first argument through extraction and server validation. Useful for
//! smoke-testing a deployment without the full front-end.

use std::sync::Arc;

use dotenv::dotenv;
use gatepass_client::api::access_control::QrValidator;
use gatepass_client::models::{Credentials, VisitorFilters};
use gatepass_client::services::extract_visitor_id;
use gatepass_client::{ApiClient, ClientConfig, SessionManager, get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = get_subscriber("gatepass".to_string(), "info".to_string(), std::io::stdout);
    init_subscriber(subscriber);

    let config = ClientConfig::from_env()?;
    let session = Arc::new(SessionManager::default());
    session.on_session_expired(|| tracing::warn!("session expired, re-login required"));
    let client = ApiClient::new(config, session);

    let credentials = Credentials {
        email: std::env::var("GATEPASS_EMAIL")?,
        password: std::env::var("GATEPASS_PASSWORD")?,
    };

    let login = client.login(&credentials).await?;
    tracing::info!(role = ?login.role, "logged in as {}", login.email);

    let profile = client.profile(&login.access_token).await?;
    tracing::info!("profile ok: {} {}", profile.first_name, profile.last_name);

    let visitors = client
        .list_visitors(&login.access_token, &VisitorFilters::default())
        .await?;
    tracing::info!("visitor list: {} records", visitors.len());

    if let Some(payload) = std::env::args().nth(1) {
        match extract_visitor_id(&payload) {
            Some(id) => tracing::info!("payload parses to visitor id {id}"),
            None => tracing::warn!("payload yields no visitor id"),
        }
        let verdict = client.validate_qr(&payload, &login.access_token).await?;
        tracing::info!("server verdict: {verdict:?}");
    }

    Ok(())
}
