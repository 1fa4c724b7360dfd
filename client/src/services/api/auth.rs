//! # Authentication Endpoints
//!
//! Login and account creation. Storing the returned token is the caller's
//! job (see [`crate::app::handlers::auth`]).

use reqwest::Method;
use shared::{LoginRequest, SignupRequest, TokenResponse};
use tracing::{info, warn};

use super::client::ApiClient;
use crate::core::error::Result;

/// Login with username/email and password.
#[tracing::instrument(skip(client, password), fields(username_or_email = %username_or_email))]
pub async fn login(
    client: &ApiClient,
    username_or_email: &str,
    password: &str,
) -> Result<TokenResponse> {
    info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest::new(username_or_email, password);
    let result = client
        .send_json::<TokenResponse>(client.request(Method::POST, "/auth/login").json(&request))
        .await;

    match &result {
        Ok(_) => info!(duration_ms = start.elapsed().as_millis(), "Login successful"),
        Err(e) => warn!(error = %e, duration_ms = start.elapsed().as_millis(), "Login failed"),
    }
    result
}

/// Create an account. The backend answers with the new user, which is not needed.
#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn signup(client: &ApiClient, request: &SignupRequest) -> Result<()> {
    client
        .send_empty(client.request(Method::POST, "/usuario").json(request))
        .await?;
    info!("Account created");
    Ok(())
}
