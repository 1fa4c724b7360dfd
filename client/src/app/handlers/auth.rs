//! # Authentication Handlers
//!
//! Handlers for login, signup, and logout.

use shared::SignupRequest;
use tracing::{info, warn};

use super::HandlerContext;
use crate::app::events::{emit, report, Alert, AppEvent};
use crate::app::state::InFlight;
use crate::core::error::{AppError, Result};
use crate::utils::validation::{validate_login, validate_signup};

/// Log in, store the token, then fetch the current user.
///
/// Internal handler function - use [`crate::app::App::login`] instead.
pub(crate) async fn handle_login(ctx: &HandlerContext<'_>, username: &str, password: &str) -> Result<()> {
    if let Err(e) = validate_login(username, password).into_result() {
        report(ctx.events, "Error", &e, None).await;
        return Err(e);
    }

    let Some(_guard) = InFlight::try_flag(ctx.state, |s| &mut s.authenticating) else {
        return Ok(());
    };

    let token = match ctx.api.login(username.trim(), password).await {
        Ok(response) => response.token,
        Err(e @ (AppError::Unauthorized(_) | AppError::Forbidden(_))) => {
            warn!(error = %e, "Login rejected");
            let alert = Alert::new("Login failed", "Invalid username or password.");
            emit(ctx.events, AppEvent::Alert(alert)).await;
            return Err(e);
        }
        Err(e) => {
            report(ctx.events, "Login failed", &e, None).await;
            return Err(e);
        }
    };

    // Memory keeps the token even if persisting it fails; only the restart is lost
    if let Err(e) = ctx.session.set_token(Some(token)).await {
        report(ctx.events, "Session not saved", &e, None).await;
    }
    info!(user = username.trim(), "Logged in");

    load_current_user(ctx).await;
    emit(ctx.events, AppEvent::LoggedIn).await;
    Ok(())
}

/// Fetch `GET /usuario/me` into the session state. A failure is logged and
/// leaves the session as it is.
pub(crate) async fn load_current_user(ctx: &HandlerContext<'_>) -> bool {
    match ctx.api.current_user().await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "Current user loaded");
            ctx.state.write().current_user = Some(user);
            true
        }
        Err(e) => {
            warn!(error = %e, "Could not load current user; session kept");
            false
        }
    }
}

/// Create an account. The user logs in afterwards.
///
/// Internal handler function - use [`crate::app::App::signup`] instead.
pub(crate) async fn handle_signup(
    ctx: &HandlerContext<'_>,
    request: SignupRequest,
    confirm_password: &str,
) -> Result<()> {
    let check = validate_signup(
        &request.name,
        &request.email,
        &request.username,
        &request.password,
        confirm_password,
    );
    if let Err(e) = check.into_result() {
        report(ctx.events, "Error", &e, None).await;
        return Err(e);
    }

    let Some(_guard) = InFlight::try_flag(ctx.state, |s| &mut s.authenticating) else {
        return Ok(());
    };

    let request = SignupRequest {
        name: request.name.trim().to_string(),
        email: request.email.trim().to_string(),
        username: request.username.trim().to_string(),
        password: request.password,
    };

    if let Err(e) = ctx.api.signup(&request).await {
        report(ctx.events, "Signup failed", &e, None).await;
        return Err(e);
    }

    info!(username = %request.username, "Account created");
    emit(ctx.events, AppEvent::SignedUp).await;
    Ok(())
}

/// Forget the current user and the session token.
///
/// Internal handler function - use [`crate::app::App::logout`] instead.
pub(crate) async fn handle_logout(ctx: &HandlerContext<'_>) {
    ctx.state.write().current_user = None;
    let _ = ctx.session.clear().await;
    info!("Logged out");
    emit(ctx.events, AppEvent::LoggedOut).await;
}
