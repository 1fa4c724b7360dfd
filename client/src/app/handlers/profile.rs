//! # Profile Handlers
//!
//! Editing the logged-in user's own profile.

use std::path::PathBuf;

use shared::UpdateProfileRequest;
use tracing::{info, warn};

use super::HandlerContext;
use crate::app::events::{emit, report, Alert, AppEvent};
use crate::app::state::InFlight;
use crate::core::error::{AppError, Result};
use crate::utils::validation::validate_profile;

/// Shown when the backend answers 409 to a profile update
pub const USERNAME_TAKEN: &str = "Username already in use";

/// Edit form for the own profile
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub username: String,
    pub bio: String,
    /// New avatar to upload; the current one is kept when `None`
    pub avatar: Option<PathBuf>,
}

/// Save the own profile with `PUT /usuario/me`.
///
/// The e-mail is carried over from the current user and the password is sent
/// empty so the backend leaves it unchanged.
///
/// Internal handler function - use [`crate::app::App::save_profile`] instead.
pub(crate) async fn handle_save_profile(ctx: &HandlerContext<'_>, form: ProfileForm) -> Result<()> {
    if let Err(e) = validate_profile(&form.name, &form.username).into_result() {
        report(ctx.events, "Error", &e, None).await;
        return Err(e);
    }

    let Some(_guard) = InFlight::try_flag(ctx.state, |s| &mut s.saving_profile) else {
        return Ok(());
    };

    let cached = ctx.state.read().current_user.clone();
    let current = match cached {
        Some(user) => user,
        None => match ctx.api.current_user().await {
            Ok(user) => user,
            Err(e) => {
                report(ctx.events, "Error saving profile", &e, None).await;
                return Err(e);
            }
        },
    };

    let mut avatar_url = current.avatar_url.clone();
    if let Some(path) = form.avatar.as_deref() {
        let uploaded = match ctx.uploader {
            Some(uploader) => uploader.upload_image(path).await,
            None => Err(AppError::Upload("media uploads are not configured".to_string())),
        };
        match uploaded {
            Ok(url) => avatar_url = Some(url),
            Err(e) => {
                warn!(error = %e, "Avatar upload failed; keeping current picture");
                report(ctx.events, "Error", &e, None).await;
            }
        }
    }

    let request = UpdateProfileRequest {
        name: form.name.trim().to_string(),
        username: form.username.trim().to_string(),
        bio: form.bio.trim().to_string(),
        avatar_url,
        email: current.email,
        password: String::new(),
    };

    match ctx.api.update_profile(&request).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "Profile saved");
            ctx.state.write().current_user = Some(user);
            emit(ctx.events, AppEvent::ProfileSaved).await;
            Ok(())
        }
        Err(e @ AppError::Conflict(_)) => {
            warn!(username = %request.username, "Username already taken");
            emit(ctx.events, AppEvent::Alert(Alert::new("Error", USERNAME_TAKEN))).await;
            Err(e)
        }
        Err(e) => {
            report(ctx.events, "Error saving profile", &e, None).await;
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::fixtures::Harness;
    use crate::app::test_support::{drain, user};

    fn form(username: &str) -> ProfileForm {
        ProfileForm {
            name: "Ana Souza".into(),
            username: username.into(),
            bio: " corre todo dia ".into(),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_save_sends_empty_password_and_keeps_email() {
        let h = Harness::new();
        let mut ana = user(1, "ana");
        ana.avatar_url = Some("https://img/old.jpg".into());
        *h.mock.current_user.lock() = Some(ana);

        handle_save_profile(&h.ctx(), form("ana.s")).await.unwrap();

        assert_eq!(h.mock.calls(), vec!["current_user", "update_profile ana.s"]);
        let body = h.mock.bodies.lock()[0].clone();
        assert_eq!(body["senha"], "");
        assert_eq!(body["email"], "ana@lifit.app");
        assert_eq!(body["biografia"], "corre todo dia");
        assert_eq!(body["fotoPerfil"], "https://img/old.jpg");
        assert_eq!(
            h.state.read().current_user.as_ref().map(|u| u.username.clone()),
            Some("ana.s".to_string())
        );
        assert_eq!(drain(&h.rx), vec![AppEvent::ProfileSaved]);
    }

    #[tokio::test]
    async fn test_new_avatar_is_uploaded() {
        let h = Harness::new();
        h.state.write().current_user = Some(user(1, "ana"));
        let mut edit = form("ana");
        edit.avatar = Some(PathBuf::from("/tmp/me.png"));

        handle_save_profile(&h.ctx(), edit).await.unwrap();

        assert_eq!(
            h.mock.bodies.lock()[0]["fotoPerfil"],
            "https://res.cloudinary.com/lifit/image/upload/v1/pic.jpg"
        );
    }

    #[tokio::test]
    async fn test_conflict_reports_username_taken() {
        let h = Harness::new();
        h.state.write().current_user = Some(user(1, "ana"));
        *h.mock.fail_next.lock() = Some(AppError::Conflict(String::new()));

        let err = handle_save_profile(&h.ctx(), form("bia")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(
            drain(&h.rx),
            vec![AppEvent::Alert(Alert::new("Error", USERNAME_TAKEN))]
        );
        assert_eq!(
            h.state.read().current_user.as_ref().map(|u| u.username.clone()),
            Some("ana".to_string())
        );
        assert!(!h.state.read().saving_profile);
    }

    #[tokio::test]
    async fn test_name_and_username_required() {
        let h = Harness::new();
        let err = handle_save_profile(&h.ctx(), form(" ")).await.unwrap_err();
        assert_eq!(err, AppError::Validation("Username is required".into()));
        assert!(h.mock.calls().is_empty());
    }
}
