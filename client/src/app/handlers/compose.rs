//! # Compose Handlers
//!
//! Publishing posts and events. Images are uploaded to the media host first;
//! the backend only ever receives the hosted URL.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use shared::{CreateEventRequest, CreatePostRequest};
use tracing::{info, warn};

use super::HandlerContext;
use crate::app::events::{emit, report, AppEvent};
use crate::app::state::InFlight;
use crate::core::error::{AppError, Result};
use crate::utils::validation::{validate_event, validate_post};

/// Media used for a post published without an image
pub const DEFAULT_POST_MEDIA_URL: &str =
    "https://tse1.mm.bing.net/th/id/OIP.9Ks3otCnYxLp9XUmxruyQgHaD7?rs=1&pid=ImgDetMain&o=7&rm=3";

#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
    pub image: Option<PathBuf>,
}

async fn upload(ctx: &HandlerContext<'_>, path: &Path) -> Result<String> {
    let Some(uploader) = ctx.uploader else {
        return Err(AppError::Upload("media uploads are not configured".to_string()));
    };
    let url = uploader.upload_image(path).await?;
    info!(path = %path.display(), %url, "Image uploaded");
    Ok(url)
}

/// Publish a post.
///
/// A failed image upload is reported and the post goes out with the default
/// media instead.
///
/// Internal handler function - use [`crate::app::App::publish_post`] instead.
pub(crate) async fn handle_publish_post(ctx: &HandlerContext<'_>, draft: PostDraft) -> Result<()> {
    if !ctx.session.is_authenticated() {
        let e = AppError::Validation("You need to be logged in to post.".to_string());
        report(ctx.events, "Error", &e, None).await;
        return Err(e);
    }
    if let Err(e) = validate_post(&draft.title, &draft.description).into_result() {
        report(ctx.events, "Error", &e, None).await;
        return Err(e);
    }

    let Some(_guard) = InFlight::try_flag(ctx.state, |s| &mut s.publishing) else {
        return Ok(());
    };

    let mut media_url = DEFAULT_POST_MEDIA_URL.to_string();
    if let Some(path) = draft.image.as_deref() {
        match upload(ctx, path).await {
            Ok(url) => media_url = url,
            Err(e) => {
                warn!(error = %e, "Post image upload failed; using default media");
                report(ctx.events, "Error", &e, None).await;
            }
        }
    }

    let request = CreatePostRequest {
        title: draft.title.trim().to_string(),
        media_url,
        description: draft.description.trim().to_string(),
    };

    if let Err(e) = ctx.api.create_post(&request).await {
        report(ctx.events, "Error publishing post", &e, None).await;
        return Err(e);
    }

    info!(title = %request.title, "Post published");
    emit(ctx.events, AppEvent::PostPublished).await;
    Ok(())
}

/// Publish an event. The image is mandatory and must upload.
///
/// Internal handler function - use [`crate::app::App::publish_event`] instead.
pub(crate) async fn handle_publish_event(ctx: &HandlerContext<'_>, draft: EventDraft) -> Result<()> {
    let check = validate_event(
        &draft.title,
        &draft.location,
        draft.image.is_some(),
        draft.starts_at,
        draft.ends_at,
    );
    if let Err(e) = check.into_result() {
        report(ctx.events, "Error", &e, None).await;
        return Err(e);
    }
    let Some(image) = draft.image.as_deref() else {
        return Err(AppError::Validation("Choose an image for the event".to_string()));
    };

    let Some(_guard) = InFlight::try_flag(ctx.state, |s| &mut s.publishing) else {
        return Ok(());
    };

    let media_url = match upload(ctx, image).await {
        Ok(url) => url,
        Err(e) => {
            report(ctx.events, "Error", &e, None).await;
            return Err(e);
        }
    };

    let request = CreateEventRequest {
        title: draft.title.trim().to_string(),
        media_url,
        description: draft
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
        location: draft.location.trim().to_string(),
        starts_at: draft.starts_at,
        ends_at: draft.ends_at,
    };

    if let Err(e) = ctx.api.create_event(&request).await {
        report(ctx.events, "Error publishing event", &e, None).await;
        return Err(e);
    }

    info!(title = %request.title, starts_at = %request.starts_at, "Event published");
    emit(ctx.events, AppEvent::EventPublished).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::Alert;
    use crate::app::handlers::fixtures::Harness;
    use crate::app::test_support::{drain, MockUploader};
    use chrono::{Duration, NaiveDate};

    fn post(image: Option<&str>) -> PostDraft {
        PostDraft {
            title: " Treino ".into(),
            description: "Pernas".into(),
            image: image.map(PathBuf::from),
        }
    }

    fn event_draft(image: Option<&str>, hours: i64) -> EventDraft {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        EventDraft {
            title: "Trilha".into(),
            description: Some("  ".into()),
            location: "Serra".into(),
            starts_at: start,
            ends_at: start + Duration::hours(hours),
            image: image.map(PathBuf::from),
        }
    }

    async fn logged_in(h: &Harness) {
        h.session.set_token(Some("tok".into())).await.unwrap();
    }

    #[tokio::test]
    async fn test_post_without_image_uses_default_media() {
        let h = Harness::new();
        logged_in(&h).await;

        handle_publish_post(&h.ctx(), post(None)).await.unwrap();

        let body = h.mock.bodies.lock()[0].clone();
        assert_eq!(body["titulo"], "Treino");
        assert_eq!(body["midia"], DEFAULT_POST_MEDIA_URL);
        assert!(h.uploader.uploads.lock().is_empty());
        assert_eq!(drain(&h.rx), vec![AppEvent::PostPublished]);
        assert!(!h.state.read().publishing);
    }

    #[tokio::test]
    async fn test_post_with_image_uses_uploaded_url() {
        let h = Harness::new();
        logged_in(&h).await;

        handle_publish_post(&h.ctx(), post(Some("/tmp/leg.jpg"))).await.unwrap();

        let body = h.mock.bodies.lock()[0].clone();
        assert_eq!(body["midia"], "https://res.cloudinary.com/lifit/image/upload/v1/pic.jpg");
        assert_eq!(*h.uploader.uploads.lock(), vec!["/tmp/leg.jpg".to_string()]);
    }

    #[tokio::test]
    async fn test_post_upload_failure_falls_back() {
        let h = Harness::with_uploader(MockUploader { fail: true, ..Default::default() });
        logged_in(&h).await;

        handle_publish_post(&h.ctx(), post(Some("/tmp/leg.jpg"))).await.unwrap();

        assert_eq!(h.mock.bodies.lock()[0]["midia"], DEFAULT_POST_MEDIA_URL);
        let events = drain(&h.rx);
        assert!(matches!(events[0], AppEvent::Alert(Alert { .. })));
        assert_eq!(events[1], AppEvent::PostPublished);
    }

    #[tokio::test]
    async fn test_post_requires_session() {
        let h = Harness::new();
        assert!(matches!(
            handle_publish_post(&h.ctx(), post(None)).await,
            Err(AppError::Validation(_))
        ));
        assert!(h.mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_event_rejects_end_before_start() {
        let h = Harness::new();
        let err = handle_publish_event(&h.ctx(), event_draft(Some("/tmp/e.jpg"), 0)).await.unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("The end time must be after the start time".into())
        );
        assert!(h.uploader.uploads.lock().is_empty());
        assert!(h.mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_event_requires_image() {
        let h = Harness::new();
        let err = handle_publish_event(&h.ctx(), event_draft(None, 2)).await.unwrap_err();
        assert_eq!(err, AppError::Validation("Choose an image for the event".into()));
    }

    #[tokio::test]
    async fn test_event_uploads_then_posts() {
        let h = Harness::new();
        handle_publish_event(&h.ctx(), event_draft(Some("/tmp/e.jpg"), 2)).await.unwrap();

        assert_eq!(h.mock.calls(), vec!["create_event Trilha"]);
        let body = h.mock.bodies.lock()[0].clone();
        assert_eq!(body["midia"], "https://res.cloudinary.com/lifit/image/upload/v1/pic.jpg");
        assert_eq!(body["localizacao"], "Serra");
        assert!(body["descricao"].is_null());
        assert_eq!(drain(&h.rx), vec![AppEvent::EventPublished]);
    }

    #[tokio::test]
    async fn test_event_upload_failure_aborts() {
        let h = Harness::with_uploader(MockUploader { fail: true, ..Default::default() });
        let err = handle_publish_event(&h.ctx(), event_draft(Some("/tmp/e.jpg"), 2)).await.unwrap_err();
        assert!(matches!(err, AppError::Upload(_)));
        assert!(h.mock.calls().is_empty());
    }
}
