//! # Application Orchestrator
//!
//! The main [`App`] struct wires the session, the API client, the media
//! uploader, and one view-model per screen, and funnels everything they
//! report into a single event channel.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Front end                              │
//! │  - calls App methods / view-model methods (async)           │
//! │  - on_tick() drains AppEvent notifications                  │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │  App (orchestrator)                                         │
//! │  ┌───────────┐ ┌───────────┐ ┌──────────────┐ ┌──────────┐  │
//! │  │ FeedModel │ │MetasModel │ │EventDetail   │ │Comments  │  │
//! │  └───────────┘ └───────────┘ └──────────────┘ └──────────┘  │
//! │  ┌────────────┐ ┌───────────┐ ┌──────────────────────────┐  │
//! │  │ProfileModel│ │SearchModel│ │ handlers (auth, compose, │  │
//! │  └────────────┘ └───────────┘ │ profile edit)            │  │
//! │                               └──────────────────────────┘  │
//! │  Each screen: Arc<RwLock<XState>>, in-flight flags           │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ Arc<dyn ApiService>
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │  ApiClient ── SessionHolder ── TokenStore (file)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Event-Driven Communication
//!
//! View-models never call back into the front end. Results and failures go
//! out as [`AppEvent`]s over an unbounded `async_channel`:
//!
//! ```rust,ignore
//! app.feed.load().await?;
//! for event in app.on_tick() {
//!     match event {
//!         AppEvent::Alert(alert) => show_alert(&alert),
//!         AppEvent::SessionExpired => show_login(),
//!         _ => {}
//!     }
//! }
//! ```
//!
//! Locks are held only for the duration of a read or a flag flip, never
//! across an `.await`.

mod state;
mod events;
pub mod handlers;
pub mod feed;
pub mod metas;
pub mod event_detail;
pub mod comments;
pub mod profile;
pub mod search;

#[cfg(test)]
pub(crate) mod test_support;

pub use state::*;
pub use events::{Alert, AppEvent, RetryAction};
pub use handlers::{EventDraft, PostDraft, ProfileForm, DEFAULT_POST_MEDIA_URL};
pub use feed::FeedModel;
pub use metas::MetasModel;
pub use event_detail::EventDetailModel;
pub use comments::{CommentsModel, COMMENTS_PAGE_SIZE};
pub use profile::ProfileModel;
pub use search::SearchModel;

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use parking_lot::RwLock;
use shared::{SignupRequest, User};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::core::error::Result;
use crate::core::service::{ApiService, MediaUploader};
use crate::services::{ApiClient, CloudinaryUploader};
use crate::session::{FileTokenStore, SessionHolder};
use handlers::HandlerContext;

/// Main application orchestrator
pub struct App {
    pub config: ClientConfig,
    pub session: Arc<SessionHolder>,
    /// Logged-in user and form flags
    pub state: Arc<RwLock<SessionState>>,
    pub feed: FeedModel,
    pub metas: MetasModel,
    pub event_detail: EventDetailModel,
    pub comments: CommentsModel,
    pub profile: ProfileModel,
    pub search: SearchModel,
    api: Arc<dyn ApiService>,
    uploader: Option<Arc<dyn MediaUploader>>,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl App {
    /// Build the production stack: file token store, HTTP client, and the
    /// Cloudinary uploader when a cloud name is configured.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let store = Arc::new(FileTokenStore::new(config.token_file.clone()));
        let session = Arc::new(SessionHolder::new(store));
        let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&config, Arc::clone(&session))?);

        let uploader: Option<Arc<dyn MediaUploader>> = match CloudinaryUploader::new(&config.upload) {
            Ok(uploader) => {
                info!(endpoint = uploader.endpoint(), "Media uploads enabled");
                Some(Arc::new(uploader))
            }
            Err(e) => {
                warn!(error = %e, "Media uploads disabled");
                None
            }
        };

        Ok(Self::with_services(config, session, api, uploader))
    }

    /// Assemble an app around existing services.
    pub fn with_services(
        config: ClientConfig,
        session: Arc<SessionHolder>,
        api: Arc<dyn ApiService>,
        uploader: Option<Arc<dyn MediaUploader>>,
    ) -> Self {
        let (event_tx, event_rx) = async_channel::unbounded();

        Self {
            feed: FeedModel::new(Arc::clone(&api), event_tx.clone(), config.feed_page_size),
            metas: MetasModel::new(Arc::clone(&api), event_tx.clone()),
            event_detail: EventDetailModel::new(Arc::clone(&api), event_tx.clone()),
            comments: CommentsModel::new(Arc::clone(&api), event_tx.clone()),
            profile: ProfileModel::new(Arc::clone(&api), event_tx.clone()),
            search: SearchModel::new(Arc::clone(&api), event_tx.clone(), config.search_debounce),
            state: Arc::new(RwLock::new(SessionState::default())),
            config,
            session,
            api,
            uploader,
            event_tx,
            event_rx,
        }
    }

    fn ctx(&self) -> HandlerContext<'_> {
        HandlerContext {
            api: &self.api,
            session: &self.session,
            uploader: self.uploader.as_ref(),
            state: &self.state,
            events: &self.event_tx,
        }
    }

    /// Load the persisted token and, when there is one, the current user.
    pub async fn restore_session(&self) -> Result<bool> {
        let restored = self.session.restore().await?;
        if restored {
            handlers::auth::load_current_user(&self.ctx()).await;
        }
        Ok(restored)
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.read().current_user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        handlers::auth::handle_login(&self.ctx(), username, password).await
    }

    pub async fn signup(&self, request: SignupRequest, confirm_password: &str) -> Result<()> {
        handlers::auth::handle_signup(&self.ctx(), request, confirm_password).await
    }

    pub async fn logout(&self) {
        handlers::auth::handle_logout(&self.ctx()).await;
    }

    pub async fn save_profile(&self, form: ProfileForm) -> Result<()> {
        handlers::profile::handle_save_profile(&self.ctx(), form).await
    }

    pub async fn publish_post(&self, draft: PostDraft) -> Result<()> {
        handlers::compose::handle_publish_post(&self.ctx(), draft).await
    }

    pub async fn publish_event(&self, draft: EventDraft) -> Result<()> {
        handlers::compose::handle_publish_event(&self.ctx(), draft).await
    }

    /// Re-run the operation behind an alert's "try again" button.
    pub async fn retry(&self, action: RetryAction) -> Result<()> {
        debug!(?action, "Retrying");
        match action {
            RetryAction::LoadFeed => self.feed.load().await,
            RetryAction::RefreshFeed => self.feed.refresh().await,
            RetryAction::LoadMoreFeed => self.feed.load_more().await,
            RetryAction::LoadMetas => self.metas.load().await,
            RetryAction::LoadEvent(event_id) => self.event_detail.load(event_id).await,
            RetryAction::LoadComments => self.comments.load(true).await,
            RetryAction::LoadProfile => self.profile.reload().await,
        }
    }

    /// Drain pending events, applying the ones that change session state, and
    /// hand them all to the caller.
    pub fn on_tick(&self) -> Vec<AppEvent> {
        let events: Vec<AppEvent> = std::iter::from_fn(|| self.event_rx.try_recv().ok()).collect();
        for event in &events {
            self.handle_event(event);
        }
        if !events.is_empty() {
            debug!(events_processed = events.len(), "on_tick: processed events");
        }
        events
    }

    fn handle_event(&self, event: &AppEvent) {
        if let AppEvent::SessionExpired = event {
            info!("Session expired; forgetting current user");
            self.state.write().current_user = None;
        }
    }

    pub fn event_tx(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Receiver for front ends that prefer to await events instead of polling.
    pub fn events(&self) -> Receiver<AppEvent> {
        self.event_rx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{post_item, user, MockApi};
    use crate::core::error::AppError;

    fn app(api: &Arc<MockApi>) -> App {
        App::with_services(
            ClientConfig::for_base_url("http://unused"),
            Arc::new(SessionHolder::in_memory()),
            api.clone(),
            None,
        )
    }

    #[tokio::test]
    async fn test_retry_dispatches_to_view_model() {
        let api = MockApi::new();
        api.push_feed(Ok(vec![post_item(1, "2025-03-01T10:00:00")]));
        let app = app(&api);

        app.retry(RetryAction::LoadFeed).await.unwrap();
        app.retry(RetryAction::LoadMetas).await.unwrap();
        assert_eq!(app.feed.snapshot().items.len(), 1);

        // Empty refresh page replaces the held items
        app.retry(RetryAction::RefreshFeed).await.unwrap();
        assert_eq!(api.calls(), vec!["feed_page 15 -", "my_metas", "feed_page 15 -"]);
        assert!(app.feed.snapshot().items.is_empty());
    }

    #[tokio::test]
    async fn test_session_expired_forgets_current_user() {
        let api = MockApi::new();
        let app = app(&api);
        app.state.write().current_user = Some(user(1, "ana"));

        *api.fail_next.lock() = Some(AppError::Unauthorized(String::new()));
        assert!(app.metas.load().await.is_err());

        let events = app.on_tick();
        assert_eq!(events[0], AppEvent::SessionExpired);
        assert!(matches!(events[1], AppEvent::Alert(_)));
        assert!(app.current_user().is_none());
        assert!(app.on_tick().is_empty());
    }

    #[tokio::test]
    async fn test_restore_session_loads_current_user() {
        let api = MockApi::new();
        *api.current_user.lock() = Some(user(1, "ana"));
        let app = app(&api);

        assert!(!app.restore_session().await.unwrap());
        assert!(api.calls().is_empty());

        app.session.set_token(Some("tok".into())).await.unwrap();
        assert!(app.restore_session().await.unwrap());
        assert_eq!(app.current_user().map(|u| u.username), Some("ana".to_string()));
    }

    #[tokio::test]
    async fn test_post_without_uploader_still_publishes() {
        let api = MockApi::new();
        let app = app(&api);
        app.session.set_token(Some("tok".into())).await.unwrap();

        let draft = PostDraft {
            title: "Treino".into(),
            description: "Costas".into(),
            image: None,
        };
        app.publish_post(draft).await.unwrap();
        assert_eq!(api.calls(), vec!["create_post Treino"]);
        assert!(app.on_tick().contains(&AppEvent::PostPublished));
    }
}
