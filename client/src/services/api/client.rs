//! # API Client
//!
//! Single point of egress to the LiFit backend.
//!
//! Every request built by the endpoint modules goes through [`ApiClient::send`],
//! which:
//!
//! 1. attaches `Authorization: Bearer <token>` when the session has one
//!    (waiting once for a token that is still being written),
//! 2. maps non-2xx statuses onto [`AppError`],
//! 3. clears the session on a 401 before returning the error.
//!
//! Requests are never retried.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use shared::{
    Comment, CommentTarget, CreateCommentRequest, CreateEventRequest, CreateMetaRequest,
    CreatePostRequest, ErrorResponse, Event, FeedPage, FollowCounters, LikeTarget, Meta,
    SignupRequest, TokenResponse, UpdateMetaRequest, UpdateProfileRequest, User, UserSummary,
};

use crate::config::ClientConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::session::SessionHolder;

use super::{auth, comments, events, feed, metas, posts, users};

/// HTTP client for the LiFit REST API.
///
/// Cheap to share behind an `Arc`; `reqwest::Client` pools connections
/// internally.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    session: Arc<SessionHolder>,
    token_retry_delay: Duration,
}

impl ApiClient {
    /// Build a client for `config.api_url` that reads tokens from `session`.
    pub fn new(config: &ClientConfig, session: Arc<SessionHolder>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
            token_retry_delay: config.token_retry_delay,
        })
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionHolder> {
        &self.session
    }

    /// Start a request for `path` (leading slash included).
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Dispatch a request through the bearer/401 interceptors.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let builder = match self.session.resolve_token(self.token_retry_delay).await {
            Some(token) => builder.bearer_auth(token),
            None => {
                debug!("No session token; sending request unauthenticated");
                builder
            }
        };

        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let start = Instant::now();

        let response = self.client.execute(request).await.map_err(|e| {
            error!(%method, path = %path, error = %e, "Request failed before a response arrived");
            AppError::from(e)
        })?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis();

        if status.is_success() {
            debug!(%method, path = %path, status = status.as_u16(), duration_ms, "Request completed");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        if status == StatusCode::UNAUTHORIZED {
            warn!(%method, path = %path, duration_ms, "Session rejected (401); clearing token");
            // Failure is already logged by the holder; the memory copy is gone either way
            let _ = self.session.clear().await;
        } else {
            warn!(
                %method,
                path = %path,
                status = status.as_u16(),
                error = %message,
                duration_ms,
                "Request returned an error status"
            );
        }

        Err(AppError::from_status(status, message))
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let path = response.url().path().to_string();
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            error!(path = %path, error = %e, "Response parse error");
            AppError::Parse(e.to_string())
        })
    }

    /// Send and discard whatever body comes back.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        self.send(builder).await.map(drop)
    }
}

/// Backend error text: `message`/`error` from a JSON body, else the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::into_message)
        .unwrap_or_else(|| body.trim().to_string())
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

// Implement ApiService trait for ApiClient
#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn login(&self, username_or_email: &str, password: &str) -> Result<TokenResponse> {
        auth::login(self, username_or_email, password).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        auth::signup(self, request).await
    }

    async fn current_user(&self) -> Result<User> {
        users::current_user(self).await
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User> {
        users::update_profile(self, request).await
    }

    async fn get_user(&self, user_id: i64) -> Result<User> {
        users::get_user(self, user_id).await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        users::search_users(self, query).await
    }

    async fn feed_page(&self, page_size: usize, cursor: Option<&str>) -> Result<FeedPage> {
        feed::feed_page(self, page_size, cursor).await
    }

    async fn my_metas(&self) -> Result<Vec<Meta>> {
        metas::my_metas(self).await
    }

    async fn update_meta(&self, meta_id: &str, request: &UpdateMetaRequest) -> Result<()> {
        metas::update_meta(self, meta_id, request).await
    }

    async fn create_meta(&self, request: &CreateMetaRequest) -> Result<()> {
        metas::create_meta(self, request).await
    }

    async fn get_event(&self, event_id: i64) -> Result<Event> {
        events::get_event(self, event_id).await
    }

    async fn create_event(&self, request: &CreateEventRequest) -> Result<()> {
        events::create_event(self, request).await
    }

    async fn set_attendance(&self, event_id: i64, attending: bool) -> Result<()> {
        events::set_attendance(self, event_id, attending).await
    }

    async fn create_post(&self, request: &CreatePostRequest) -> Result<()> {
        posts::create_post(self, request).await
    }

    async fn list_comments(&self, target: CommentTarget) -> Result<Vec<Comment>> {
        comments::list_comments(self, target).await
    }

    async fn create_comment(&self, request: &CreateCommentRequest) -> Result<()> {
        comments::create_comment(self, request).await
    }

    async fn set_like(&self, target: LikeTarget, liked: bool) -> Result<()> {
        posts::set_like(self, target, liked).await
    }

    async fn follow_counters(&self, user_id: i64) -> Result<FollowCounters> {
        users::follow_counters(self, user_id).await
    }

    async fn set_following(&self, user_id: i64, follow: bool) -> Result<()> {
        users::set_following(self, user_id, follow).await
    }
}
