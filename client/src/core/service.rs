//! # Service Traits
//!
//! Traits for dependency injection, so view-models can run against the real
//! [`ApiClient`](crate::services::api::ApiClient) or a test double.

use std::path::Path;

use async_trait::async_trait;
use shared::{
    Comment, CommentTarget, CreateCommentRequest, CreateEventRequest, CreateMetaRequest,
    CreatePostRequest, Event, FeedPage, FollowCounters, LikeTarget, Meta, SignupRequest,
    TokenResponse, UpdateMetaRequest, UpdateProfileRequest, User, UserSummary,
};

use super::error::Result;

/// Trait for LiFit REST operations.
///
/// Every call goes through the same authenticated egress: the bearer token is
/// attached when available and a 401 clears the session before the error is
/// returned.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, username_or_email: &str, password: &str) -> Result<TokenResponse>;

    /// `POST /usuario`
    async fn signup(&self, request: &SignupRequest) -> Result<()>;

    /// `GET /usuario/me`
    async fn current_user(&self) -> Result<User>;

    /// `PUT /usuario/me`
    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User>;

    /// `GET /usuario/{id}`
    async fn get_user(&self, user_id: i64) -> Result<User>;

    /// `GET /usuario/buscar?query=`
    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>>;

    /// `GET /feed/unificado?tamanhoPagina&ultimoCursor`
    ///
    /// Malformed entries are dropped from the page, not reported as errors.
    async fn feed_page(&self, page_size: usize, cursor: Option<&str>) -> Result<FeedPage>;

    /// `GET /meta/me`
    async fn my_metas(&self) -> Result<Vec<Meta>>;

    /// `PUT /meta/{id}`
    async fn update_meta(&self, meta_id: &str, request: &UpdateMetaRequest) -> Result<()>;

    /// `POST /meta`
    async fn create_meta(&self, request: &CreateMetaRequest) -> Result<()>;

    /// `GET /evento/{id}`
    async fn get_event(&self, event_id: i64) -> Result<Event>;

    /// `POST /evento`
    async fn create_event(&self, request: &CreateEventRequest) -> Result<()>;

    /// `POST` (attend) or `DELETE` (leave) `/evento/{id}/confirmar`
    async fn set_attendance(&self, event_id: i64, attending: bool) -> Result<()>;

    /// `POST /postagem`
    async fn create_post(&self, request: &CreatePostRequest) -> Result<()>;

    /// `GET /comentario/postagem/{id}` or `GET /comentario/evento/{id}`
    async fn list_comments(&self, target: CommentTarget) -> Result<Vec<Comment>>;

    /// `POST /comentario`
    async fn create_comment(&self, request: &CreateCommentRequest) -> Result<()>;

    /// `POST` (like) or `DELETE` (unlike) `/curtida/...`
    async fn set_like(&self, target: LikeTarget, liked: bool) -> Result<()>;

    /// `GET /seguidor/conta/{id}`
    async fn follow_counters(&self, user_id: i64) -> Result<FollowCounters>;

    /// `POST` (follow) or `DELETE` (unfollow) `/seguidor/{id}`
    async fn set_following(&self, user_id: i64, follow: bool) -> Result<()>;
}

/// Trait for the media hosting service.
///
/// Returns the public (secure) URL that posts and events reference as `midia`.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload_image(&self, path: &Path) -> Result<String>;
}
