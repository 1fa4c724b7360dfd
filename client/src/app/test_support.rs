//! Scripted [`ApiService`] double and fixtures for view-model tests.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::Arc;

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use shared::{
    Author, Comment, CommentTarget, CreateCommentRequest, CreateEventRequest, CreateMetaRequest,
    CreatePostRequest, Event, FeedItem, FeedPage, FeedPost, FollowCounters, LikeTarget, Meta, MetaStatus,
    SignupRequest, TokenResponse, UpdateMetaRequest, UpdateProfileRequest, User, UserSummary,
};
use tokio::sync::Notify;

use crate::app::events::AppEvent;
use crate::core::error::{AppError, Result};
use crate::core::service::{ApiService, MediaUploader};

#[derive(Default)]
pub(crate) struct MockApi {
    /// Every call, formatted as `name arg...`
    pub calls: Mutex<Vec<String>>,
    pub feed_pages: Mutex<VecDeque<Result<FeedPage>>>,
    /// When set, `feed_page` parks until notified
    pub feed_gate: Mutex<Option<Arc<Notify>>>,
    /// One-shot: the next `list_comments` parks until notified
    pub comments_gate: Mutex<Option<Arc<Notify>>>,
    /// One-shot: the next `get_user` parks until notified
    pub user_gate: Mutex<Option<Arc<Notify>>>,
    pub users: Mutex<HashMap<i64, User>>,
    pub current_user: Mutex<Option<User>>,
    pub search_results: Mutex<Vec<UserSummary>>,
    pub counters: Mutex<Option<FollowCounters>>,
    pub metas: Mutex<Vec<Meta>>,
    pub events: Mutex<HashMap<i64, Event>>,
    pub comments: Mutex<Vec<Comment>>,
    pub token: Mutex<Option<String>>,
    /// One-shot failure for the next mutating call
    pub fail_next: Mutex<Option<AppError>>,
    /// Bodies of create/update calls, serialized
    pub bodies: Mutex<Vec<serde_json::Value>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn push_feed(&self, page: Result<Vec<FeedItem>>) {
        self.feed_pages.lock().push_back(page.map(FeedPage::from_items));
    }

    /// Queue a page whose backend entry count differs from what decoded
    pub fn push_feed_page(&self, page: FeedPage) {
        self.feed_pages.lock().push_back(Ok(page));
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }

    fn mutate(&self, call: String, body: Option<serde_json::Value>) -> Result<()> {
        self.record(call);
        if let Some(err) = self.fail_next.lock().take() {
            return Err(err);
        }
        if let Some(body) = body {
            self.bodies.lock().push(body);
        }
        Ok(())
    }

    fn user(&self, id: i64) -> Result<User> {
        self.users
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("/usuario/{}", id)))
    }
}

#[async_trait]
impl ApiService for MockApi {
    async fn login(&self, username_or_email: &str, _password: &str) -> Result<TokenResponse> {
        self.record(format!("login {}", username_or_email));
        if let Some(err) = self.fail_next.lock().take() {
            return Err(err);
        }
        self.token
            .lock()
            .clone()
            .map(|token| TokenResponse { token })
            .ok_or_else(|| AppError::Unauthorized("bad credentials".into()))
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.mutate(format!("signup {}", request.username), serde_json::to_value(request).ok())
    }

    async fn current_user(&self) -> Result<User> {
        self.record("current_user".into());
        self.current_user
            .lock()
            .clone()
            .ok_or_else(|| AppError::Api { status: 500, message: String::new() })
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<User> {
        self.mutate(format!("update_profile {}", request.username), serde_json::to_value(request).ok())?;
        let mut user = self
            .current_user
            .lock()
            .clone()
            .unwrap_or_else(|| user(1, &request.username));
        user.name = request.name.clone();
        user.username = request.username.clone();
        user.bio = Some(request.bio.clone());
        user.avatar_url = request.avatar_url.clone();
        *self.current_user.lock() = Some(user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: i64) -> Result<User> {
        self.record(format!("get_user {}", user_id));
        let gate = self.user_gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.user(user_id)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        self.record(format!("search_users {}", query));
        Ok(self.search_results.lock().clone())
    }

    async fn feed_page(&self, page_size: usize, cursor: Option<&str>) -> Result<FeedPage> {
        self.record(format!("feed_page {} {}", page_size, cursor.unwrap_or("-")));
        let gate = self.feed_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.feed_pages.lock().pop_front().unwrap_or_else(|| Ok(FeedPage::default()))
    }

    async fn my_metas(&self) -> Result<Vec<Meta>> {
        self.record("my_metas".into());
        if let Some(err) = self.fail_next.lock().take() {
            return Err(err);
        }
        Ok(self.metas.lock().clone())
    }

    async fn update_meta(&self, meta_id: &str, request: &UpdateMetaRequest) -> Result<()> {
        self.mutate(format!("update_meta {} {:?}", meta_id, request.status), serde_json::to_value(request).ok())
    }

    async fn create_meta(&self, request: &CreateMetaRequest) -> Result<()> {
        self.mutate(format!("create_meta {}", request.name), serde_json::to_value(request).ok())
    }

    async fn get_event(&self, event_id: i64) -> Result<Event> {
        self.record(format!("get_event {}", event_id));
        self.events
            .lock()
            .get(&event_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("/evento/{}", event_id)))
    }

    async fn create_event(&self, request: &CreateEventRequest) -> Result<()> {
        self.mutate(format!("create_event {}", request.title), serde_json::to_value(request).ok())
    }

    async fn set_attendance(&self, event_id: i64, attending: bool) -> Result<()> {
        self.mutate(format!("set_attendance {} {}", event_id, attending), None)?;
        if let Some(event) = self.events.lock().get_mut(&event_id) {
            event.set_attending(attending);
        }
        Ok(())
    }

    async fn create_post(&self, request: &CreatePostRequest) -> Result<()> {
        self.mutate(format!("create_post {}", request.title), serde_json::to_value(request).ok())
    }

    async fn list_comments(&self, target: CommentTarget) -> Result<Vec<Comment>> {
        self.record(format!("list_comments {}", target.list_path()));
        let gate = self.comments_gate.lock().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.comments.lock().clone())
    }

    async fn create_comment(&self, request: &CreateCommentRequest) -> Result<()> {
        self.mutate("create_comment".into(), serde_json::to_value(request).ok())?;
        let mut comments = self.comments.lock();
        let id = comments.len() as i64 + 1;
        comments.push(Comment {
            id,
            content: request.content.clone(),
            author_id: 1,
            author_username: "me".into(),
            created_at: "2025-03-01T10:00:00".into(),
            post_id: request.post_id,
            event_id: request.event_id,
        });
        Ok(())
    }

    async fn set_like(&self, target: LikeTarget, liked: bool) -> Result<()> {
        self.mutate(format!("set_like {} {}", target.path(), liked), None)
    }

    async fn follow_counters(&self, user_id: i64) -> Result<FollowCounters> {
        self.record(format!("follow_counters {}", user_id));
        let counters = *self.counters.lock();
        counters.ok_or_else(|| AppError::Api { status: 500, message: String::new() })
    }

    async fn set_following(&self, user_id: i64, follow: bool) -> Result<()> {
        self.mutate(format!("set_following {} {}", user_id, follow), None)
    }
}

/// Uploader returning a fixed URL, or failing when `fail` is set
#[derive(Default)]
pub(crate) struct MockUploader {
    pub uploads: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl MediaUploader for MockUploader {
    async fn upload_image(&self, path: &Path) -> Result<String> {
        self.uploads.lock().push(path.display().to_string());
        if self.fail {
            return Err(AppError::Upload("preset rejected".into()));
        }
        Ok("https://res.cloudinary.com/lifit/image/upload/v1/pic.jpg".into())
    }
}

pub(crate) fn channel() -> (Sender<AppEvent>, Receiver<AppEvent>) {
    async_channel::unbounded()
}

/// Drain everything sent so far
pub(crate) fn drain(rx: &Receiver<AppEvent>) -> Vec<AppEvent> {
    std::iter::from_fn(|| rx.try_recv().ok()).collect()
}

pub(crate) fn author(username: &str) -> Author {
    Author {
        name: username.to_uppercase(),
        username: username.to_string(),
        avatar_url: None,
    }
}

pub(crate) fn post_item(id: i64, published_at: &str) -> FeedItem {
    FeedItem::Post(FeedPost {
        id: Some(id),
        author: author("ana"),
        media_url: "https://img/p.jpg".into(),
        title: format!("post {}", id),
        description: None,
        published_at: published_at.to_string(),
        like_count: 3,
        comment_count: 0,
        share_count: 0,
        liked: false,
    })
}

pub(crate) fn event(id: i64) -> Event {
    let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    Event {
        id,
        title: format!("event {}", id),
        description: None,
        location: "Parque".into(),
        starts_at: day.and_hms_opt(7, 0, 0).unwrap(),
        ends_at: day.and_hms_opt(9, 0, 0).unwrap(),
        author: author("bia"),
        media_url: "https://img/e.jpg".into(),
        like_count: 0,
        comment_count: 0,
        share_count: 0,
        participant_count: 2,
        participants: Vec::new(),
        attending: false,
        liked: false,
    }
}

pub(crate) fn event_item(id: i64) -> FeedItem {
    FeedItem::Event(event(id))
}

pub(crate) fn user(id: i64, username: &str) -> User {
    User {
        id,
        name: username.to_uppercase(),
        username: username.to_string(),
        email: format!("{}@lifit.app", username),
        avatar_url: None,
        bio: None,
        metas: Vec::new(),
        posts: Vec::new(),
        events: Vec::new(),
    }
}

pub(crate) fn meta(id: &str, status: MetaStatus, public: bool) -> Meta {
    Meta {
        id: id.to_string(),
        name: format!("meta {}", id),
        public,
        status,
        due: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
    }
}

pub(crate) fn comment(id: i64, author_id: i64, author_username: &str) -> Comment {
    Comment {
        id,
        content: format!("comment {}", id),
        author_id,
        author_username: author_username.to_string(),
        created_at: "2025-03-01T10:00:00".into(),
        post_id: Some(1),
        event_id: None,
    }
}
