//! # Application Events
//!
//! Notifications sent from view-models to whatever front end drives them.
//! Every user-visible failure arrives as an [`Alert`]; alerts that can be
//! retried carry the [`RetryAction`] to dispatch.

use async_channel::Sender;
use tracing::warn;

use crate::core::error::AppError;

/// Operation an alert's "try again" button re-runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryAction {
    LoadFeed,
    /// Pull-to-refresh of the feed
    RefreshFeed,
    LoadMoreFeed,
    LoadMetas,
    LoadEvent(i64),
    LoadComments,
    LoadProfile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub retry: Option<RetryAction>,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            retry: None,
        }
    }

    pub fn with_retry(mut self, action: RetryAction) -> Self {
        self.retry = Some(action);
        self
    }
}

/// Async results sent to the front end
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Something failed and the user should be told
    Alert(Alert),
    /// A 401 cleared the session; the front end should show the login screen
    SessionExpired,
    /// Login completed and the token is stored
    LoggedIn,
    /// Account created; the user can now log in
    SignedUp,
    LoggedOut,
    FeedUpdated { count: usize, has_more: bool },
    MetasUpdated { count: usize },
    EventLoaded(i64),
    CommentsUpdated { shown: usize, has_more: bool },
    /// A comment was posted; parent counters may be stale
    CommentAdded,
    ProfileLoaded(i64),
    ProfileSaved,
    SearchResults { query: String, count: usize },
    PostPublished,
    EventPublished,
    MetaCreated,
}

/// Send an event, ignoring a closed channel (no front end listening).
pub(crate) async fn emit(events: &Sender<AppEvent>, event: AppEvent) {
    let _ = events.send(event).await;
}

/// Report a failed operation: log it, flag an expired session, raise an alert.
pub(crate) async fn report(
    events: &Sender<AppEvent>,
    title: &str,
    error: &AppError,
    retry: Option<RetryAction>,
) {
    warn!(title, error = %error, "Operation failed");

    if error.is_session_expired() {
        emit(events, AppEvent::SessionExpired).await;
    }

    let mut alert = Alert::new(title, error.user_message());
    alert.retry = retry;
    emit(events, AppEvent::Alert(alert)).await;
}
