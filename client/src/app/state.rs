//! # Application State Types
//!
//! Per-screen state held behind `Arc<RwLock<_>>`, plus the [`InFlight`]
//! guard that implements the "one request at a time" rule for each screen.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::{CommentTarget, Event, FeedItem, FollowCounters, Meta, User, UserSummary};

/// Marks a request as in flight for as long as it lives.
///
/// Acquisition checks and sets the flag under a single write lock, so two
/// callers racing for the same flag cannot both win. The flag is released
/// when the guard drops: on success, on error, and when the owning future is
/// dropped mid-request.
#[must_use = "the flag is released as soon as the guard is dropped"]
pub struct InFlight<S: Send + Sync + 'static> {
    state: Arc<RwLock<S>>,
    release: Option<Box<dyn FnOnce(&mut S) + Send + Sync>>,
}

impl<S: Send + Sync + 'static> InFlight<S> {
    /// Run `acquire` under the write lock; `None` when it refuses.
    pub fn try_acquire(
        state: &Arc<RwLock<S>>,
        acquire: impl FnOnce(&mut S) -> bool,
        release: impl FnOnce(&mut S) + Send + Sync + 'static,
    ) -> Option<Self> {
        if !acquire(&mut *state.write()) {
            return None;
        }
        Some(Self {
            state: Arc::clone(state),
            release: Some(Box::new(release)),
        })
    }

    /// Guard a single boolean flag.
    pub fn try_flag(state: &Arc<RwLock<S>>, flag: fn(&mut S) -> &mut bool) -> Option<Self> {
        Self::try_acquire(
            state,
            |s| !std::mem::replace(flag(s), true),
            move |s| *flag(s) = false,
        )
    }
}

impl<S: Send + Sync + 'static> Drop for InFlight<S> {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(&mut *self.state.write());
        }
    }
}

/// Home timeline
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub items: Vec<FeedItem>,
    pub has_more: bool,
    /// Initial load or refresh in flight
    pub loading: bool,
    /// Set alongside `loading` when the load came from pull-to-refresh
    pub refreshing: bool,
    pub loading_more: bool,
}

/// Own goals
#[derive(Debug, Clone, Default)]
pub struct MetasState {
    pub metas: Vec<Meta>,
    pub loading: bool,
    /// Goals with a status toggle in flight
    pub updating: HashSet<String>,
    pub creating: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EventDetailState {
    pub event: Option<Event>,
    pub loading: bool,
    /// Attendance change in flight
    pub updating: bool,
}

/// Author shown next to a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAuthor {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Comment with its author looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedComment {
    pub id: i64,
    pub content: String,
    pub created_at: String,
    pub author: CommentAuthor,
}

/// Comment sheet for one post or event
#[derive(Debug, Clone, Default)]
pub struct CommentsState {
    pub target: Option<CommentTarget>,
    /// Comments shown so far
    pub comments: Vec<ResolvedComment>,
    /// Index of the last page shown
    pub page: usize,
    pub has_more: bool,
    pub loading: bool,
    pub sending: bool,
}

/// How a profile screen was opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Id(i64),
    /// Username from a mention or a feed author without an id
    Username(String),
}

#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    /// Last profile asked for; reused by retry
    pub requested: Option<UserRef>,
    pub user: Option<User>,
    pub counters: FollowCounters,
    /// Only goals marked public
    pub public_metas: Vec<Meta>,
    pub loading: bool,
    pub follow_pending: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<UserSummary>,
    pub loading: bool,
    /// Bumped on every keystroke; only the latest generation may search
    pub generation: u64,
}

/// Logged-in user and the form actions that hit the network
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub authenticating: bool,
    pub saving_profile: bool,
    pub publishing: bool,
}
