//! # Comments
//!
//! Comment sheet for a post or an event. The backend returns the whole list;
//! the sheet shows it ten at a time and looks up each shown author.
//!
//! Only one load runs at a time. A load that finishes after the sheet moved
//! to another target drops its page and loads the new target's first page.

use std::sync::Arc;

use async_channel::Sender;
use futures::future::join_all;
use parking_lot::RwLock;
use shared::{Comment, CommentTarget, CreateCommentRequest};
use tracing::{debug, info};

use super::events::{emit, report, AppEvent, RetryAction};
use super::state::{CommentAuthor, CommentsState, InFlight, ResolvedComment};
use crate::core::error::Result;
use crate::core::service::ApiService;

pub const COMMENTS_PAGE_SIZE: usize = 10;

enum PageLoad {
    Done,
    /// The sheet changed target while the request was out
    Superseded,
}

pub struct CommentsModel {
    api: Arc<dyn ApiService>,
    state: Arc<RwLock<CommentsState>>,
    events: Sender<AppEvent>,
}

impl CommentsModel {
    pub fn new(api: Arc<dyn ApiService>, events: Sender<AppEvent>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(CommentsState::default())),
            events,
        }
    }

    pub fn state(&self) -> Arc<RwLock<CommentsState>> {
        Arc::clone(&self.state)
    }

    pub fn snapshot(&self) -> CommentsState {
        self.state.read().clone()
    }

    /// Point the sheet at `target` and show its first page.
    pub async fn open(&self, target: CommentTarget) -> Result<()> {
        {
            let mut state = self.state.write();
            if state.target != Some(target) {
                state.target = Some(target);
                state.comments.clear();
                state.page = 0;
                state.has_more = false;
            }
        }
        self.load(true).await
    }

    /// Show the first page (`reset`) or append the next one.
    ///
    /// Skipped while another load is running (that load picks up a target
    /// change), with no sheet open, or when appending past the last page.
    pub async fn load(&self, reset: bool) -> Result<()> {
        let mut reset = reset;
        while let PageLoad::Superseded = self.load_page(reset).await? {
            debug!("Sheet changed while loading; loading the new target");
            reset = true;
        }
        Ok(())
    }

    async fn load_page(&self, reset: bool) -> Result<PageLoad> {
        let mut request = None;
        let guard = InFlight::try_acquire(
            &self.state,
            |s| {
                if s.loading || (!reset && !s.has_more) {
                    return false;
                }
                let Some(target) = s.target else {
                    return false;
                };
                request = Some((target, if reset { 0 } else { s.page + 1 }));
                s.loading = true;
                true
            },
            |s| s.loading = false,
        );
        let (Some(_guard), Some((target, page))) = (guard, request) else {
            debug!(reset, "Comment load skipped");
            return Ok(PageLoad::Done);
        };

        let all = match self.api.list_comments(target).await {
            Ok(all) => all,
            Err(_) if self.state.read().target != Some(target) => return Ok(PageLoad::Superseded),
            Err(e) => {
                report(&self.events, "Error loading comments", &e, Some(RetryAction::LoadComments)).await;
                return Err(e);
            }
        };

        let start = page * COMMENTS_PAGE_SIZE;
        let end = (start + COMMENTS_PAGE_SIZE).min(all.len());
        let slice = all.get(start..end).unwrap_or_default();
        let resolved = join_all(slice.iter().map(|c| self.resolve(c))).await;

        let (shown, has_more) = {
            let mut state = self.state.write();
            if state.target != Some(target) {
                debug!(?target, "Dropping page for a sheet no longer shown");
                return Ok(PageLoad::Superseded);
            }
            if reset {
                state.comments = resolved;
            } else {
                state.comments.extend(resolved);
            }
            state.page = page;
            state.has_more = end < all.len();
            (state.comments.len(), state.has_more)
        };

        emit(&self.events, AppEvent::CommentsUpdated { shown, has_more }).await;
        Ok(PageLoad::Done)
    }

    async fn resolve(&self, comment: &Comment) -> ResolvedComment {
        let author = match self.api.get_user(comment.author_id).await {
            Ok(user) => CommentAuthor {
                id: user.id,
                name: if user.name.trim().is_empty() {
                    user.username.clone()
                } else {
                    user.name
                },
                username: user.username,
                avatar_url: user.avatar_url,
            },
            Err(e) => {
                debug!(author_id = comment.author_id, error = %e, "Author lookup failed; using username");
                CommentAuthor {
                    id: comment.author_id,
                    name: comment.author_username.clone(),
                    username: comment.author_username.clone(),
                    avatar_url: None,
                }
            }
        };

        ResolvedComment {
            id: comment.id,
            content: comment.content.clone(),
            created_at: comment.created_at.clone(),
            author,
        }
    }

    /// Post a comment on the open sheet, then reload it from the first page.
    ///
    /// Returns `false` without a request when `content` is blank or a send is
    /// already running.
    pub async fn send(&self, content: &str) -> Result<bool> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(false);
        }

        let mut target = None;
        let guard = InFlight::try_acquire(
            &self.state,
            |s| {
                target = s.target;
                if s.sending || target.is_none() {
                    return false;
                }
                s.sending = true;
                true
            },
            |s| s.sending = false,
        );
        let (Some(_guard), Some(target)) = (guard, target) else {
            return Ok(false);
        };

        let request = CreateCommentRequest::new(target, content);
        if let Err(e) = self.api.create_comment(&request).await {
            report(&self.events, "Error sending comment", &e, None).await;
            return Err(e);
        }
        info!(?target, "Comment posted");
        emit(&self.events, AppEvent::CommentAdded).await;

        self.load(true).await?;
        Ok(true)
    }

    /// Close the sheet, forgetting its comments.
    pub fn close(&self) {
        let mut state = self.state.write();
        state.target = None;
        state.comments.clear();
        state.page = 0;
        state.has_more = false;
    }
}
