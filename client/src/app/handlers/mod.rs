//! # Action Handlers
//!
//! Form actions that touch the session or publish content: login, signup,
//! logout, profile edits, and the post/event composers.
//!
//! Internal to the crate; the public entry points are the methods on
//! [`crate::app::App`].

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;

use crate::app::events::AppEvent;
use crate::app::state::SessionState;
use crate::core::service::{ApiService, MediaUploader};
use crate::session::SessionHolder;

pub mod auth;
pub mod compose;
pub mod profile;

pub use compose::{EventDraft, PostDraft, DEFAULT_POST_MEDIA_URL};
pub use profile::ProfileForm;

/// Everything a handler may touch, borrowed from the [`crate::app::App`].
pub(crate) struct HandlerContext<'a> {
    pub api: &'a Arc<dyn ApiService>,
    pub session: &'a Arc<SessionHolder>,
    pub uploader: Option<&'a Arc<dyn MediaUploader>>,
    pub state: &'a Arc<RwLock<SessionState>>,
    pub events: &'a Sender<AppEvent>,
}
