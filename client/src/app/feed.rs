//! # Unified Feed
//!
//! Cursor-paginated home timeline.
//!
//! ## Paging
//!
//! - The first page is requested without a cursor. `has_more` is
//!   `received >= page_size`, counting entries dropped as malformed.
//! - "Load more" walks the held list backwards to the newest-held *post*
//!   (events never act as cursors) and sends its `dataPublicacao` as
//!   `ultimoCursor`. With no post held the request goes out without a cursor.
//! - An empty page ends pagination.
//!
//! ## Overlap rules
//!
//! | call        | no-op when                             |
//! |-------------|----------------------------------------|
//! | `load`      | an initial load/refresh is in flight   |
//! | `refresh`   | an initial load/refresh is in flight   |
//! | `load_more` | a load-more is in flight, `!has_more`  |

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use shared::{last_post_cursor, FeedItem, LikeTarget};
use tracing::{debug, info};

use super::events::{emit, report, AppEvent, RetryAction};
use super::state::{FeedState, InFlight};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

pub struct FeedModel {
    api: Arc<dyn ApiService>,
    state: Arc<RwLock<FeedState>>,
    events: Sender<AppEvent>,
    page_size: usize,
}

impl FeedModel {
    pub fn new(api: Arc<dyn ApiService>, events: Sender<AppEvent>, page_size: usize) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(FeedState::default())),
            events,
            page_size: page_size.max(1),
        }
    }

    pub fn state(&self) -> Arc<RwLock<FeedState>> {
        Arc::clone(&self.state)
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.read().clone()
    }

    /// Load the first page, replacing whatever is held.
    pub async fn load(&self) -> Result<()> {
        self.load_first_page(false).await
    }

    /// Pull-to-refresh: same as [`load`](Self::load) but flagged as a refresh.
    pub async fn refresh(&self) -> Result<()> {
        self.load_first_page(true).await
    }

    async fn load_first_page(&self, refresh: bool) -> Result<()> {
        let Some(_guard) = InFlight::try_acquire(
            &self.state,
            |s| {
                if s.loading {
                    return false;
                }
                s.loading = true;
                s.refreshing = refresh;
                true
            },
            |s| {
                s.loading = false;
                s.refreshing = false;
            },
        ) else {
            debug!("Feed load already in flight; skipping");
            return Ok(());
        };

        match self.api.feed_page(self.page_size, None).await {
            Ok(page) => {
                let count = page.items.len();
                let has_more = page.received >= self.page_size;
                {
                    let mut state = self.state.write();
                    state.items = page.items;
                    state.has_more = has_more;
                }
                info!(count, has_more, refresh, "Feed loaded");
                emit(&self.events, AppEvent::FeedUpdated { count, has_more }).await;
                Ok(())
            }
            Err(e) => {
                let retry = if refresh { RetryAction::RefreshFeed } else { RetryAction::LoadFeed };
                report(&self.events, "Error loading feed", &e, Some(retry)).await;
                Err(e)
            }
        }
    }

    /// Append the next page after the newest-held post.
    pub async fn load_more(&self) -> Result<()> {
        let mut cursor = None;
        let Some(_guard) = InFlight::try_acquire(
            &self.state,
            |s| {
                if s.loading_more || !s.has_more {
                    return false;
                }
                s.loading_more = true;
                cursor = last_post_cursor(&s.items).map(str::to_owned);
                true
            },
            |s| s.loading_more = false,
        ) else {
            debug!("Load-more skipped (in flight or no more pages)");
            return Ok(());
        };

        match self.api.feed_page(self.page_size, cursor.as_deref()).await {
            Ok(page) => {
                let count = page.items.len();
                let has_more = page.received >= self.page_size;
                let total = {
                    let mut state = self.state.write();
                    state.items.extend(page.items);
                    state.has_more = has_more;
                    state.items.len()
                };
                info!(count, total, has_more, cursor = ?cursor, "Feed page appended");
                emit(&self.events, AppEvent::FeedUpdated { count: total, has_more }).await;
                Ok(())
            }
            Err(e) => {
                report(&self.events, "Error loading more posts", &e, Some(RetryAction::LoadMoreFeed)).await;
                Err(e)
            }
        }
    }

    /// Confirm or cancel attendance for an event shown in the feed.
    ///
    /// Returns the new attendance state. Local state changes only once the
    /// backend accepted the change.
    pub async fn toggle_attendance(&self, event_id: i64) -> Result<bool> {
        let current = self.state.read().items.iter().find_map(|item| match item {
            FeedItem::Event(event) if event.id == event_id => Some(event.attending),
            _ => None,
        });
        let Some(attending) = current else {
            return Err(AppError::NotFound(format!("event {} is not in the feed", event_id)));
        };

        let target = !attending;
        if let Err(e) = self.api.set_attendance(event_id, target).await {
            report(&self.events, "Error updating attendance", &e, None).await;
            return Err(e);
        }

        for item in self.state.write().items.iter_mut() {
            if let Some(event) = item.as_event_mut().filter(|e| e.id == event_id) {
                event.set_attending(target);
            }
        }
        Ok(target)
    }

    /// Like or unlike a post/event shown in the feed. Returns the new state.
    pub async fn toggle_like(&self, target: LikeTarget) -> Result<bool> {
        let current = self
            .state
            .read()
            .items
            .iter()
            .find_map(|item| like_state(item, target).map(|(liked, _)| liked));
        let Some(liked) = current else {
            return Err(AppError::NotFound(format!("{} is not in the feed", target.path())));
        };

        let now_liked = !liked;
        if let Err(e) = self.api.set_like(target, now_liked).await {
            report(&self.events, "Error updating like", &e, None).await;
            return Err(e);
        }

        for item in self.state.write().items.iter_mut() {
            apply_like(item, target, now_liked);
        }
        Ok(now_liked)
    }
}

fn like_state(item: &FeedItem, target: LikeTarget) -> Option<(bool, u32)> {
    match (item, target) {
        (FeedItem::Post(post), LikeTarget::Post(id)) if post.id == Some(id) => {
            Some((post.liked, post.like_count))
        }
        (FeedItem::Event(event), LikeTarget::Event(id)) if event.id == id => {
            Some((event.liked, event.like_count))
        }
        _ => None,
    }
}

fn apply_like(item: &mut FeedItem, target: LikeTarget, liked: bool) {
    let (flag, count) = match (item, target) {
        (FeedItem::Post(post), LikeTarget::Post(id)) if post.id == Some(id) => {
            (&mut post.liked, &mut post.like_count)
        }
        (FeedItem::Event(event), LikeTarget::Event(id)) if event.id == id => {
            (&mut event.liked, &mut event.like_count)
        }
        _ => return,
    };
    if *flag == liked {
        return;
    }
    *flag = liked;
    *count = if liked { count.saturating_add(1) } else { count.saturating_sub(1) };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::Alert;
    use crate::app::test_support::{channel, drain, event_item, post_item, MockApi};
    use shared::FeedPage;
    use tokio::sync::Notify;

    fn page(prefix: i64, n: usize) -> Vec<FeedItem> {
        (0..n as i64)
            .map(|i| post_item(prefix + i, &format!("2025-03-01T10:{:02}:00", 59 - i)))
            .collect()
    }

    #[tokio::test]
    async fn test_initial_load_sets_has_more() {
        let api = MockApi::new();
        api.push_feed(Ok(page(0, 3)));
        let (tx, rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 3);

        feed.load().await.unwrap();

        let state = feed.snapshot();
        assert_eq!(state.items.len(), 3);
        assert!(state.has_more);
        assert!(!state.loading);
        assert_eq!(api.calls(), vec!["feed_page 3 -"]);
        assert_eq!(drain(&rx), vec![AppEvent::FeedUpdated { count: 3, has_more: true }]);
    }

    #[tokio::test]
    async fn test_short_first_page_ends_pagination() {
        let api = MockApi::new();
        api.push_feed(Ok(page(0, 2)));
        let (tx, _rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 15);

        feed.load().await.unwrap();
        assert!(!feed.snapshot().has_more);

        feed.load_more().await.unwrap();
        assert_eq!(api.count("feed_page"), 1);
    }

    #[tokio::test]
    async fn test_load_more_uses_last_post_time_as_cursor() {
        let api = MockApi::new();
        // Last item is an event: the cursor must come from the post before it
        api.push_feed(Ok(vec![
            post_item(1, "2025-03-01T12:00:00"),
            post_item(2, "2025-03-01T11:00:00"),
            event_item(9),
        ]));
        api.push_feed(Ok(vec![post_item(3, "2025-03-01T10:00:00")]));
        let (tx, _rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 3);

        feed.load().await.unwrap();
        feed.load_more().await.unwrap();

        assert_eq!(api.calls()[1], "feed_page 3 2025-03-01T11:00:00");
        let state = feed.snapshot();
        assert_eq!(state.items.len(), 4);
        assert!(!state.has_more);
    }

    #[tokio::test]
    async fn test_load_more_without_posts_sends_no_cursor() {
        let api = MockApi::new();
        api.push_feed(Ok(vec![event_item(1), event_item(2)]));
        api.push_feed(Ok(Vec::new()));
        let (tx, _rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 2);

        feed.load().await.unwrap();
        feed.load_more().await.unwrap();

        assert_eq!(api.calls()[1], "feed_page 2 -");
        assert!(!feed.snapshot().has_more);
        assert_eq!(feed.snapshot().items.len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_load_more_is_a_noop() {
        let api = MockApi::new();
        api.push_feed(Ok(page(0, 2)));
        api.push_feed(Ok(page(10, 2)));
        let (tx, _rx) = channel();
        let feed = Arc::new(FeedModel::new(api.clone(), tx, 2));
        feed.load().await.unwrap();

        let gate = Arc::new(Notify::new());
        *api.feed_gate.lock() = Some(Arc::clone(&gate));

        let first = tokio::spawn({
            let feed = Arc::clone(&feed);
            async move { feed.load_more().await }
        });
        while !feed.snapshot().loading_more {
            tokio::task::yield_now().await;
        }

        // Second call while the first is parked inside the request
        feed.load_more().await.unwrap();
        assert_eq!(api.count("feed_page"), 2);

        gate.notify_one();
        first.await.unwrap().unwrap();
        assert_eq!(feed.snapshot().items.len(), 4);
        assert!(!feed.snapshot().loading_more);
    }

    #[tokio::test]
    async fn test_refresh_replaces_items() {
        let api = MockApi::new();
        api.push_feed(Ok(page(0, 2)));
        api.push_feed(Ok(page(100, 1)));
        let (tx, _rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 2);

        feed.load().await.unwrap();
        feed.refresh().await.unwrap();

        let state = feed.snapshot();
        assert_eq!(state.items.len(), 1);
        assert!(!state.refreshing);
        assert!(!state.has_more);
    }

    #[tokio::test]
    async fn test_failure_raises_retry_alert_and_resets_flags() {
        let api = MockApi::new();
        api.push_feed(Err(AppError::Network("connection refused".into())));
        let (tx, rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 15);

        assert!(feed.load().await.is_err());
        assert!(!feed.snapshot().loading);

        let events = drain(&rx);
        assert!(matches!(
            events.as_slice(),
            [AppEvent::Alert(Alert { retry: Some(RetryAction::LoadFeed), .. })]
        ));
    }

    #[tokio::test]
    async fn test_failed_refresh_retries_as_refresh() {
        let api = MockApi::new();
        api.push_feed(Err(AppError::Network("connection refused".into())));
        let (tx, rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 15);

        assert!(feed.refresh().await.is_err());
        assert!(!feed.snapshot().refreshing);

        let events = drain(&rx);
        assert!(matches!(
            events.as_slice(),
            [AppEvent::Alert(Alert { retry: Some(RetryAction::RefreshFeed), .. })]
        ));
    }

    #[tokio::test]
    async fn test_dropped_entries_still_count_towards_a_full_page() {
        let api = MockApi::new();
        api.push_feed_page(FeedPage { items: page(0, 2), received: 3 });
        api.push_feed(Ok(page(10, 1)));
        let (tx, rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 3);

        feed.load().await.unwrap();
        assert!(feed.snapshot().has_more);
        assert_eq!(drain(&rx), vec![AppEvent::FeedUpdated { count: 2, has_more: true }]);

        feed.load_more().await.unwrap();
        assert_eq!(api.calls()[1], "feed_page 3 2025-03-01T10:58:00");
        assert_eq!(feed.snapshot().items.len(), 3);
        assert!(!feed.snapshot().has_more);
    }

    #[tokio::test]
    async fn test_expired_session_is_announced() {
        let api = MockApi::new();
        api.push_feed(Err(AppError::Unauthorized(String::new())));
        let (tx, rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 15);

        let _ = feed.load().await;
        let events = drain(&rx);
        assert_eq!(events.first(), Some(&AppEvent::SessionExpired));
    }

    #[tokio::test]
    async fn test_toggle_attendance_updates_event_in_place() {
        let api = MockApi::new();
        api.push_feed(Ok(vec![post_item(1, "2025-03-01T12:00:00"), event_item(7)]));
        let (tx, _rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 15);
        feed.load().await.unwrap();

        assert!(feed.toggle_attendance(7).await.unwrap());
        assert_eq!(api.calls().last().map(String::as_str), Some("set_attendance 7 true"));

        let state = feed.snapshot();
        let FeedItem::Event(event) = &state.items[1] else { panic!("expected event") };
        assert!(event.attending);
        assert_eq!(event.participant_count, 3);

        assert!(matches!(feed.toggle_attendance(99).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_toggle_like_adjusts_count_only_on_success() {
        let api = MockApi::new();
        api.push_feed(Ok(vec![post_item(1, "2025-03-01T12:00:00")]));
        let (tx, _rx) = channel();
        let feed = FeedModel::new(api.clone(), tx, 15);
        feed.load().await.unwrap();

        *api.fail_next.lock() = Some(AppError::Network("offline".into()));
        assert!(feed.toggle_like(LikeTarget::Post(1)).await.is_err());
        let FeedItem::Post(post) = &feed.snapshot().items[0] else { panic!("expected post") };
        assert_eq!((post.liked, post.like_count), (false, 3));

        assert!(feed.toggle_like(LikeTarget::Post(1)).await.unwrap());
        let FeedItem::Post(post) = &feed.snapshot().items[0] else { panic!("expected post") };
        assert_eq!((post.liked, post.like_count), (true, 4));
    }
}
