//! # Profiles
//!
//! Another user's profile: details, follow counters, public goals, and the
//! follow/unfollow toggle.
//!
//! Only one load runs at a time. Asking for another profile while one is
//! loading records the request; the running load discards its result and
//! fetches the newest one before it returns.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use shared::User;
use tracing::{debug, info, warn};

use super::events::{emit, report, AppEvent, RetryAction};
use super::state::{InFlight, ProfileState, UserRef};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

pub struct ProfileModel {
    api: Arc<dyn ApiService>,
    state: Arc<RwLock<ProfileState>>,
    events: Sender<AppEvent>,
}

impl ProfileModel {
    pub fn new(api: Arc<dyn ApiService>, events: Sender<AppEvent>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ProfileState::default())),
            events,
        }
    }

    pub fn state(&self) -> Arc<RwLock<ProfileState>> {
        Arc::clone(&self.state)
    }

    pub fn snapshot(&self) -> ProfileState {
        self.state.read().clone()
    }

    /// Load a profile by id, or by exact username through the search endpoint.
    pub async fn load(&self, user: UserRef) -> Result<()> {
        self.state.write().requested = Some(user);

        loop {
            let mut wanted = None;
            let guard = InFlight::try_acquire(
                &self.state,
                |s| {
                    if s.loading {
                        return false;
                    }
                    wanted = s.requested.clone();
                    s.loading = true;
                    true
                },
                |s| s.loading = false,
            );
            let (Some(_guard), Some(user)) = (guard, wanted) else {
                debug!("Profile load in flight; it will pick up the new request");
                return Ok(());
            };

            let outcome = self.fetch(&user).await;
            if !self.is_requested(&user) {
                debug!(?user, "Profile request superseded; loading the newer one");
                continue;
            }

            return match outcome {
                Ok(user_id) => {
                    emit(&self.events, AppEvent::ProfileLoaded(user_id)).await;
                    Ok(())
                }
                Err(e) => {
                    report(&self.events, "Error loading profile", &e, Some(RetryAction::LoadProfile)).await;
                    Err(e)
                }
            };
        }
    }

    fn is_requested(&self, user: &UserRef) -> bool {
        self.state.read().requested.as_ref() == Some(user)
    }

    /// Load the last requested profile again.
    pub async fn reload(&self) -> Result<()> {
        let requested = self.state.read().requested.clone();
        match requested {
            Some(user) => self.load(user).await,
            None => Ok(()),
        }
    }

    /// Fetch a profile and show it unless a newer request replaced `user_ref`.
    async fn fetch(&self, user_ref: &UserRef) -> Result<i64> {
        let user_id = match user_ref {
            UserRef::Id(id) => *id,
            UserRef::Username(username) => self.find_by_username(username).await?,
        };

        let user = self.api.get_user(user_id).await?;
        let counters = self.api.follow_counters(user_id).await.unwrap_or_else(|e| {
            warn!(user_id, error = %e, "Follow counters unavailable; showing zeros");
            Default::default()
        });

        let mut state = self.state.write();
        if state.requested.as_ref() != Some(user_ref) {
            return Ok(user_id);
        }
        state.public_metas = user.public_metas();
        state.user = Some(user);
        state.counters = counters;
        Ok(user_id)
    }

    async fn find_by_username(&self, username: &str) -> Result<i64> {
        self.api
            .search_users(username)
            .await?
            .into_iter()
            .find(|u| u.username == username)
            .map(|u| u.id)
            .ok_or_else(|| AppError::NotFound(format!("user @{}", username)))
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    /// Follow or unfollow the loaded profile.
    ///
    /// Returns the new following state; `None` when a change is already pending.
    pub async fn toggle_follow(&self) -> Result<Option<bool>> {
        let mut target = None;
        let mut busy = false;
        let guard = InFlight::try_acquire(
            &self.state,
            |s| {
                busy = s.follow_pending;
                target = s.user.as_ref().map(|u| (u.id, !s.counters.is_following));
                if busy || target.is_none() {
                    return false;
                }
                s.follow_pending = true;
                true
            },
            |s| s.follow_pending = false,
        );
        let (Some(_guard), Some((user_id, follow))) = (guard, target) else {
            if busy {
                return Ok(None);
            }
            return Err(AppError::NotFound("no profile loaded".to_string()));
        };

        if let Err(e) = self.api.set_following(user_id, follow).await {
            let title = if follow { "Error following user" } else { "Error unfollowing user" };
            report(&self.events, title, &e, None).await;
            return Err(e);
        }

        let followers = {
            let mut state = self.state.write();
            state.counters.apply_follow(follow);
            state.counters.followers
        };
        info!(user_id, follow, followers, "Follow state changed");
        Ok(Some(follow))
    }
}
