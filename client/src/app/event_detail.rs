//! # Event Detail
//!
//! Single event screen: load by id and confirm/cancel attendance.
//! After an attendance change the event is fetched again so participant
//! lists and counters come from the server.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use shared::Event;
use tracing::info;

use super::events::{emit, report, AppEvent, RetryAction};
use super::state::{EventDetailState, InFlight};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

pub struct EventDetailModel {
    api: Arc<dyn ApiService>,
    state: Arc<RwLock<EventDetailState>>,
    events: Sender<AppEvent>,
}

impl EventDetailModel {
    pub fn new(api: Arc<dyn ApiService>, events: Sender<AppEvent>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(EventDetailState::default())),
            events,
        }
    }

    pub fn state(&self) -> Arc<RwLock<EventDetailState>> {
        Arc::clone(&self.state)
    }

    pub fn event(&self) -> Option<Event> {
        self.state.read().event.clone()
    }

    pub async fn load(&self, event_id: i64) -> Result<()> {
        let Some(_guard) = InFlight::try_flag(&self.state, |s| &mut s.loading) else {
            return Ok(());
        };
        self.fetch(event_id).await
    }

    async fn fetch(&self, event_id: i64) -> Result<()> {
        match self.api.get_event(event_id).await {
            Ok(event) => {
                self.state.write().event = Some(event);
                emit(&self.events, AppEvent::EventLoaded(event_id)).await;
                Ok(())
            }
            Err(e) => {
                report(&self.events, "Error loading event", &e, Some(RetryAction::LoadEvent(event_id))).await;
                Err(e)
            }
        }
    }

    /// Flip attendance for the loaded event, then reload it.
    ///
    /// Returns the new attendance state; `None` when a change is already pending.
    pub async fn toggle_attendance(&self) -> Result<Option<bool>> {
        let mut current = None;
        let mut busy = false;
        let guard = InFlight::try_acquire(
            &self.state,
            |s| {
                busy = s.updating;
                current = s.event.as_ref().map(|e| (e.id, e.attending));
                if busy || current.is_none() {
                    return false;
                }
                s.updating = true;
                true
            },
            |s| s.updating = false,
        );
        let (Some(_guard), Some((event_id, attending))) = (guard, current) else {
            if busy {
                return Ok(None);
            }
            return Err(AppError::NotFound("no event loaded".to_string()));
        };

        if let Err(e) = self.api.set_attendance(event_id, !attending).await {
            report(&self.events, "Error updating attendance", &e, None).await;
            return Err(e);
        }
        info!(event_id, attending = !attending, "Attendance changed");

        self.fetch(event_id).await?;
        Ok(Some(!attending))
    }
}
