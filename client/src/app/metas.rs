//! # Goals ("metas")
//!
//! The session user's goals: list, flip between pending and done, create.

use std::sync::Arc;

use async_channel::Sender;
use chrono::NaiveDate;
use parking_lot::RwLock;
use shared::{CreateMetaRequest, MetaStatus, UpdateMetaRequest};
use tracing::{debug, info};

use super::events::{emit, report, AppEvent, RetryAction};
use super::state::{InFlight, MetasState};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::utils::validation::validate_meta;

pub struct MetasModel {
    api: Arc<dyn ApiService>,
    state: Arc<RwLock<MetasState>>,
    events: Sender<AppEvent>,
}

impl MetasModel {
    pub fn new(api: Arc<dyn ApiService>, events: Sender<AppEvent>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(MetasState::default())),
            events,
        }
    }

    pub fn state(&self) -> Arc<RwLock<MetasState>> {
        Arc::clone(&self.state)
    }

    pub fn snapshot(&self) -> MetasState {
        self.state.read().clone()
    }

    pub async fn load(&self) -> Result<()> {
        let Some(_guard) = InFlight::try_flag(&self.state, |s| &mut s.loading) else {
            return Ok(());
        };

        match self.api.my_metas().await {
            Ok(metas) => {
                let count = metas.len();
                self.state.write().metas = metas;
                emit(&self.events, AppEvent::MetasUpdated { count }).await;
                Ok(())
            }
            Err(e) => {
                report(&self.events, "Error loading goals", &e, Some(RetryAction::LoadMetas)).await;
                Err(e)
            }
        }
    }

    pub async fn refresh(&self) -> Result<()> {
        self.load().await
    }

    /// Flip a goal between `PENDENTE` and `CONCLUIDA`.
    ///
    /// Returns the new status, or `None` when a toggle for the same goal is
    /// already pending. The list changes only after the backend accepts.
    pub async fn toggle(&self, meta_id: &str) -> Result<Option<MetaStatus>> {
        let mut request = None;
        let release_id = meta_id.to_string();
        let guard = InFlight::try_acquire(
            &self.state,
            |s| {
                let Some(meta) = s.metas.iter().find(|m| m.id == meta_id) else {
                    return false;
                };
                request = Some(UpdateMetaRequest::toggle_of(meta));
                s.updating.insert(meta_id.to_string())
            },
            move |s| {
                s.updating.remove(&release_id);
            },
        );

        let (Some(_guard), Some(request)) = (guard, request) else {
            if !self.state.read().metas.iter().any(|m| m.id == meta_id) {
                return Err(AppError::NotFound(format!("meta {}", meta_id)));
            }
            debug!(meta_id, "Toggle already pending; skipping");
            return Ok(None);
        };

        if let Err(e) = self.api.update_meta(meta_id, &request).await {
            report(&self.events, "Error updating goal", &e, None).await;
            return Err(e);
        }

        let status = request.status;
        if let Some(meta) = self.state.write().metas.iter_mut().find(|m| m.id == meta_id) {
            meta.status = status;
        }
        info!(meta_id, ?status, "Goal toggled");
        Ok(Some(status))
    }

    /// Create a goal running from `today` to `due`.
    pub async fn create(&self, name: &str, due: NaiveDate, today: NaiveDate) -> Result<()> {
        if let Err(e) = validate_meta(name, due, today).into_result() {
            report(&self.events, "Error", &e, None).await;
            return Err(e);
        }

        let Some(_guard) = InFlight::try_flag(&self.state, |s| &mut s.creating) else {
            return Ok(());
        };

        let request = CreateMetaRequest {
            name: name.trim().to_string(),
            starts_on: today,
            due,
        };

        if let Err(e) = self.api.create_meta(&request).await {
            report(&self.events, "Error creating goal", &e, None).await;
            return Err(e);
        }

        emit(&self.events, AppEvent::MetaCreated).await;
        Ok(())
    }
}
