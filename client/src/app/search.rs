//! # User Search
//!
//! Search-as-you-type. Every call bumps a generation counter, waits out the
//! debounce delay, and only searches if no newer call arrived meanwhile.

use std::sync::Arc;
use std::time::Duration;

use async_channel::Sender;
use parking_lot::RwLock;
use shared::UserSummary;
use tracing::debug;

use super::events::{emit, report, AppEvent};
use super::state::SearchState;
use crate::core::error::Result;
use crate::core::service::ApiService;

pub struct SearchModel {
    api: Arc<dyn ApiService>,
    state: Arc<RwLock<SearchState>>,
    events: Sender<AppEvent>,
    debounce: Duration,
}

impl SearchModel {
    pub fn new(api: Arc<dyn ApiService>, events: Sender<AppEvent>, debounce: Duration) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(SearchState::default())),
            events,
            debounce,
        }
    }

    pub fn state(&self) -> Arc<RwLock<SearchState>> {
        Arc::clone(&self.state)
    }

    pub fn results(&self) -> Vec<UserSummary> {
        self.state.read().results.clone()
    }

    /// Record `query` and search for it once the input settles.
    ///
    /// A blank query clears the results immediately without a request.
    pub async fn search(&self, query: &str) -> Result<()> {
        let query = query.trim().to_string();
        let generation = {
            let mut state = self.state.write();
            state.generation += 1;
            state.query = query.clone();
            if query.is_empty() {
                state.results.clear();
                state.loading = false;
                return Ok(());
            }
            state.generation
        };

        tokio::time::sleep(self.debounce).await;

        {
            let mut state = self.state.write();
            if state.generation != generation {
                debug!(%query, "Superseded search skipped");
                return Ok(());
            }
            state.loading = true;
        }

        let result = self.api.search_users(&query).await;

        let outcome = {
            let mut state = self.state.write();
            if state.generation != generation {
                return Ok(());
            }
            state.loading = false;
            result.map(|results| {
                let count = results.len();
                state.results = results;
                count
            })
        };

        match outcome {
            Ok(count) => {
                emit(&self.events, AppEvent::SearchResults { query, count }).await;
                Ok(())
            }
            Err(e) => {
                report(&self.events, "Error searching users", &e, None).await;
                Err(e)
            }
        }
    }
}
