//! # LiFit Client - Library Root
//!
//! Client core for the LiFit social fitness network: session handling,
//! an authenticated HTTP wrapper around the LiFit REST API, and one
//! view-model per screen (feed, goals, event detail, comments, profiles,
//! user search, and the login/compose/edit-profile forms).
//!
//! There is no rendering here. A front end drives the view-models, reads
//! their state, and reacts to the [`AppEvent`]s they emit.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              lifit (this crate)                        │
//! ├────────────────────────────────────────────────────────┤
//! │  Tokio         - Async runtime                         │
//! │  Reqwest       - HTTP client and multipart uploads     │
//! │  parking_lot   - Short-lived state locks               │
//! │  async-channel - View-model → front end events         │
//! │  tracing       - Structured logging                    │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP + Bearer token          │ multipart
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  LiFit backend  │          │   Cloudinary            │
//! │  (REST, JSON)   │          │   (unsigned uploads)    │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`App`] orchestrator, per-screen view-models, form handlers
//! - **config**: [`ClientConfig`] from `LIFIT_*` environment variables
//! - **core**: [`AppError`] and the [`core::ApiService`] / [`core::MediaUploader`] seams
//! - **debug**: tracing subscriber setup
//! - **services**: [`ApiClient`] (LiFit REST) and the Cloudinary uploader
//! - **session**: token holder and its persistent store
//! - **utils**: form validation
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   └── app (view-models, handlers, events)
//!       ├── core::ApiService ◄── services::api::ApiClient
//!       │                          └── session (token holder + file store)
//!       ├── core::MediaUploader ◄── services::upload
//!       └── utils::validation
//! ```
//!
//! ## Session Rules
//!
//! - Every request carries `Authorization: Bearer <token>` when a token exists.
//! - A 401 clears the stored token once; the caller sees `AppError::Unauthorized`
//!   and the front end receives `AppEvent::SessionExpired`.
//! - A 403 is an authorization failure and leaves the session alone.

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use app::{Alert, App, AppEvent, RetryAction};
pub use config::ClientConfig;
pub use core::{AppError, Result};
pub use services::ApiClient;
pub use session::SessionHolder;
