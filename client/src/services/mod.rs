//! # Services Module
//!
//! External service integrations for the LiFit client.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! ├── api/        - LiFit REST backend (bearer auth, 401 handling, endpoints)
//! └── upload.rs   - Cloudinary unsigned image upload
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                  view-models (app)                 │
//! │  ┌──────────────────┐       ┌──────────────────┐   │
//! │  │  ApiClient       │       │ CloudinaryUploader│  │
//! │  │  (api/)          │       │  (upload.rs)     │   │
//! │  └────────┬─────────┘       └────────┬─────────┘   │
//! └───────────┼──────────────────────────┼─────────────┘
//!             │ HTTP/JSON + Bearer        │ multipart
//!             ▼                           ▼
//! ┌─────────────────────┐    ┌─────────────────────────┐
//! │  LiFit backend      │    │  Cloudinary             │
//! │  /auth /usuario     │    │  /{cloud}/image/upload  │
//! │  /feed /meta        │    │  -> secure_url          │
//! │  /evento /postagem  │    │                         │
//! │  /comentario        │    │                         │
//! │  /curtida /seguidor │    │                         │
//! └─────────────────────┘    └─────────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Both services return [`crate::core::Result`]. The uploader reports every
//! failure as `AppError::Upload`; the API client maps HTTP statuses as
//! described in [`crate::core::error`].

pub mod api;
pub mod upload;

pub use api::ApiClient;
pub use upload::CloudinaryUploader;
