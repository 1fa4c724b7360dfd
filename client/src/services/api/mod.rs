//! # LiFit API Client Module
//!
//! Typed bindings for the LiFit REST backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs       - Module exports and documentation
//! ├── client.rs    - ApiClient, bearer/401 interceptors, ApiService impl
//! ├── auth.rs      - Login and signup
//! ├── users.rs     - Profiles, search, follow
//! ├── feed.rs      - Unified feed pages
//! ├── metas.rs     - Goals
//! ├── events.rs    - Events and attendance
//! ├── posts.rs     - Posts and likes
//! └── comments.rs  - Comments
//! ```

pub mod auth;
pub mod client;
pub mod comments;
pub mod events;
pub mod feed;
pub mod metas;
pub mod posts;
pub mod users;

pub use client::ApiClient;
