//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the LiFit REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, signup, token and error bodies
//! - [`user`] - User profiles, authors, participants, search results
//! - [`feed`] - Unified feed items (posts and events interleaved)
//! - [`event`] - Event details and creation
//! - [`meta`] - Fitness goals
//! - [`comment`] - Comments on posts and events
//! - [`post`] - Posts and post creation
//! - [`follow`] - Follower/following counters
//! - [`like`] - Like targets
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /feed/unificado?tamanhoPagina=15
//! Authorization: Bearer eyJhbGciOi...
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//!
//! [
//!   {
//!     "tipo": "POSTAGEM",
//!     "postagem": { "titulo": "Treino", "dataPublicacao": "2025-03-01T10:00:00", ... },
//!     "evento": null
//!   },
//!   {
//!     "tipo": "EVENTO",
//!     "postagem": null,
//!     "evento": { "id": 7, "titulo": "Corrida", ... }
//!   }
//! ]
//! ```

pub mod auth;
pub mod comment;
pub mod event;
pub mod feed;
pub mod follow;
pub mod like;
pub mod meta;
pub mod post;
pub mod user;

pub use auth::*;
pub use comment::*;
pub use event::*;
pub use feed::*;
pub use follow::*;
pub use like::*;
pub use meta::*;
pub use post::*;
pub use user::*;
