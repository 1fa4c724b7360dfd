//! # LiFit Shared Data Transfer Objects
//!
//! This library defines the contract between the LiFit client and the REST
//! backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login, signup and error bodies
//!   - **[`dto::user`]**: Users, authors, search rows, profile updates
//!   - **[`dto::feed`]**: The unified feed (`ItemFeed`) as a Rust sum type
//!   - **[`dto::event`]**: Events and event creation
//!   - **[`dto::meta`]**: Goals ("metas")
//!   - **[`dto::comment`]**: Comments and their parent target
//!   - **[`dto::post`]**: Posts and post creation
//!   - **[`dto::follow`]**: Follower counters
//! - **[`utils`]**: Display helpers shared by every front end
//!
//! ## Wire Format
//!
//! The backend speaks Portuguese camelCase JSON (`nomeUsuario`,
//! `dataPublicacao`, ...). Rust fields are English snake_case and mapped with
//! `#[serde(rename_all = "camelCase")]` plus explicit renames where the words
//! differ.
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::auth::LoginRequest;
//!
//! let request = LoginRequest::new("alice", "secret");
//! let json = serde_json::to_value(&request).unwrap();
//! assert_eq!(json["nomeUsuarioEmail"], "alice");
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: this crate is a DTO library, everything is public API
pub use dto::*;
pub use utils::*;
