//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`ApiService`, `MediaUploader`)
//!
//! ## Dependency Injection
//!
//! View-models hold `Arc<dyn ApiService>`:
//!
//! ```rust,ignore
//! // In production: the reqwest-backed client
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&config, session)?);
//!
//! // In tests: a scripted double
//! let api: Arc<dyn ApiService> = Arc::new(MockApi::default());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{ApiService, MediaUploader};
