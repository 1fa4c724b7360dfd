//! # Utility Functions
//!
//! Shared utility functions used across the LiFit client.
//!
//! ## Modules
//!
//! - **[`validation`]**: Form validation (login, signup, goals, posts, events, profile)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Cross-crate display helpers (counters, handles)
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
