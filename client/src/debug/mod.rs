//! # Logging Infrastructure
//!
//! File-based structured logging for the LiFit client.
//!
//! ## Features
//!
//! - **File-based logging**: Structured logs under `logs/` with daily rotation
//! - **Env filter**: `RUST_LOG` directives, default `lifit=info,warn`
//! - **Optional stderr mirror**: handy for the headless binary
//!
//! ## Usage
//!
//! ```rust,ignore
//! // Initialize at startup
//! lifit::debug::init();
//!
//! // Log with structured fields
//! tracing::info!(
//!     endpoint = "/feed/unificado",
//!     duration_ms = 234,
//!     "API call completed"
//! );
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `lifit=debug,info`)
//! - `LIFIT_LOG_DIR`: Log directory (default: `logs`)
//! - `LIFIT_LOG_STDERR`: Also log to stderr (1=on, 0=off)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::{init as init_logger, init_with};

/// Initialize the logging system
///
/// Call this at application startup, before any other operations.
pub fn init() {
    init_logger();
}
