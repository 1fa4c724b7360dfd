//! Logging configuration from environment variables

use std::path::PathBuf;

/// Filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_LOG_LEVEL: &str = "lifit=info,warn";

/// Logging system configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// File name prefix inside `log_dir`; the appender adds the date suffix
    pub log_file_prefix: String,
    /// Log level filter (e.g., "lifit=debug,info")
    pub log_level: String,
    /// Mirror events to stderr in addition to the file
    pub log_to_stderr: bool,
    /// Write the log file as one JSON object per line
    pub log_json: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file_prefix: "lifit.log".to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_to_stderr: false,
            log_json: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            log_dir: std::env::var("LIFIT_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_file_prefix: defaults.log_file_prefix,
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_to_stderr: flag("LIFIT_LOG_STDERR"),
            log_json: std::env::var("LIFIT_LOG_FORMAT").is_ok_and(|v| is_json_format(&v)),
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

fn flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "1").unwrap_or(false)
}

/// `LIFIT_LOG_FORMAT` value selecting JSON lines
fn is_json_format(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("json")
}
