//! File-based logging initialization

use std::fs;

use super::config::{DebugConfig, DEFAULT_LOG_LEVEL};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system
///
/// Sets up:
/// - Daily log rotation in `LIFIT_LOG_DIR` (default `logs/`)
/// - `EnvFilter` from `RUST_LOG`, falling back to `lifit=info,warn`
/// - Non-blocking file writes
/// - Plain text lines, or JSON lines with `LIFIT_LOG_FORMAT=json`
/// - An optional stderr layer (`LIFIT_LOG_STDERR=1`)
///
/// Calling it twice is harmless: the second global subscriber install fails
/// and is ignored.
pub fn init() {
    init_with(DebugConfig::from_env());
}

/// Initialize logging with an explicit configuration
pub fn init_with(config: DebugConfig) {
    if let Err(e) = fs::create_dir_all(&config.log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
        return;
    }

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let text_layer = (!config.log_json).then(|| {
        fmt::layer()
            .with_writer(non_blocking.clone())
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false) // No ANSI codes in log files
    });

    let json_layer = config.log_json.then(|| {
        fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
    });

    let stderr_layer = config.log_to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if !installed {
        return;
    }

    tracing::info!(
        log_dir = %config.log_dir.display(),
        log_level = %config.log_level,
        stderr = config.log_to_stderr,
        json = config.log_json,
        "Logging initialized"
    );

    // Keep the writer guard alive for the lifetime of the program
    std::mem::forget(guard);
}
