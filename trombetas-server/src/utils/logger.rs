//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Logger settings read from `LOG_LEVEL`, `LOG_JSON` and `LOG_DIR`
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `trombetas_server=debug,tower_http=info`
    pub level: Option<String>,
    pub json: bool,
    /// Daily rolling file output instead of stdout
    pub dir: Option<String>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").ok(),
            json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    fn filter(&self) -> EnvFilter {
        match &self.level {
            Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trombetas_server=info,tower_http=info")),
        }
    }
}

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(&LogConfig::default());
}

/// Initialize the logger with optional JSON format and file output
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger_with_file(config: &LogConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = &config.dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "trombetas-server");
            let builder = builder.with_writer(file_appender).with_ansi(false);
            let _ = if config.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            return;
        }
    }

    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
