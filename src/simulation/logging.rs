//! Logging and tracing configuration
//!
//! This module provides centralized logging configuration for the crowd
//! control system: console or JSON output, optional daily-rolling file
//! logging, and env-filter support.

use std::io;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for the application
    pub level: Level,
    /// Whether to enable JSON formatting
    pub json_format: bool,
    /// Whether to log to file
    pub log_to_file: bool,
    /// Log file directory (if logging to file)
    pub log_directory: Option<String>,
    /// Log file prefix (if logging to file)
    pub log_file_prefix: String,
    /// Whether to enable span events
    pub enable_span_events: bool,
    /// Whether to enable ansi colors in console output
    pub enable_ansi: bool,
    /// Custom environment filter
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_format: false,
            log_to_file: false,
            log_directory: None,
            log_file_prefix: "facility-crowd-control".to_string(),
            enable_span_events: false,
            enable_ansi: true,
            env_filter: None,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Enable JSON formatting
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }

    /// Enable file logging
    pub fn with_file_logging(mut self, directory: impl Into<String>) -> Self {
        self.log_to_file = true;
        self.log_directory = Some(directory.into());
        self
    }

    /// Set log file prefix
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_file_prefix = prefix.into();
        self
    }

    /// Enable span events
    pub fn with_span_events(mut self) -> Self {
        self.enable_span_events = true;
        self
    }

    /// Disable ANSI colors
    pub fn without_ansi(mut self) -> Self {
        self.enable_ansi = false;
        self
    }

    /// Set custom environment filter
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Span event configuration derived from the builder flags
    fn span_events(&self) -> FmtSpan {
        if self.enable_span_events {
            FmtSpan::FULL
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let env_filter = match &self.env_filter {
            Some(filter) => EnvFilter::try_new(filter)?,
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new(format!(
                    "{}={}",
                    env!("CARGO_PKG_NAME").replace('-', "_"),
                    self.level
                ))
            }),
        };

        let registry = Registry::default().with(env_filter);

        match (self.log_to_file, self.json_format) {
            (true, json) => {
                let log_dir = self.log_directory.as_deref().unwrap_or("logs");
                let file_appender = rolling::daily(log_dir, &self.log_file_prefix);
                let (file_writer, file_guard) = non_blocking(file_appender);
                let (console_writer, console_guard) = non_blocking(io::stderr());

                // Files always get JSON; the console follows the builder flag
                let file_layer = fmt::layer()
                    .json()
                    .with_writer(file_writer)
                    .with_span_events(self.span_events());

                if json {
                    let console_layer = fmt::layer()
                        .json()
                        .with_writer(console_writer)
                        .with_span_events(self.span_events());
                    registry.with(file_layer).with(console_layer).init();
                } else {
                    let console_layer = fmt::layer()
                        .pretty()
                        .with_writer(console_writer)
                        .with_ansi(self.enable_ansi)
                        .with_span_events(self.span_events());
                    registry.with(file_layer).with(console_layer).init();
                }

                // The non-blocking writers flush only while their guards live
                std::mem::forget(file_guard);
                std::mem::forget(console_guard);
            }
            (false, true) => {
                let layer = fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_span_events(self.span_events());
                registry.with(layer).init();
            }
            (false, false) => {
                let layer = fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_ansi(self.enable_ansi)
                    .with_span_events(self.span_events());
                registry.with(layer).init();
            }
        }

        info!("Logging initialized");
        Ok(())
    }

    /// Initialize logging for development (pretty console output)
    pub fn init_dev() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::DEBUG).with_span_events().init()
    }

    /// Initialize logging for production (JSON format with file logging)
    pub fn init_prod(
        log_dir: impl Into<String>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new()
            .with_level(Level::INFO)
            .with_json_format()
            .with_file_logging(log_dir)
            .without_ansi()
            .init()
    }

    /// Initialize logging for testing (minimal output)
    pub fn init_test() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::WARN).without_ansi().init()
    }

    /// Initialize verbose logging (INFO level with span events)
    pub fn init_verbose() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::INFO).with_span_events().init()
    }

    /// Initialize debug logging (DEBUG level with span events)
    pub fn init_debug() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::new().with_level(Level::DEBUG).with_span_events().init()
    }
}
