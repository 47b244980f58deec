//! Logging configuration using tracing

use crate::config::LoggingConfig;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Log format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format (default for interactive use)
    #[default]
    Pretty,
    /// JSON format (for containers/log aggregation)
    Json,
    /// Compact single-line format
    Compact,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to pretty
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum log level (default: info)
    pub level: String,
    /// Log format
    pub format: LogFormat,
    /// Include span events (enter/exit)
    pub with_spans: bool,
    /// Include file/line information
    pub with_file: bool,
    /// Include target (module path)
    pub with_target: bool,
    /// Include thread IDs
    pub with_thread_ids: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::Pretty,
            with_spans: false,
            with_file: false,
            with_target: true,
            with_thread_ids: false,
        }
    }
}

impl LogConfig {
    /// Create a new logging configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the log format
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable span events
    pub fn with_spans(mut self, enabled: bool) -> Self {
        self.with_spans = enabled;
        self
    }

    /// Enable or disable file/line information
    pub fn with_file(mut self, enabled: bool) -> Self {
        self.with_file = enabled;
        self
    }

    /// Include worker thread ids
    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.with_thread_ids = enabled;
        self
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        LogConfig::new()
            .level(&config.level)
            .format(LogFormat::parse(&config.format))
            .with_spans(config.with_spans)
            .with_file(config.with_file)
            .with_thread_ids(config.with_thread_ids)
    }
}

/// Initialize the global tracing subscriber with custom configuration.
///
/// `RUST_LOG` takes precedence over the configured level. A second call is a no-op.
pub fn init_logging_with_config(config: LogConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let span_events = if config.with_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    // Logs go to stderr so report output on stdout stays clean
    let result = match config.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_span_events(span_events)
                .with_file(config.with_file)
                .with_line_number(config.with_file)
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_span_events(span_events)
                .with_file(config.with_file)
                .with_line_number(config.with_file)
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_span_events(span_events)
                .with_file(config.with_file)
                .with_line_number(config.with_file)
                .with_target(config.with_target)
                .with_thread_ids(config.with_thread_ids);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
        }
    };

    if let Err(e) = result {
        tracing::debug!("Logging already initialized: {}", e);
    }
}
