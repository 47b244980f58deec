//! Configuration management for Sea-Seq components

use seaseq_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Ports probed by the port scan check
pub const DEFAULT_PROBE_PORTS: &[u16] = &[22, 80, 443, 3389, 445];

/// Upper bound for a single port probe connect
pub const MAX_PROBE_TIMEOUT_MS: u64 = 1000;

/// Upper bound on concurrent check workers
pub const MAX_WORKERS_LIMIT: usize = 8;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote inventory settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Check and runner settings
    #[serde(default)]
    pub checks: ChecksConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Merge with environment variables (SEA_SEQ_ prefix)
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary lookup (environment in production)
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Remote settings
        if let Some(val) = lookup("SEA_SEQ_API_URL") {
            self.remote.base_url = non_empty(val);
        }
        if let Some(val) = lookup("SEA_SEQ_API_KEY") {
            self.remote.api_key = non_empty(val);
        }
        if let Some(n) = parse_var(&lookup, "SEA_SEQ_TIMEOUT") {
            self.remote.timeout_seconds = n;
        }
        if let Some(val) = lookup("SEA_SEQ_DELEGATE_CHECKS") {
            self.remote.delegate_checks = matches!(
                val.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        // Check settings
        if let Some(n) = parse_var(&lookup, "SEA_SEQ_PROBE_TIMEOUT_MS") {
            self.checks.probe_timeout_ms = n;
        }
        if let Some(n) = parse_var(&lookup, "SEA_SEQ_MAX_WORKERS") {
            self.checks.max_workers = n;
        }

        // Logging
        if let Some(val) = lookup("SEA_SEQ_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("SEA_SEQ_LOG_FORMAT") {
            self.logging.format = val;
        }

        self
    }

    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.remote.timeout_seconds == 0 {
            return Err(Error::InvalidConfig {
                key: "remote.timeout_seconds".into(),
                message: "must be greater than zero".into(),
            });
        }
        if !(1..=MAX_WORKERS_LIMIT).contains(&self.checks.max_workers) {
            return Err(Error::InvalidConfig {
                key: "checks.max_workers".into(),
                message: format!("must be between 1 and {}", MAX_WORKERS_LIMIT),
            });
        }
        if let Some(url) = &self.remote.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::InvalidConfig {
                    key: "remote.base_url".into(),
                    message: format!("'{}' is not an http(s) URL", url),
                });
            }
        }
        Ok(())
    }
}

fn non_empty(val: String) -> Option<String> {
    let trimmed = val.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

/// Remote inventory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Inventory API base URL; no remote enrichment when unset
    pub base_url: Option<String>,

    /// Bearer credential for the inventory API
    pub api_key: Option<String>,

    /// Per-call timeout in seconds
    #[serde(default = "default_remote_timeout")]
    pub timeout_seconds: u64,

    /// Forward check execution to the remote service
    #[serde(default)]
    pub delegate_checks: bool,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_remote_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("SeaSeqCLI/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_seconds: default_remote_timeout(),
            delegate_checks: false,
            user_agent: default_user_agent(),
        }
    }
}

/// Check and runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// Upper bound on concurrent check workers
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Connect timeout per probed port in milliseconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,

    /// Ports probed by the port scan check
    #[serde(default = "default_probe_ports")]
    pub probe_ports: Vec<u16>,

    /// Timeout for the HTTP reachability check in seconds
    #[serde(default = "default_check_timeout")]
    pub http_timeout_seconds: u64,

    /// Timeout for the TLS handshake check in seconds
    #[serde(default = "default_check_timeout")]
    pub tls_timeout_seconds: u64,

    /// Checks run when none are named on the command line (empty = all)
    #[serde(default)]
    pub default_checks: Vec<String>,
}

fn default_max_workers() -> usize {
    8
}

fn default_probe_timeout() -> u64 {
    500
}

fn default_probe_ports() -> Vec<u16> {
    DEFAULT_PROBE_PORTS.to_vec()
}

fn default_check_timeout() -> u64 {
    6
}

impl ChecksConfig {
    /// Probe timeout, never above one second
    pub fn probe_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.probe_timeout_ms.clamp(1, MAX_PROBE_TIMEOUT_MS))
    }
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            probe_timeout_ms: default_probe_timeout(),
            probe_ports: default_probe_ports(),
            http_timeout_seconds: default_check_timeout(),
            tls_timeout_seconds: default_check_timeout(),
            default_checks: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Emit span open/close events
    #[serde(default)]
    pub with_spans: bool,

    /// Include file and line numbers
    #[serde(default)]
    pub with_file: bool,

    /// Include worker thread ids
    #[serde(default)]
    pub with_thread_ids: bool,
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("pretty")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            with_spans: false,
            with_file: false,
            with_thread_ids: false,
        }
    }
}

/// Builder for constructing Config
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.remote.base_url = Some(url.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.remote.api_key = Some(key.into());
        self
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.remote.timeout_seconds = seconds;
        self
    }

    pub fn delegate_checks(mut self, delegate: bool) -> Self {
        self.config.remote.delegate_checks = delegate;
        self
    }

    pub fn max_workers(mut self, workers: usize) -> Self {
        self.config.checks.max_workers = workers;
        self
    }

    pub fn probe_timeout_ms(mut self, ms: u64) -> Self {
        self.config.checks.probe_timeout_ms = ms;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
