use serde::Deserialize;

use crate::utils::constants::{DEFAULT_HTTP_CONNECT_TIMEOUT_MS, DEFAULT_HTTP_TIMEOUT_MS};

/// ================================
/// Outbound HTTP transport settings
/// ================================
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// applies to establishing the TCP/TLS connection only
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// whole request deadline, from connect until the body is read.
    /// invariant: >= connect_timeout_ms
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: DEFAULT_HTTP_CONNECT_TIMEOUT_MS,
            timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MetricsConfig {
    #[serde(default)]
    pub is_enabled: bool,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_connect_timeout_ms() -> u64 {
    DEFAULT_HTTP_CONNECT_TIMEOUT_MS
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}
