use serde::Deserialize;

use crate::config::settings::{HttpConfig, LoggingConfig, MetricsConfig};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub auth: AuthConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// ================================
/// Auth endpoint and credential
/// ================================
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// SAS token issuing endpoint. Not parsed here, see `TokenFetcher`.
    pub endpoint: String,
    /// bearer credential, may be empty
    #[serde(default)]
    pub token: String,
}

// the credential must never end up in logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish()
    }
}
