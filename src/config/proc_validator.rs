//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - The endpoint is only checked for presence. A malformed URL is left for the
//!   fetcher, which reports it as an unrecoverable configuration failure.

use tracing::{error, info};

use crate::config::service::{AuthConfig, ServiceConfig};
use crate::config::settings::HttpConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_auth(&cfg.auth, &mut errors);
    validate_http(&cfg.http, &mut errors);

    if let Some(logging) = &cfg.logging {
        if !LOG_LEVELS.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "logging.level '{}' must be one of {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        Err(errors)
    }
}

fn validate_auth(auth: &AuthConfig, errors: &mut Vec<String>) {
    if auth.endpoint.trim().is_empty() {
        errors.push("auth.endpoint must not be empty".to_string());
    }
}

fn validate_http(http: &HttpConfig, errors: &mut Vec<String>) {
    if http.connect_timeout_ms == 0 {
        errors.push("http.connect_timeout_ms must be > 0".to_string());
    }
    if http.timeout_ms == 0 {
        errors.push("http.timeout_ms must be > 0".to_string());
    }
    if http.connect_timeout_ms > http.timeout_ms {
        errors.push(format!(
            "http.connect_timeout_ms ({}) must be <= http.timeout_ms ({})",
            http.connect_timeout_ms, http.timeout_ms
        ));
    }
}
