use std::{fs, path::Path};
use crate::config::proc_validator;
use crate::config::service::ServiceConfig;
use crate::config::settings::LoggingConfig;
use crate::observability::metrics::get_metrics;
use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow!("cannot read config file {}: {}", path.display(), e))?;

    let expanded = expand_env_vars(&content);
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig = serde_yaml::from_str(&content)
        .inspect_err(|e| {
            error!("parse config error: {}", e);
        })?;

    // Apply defaults
    if service_config.logging.is_none() {
        service_config.logging = Some(LoggingConfig::default());
    }

    debug!("validation config ...");
    if let Err(errors) = proc_validator::validate_service_config(&service_config) {
        get_metrics().await.config_validation_errors.inc_by(errors.len() as u64);
        return Err(anyhow!(
            "config is not valid, total errors:{}, \n{}",
            errors.len(),
            errors.join("\n")
        ));
    }

    Ok(service_config)
}

/// Replace `${VAR}` and `${VAR:default}` with values from the process environment.
pub fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}").expect("static regex is valid");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
