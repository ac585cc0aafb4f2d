// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and a plausible bind address.

use thiserror::Error;

use crate::model::RagAdminConfig;

/// A configuration error surfaced at load time.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML parse or type error from Figment.
    #[error("config parse error: {0}")]
    Parse(String),

    /// Semantic validation failure.
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or all collected validation
/// errors (does not fail fast).
pub fn validate_config(config: &RagAdminConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation(
            "storage.database_path must not be empty".to_string(),
        ));
    }

    if config.identity.token_url.trim().is_empty() {
        errors.push(ConfigError::Validation(
            "identity.token_url must not be empty".to_string(),
        ));
    } else if !config.identity.token_url.starts_with("http://")
        && !config.identity.token_url.starts_with("https://")
    {
        errors.push(ConfigError::Validation(format!(
            "identity.token_url `{}` must be an http(s) URL",
            config.identity.token_url
        )));
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation(
            "gateway.host must not be empty".to_string(),
        ));
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            )));
        }
    }

    if config.rag.http_timeout_secs == 0 {
        errors.push(ConfigError::Validation(
            "rag.http_timeout_secs must be greater than zero".to_string(),
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
