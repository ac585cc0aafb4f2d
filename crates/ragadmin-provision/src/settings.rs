// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed access to the S3 and data-path settings.

use ragadmin_core::{RagAdminError, SettingsStore};

pub const S3_CONFIG_KEY: &str = "S3_CONFIG";
pub const DATA_PATH_KEY: &str = "DATA_PATH";

/// S3 connection parameters from the `S3_CONFIG` setting.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket_name: String,
    pub access_key: String,
    pub secret_key: String,
    pub url: String,
}

/// Document storage layout from the `DATA_PATH` setting.
#[derive(Debug, Clone)]
pub struct DataPathConfig {
    pub s3_base_path: String,
    pub s3_meta_files_path: String,
}

fn required_field(
    value: &serde_json::Value,
    setting: &str,
    field: &str,
) -> Result<String, RagAdminError> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            RagAdminError::Config(format!("Missing required {setting} setting: {field}"))
        })
}

/// Resolve and validate the S3 connection settings.
pub async fn resolve_s3_config(
    settings: &dyn SettingsStore,
) -> Result<S3Config, RagAdminError> {
    let value = settings
        .get_setting(S3_CONFIG_KEY)
        .await?
        .ok_or_else(|| RagAdminError::Config("S3 configuration not found in settings".into()))?;
    Ok(S3Config {
        bucket_name: required_field(&value, "S3", "bucket_name")?,
        access_key: required_field(&value, "S3", "access_key")?,
        secret_key: required_field(&value, "S3", "secret_key")?,
        url: required_field(&value, "S3", "url")?,
    })
}

/// Resolve the S3 document path layout.
pub async fn resolve_data_path(
    settings: &dyn SettingsStore,
) -> Result<DataPathConfig, RagAdminError> {
    let value = settings
        .get_setting(DATA_PATH_KEY)
        .await?
        .ok_or_else(|| RagAdminError::Config("data path configuration not found in settings".into()))?;
    Ok(DataPathConfig {
        s3_base_path: required_field(&value, "data path", "S3_BASE_PATH")?,
        s3_meta_files_path: required_field(&value, "data path", "S3_META_FILES_PATH")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragadmin_test_utils::MemorySettings;

    #[tokio::test]
    async fn s3_config_requires_every_field() {
        let settings = MemorySettings::new();
        settings
            .seed(
                S3_CONFIG_KEY,
                serde_json::json!({
                    "bucket_name": "docs",
                    "access_key": "ak",
                    "url": "https://s3.example.com"
                }),
            )
            .await;

        let err = resolve_s3_config(&settings).await.unwrap_err();
        assert!(err.to_string().contains("secret_key"), "got: {err}");
    }

    #[tokio::test]
    async fn s3_config_resolves_when_complete() {
        let settings = MemorySettings::new();
        settings
            .seed(
                S3_CONFIG_KEY,
                serde_json::json!({
                    "bucket_name": "docs",
                    "access_key": "ak",
                    "secret_key": "sk",
                    "url": "https://s3.example.com"
                }),
            )
            .await;

        let config = resolve_s3_config(&settings).await.unwrap();
        assert_eq!(config.bucket_name, "docs");
        assert_eq!(config.url, "https://s3.example.com");
    }

    #[tokio::test]
    async fn missing_s3_setting_is_a_config_error() {
        let settings = MemorySettings::new();
        let err = resolve_s3_config(&settings).await.unwrap_err();
        assert!(matches!(err, RagAdminError::Config(_)));
    }
}
