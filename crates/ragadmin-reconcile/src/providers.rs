// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-provider model configuration payloads.
//!
//! Each provider family maps a settings record to the payload the remote
//! models endpoint expects. The mapping lives in a registry so a provider
//! can be disabled (or a new one wired in) without touching the reconciler.

use std::collections::HashMap;

use ragadmin_core::types::ProviderType;
use ragadmin_core::{RagAdminError, SettingsStore};

/// Builds the models-endpoint payload from the provider's settings record.
type PayloadBuilder = fn(&serde_json::Value) -> serde_json::Value;

/// How one provider family resolves its model configuration.
#[derive(Clone)]
pub struct ProviderConfigSpec {
    /// Settings key holding the provider's credentials and model names.
    pub settings_key: &'static str,
    build: PayloadBuilder,
}

impl ProviderConfigSpec {
    /// The stock OpenAI strategy backed by the `OPENAI_CONFIG` setting.
    pub fn openai() -> Self {
        Self {
            settings_key: "OPENAI_CONFIG",
            build: openai_payload,
        }
    }

    /// The stock Gemini strategy backed by the `GEMINI_CONFIG` setting.
    pub fn gemini() -> Self {
        Self {
            settings_key: "GEMINI_CONFIG",
            build: gemini_payload,
        }
    }
}

/// Registry of model-configuration strategies keyed by provider type.
#[derive(Clone)]
pub struct ProviderConfigRegistry {
    entries: HashMap<ProviderType, ProviderConfigSpec>,
}

impl ProviderConfigRegistry {
    /// An empty registry. Providers without an entry are skipped by the
    /// reconciler.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The built-in OpenAI and Gemini strategies.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ProviderType::OpenAI, ProviderConfigSpec::openai());
        registry.register(ProviderType::Gemini, ProviderConfigSpec::gemini());
        registry
    }

    pub fn register(&mut self, provider: ProviderType, spec: ProviderConfigSpec) {
        self.entries.insert(provider, spec);
    }

    /// Resolve the models-endpoint payload for `provider`.
    ///
    /// Returns `Ok(None)` when no strategy is registered; a registered
    /// strategy whose settings record is absent is an operator error.
    pub async fn resolve(
        &self,
        provider: ProviderType,
        settings: &dyn SettingsStore,
    ) -> Result<Option<serde_json::Value>, RagAdminError> {
        let Some(spec) = self.entries.get(&provider) else {
            return Ok(None);
        };
        let value = settings.get_setting(spec.settings_key).await?.ok_or_else(|| {
            RagAdminError::Config(format!(
                "{} configuration not found in settings",
                spec.settings_key
            ))
        })?;
        Ok(Some((spec.build)(&value)))
    }
}

impl Default for ProviderConfigRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn field(config: &serde_json::Value, name: &str) -> serde_json::Value {
    config.get(name).cloned().unwrap_or(serde_json::Value::Null)
}

fn openai_payload(config: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "model_provider": "openai",
        "openai_api_key": field(config, "API_KEY"),
        "openai_api_base": field(config, "API_BASE"),
        "model": field(config, "MODEL"),
        "embedding_model": field(config, "EMBEDDING_MODEL"),
    })
}

fn gemini_payload(config: &serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "model_provider": "gemini",
        "google_api_key": field(config, "API_KEY"),
        "model": field(config, "MODEL"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragadmin_test_utils::MemorySettings;

    #[tokio::test]
    async fn openai_payload_maps_settings_fields() {
        let settings = MemorySettings::new();
        settings
            .seed(
                "OPENAI_CONFIG",
                serde_json::json!({
                    "API_KEY": "sk-test",
                    "API_BASE": "https://api.openai.com/v1",
                    "MODEL": "gpt-4o",
                    "EMBEDDING_MODEL": "text-embedding-3-small"
                }),
            )
            .await;

        let payload = ProviderConfigRegistry::with_defaults()
            .resolve(ProviderType::OpenAI, &settings)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payload["model_provider"], "openai");
        assert_eq!(payload["openai_api_key"], "sk-test");
        assert_eq!(payload["openai_api_base"], "https://api.openai.com/v1");
        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["embedding_model"], "text-embedding-3-small");
    }

    #[tokio::test]
    async fn gemini_payload_uses_google_key_name() {
        let settings = MemorySettings::new();
        settings
            .seed(
                "GEMINI_CONFIG",
                serde_json::json!({ "API_KEY": "g-key", "MODEL": "gemini-1.5-pro" }),
            )
            .await;

        let payload = ProviderConfigRegistry::with_defaults()
            .resolve(ProviderType::Gemini, &settings)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payload["model_provider"], "gemini");
        assert_eq!(payload["google_api_key"], "g-key");
        assert_eq!(payload["model"], "gemini-1.5-pro");
    }

    #[tokio::test]
    async fn unregistered_provider_resolves_to_none() {
        let settings = MemorySettings::new();
        let registry = ProviderConfigRegistry::new();
        let payload = registry
            .resolve(ProviderType::Gemini, &settings)
            .await
            .unwrap();
        assert!(payload.is_none());
    }

    #[tokio::test]
    async fn missing_settings_record_is_a_config_error() {
        let settings = MemorySettings::new();
        let err = ProviderConfigRegistry::with_defaults()
            .resolve(ProviderType::OpenAI, &settings)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("OPENAI_CONFIG"));
    }
}
