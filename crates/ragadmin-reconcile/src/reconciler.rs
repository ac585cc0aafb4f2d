// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Level-triggered reconciliation of unconfigured containers.
//!
//! Each pass selects containers that are still unconfigured after a grace
//! window and drives them toward the configured state. Failures are
//! isolated per container and surfaced in the aggregate summary so the
//! next pass can retry.

use std::sync::Arc;

use chrono::{Duration, SecondsFormat, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use ragadmin_core::types::{
    AgentConfigOutcome, Container, ModelConfigOutcome, ReconcileSummary,
};
use ragadmin_core::{RagAdminError, RagTransport, RecordStore, SettingsStore, TokenSource};
use ragadmin_provision::AgentConfigurator;

use crate::providers::ProviderConfigRegistry;

/// Drives unconfigured containers toward the configured state.
pub struct Reconciler {
    records: Arc<dyn RecordStore>,
    settings: Arc<dyn SettingsStore>,
    tokens: Arc<dyn TokenSource>,
    rag: Arc<dyn RagTransport>,
    registry: ProviderConfigRegistry,
    agents: AgentConfigurator,
    grace_window: Duration,
}

impl Reconciler {
    pub fn new(
        records: Arc<dyn RecordStore>,
        settings: Arc<dyn SettingsStore>,
        tokens: Arc<dyn TokenSource>,
        rag: Arc<dyn RagTransport>,
        registry: ProviderConfigRegistry,
        grace_window_secs: u64,
    ) -> Self {
        let agents = AgentConfigurator::new(settings.clone(), tokens.clone(), rag.clone());
        Self {
            records,
            settings,
            tokens,
            rag,
            registry,
            agents,
            grace_window: Duration::seconds(grace_window_secs as i64),
        }
    }

    /// Run one reconciliation pass over every container that has been
    /// unconfigured for longer than the grace window.
    ///
    /// The model-configuration pass and the agent pass both run for every
    /// selected container; an agent is (re)configured even when the model
    /// configuration attempt in the same pass failed.
    pub async fn process_unconfigured_containers(
        &self,
    ) -> Result<ReconcileSummary, RagAdminError> {
        let cutoff = (Utc::now() - self.grace_window)
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        let containers = self.records.unconfigured_containers_before(&cutoff).await?;
        info!(count = containers.len(), "reconciling unconfigured containers");

        let processed = join_all(containers.iter().map(|container| async {
            match self.configure_container(container).await {
                Ok(()) => ModelConfigOutcome {
                    container: container.name.clone(),
                    success: true,
                    error: None,
                },
                Err(err) => {
                    warn!(container = container.name, error = %err, "model configuration failed");
                    ModelConfigOutcome {
                        container: container.name.clone(),
                        success: false,
                        error: Some(err.to_string()),
                    }
                }
            }
        }))
        .await;

        let agent_results =
            join_all(containers.iter().map(|container| async {
                match self.configure_agent(container).await {
                    Ok(outcome) => outcome,
                    Err(err) => AgentConfigOutcome {
                        container: container.name.clone(),
                        agent_status: None,
                        s3_status: None,
                        error: Some(err.to_string()),
                    },
                }
            }))
            .await;

        Ok(ReconcileSummary {
            total_processed: processed.len(),
            processed,
            agent_results,
        })
    }

    /// Push model configuration into one remote container.
    ///
    /// An already-configured remote short-circuits: the local flag is set
    /// and the models endpoint is never called.
    async fn configure_container(&self, container: &Container) -> Result<(), RagAdminError> {
        let token = self.tokens.get_valid_token().await?;

        let probe = self
            .rag
            .get(
                &token,
                &format!("/a/{}/api/management/config/is_configured", container.name),
            )
            .await?;
        if probe.body.as_bool() == Some(true) {
            self.records.mark_container_configured(&container.id).await?;
            return Ok(());
        }

        let payload = self
            .registry
            .resolve(container.provider_type, self.settings.as_ref())
            .await?;
        let Some(payload) = payload else {
            warn!(
                container = container.name,
                provider = %container.provider_type,
                "no model configuration registered for provider, skipping"
            );
            return Err(RagAdminError::Config(format!(
                "no model configuration registered for provider {}",
                container.provider_type
            )));
        };

        let response = self
            .rag
            .post(
                &token,
                &payload,
                &format!("/a/{}/api/management/config/models", container.name),
            )
            .await?;
        if response.status == 200 {
            self.records.mark_container_configured(&container.id).await?;
            Ok(())
        } else {
            Err(RagAdminError::Downstream {
                status: Some(response.status),
                body: response.body.to_string(),
            })
        }
    }

    /// Resolve the owning assistant and push its agent and S3 settings.
    async fn configure_agent(
        &self,
        container: &Container,
    ) -> Result<AgentConfigOutcome, RagAdminError> {
        let assistant = self
            .records
            .get_assistant(&container.assistant_id)
            .await?
            .ok_or_else(|| {
                RagAdminError::Internal(format!(
                    "container {} references missing assistant {}",
                    container.name, container.assistant_id
                ))
            })?;
        let province = self
            .records
            .get_province(&assistant.province_id)
            .await?
            .ok_or_else(|| {
                RagAdminError::Internal(format!(
                    "assistant {} references missing province {}",
                    assistant.name, assistant.province_id
                ))
            })?;
        let category = self
            .records
            .get_service_category(&assistant.service_category_id)
            .await?
            .ok_or_else(|| {
                RagAdminError::Internal(format!(
                    "assistant {} references missing service category {}",
                    assistant.name, assistant.service_category_id
                ))
            })?;

        let result = self
            .agents
            .process_agent(
                &container.name,
                &province.code.to_lowercase(),
                &category.name.to_lowercase(),
                &assistant.metadata.instruction,
            )
            .await?;
        Ok(AgentConfigOutcome {
            container: container.name.clone(),
            agent_status: Some(result.agent_response.status),
            s3_status: Some(result.s3_response.status),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SecondsFormat;
    use ragadmin_core::types::{
        Assistant, AssistantMetadata, Container, Province, ProviderType, ServiceCategory,
    };
    use ragadmin_test_utils::{MemoryRecords, MemorySettings, MockRag, StaticTokens};

    fn past_timestamp(secs_ago: i64) -> String {
        (Utc::now() - Duration::seconds(secs_ago)).to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn container(id: &str, name: &str, provider: ProviderType, secs_ago: i64) -> Container {
        Container {
            id: id.to_string(),
            name: name.to_string(),
            assistant_id: "asst-1".to_string(),
            provider_type: provider,
            configured: false,
            metadata: serde_json::json!({}),
            created_at: past_timestamp(secs_ago),
        }
    }

    async fn fixture() -> (Arc<MemoryRecords>, Arc<MemorySettings>, Arc<MockRag>) {
        let records = Arc::new(MemoryRecords::new());
        records
            .seed_province(Province {
                id: "prov-1".to_string(),
                external_id: 9,
                name: "Ontario".to_string(),
                code: "ON".to_string(),
            })
            .await;
        records
            .seed_service_category(ServiceCategory {
                id: "cat-1".to_string(),
                external_id: 1,
                name: "Contracts".to_string(),
            })
            .await;
        records
            .seed_assistant(Assistant {
                id: "asst-1".to_string(),
                name: "on-contracts".to_string(),
                province_id: "prov-1".to_string(),
                service_category_id: "cat-1".to_string(),
                metadata: AssistantMetadata {
                    instruction: "Answer contract questions".to_string(),
                    ..AssistantMetadata::default()
                },
                created_at: past_timestamp(600),
            })
            .await;

        let settings = Arc::new(MemorySettings::new());
        settings
            .seed(
                "OPENAI_CONFIG",
                serde_json::json!({
                    "API_KEY": "sk", "API_BASE": "https://api.openai.com/v1",
                    "MODEL": "gpt-4o", "EMBEDDING_MODEL": "text-embedding-3-small"
                }),
            )
            .await;
        settings
            .seed(
                "GEMINI_CONFIG",
                serde_json::json!({ "API_KEY": "gk", "MODEL": "gemini-1.5-pro" }),
            )
            .await;
        settings
            .seed(
                "S3_CONFIG",
                serde_json::json!({
                    "bucket_name": "docs", "access_key": "ak",
                    "secret_key": "sk", "url": "https://s3.example.com"
                }),
            )
            .await;
        settings
            .seed(
                "DATA_PATH",
                serde_json::json!({ "S3_BASE_PATH": "assistants", "S3_META_FILES_PATH": "meta" }),
            )
            .await;

        (records, settings, Arc::new(MockRag::new()))
    }

    fn reconciler(
        records: Arc<MemoryRecords>,
        settings: Arc<MemorySettings>,
        rag: Arc<MockRag>,
        registry: ProviderConfigRegistry,
    ) -> Reconciler {
        Reconciler::new(
            records,
            settings,
            Arc::new(StaticTokens::new("tok")),
            rag,
            registry,
            60,
        )
    }

    async fn stub_agents(rag: &MockRag, name: &str) {
        rag.stub(
            "GET",
            &format!("/a/{name}/api/management/agents"),
            200,
            serde_json::json!([{ "agent_id": "agent-1" }]),
        )
        .await;
    }

    #[tokio::test]
    async fn remote_already_configured_short_circuits_model_post() {
        let (records, settings, rag) = fixture().await;
        records
            .seed_container(container("c-1", "on-contracts-openai", ProviderType::OpenAI, 600))
            .await;
        rag.stub(
            "GET",
            "/a/on-contracts-openai/api/management/config/is_configured",
            200,
            serde_json::json!(true),
        )
        .await;
        stub_agents(&rag, "on-contracts-openai").await;

        let summary = reconciler(
            records.clone(),
            settings,
            rag.clone(),
            ProviderConfigRegistry::with_defaults(),
        )
        .process_unconfigured_containers()
        .await
        .unwrap();

        assert_eq!(summary.total_processed, 1);
        assert!(summary.processed[0].success);
        assert!(records.containers().await[0].configured);
        assert_eq!(
            rag.call_count("POST", "/a/on-contracts-openai/api/management/config/models")
                .await,
            0
        );
    }

    #[tokio::test]
    async fn model_config_success_marks_configured() {
        let (records, settings, rag) = fixture().await;
        records
            .seed_container(container("c-1", "on-contracts-gemini", ProviderType::Gemini, 600))
            .await;
        rag.stub(
            "GET",
            "/a/on-contracts-gemini/api/management/config/is_configured",
            200,
            serde_json::json!(false),
        )
        .await;
        stub_agents(&rag, "on-contracts-gemini").await;

        let summary = reconciler(
            records.clone(),
            settings,
            rag.clone(),
            ProviderConfigRegistry::with_defaults(),
        )
        .process_unconfigured_containers()
        .await
        .unwrap();

        assert!(summary.processed[0].success);
        assert!(records.containers().await[0].configured);

        let calls = rag.calls().await;
        let models_post = calls
            .iter()
            .find(|c| c.endpoint == "/a/on-contracts-gemini/api/management/config/models")
            .expect("model configuration should be posted");
        let payload = models_post.payload.as_ref().unwrap();
        assert_eq!(payload["model_provider"], "gemini");
        assert_eq!(payload["google_api_key"], "gk");
    }

    #[tokio::test]
    async fn one_failing_container_does_not_block_the_other() {
        let (records, settings, rag) = fixture().await;
        records
            .seed_container(container("c-1", "on-contracts-openai", ProviderType::OpenAI, 600))
            .await;
        records
            .seed_container(container("c-2", "on-contracts-gemini", ProviderType::Gemini, 600))
            .await;
        rag.fail_nth(
            "POST",
            "/a/on-contracts-openai/api/management/config/models",
            1,
        )
        .await;
        stub_agents(&rag, "on-contracts-openai").await;
        stub_agents(&rag, "on-contracts-gemini").await;

        let summary = reconciler(
            records.clone(),
            settings,
            rag.clone(),
            ProviderConfigRegistry::with_defaults(),
        )
        .process_unconfigured_containers()
        .await
        .unwrap();

        assert_eq!(summary.total_processed, 2);
        let openai = summary
            .processed
            .iter()
            .find(|o| o.container == "on-contracts-openai")
            .unwrap();
        let gemini = summary
            .processed
            .iter()
            .find(|o| o.container == "on-contracts-gemini")
            .unwrap();
        assert!(!openai.success);
        assert!(openai.error.is_some());
        assert!(gemini.success);

        let containers = records.containers().await;
        assert!(!containers.iter().find(|c| c.id == "c-1").unwrap().configured);
        assert!(containers.iter().find(|c| c.id == "c-2").unwrap().configured);
    }

    #[tokio::test]
    async fn agent_pass_runs_even_when_model_config_failed() {
        let (records, settings, rag) = fixture().await;
        records
            .seed_container(container("c-1", "on-contracts-openai", ProviderType::OpenAI, 600))
            .await;
        rag.fail_nth(
            "POST",
            "/a/on-contracts-openai/api/management/config/models",
            1,
        )
        .await;
        stub_agents(&rag, "on-contracts-openai").await;

        let summary = reconciler(
            records,
            settings,
            rag.clone(),
            ProviderConfigRegistry::with_defaults(),
        )
        .process_unconfigured_containers()
        .await
        .unwrap();

        assert!(!summary.processed[0].success);
        let agent = &summary.agent_results[0];
        assert_eq!(agent.agent_status, Some(200));
        assert_eq!(agent.s3_status, Some(200));
        assert!(agent.error.is_none());

        let agent_put = rag
            .calls()
            .await
            .iter()
            .any(|c| c.endpoint == "/a/on-contracts-openai/api/management/agents/agent-1");
        assert!(agent_put);
    }

    #[tokio::test]
    async fn unregistered_provider_is_skipped_with_an_error() {
        let (records, settings, rag) = fixture().await;
        records
            .seed_container(container("c-1", "on-contracts-gemini", ProviderType::Gemini, 600))
            .await;
        stub_agents(&rag, "on-contracts-gemini").await;

        let mut registry = ProviderConfigRegistry::new();
        registry.register(ProviderType::OpenAI, crate::providers::ProviderConfigSpec::openai());

        let summary = reconciler(records.clone(), settings, rag.clone(), registry)
            .process_unconfigured_containers()
            .await
            .unwrap();

        assert!(!summary.processed[0].success);
        assert!(summary.processed[0]
            .error
            .as_deref()
            .unwrap()
            .contains("no model configuration registered"));
        assert!(!records.containers().await[0].configured);
        assert_eq!(
            rag.call_count("POST", "/a/on-contracts-gemini/api/management/config/models")
                .await,
            0
        );
    }

    #[tokio::test]
    async fn containers_inside_grace_window_are_left_alone() {
        let (records, settings, rag) = fixture().await;
        records
            .seed_container(container("c-1", "on-contracts-openai", ProviderType::OpenAI, 5))
            .await;

        let summary = reconciler(
            records,
            settings,
            rag.clone(),
            ProviderConfigRegistry::with_defaults(),
        )
        .process_unconfigured_containers()
        .await
        .unwrap();

        assert_eq!(summary.total_processed, 0);
        assert!(rag.calls().await.is_empty());
    }
}
