// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provisioning orchestrator: turns a validated creation request into a
//! local assistant, its container records, and matching remote containers.
//!
//! The remote name pre-check happens before any mutation; after the local
//! assistant exists, any failure rolls back the assistant and its container
//! rows. Remote containers already created when a sibling call fails are
//! left behind (the remote service owns their lifecycle; see DESIGN.md).

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use futures::future::try_join_all;
use tracing::{error, info, warn};

use ragadmin_core::types::{
    Assistant, AssistantMetadata, Container, CreateAssistantRequest, ProviderType,
};
use ragadmin_core::{RagAdminError, RagTransport, RecordStore, SettingsStore, TokenSource};

use crate::naming;
use crate::settings::resolve_s3_config;

pub const SERVICES_ENDPOINT: &str = "/manager/api/services";

/// Current time as an RFC 3339 UTC string with millisecond precision.
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Creates assistants and their backing containers.
pub struct Orchestrator {
    records: Arc<dyn RecordStore>,
    settings: Arc<dyn SettingsStore>,
    tokens: Arc<dyn TokenSource>,
    rag: Arc<dyn RagTransport>,
}

impl Orchestrator {
    pub fn new(
        records: Arc<dyn RecordStore>,
        settings: Arc<dyn SettingsStore>,
        tokens: Arc<dyn TokenSource>,
        rag: Arc<dyn RagTransport>,
    ) -> Self {
        Self {
            records,
            settings,
            tokens,
            rag,
        }
    }

    /// Create an assistant and one container per supported provider type.
    ///
    /// Validation and the remote name pre-check run before any mutation.
    /// Once the local assistant exists, any failure deletes it and its
    /// container rows before the originating error is surfaced.
    pub async fn create_assistant(
        &self,
        request: CreateAssistantRequest,
    ) -> Result<Assistant, RagAdminError> {
        let Some(province_id) = request.province_id else {
            return Err(RagAdminError::Validation(
                "Province and service category are required.".into(),
            ));
        };
        let Some(category_id) = request.service_category_id else {
            return Err(RagAdminError::Validation(
                "Province and service category are required.".into(),
            ));
        };
        let instruction = request
            .instruction
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| RagAdminError::Validation("Instruction is required.".into()))?
            .to_string();

        let province = self.records.find_province(province_id).await?;
        let category = self.records.find_service_category(category_id).await?;
        let (Some(province), Some(category)) = (province, category) else {
            return Err(RagAdminError::Validation(
                "Invalid province or service category.".into(),
            ));
        };

        let name = naming::assistant_name(&province.code, &category.name);
        if self.records.find_assistant_by_name(&name).await?.is_some() {
            return Err(RagAdminError::Conflict(
                "Assistant name must be unique.".into(),
            ));
        }

        // Pre-check candidate names against the remote inventory. This is
        // not re-verified after the check; a concurrent creation can still
        // collide at the POST.
        let token = self.tokens.get_valid_token().await?;
        let remote = self.rag.get(&token, SERVICES_ENDPOINT).await?;
        let remote_names: Vec<&str> = remote
            .body
            .as_array()
            .map(|containers| {
                containers
                    .iter()
                    .filter_map(|c| c.get("name").and_then(|n| n.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        for provider in ProviderType::ALL {
            let candidate = naming::container_name(&name, provider);
            if remote_names.contains(&candidate.as_str()) {
                return Err(RagAdminError::Conflict(format!(
                    "Container {candidate} already exists in RAG app."
                )));
            }
        }

        let assistant = Assistant {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.clone(),
            province_id: province.id.clone(),
            service_category_id: category.id.clone(),
            metadata: AssistantMetadata {
                primary_model: request.primary_model.unwrap_or_default(),
                secondary_model: request.secondary_model.unwrap_or_default(),
                temperature: request.temperature,
                instruction,
                search_file: request.search_file.unwrap_or_default(),
                description: request.description.unwrap_or_default(),
            },
            created_at: now_rfc3339(),
        };
        self.records.insert_assistant(&assistant).await?;

        match self.provision_containers(&assistant, &token).await {
            Ok(()) => {
                info!(assistant = %assistant.name, "assistant provisioned");
                Ok(assistant)
            }
            Err(err) => {
                error!(assistant = %assistant.name, error = %err, "provisioning failed, rolling back");
                if let Err(cleanup) = self
                    .records
                    .delete_containers_for_assistant(&assistant.id)
                    .await
                {
                    warn!(error = %cleanup, "container rollback failed");
                }
                if let Err(cleanup) = self.records.delete_assistant(&assistant.id).await {
                    warn!(error = %cleanup, "assistant rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Create local container rows and their remote counterparts.
    async fn provision_containers(
        &self,
        assistant: &Assistant,
        token: &str,
    ) -> Result<(), RagAdminError> {
        let mut containers = Vec::with_capacity(ProviderType::ALL.len());
        for provider in ProviderType::ALL {
            let container = Container {
                id: uuid::Uuid::new_v4().to_string(),
                name: naming::container_name(&assistant.name, provider),
                assistant_id: assistant.id.clone(),
                provider_type: provider,
                configured: false,
                metadata: serde_json::to_value(&assistant.metadata)
                    .map_err(|e| RagAdminError::Internal(e.to_string()))?,
                created_at: now_rfc3339(),
            };
            self.records.insert_container(&container).await?;
            containers.push(container);
        }

        let s3 = resolve_s3_config(self.settings.as_ref()).await?;
        let creations = containers.iter().map(|container| {
            let payload = serde_json::json!({
                "name": container.name,
                "connectToExternalData": true,
                "s3BucketName": s3.bucket_name,
                "s3AccessKey": s3.access_key,
                "s3SecretKey": s3.secret_key,
                "s3Url": s3.url,
            });
            let rag = self.rag.clone();
            async move { rag.post(token, &payload, SERVICES_ENDPOINT).await }
        });
        let echoes = try_join_all(creations).await?;

        for (container, echo) in containers.iter().zip(echoes) {
            self.records
                .update_container_metadata(&container.id, &echo.body)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragadmin_core::types::{Province, ServiceCategory};
    use ragadmin_test_utils::{MemoryRecords, MemorySettings, MockRag, StaticTokens};

    struct Fixture {
        records: Arc<MemoryRecords>,
        settings: Arc<MemorySettings>,
        rag: Arc<MockRag>,
        orchestrator: Orchestrator,
    }

    async fn fixture() -> Fixture {
        let records = Arc::new(MemoryRecords::new());
        let settings = Arc::new(MemorySettings::new());
        let rag = Arc::new(MockRag::new());

        records
            .seed_province(Province {
                id: "prov-1".into(),
                external_id: 9,
                name: "Ontario".into(),
                code: "ON".into(),
            })
            .await;
        records
            .seed_service_category(ServiceCategory {
                id: "cat-1".into(),
                external_id: 1,
                name: "Contracts".into(),
            })
            .await;
        settings
            .seed(
                "S3_CONFIG",
                serde_json::json!({
                    "bucket_name": "docs",
                    "access_key": "ak",
                    "secret_key": "sk",
                    "url": "https://s3.example.com"
                }),
            )
            .await;
        rag.stub("GET", SERVICES_ENDPOINT, 200, serde_json::json!([]))
            .await;
        rag.stub(
            "POST",
            SERVICES_ENDPOINT,
            200,
            serde_json::json!({"status": "created"}),
        )
        .await;

        let orchestrator = Orchestrator::new(
            records.clone(),
            settings.clone(),
            Arc::new(StaticTokens::new("tok")),
            rag.clone(),
        );
        Fixture {
            records,
            settings,
            rag,
            orchestrator,
        }
    }

    fn request() -> CreateAssistantRequest {
        CreateAssistantRequest {
            province_id: Some(9),
            service_category_id: Some(1),
            instruction: Some("Answer contract questions".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn creates_assistant_and_one_container_per_provider() {
        let f = fixture().await;
        let assistant = f.orchestrator.create_assistant(request()).await.unwrap();

        assert_eq!(assistant.name, "on-contracts");
        let containers = f.records.containers().await;
        assert_eq!(containers.len(), ProviderType::ALL.len());
        let names: Vec<_> = containers.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"on-contracts-openai"));
        assert!(names.contains(&"on-contracts-gemini"));
        assert!(containers.iter().all(|c| !c.configured));
        // Metadata replaced by the remote creation echo.
        assert!(
            containers
                .iter()
                .all(|c| c.metadata == serde_json::json!({"status": "created"}))
        );
        assert_eq!(
            f.rag.call_count("POST", SERVICES_ENDPOINT).await,
            ProviderType::ALL.len()
        );
    }

    #[tokio::test]
    async fn missing_ids_reject_before_any_remote_call() {
        let f = fixture().await;
        let err = f
            .orchestrator
            .create_assistant(CreateAssistantRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RagAdminError::Validation(_)));
        assert!(f.rag.calls().await.is_empty());
        assert!(f.records.assistants().await.is_empty());
    }

    #[tokio::test]
    async fn whitespace_instruction_rejects_before_any_remote_call() {
        let f = fixture().await;
        let mut req = request();
        req.instruction = Some("   \n\t ".into());
        let err = f.orchestrator.create_assistant(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Instruction is required.");
        assert!(f.rag.calls().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_province_rejects() {
        let f = fixture().await;
        let mut req = request();
        req.province_id = Some(404);
        let err = f.orchestrator.create_assistant(req).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid province or service category.");
    }

    #[tokio::test]
    async fn duplicate_assistant_name_conflicts_without_containers() {
        let f = fixture().await;
        f.orchestrator.create_assistant(request()).await.unwrap();
        let before = f.records.containers().await.len();

        let err = f.orchestrator.create_assistant(request()).await.unwrap_err();
        assert!(matches!(err, RagAdminError::Conflict(_)));
        assert_eq!(f.records.containers().await.len(), before);
        assert_eq!(f.records.assistants().await.len(), 1);
    }

    #[tokio::test]
    async fn remote_name_collision_aborts_before_local_mutation() {
        let f = fixture().await;
        f.rag
            .stub(
                "GET",
                SERVICES_ENDPOINT,
                200,
                serde_json::json!([{"name": "on-contracts-gemini"}]),
            )
            .await;

        let err = f.orchestrator.create_assistant(request()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Container on-contracts-gemini already exists in RAG app."
        );
        assert!(f.records.assistants().await.is_empty());
        assert!(f.records.containers().await.is_empty());
    }

    #[tokio::test]
    async fn remote_failure_rolls_back_assistant_and_containers() {
        let f = fixture().await;
        // Second of the parallel creation calls fails.
        f.rag.fail_nth("POST", SERVICES_ENDPOINT, 2).await;

        let err = f.orchestrator.create_assistant(request()).await.unwrap_err();
        assert!(matches!(err, RagAdminError::Downstream { .. }));
        assert!(f.records.assistants().await.is_empty());
        assert!(f.records.containers().await.is_empty());
    }

    #[tokio::test]
    async fn missing_s3_settings_roll_back_with_config_error() {
        let f = fixture().await;
        f.settings
            .seed("S3_CONFIG", serde_json::json!({"bucket_name": "docs"}))
            .await;

        let err = f.orchestrator.create_assistant(request()).await.unwrap_err();
        assert!(matches!(err, RagAdminError::Config(_)));
        assert!(f.records.assistants().await.is_empty());
        assert!(f.records.containers().await.is_empty());
        // The pre-mutation checks ran, but no remote creation happened.
        assert_eq!(f.rag.call_count("POST", SERVICES_ENDPOINT).await, 0);
    }
}
