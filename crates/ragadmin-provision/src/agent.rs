// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote agent configuration.
//!
//! A freshly created remote container boots with one default agent; this
//! module overwrites that agent's definition and points the container's
//! document storage at the right S3 prefix.

use std::sync::Arc;

use chrono::Utc;
use tracing::error;

use ragadmin_core::types::RagResponse;
use ragadmin_core::{RagAdminError, RagTransport, SettingsStore, TokenSource};

use crate::naming::slugify;
use crate::settings::{resolve_data_path, resolve_s3_config};

/// Status and payload of both PUTs performed for one container.
#[derive(Debug, Clone)]
pub struct AgentProcessResult {
    pub agent_response: RagResponse,
    pub s3_response: RagResponse,
}

/// Pushes agent definition and S3 storage settings into a remote container.
pub struct AgentConfigurator {
    settings: Arc<dyn SettingsStore>,
    tokens: Arc<dyn TokenSource>,
    rag: Arc<dyn RagTransport>,
}

impl AgentConfigurator {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        tokens: Arc<dyn TokenSource>,
        rag: Arc<dyn RagTransport>,
    ) -> Self {
        Self {
            settings,
            tokens,
            rag,
        }
    }

    /// Configure the container's first agent and its S3 storage.
    ///
    /// Fails when the container reports no agents; any step's failure is
    /// logged and re-raised so the reconciler retries on the next pass.
    pub async fn process_agent(
        &self,
        container_name: &str,
        province_code: &str,
        service_category: &str,
        instruction: &str,
    ) -> Result<AgentProcessResult, RagAdminError> {
        let result = self
            .process_inner(container_name, province_code, service_category, instruction)
            .await;
        if let Err(err) = &result {
            error!(container = container_name, error = %err, "agent configuration failed");
        }
        result
    }

    async fn process_inner(
        &self,
        container_name: &str,
        province_code: &str,
        service_category: &str,
        instruction: &str,
    ) -> Result<AgentProcessResult, RagAdminError> {
        let token = self.tokens.get_valid_token().await?;
        let agents_endpoint = format!("/a/{container_name}/api/management/agents");

        let agents = self.rag.get(&token, &agents_endpoint).await?;
        let first_agent = agents
            .body
            .as_array()
            .and_then(|list| list.first())
            .ok_or_else(|| {
                RagAdminError::Internal("no agents found in the container".into())
            })?;
        let agent_id = first_agent
            .get("agent_id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                RagAdminError::Internal("remote agent is missing an agent_id".into())
            })?
            .to_string();

        let agent_payload = serde_json::json!({
            "agent_id": agent_id,
            "name": "Default",
            "role": "Assistant",
            "goal": "To help answer questions using the provided knowledge.",
            "backstory": instruction,
            "system_prompt": null,
            "tools": default_tools(),
            "created_at": Utc::now().timestamp(),
        });
        let agent_response = self
            .rag
            .put(&token, &agent_payload, &agents_endpoint, Some(&agent_id))
            .await?;

        let s3 = resolve_s3_config(self.settings.as_ref()).await?;
        let data_path = resolve_data_path(self.settings.as_ref()).await?;
        let s3_payload = serde_json::json!({
            "s3_bucket": s3.bucket_name,
            "s3_enabled": true,
            "s3_path": format!(
                "{}/{}/{}",
                data_path.s3_base_path,
                province_code,
                slugify(service_category)
            ),
            "s3_path_meta_files": data_path.s3_meta_files_path,
        });
        let s3_response = self
            .rag
            .put(
                &token,
                &s3_payload,
                &format!("/a/{container_name}/api/management/config/s3"),
                None,
            )
            .await?;

        Ok(AgentProcessResult {
            agent_response,
            s3_response,
        })
    }
}

/// Tool map pushed with every agent update: only the query engine is
/// enabled.
fn default_tools() -> serde_json::Value {
    serde_json::json!({
        "DuckDuckGo": { "enabled": false, "config": {} },
        "ImageGenerator": { "enabled": false, "config": { "api_key": "" } },
        "Interpreter": { "enabled": false, "config": { "api_key": null } },
        "OpenAPI": { "enabled": false, "config": { "domain_headers": {}, "openapi_uri": null } },
        "QueryEngine": { "enabled": true, "config": {} },
        "Wikipedia": { "enabled": false, "config": {} },
    })
}
