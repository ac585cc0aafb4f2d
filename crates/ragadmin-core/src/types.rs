// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the ragadmin components.
//!
//! Record timestamps are RFC 3339 strings in UTC with millisecond precision
//! so that lexicographic comparison matches chronological order.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Backing model/service family a container is created for.
///
/// This is a closed set: one container per variant is provisioned for every
/// assistant, and the reconciler resolves model configuration per variant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum ProviderType {
    OpenAI,
    Gemini,
}

impl ProviderType {
    /// All supported provider types, in provisioning order.
    pub const ALL: [ProviderType; 2] = [ProviderType::OpenAI, ProviderType::Gemini];
}

/// A logical chatbot configuration spanning one container per provider type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assistant {
    /// Record identifier (UUID v4).
    pub id: String,
    /// Unique deterministic slug: `{province-code}-{slugified-category-name}`.
    pub name: String,
    /// Owning province record id.
    pub province_id: String,
    /// Owning service category record id.
    pub service_category_id: String,
    /// Free-form request metadata (model choice, instruction text, ...).
    pub metadata: AssistantMetadata,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Free-form metadata captured from the creation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantMetadata {
    #[serde(default)]
    pub primary_model: String,
    #[serde(default)]
    pub secondary_model: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub search_file: String,
    #[serde(default)]
    pub description: String,
}

/// One remote-backed, provider-specific deployment unit for an assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    /// Record identifier (UUID v4).
    pub id: String,
    /// Unique name: `{assistant.name}-{providertype}`, lower-cased.
    pub name: String,
    /// Owning assistant record id.
    pub assistant_id: String,
    /// Backing provider family.
    pub provider_type: ProviderType,
    /// False until the remote container acknowledges model configuration.
    pub configured: bool,
    /// Model parameters at creation time, replaced by the remote creation
    /// echo once the remote container exists.
    pub metadata: serde_json::Value,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// A province the assistant is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Province {
    pub id: String,
    /// Identifier used by external callers to reference this province.
    pub external_id: i64,
    pub name: String,
    /// Short code used as the assistant name prefix (e.g. "ON").
    pub code: String,
}

/// A service category the assistant answers questions for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: String,
    pub external_id: i64,
    pub name: String,
}

/// A generic key/value configuration record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    /// Unique lookup key (e.g. `RAG_APP_URL`).
    pub key: String,
    /// Arbitrary JSON value.
    pub value: serde_json::Value,
    pub description: Option<String>,
}

/// Inbound payload for the assistant creation endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateAssistantRequest {
    pub province_id: Option<i64>,
    pub service_category_id: Option<i64>,
    #[serde(default)]
    pub primary_model: Option<String>,
    #[serde(default)]
    pub secondary_model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub search_file: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A status/body pair returned by the external RAG service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl RagResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outcome of one container's model configuration attempt.
#[derive(Debug, Clone, Serialize)]
pub struct ModelConfigOutcome {
    pub container: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of one container's agent + S3 configuration attempt.
#[derive(Debug, Clone, Serialize)]
pub struct AgentConfigOutcome {
    pub container: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s3_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result of one reconciliation pass.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileSummary {
    pub total_processed: usize,
    pub processed: Vec<ModelConfigOutcome>,
    pub agent_results: Vec<AgentConfigOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn provider_type_round_trips_through_strings() {
        assert_eq!(ProviderType::OpenAI.to_string(), "OpenAI");
        assert_eq!(ProviderType::Gemini.to_string(), "Gemini");
        assert_eq!(
            ProviderType::from_str("OpenAI").unwrap(),
            ProviderType::OpenAI
        );
        assert!(ProviderType::from_str("Mistral").is_err());
    }

    #[test]
    fn rag_response_success_range() {
        let ok = RagResponse {
            status: 201,
            body: serde_json::json!({}),
        };
        assert!(ok.is_success());
        let bad = RagResponse {
            status: 404,
            body: serde_json::json!({}),
        };
        assert!(!bad.is_success());
    }

    #[test]
    fn create_request_deserializes_with_missing_fields() {
        let req: CreateAssistantRequest =
            serde_json::from_str(r#"{"province_id": 9}"#).unwrap();
        assert_eq!(req.province_id, Some(9));
        assert!(req.service_category_id.is_none());
        assert!(req.instruction.is_none());
    }
}
