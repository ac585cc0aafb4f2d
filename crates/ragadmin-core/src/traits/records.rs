// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence trait for assistant, container, and lookup records.

use async_trait::async_trait;

use crate::error::RagAdminError;
use crate::types::{Assistant, Container, Province, ServiceCategory};

/// Record persistence for the provisioning workflow.
///
/// Assistants and containers are owned by the orchestrator that creates
/// them; the reconciler only flips the `configured` flag and replaces
/// container metadata. Containers reference their assistant through an
/// explicit `assistant_id` foreign key.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Looks up a province by its external identifier.
    async fn find_province(&self, external_id: i64) -> Result<Option<Province>, RagAdminError>;

    /// Looks up a service category by its external identifier.
    async fn find_service_category(
        &self,
        external_id: i64,
    ) -> Result<Option<ServiceCategory>, RagAdminError>;

    /// Looks up a province by record id.
    async fn get_province(&self, id: &str) -> Result<Option<Province>, RagAdminError>;

    /// Looks up a service category by record id.
    async fn get_service_category(
        &self,
        id: &str,
    ) -> Result<Option<ServiceCategory>, RagAdminError>;

    /// Looks up an assistant by its unique name.
    async fn find_assistant_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Assistant>, RagAdminError>;

    /// Looks up an assistant by record id.
    async fn get_assistant(&self, id: &str) -> Result<Option<Assistant>, RagAdminError>;

    /// Inserts a new assistant record.
    async fn insert_assistant(&self, assistant: &Assistant) -> Result<(), RagAdminError>;

    /// Deletes an assistant record (provisioning rollback only).
    async fn delete_assistant(&self, id: &str) -> Result<(), RagAdminError>;

    /// Inserts a new container record.
    async fn insert_container(&self, container: &Container) -> Result<(), RagAdminError>;

    /// Deletes all containers owned by an assistant (provisioning rollback
    /// only; the reconciler never deletes).
    async fn delete_containers_for_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<(), RagAdminError>;

    /// Lists containers owned by an assistant.
    async fn containers_for_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<Vec<Container>, RagAdminError>;

    /// Replaces a container's metadata blob.
    async fn update_container_metadata(
        &self,
        id: &str,
        metadata: &serde_json::Value,
    ) -> Result<(), RagAdminError>;

    /// Marks a container as configured. Idempotent.
    async fn mark_container_configured(&self, id: &str) -> Result<(), RagAdminError>;

    /// Lists unconfigured containers created strictly before `cutoff`
    /// (RFC 3339 timestamp).
    async fn unconfigured_containers_before(
        &self,
        cutoff: &str,
    ) -> Result<Vec<Container>, RagAdminError>;
}
