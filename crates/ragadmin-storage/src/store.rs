// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the SettingsStore and RecordStore traits.

use std::path::Path;

use async_trait::async_trait;

use ragadmin_core::types::{Assistant, Container, Province, ServiceCategory};
use ragadmin_core::{RagAdminError, RecordStore, SettingsStore};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store for settings and provisioning records.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules.
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Open (or create) the store at `path` and run migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RagAdminError> {
        let db = Database::open(path).await?;
        Ok(Self { db })
    }

    /// Seed a province record (operator setup and tests).
    pub async fn insert_province(&self, province: &Province) -> Result<(), RagAdminError> {
        queries::catalog::insert_province(&self.db, province).await
    }

    /// Seed a service category record (operator setup and tests).
    pub async fn insert_service_category(
        &self,
        category: &ServiceCategory,
    ) -> Result<(), RagAdminError> {
        queries::catalog::insert_service_category(&self.db, category).await
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), RagAdminError> {
        self.db.close().await
    }
}

#[async_trait]
impl SettingsStore for SqliteStore {
    async fn get_setting(&self, key: &str) -> Result<Option<serde_json::Value>, RagAdminError> {
        queries::settings::get_setting(&self.db, key).await
    }

    async fn put_setting(
        &self,
        key: &str,
        value: serde_json::Value,
        description: Option<&str>,
    ) -> Result<(), RagAdminError> {
        queries::settings::put_setting(&self.db, key, value, description).await
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn find_province(&self, external_id: i64) -> Result<Option<Province>, RagAdminError> {
        queries::catalog::find_province(&self.db, external_id).await
    }

    async fn find_service_category(
        &self,
        external_id: i64,
    ) -> Result<Option<ServiceCategory>, RagAdminError> {
        queries::catalog::find_service_category(&self.db, external_id).await
    }

    async fn get_province(&self, id: &str) -> Result<Option<Province>, RagAdminError> {
        queries::catalog::get_province(&self.db, id).await
    }

    async fn get_service_category(
        &self,
        id: &str,
    ) -> Result<Option<ServiceCategory>, RagAdminError> {
        queries::catalog::get_service_category(&self.db, id).await
    }

    async fn find_assistant_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Assistant>, RagAdminError> {
        queries::assistants::find_by_name(&self.db, name).await
    }

    async fn get_assistant(&self, id: &str) -> Result<Option<Assistant>, RagAdminError> {
        queries::assistants::get(&self.db, id).await
    }

    async fn insert_assistant(&self, assistant: &Assistant) -> Result<(), RagAdminError> {
        queries::assistants::insert(&self.db, assistant).await
    }

    async fn delete_assistant(&self, id: &str) -> Result<(), RagAdminError> {
        queries::assistants::delete(&self.db, id).await
    }

    async fn insert_container(&self, container: &Container) -> Result<(), RagAdminError> {
        queries::containers::insert(&self.db, container).await
    }

    async fn delete_containers_for_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<(), RagAdminError> {
        queries::containers::delete_for_assistant(&self.db, assistant_id).await
    }

    async fn containers_for_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<Vec<Container>, RagAdminError> {
        queries::containers::for_assistant(&self.db, assistant_id).await
    }

    async fn update_container_metadata(
        &self,
        id: &str,
        metadata: &serde_json::Value,
    ) -> Result<(), RagAdminError> {
        queries::containers::update_metadata(&self.db, id, metadata).await
    }

    async fn mark_container_configured(&self, id: &str) -> Result<(), RagAdminError> {
        queries::containers::mark_configured(&self.db, id).await
    }

    async fn unconfigured_containers_before(
        &self,
        cutoff: &str,
    ) -> Result<Vec<Container>, RagAdminError> {
        queries::containers::unconfigured_before(&self.db, cutoff).await
    }
}
