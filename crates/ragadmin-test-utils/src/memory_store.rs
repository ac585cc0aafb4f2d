// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory SettingsStore and RecordStore fakes.
//!
//! Behaviorally equivalent to the SQLite store for the operations the
//! orchestrator and reconciler exercise, without touching disk.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ragadmin_core::types::{Assistant, Container, Province, ServiceCategory};
use ragadmin_core::{RagAdminError, RecordStore, SettingsStore};

/// In-memory key/value settings store.
#[derive(Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a setting without going through the trait.
    pub async fn seed(&self, key: &str, value: serde_json::Value) {
        self.values.lock().await.insert(key.to_string(), value);
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn get_setting(&self, key: &str) -> Result<Option<serde_json::Value>, RagAdminError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn put_setting(
        &self,
        key: &str,
        value: serde_json::Value,
        _description: Option<&str>,
    ) -> Result<(), RagAdminError> {
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Default)]
struct RecordState {
    provinces: Vec<Province>,
    categories: Vec<ServiceCategory>,
    assistants: Vec<Assistant>,
    containers: Vec<Container>,
}

/// In-memory record store with the same uniqueness rules as SQLite.
#[derive(Default)]
pub struct MemoryRecords {
    state: Arc<Mutex<RecordState>>,
}

impl MemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_province(&self, province: Province) {
        self.state.lock().await.provinces.push(province);
    }

    pub async fn seed_service_category(&self, category: ServiceCategory) {
        self.state.lock().await.categories.push(category);
    }

    pub async fn seed_container(&self, container: Container) {
        self.state.lock().await.containers.push(container);
    }

    pub async fn seed_assistant(&self, assistant: Assistant) {
        self.state.lock().await.assistants.push(assistant);
    }

    /// Snapshot of all assistants (assertion helper).
    pub async fn assistants(&self) -> Vec<Assistant> {
        self.state.lock().await.assistants.clone()
    }

    /// Snapshot of all containers (assertion helper).
    pub async fn containers(&self) -> Vec<Container> {
        self.state.lock().await.containers.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryRecords {
    async fn find_province(&self, external_id: i64) -> Result<Option<Province>, RagAdminError> {
        Ok(self
            .state
            .lock()
            .await
            .provinces
            .iter()
            .find(|p| p.external_id == external_id)
            .cloned())
    }

    async fn find_service_category(
        &self,
        external_id: i64,
    ) -> Result<Option<ServiceCategory>, RagAdminError> {
        Ok(self
            .state
            .lock()
            .await
            .categories
            .iter()
            .find(|c| c.external_id == external_id)
            .cloned())
    }

    async fn get_province(&self, id: &str) -> Result<Option<Province>, RagAdminError> {
        Ok(self
            .state
            .lock()
            .await
            .provinces
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn get_service_category(
        &self,
        id: &str,
    ) -> Result<Option<ServiceCategory>, RagAdminError> {
        Ok(self
            .state
            .lock()
            .await
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_assistant_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Assistant>, RagAdminError> {
        Ok(self
            .state
            .lock()
            .await
            .assistants
            .iter()
            .find(|a| a.name == name)
            .cloned())
    }

    async fn get_assistant(&self, id: &str) -> Result<Option<Assistant>, RagAdminError> {
        Ok(self
            .state
            .lock()
            .await
            .assistants
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn insert_assistant(&self, assistant: &Assistant) -> Result<(), RagAdminError> {
        let mut state = self.state.lock().await;
        if state.assistants.iter().any(|a| a.name == assistant.name) {
            return Err(RagAdminError::Conflict(format!(
                "assistant name `{}` already exists",
                assistant.name
            )));
        }
        state.assistants.push(assistant.clone());
        Ok(())
    }

    async fn delete_assistant(&self, id: &str) -> Result<(), RagAdminError> {
        self.state.lock().await.assistants.retain(|a| a.id != id);
        Ok(())
    }

    async fn insert_container(&self, container: &Container) -> Result<(), RagAdminError> {
        let mut state = self.state.lock().await;
        if state.containers.iter().any(|c| c.name == container.name) {
            return Err(RagAdminError::Conflict(format!(
                "container name `{}` already exists",
                container.name
            )));
        }
        state.containers.push(container.clone());
        Ok(())
    }

    async fn delete_containers_for_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<(), RagAdminError> {
        self.state
            .lock()
            .await
            .containers
            .retain(|c| c.assistant_id != assistant_id);
        Ok(())
    }

    async fn containers_for_assistant(
        &self,
        assistant_id: &str,
    ) -> Result<Vec<Container>, RagAdminError> {
        Ok(self
            .state
            .lock()
            .await
            .containers
            .iter()
            .filter(|c| c.assistant_id == assistant_id)
            .cloned()
            .collect())
    }

    async fn update_container_metadata(
        &self,
        id: &str,
        metadata: &serde_json::Value,
    ) -> Result<(), RagAdminError> {
        let mut state = self.state.lock().await;
        if let Some(container) = state.containers.iter_mut().find(|c| c.id == id) {
            container.metadata = metadata.clone();
        }
        Ok(())
    }

    async fn mark_container_configured(&self, id: &str) -> Result<(), RagAdminError> {
        let mut state = self.state.lock().await;
        if let Some(container) = state.containers.iter_mut().find(|c| c.id == id) {
            container.configured = true;
        }
        Ok(())
    }

    async fn unconfigured_containers_before(
        &self,
        cutoff: &str,
    ) -> Result<Vec<Container>, RagAdminError> {
        Ok(self
            .state
            .lock()
            .await
            .containers
            .iter()
            .filter(|c| !c.configured && c.created_at.as_str() < cutoff)
            .cloned()
            .collect())
    }
}
