// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value settings lookup trait.

use async_trait::async_trait;

use crate::error::RagAdminError;

/// Read/write access to the shared key/value settings store.
///
/// Settings hold both operator-provided configuration (`RAG_APP_URL`,
/// `S3_CONFIG`, provider credentials) and state written by the token cache
/// (`RAG_ACCESS_TOKEN`, `RAG_TOKEN_EXPIRATION`).
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if absent.
    async fn get_setting(&self, key: &str) -> Result<Option<serde_json::Value>, RagAdminError>;

    /// Creates or replaces the value stored under `key`.
    async fn put_setting(
        &self,
        key: &str,
        value: serde_json::Value,
        description: Option<&str>,
    ) -> Result<(), RagAdminError>;
}
