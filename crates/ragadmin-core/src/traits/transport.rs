// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated transport trait for the external RAG service.

use async_trait::async_trait;

use crate::error::RagAdminError;
use crate::types::RagResponse;

/// Generic authenticated GET/POST/PUT access to the RAG service REST
/// surface.
///
/// The transport never retries; retry policy, if any, belongs to the
/// caller. Non-2xx responses and network failures surface as
/// [`RagAdminError::Downstream`].
#[async_trait]
pub trait RagTransport: Send + Sync {
    /// GET `endpoint` with the given bearer token.
    async fn get(&self, token: &str, endpoint: &str) -> Result<RagResponse, RagAdminError>;

    /// POST `payload` to `endpoint` with the given bearer token.
    async fn post(
        &self,
        token: &str,
        payload: &serde_json::Value,
        endpoint: &str,
    ) -> Result<RagResponse, RagAdminError>;

    /// PUT `payload` to `endpoint`, appending `/{item_id}` when supplied.
    async fn put(
        &self,
        token: &str,
        payload: &serde_json::Value,
        endpoint: &str,
        item_id: Option<&str>,
    ) -> Result<RagResponse, RagAdminError>;
}
