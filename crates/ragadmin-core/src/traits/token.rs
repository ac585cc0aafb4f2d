// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer token source trait.

use async_trait::async_trait;

use crate::error::RagAdminError;

/// Supplies a valid bearer token for the external RAG service.
///
/// Implementations cache the token and refresh it on expiry; callers must
/// not retry a failed token fetch silently -- the error propagates.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns a token valid at the time of the call.
    async fn get_valid_token(&self) -> Result<String, RagAdminError>;
}
