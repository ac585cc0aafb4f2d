// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings-backed bearer token cache for the external RAG service.
//!
//! The token and its absolute expiry (epoch milliseconds) live in the
//! `RAG_ACCESS_TOKEN` and `RAG_TOKEN_EXPIRATION` settings so a restart
//! reuses an unexpired token. Refresh happens exactly at expiry with no
//! refresh-ahead margin, and is single-flight: concurrent callers racing
//! past an expired token serialize on one refresh.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use ragadmin_core::{RagAdminError, SettingsStore, TokenSource};

use crate::types::{AuthCredentials, TokenResponse};

const TOKEN_KEY: &str = "RAG_ACCESS_TOKEN";
const EXPIRATION_KEY: &str = "RAG_TOKEN_EXPIRATION";
const AUTH_CONFIG_KEY: &str = "RAG_AUTH_CONFIG";

/// Cached, expiring bearer credential for the RAG service.
pub struct TokenCache {
    settings: Arc<dyn SettingsStore>,
    http: reqwest::Client,
    token_url: String,
    refresh_lock: Mutex<()>,
}

impl TokenCache {
    /// Creates a token cache targeting `token_url`.
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        token_url: String,
        timeout: Duration,
    ) -> Result<Self, RagAdminError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RagAdminError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            settings,
            http,
            token_url,
            refresh_lock: Mutex::new(()),
        })
    }

    /// Returns the cached token if it has not expired.
    async fn cached_token(&self) -> Result<Option<String>, RagAdminError> {
        let token = self.settings.get_setting(TOKEN_KEY).await?;
        let expiration = self.settings.get_setting(EXPIRATION_KEY).await?;

        let (Some(token), Some(expiration)) = (token, expiration) else {
            return Ok(None);
        };
        let Some(token) = token.as_str().map(|s| s.to_string()) else {
            return Ok(None);
        };
        // Expiration may be stored as a number or a numeric string.
        let expires_at = expiration
            .as_i64()
            .or_else(|| expiration.as_str().and_then(|s| s.parse().ok()));
        let Some(expires_at) = expires_at else {
            return Ok(None);
        };

        if chrono::Utc::now().timestamp_millis() < expires_at {
            Ok(Some(token))
        } else {
            Ok(None)
        }
    }

    /// POSTs the password grant to the identity endpoint.
    async fn fetch_token(&self) -> Result<TokenResponse, RagAdminError> {
        let auth_config = self
            .settings
            .get_setting(AUTH_CONFIG_KEY)
            .await?
            .ok_or_else(|| RagAdminError::Auth {
                message: "RAG authentication configuration not found in settings".to_string(),
                source: None,
            })?;
        let credentials = AuthCredentials::from_setting(&auth_config)?;

        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "password"),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| RagAdminError::Auth {
                message: "failed to authenticate with RAG service".to_string(),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "identity endpoint rejected token request");
            return Err(RagAdminError::Auth {
                message: "failed to authenticate with RAG service".to_string(),
                source: None,
            });
        }

        response.json().await.map_err(|e| RagAdminError::Auth {
            message: format!("failed to parse token response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Persists a freshly issued token and its absolute expiry.
    async fn persist(&self, token: &TokenResponse) -> Result<i64, RagAdminError> {
        let expires_at = chrono::Utc::now().timestamp_millis() + token.expires_in * 1000;
        self.settings
            .put_setting(
                TOKEN_KEY,
                serde_json::Value::String(token.access_token.clone()),
                Some("RAG API access token"),
            )
            .await?;
        self.settings
            .put_setting(
                EXPIRATION_KEY,
                serde_json::json!(expires_at),
                Some("RAG API token expiration timestamp"),
            )
            .await?;
        Ok(expires_at)
    }
}

#[async_trait]
impl TokenSource for TokenCache {
    async fn get_valid_token(&self) -> Result<String, RagAdminError> {
        if let Some(token) = self.cached_token().await? {
            return Ok(token);
        }

        // Single-flight refresh: the first caller through the lock fetches,
        // later callers find the fresh token on re-check.
        let _guard = self.refresh_lock.lock().await;
        if let Some(token) = self.cached_token().await? {
            return Ok(token);
        }

        let fresh = self.fetch_token().await?;
        let expires_at = self.persist(&fresh).await?;
        debug!(expires_at, "refreshed RAG access token");
        Ok(fresh.access_token)
    }
}
