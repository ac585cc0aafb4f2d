// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the identity endpoint and settings-backed credentials.

use serde::Deserialize;

use ragadmin_core::RagAdminError;

/// Successful response from the OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// OAuth client credentials resolved from the `RAG_AUTH_CONFIG` setting.
///
/// The target deployment is single-tenant, so client id, username, and
/// password fall back to fixed defaults when absent; only the client
/// secret has no default.
#[derive(Debug, Clone)]
pub struct AuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl AuthCredentials {
    /// Parse credentials from the raw setting value.
    pub fn from_setting(value: &serde_json::Value) -> Result<Self, RagAdminError> {
        let field = |key: &str| {
            value
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };
        Ok(Self {
            client_id: field("client_id").unwrap_or_else(|| "api".to_string()),
            client_secret: field("client_secret").unwrap_or_default(),
            username: field("username").unwrap_or_else(|| "manager".to_string()),
            password: field("password").unwrap_or_else(|| "123456".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_apply_single_tenant_defaults() {
        let value = serde_json::json!({ "client_secret": "s3cret" });
        let creds = AuthCredentials::from_setting(&value).unwrap();
        assert_eq!(creds.client_id, "api");
        assert_eq!(creds.client_secret, "s3cret");
        assert_eq!(creds.username, "manager");
        assert_eq!(creds.password, "123456");
    }

    #[test]
    fn credentials_prefer_explicit_values() {
        let value = serde_json::json!({
            "client_id": "custom",
            "client_secret": "s",
            "username": "ops",
            "password": "pw"
        });
        let creds = AuthCredentials::from_setting(&value).unwrap();
        assert_eq!(creds.client_id, "custom");
        assert_eq!(creds.username, "ops");
        assert_eq!(creds.password, "pw");
    }
}
