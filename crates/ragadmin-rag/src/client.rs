// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authenticated HTTP client for the external RAG service.
//!
//! The base URL is resolved from the `RAG_APP_URL` setting on every call so
//! operators can repoint the service without a restart. The bearer token
//! travels cookie-encoded (`Cookie: Authorization="Bearer <token>"`), which
//! is what the RAG service expects; the encoding must be reproduced
//! bit-for-bit.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::COOKIE;
use tracing::{debug, warn};

use ragadmin_core::types::RagResponse;
use ragadmin_core::{RagAdminError, RagTransport, SettingsStore};

const APP_URL_KEY: &str = "RAG_APP_URL";

/// Generic authenticated GET/POST/PUT wrapper around the RAG REST surface.
///
/// The client never retries; retry policy belongs to the caller.
pub struct RagClient {
    settings: Arc<dyn SettingsStore>,
    http: reqwest::Client,
}

impl RagClient {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        timeout: Duration,
    ) -> Result<Self, RagAdminError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RagAdminError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { settings, http })
    }

    async fn base_url(&self) -> Result<String, RagAdminError> {
        let value = self
            .settings
            .get_setting(APP_URL_KEY)
            .await?
            .ok_or_else(|| {
                RagAdminError::Config(format!("missing required setting: {APP_URL_KEY}"))
            })?;
        value
            .as_str()
            .map(|s| s.trim_end_matches('/').to_string())
            .ok_or_else(|| {
                RagAdminError::Config(format!("setting {APP_URL_KEY} must be a string URL"))
            })
    }

    fn normalize(endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            endpoint.to_string()
        } else {
            format!("/{endpoint}")
        }
    }

    async fn request(
        &self,
        method: Method,
        token: &str,
        endpoint: &str,
        payload: Option<&serde_json::Value>,
    ) -> Result<RagResponse, RagAdminError> {
        let url = format!("{}{}", self.base_url().await?, Self::normalize(endpoint));
        debug!(%method, %url, "RAG request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(COOKIE, format!("Authorization=\"Bearer {token}\""));
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "RAG request failed");
            RagAdminError::Downstream {
                status: None,
                body: e.to_string(),
            }
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(%method, %url, status = %status, body = %text, "RAG returned error");
            return Err(RagAdminError::Downstream {
                status: Some(status.as_u16()),
                body: text,
            });
        }

        let body = serde_json::from_str(&text)
            .unwrap_or(serde_json::Value::String(text));
        Ok(RagResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RagTransport for RagClient {
    async fn get(&self, token: &str, endpoint: &str) -> Result<RagResponse, RagAdminError> {
        self.request(Method::GET, token, endpoint, None).await
    }

    async fn post(
        &self,
        token: &str,
        payload: &serde_json::Value,
        endpoint: &str,
    ) -> Result<RagResponse, RagAdminError> {
        self.request(Method::POST, token, endpoint, Some(payload))
            .await
    }

    async fn put(
        &self,
        token: &str,
        payload: &serde_json::Value,
        endpoint: &str,
        item_id: Option<&str>,
    ) -> Result<RagResponse, RagAdminError> {
        let endpoint = match item_id {
            Some(id) => format!("{}/{id}", Self::normalize(endpoint)),
            None => endpoint.to_string(),
        };
        self.request(Method::PUT, token, &endpoint, Some(payload))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragadmin_test_utils::MemorySettings;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> RagClient {
        let settings = Arc::new(MemorySettings::new());
        settings
            .seed(APP_URL_KEY, serde_json::json!(server.uri()))
            .await;
        RagClient::new(settings, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn get_attaches_cookie_encoded_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manager/api/services"))
            .and(header("cookie", "Authorization=\"Bearer tok-123\""))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"name": "on-contracts-openai"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client.get("tok-123", "/manager/api/services").await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body[0]["name"], "on-contracts-openai");
    }

    #[tokio::test]
    async fn endpoint_without_leading_slash_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manager/api/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.get("tok", "manager/api/services").await.unwrap();
    }

    #[tokio::test]
    async fn post_sends_json_payload() {
        let server = MockServer::start().await;
        let payload = serde_json::json!({"name": "on-contracts-openai", "connectToExternalData": true});
        Mock::given(method("POST"))
            .and(path("/manager/api/services"))
            .and(body_json(&payload))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "svc-1"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client
            .post("tok", &payload, "/manager/api/services")
            .await
            .unwrap();
        assert_eq!(response.body["id"], "svc-1");
    }

    #[tokio::test]
    async fn put_appends_item_id_when_supplied() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/a/on-contracts-openai/api/management/agents/agent-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .put(
                "tok",
                &serde_json::json!({"name": "Default"}),
                "/a/on-contracts-openai/api/management/agents",
                Some("agent-1"),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_2xx_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manager/api/services"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad upstream"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get("tok", "/manager/api/services").await.unwrap_err();
        match err {
            RagAdminError::Downstream { status, body } => {
                assert_eq!(status, Some(502));
                assert_eq!(body, "bad upstream");
            }
            other => panic!("expected downstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_base_url_is_a_config_error() {
        let settings = Arc::new(MemorySettings::new());
        let client = RagClient::new(settings, Duration::from_secs(5)).unwrap();
        let err = client.get("tok", "/anything").await.unwrap_err();
        assert!(matches!(err, RagAdminError::Config(_)));
    }
}
