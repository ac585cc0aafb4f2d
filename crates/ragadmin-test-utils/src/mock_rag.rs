// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scriptable RagTransport mock for deterministic testing.
//!
//! `MockRag` records every call and returns pre-configured responses,
//! enabling fast orchestrator and reconciler tests without HTTP.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ragadmin_core::types::RagResponse;
use ragadmin_core::{RagAdminError, RagTransport, TokenSource};

/// One recorded transport invocation.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub endpoint: String,
    pub payload: Option<serde_json::Value>,
}

#[derive(Default)]
struct MockState {
    stubs: HashMap<(String, String), RagResponse>,
    failures: HashMap<(String, String), u32>,
    counters: HashMap<(String, String), u32>,
    calls: Vec<RecordedCall>,
}

/// A mock RAG transport with scripted responses and failure injection.
///
/// Unstubbed endpoints return `200 {}`. Failures injected with
/// [`fail_nth`](MockRag::fail_nth) fire on the n-th call (1-based) to the
/// given method and endpoint.
#[derive(Default)]
pub struct MockRag {
    state: Arc<Mutex<MockState>>,
}

impl MockRag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a fixed response for `method` + `endpoint`.
    pub async fn stub(&self, method: &str, endpoint: &str, status: u16, body: serde_json::Value) {
        self.state.lock().await.stubs.insert(
            (method.to_string(), endpoint.to_string()),
            RagResponse { status, body },
        );
    }

    /// Make the n-th call (1-based) to `method` + `endpoint` fail with a
    /// downstream error.
    pub async fn fail_nth(&self, method: &str, endpoint: &str, n: u32) {
        self.state
            .lock()
            .await
            .failures
            .insert((method.to_string(), endpoint.to_string()), n);
    }

    /// All calls recorded so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().await.calls.clone()
    }

    /// Number of calls made to `method` + `endpoint`.
    pub async fn call_count(&self, method: &str, endpoint: &str) -> usize {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|c| c.method == method && c.endpoint == endpoint)
            .count()
    }

    async fn dispatch(
        &self,
        method: &str,
        endpoint: &str,
        payload: Option<&serde_json::Value>,
    ) -> Result<RagResponse, RagAdminError> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            payload: payload.cloned(),
        });

        let key = (method.to_string(), endpoint.to_string());
        let count = state.counters.entry(key.clone()).or_insert(0);
        *count += 1;
        let count = *count;

        if let Some(&fail_on) = state.failures.get(&key)
            && count == fail_on
        {
            return Err(RagAdminError::Downstream {
                status: Some(500),
                body: format!("injected failure for {method} {endpoint}"),
            });
        }

        Ok(state.stubs.get(&key).cloned().unwrap_or(RagResponse {
            status: 200,
            body: serde_json::json!({}),
        }))
    }
}

#[async_trait]
impl RagTransport for MockRag {
    async fn get(&self, _token: &str, endpoint: &str) -> Result<RagResponse, RagAdminError> {
        self.dispatch("GET", endpoint, None).await
    }

    async fn post(
        &self,
        _token: &str,
        payload: &serde_json::Value,
        endpoint: &str,
    ) -> Result<RagResponse, RagAdminError> {
        self.dispatch("POST", endpoint, Some(payload)).await
    }

    async fn put(
        &self,
        _token: &str,
        payload: &serde_json::Value,
        endpoint: &str,
        item_id: Option<&str>,
    ) -> Result<RagResponse, RagAdminError> {
        let effective = match item_id {
            Some(id) => format!("{endpoint}/{id}"),
            None => endpoint.to_string(),
        };
        self.dispatch("PUT", &effective, Some(payload)).await
    }
}

/// A token source returning a fixed token, never touching the network.
pub struct StaticTokens {
    token: String,
}

impl StaticTokens {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokens {
    async fn get_valid_token(&self) -> Result<String, RagAdminError> {
        Ok(self.token.clone())
    }
}
