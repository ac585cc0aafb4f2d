// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the ragadmin service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level ragadmin configuration.
///
/// Loaded from `ragadmin.toml` with `RAGADMIN_*` environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RagAdminConfig {
    /// Service identity and logging.
    #[serde(default)]
    pub service: ServiceConfig,

    /// SQLite storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// OAuth identity endpoint settings.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Outbound RAG service HTTP settings.
    #[serde(default)]
    pub rag: RagConfig,

    /// Inbound HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Reconciliation loop settings.
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "ragadmin.db".to_string()
}

/// OAuth identity endpoint configuration.
///
/// Client credentials live in the `RAG_AUTH_CONFIG` setting, not here;
/// this section only locates the token endpoint itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    /// Full URL of the OAuth token endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
        }
    }
}

fn default_token_url() -> String {
    "https://rag.lawvo.com/auth/realms/ragapp/protocol/openid-connect/token".to_string()
}

/// Outbound HTTP settings for calls to the RAG service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RagConfig {
    /// Per-request timeout in seconds for outbound RAG and identity calls.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

fn default_http_timeout_secs() -> u64 {
    60
}

/// Inbound HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8090
}

/// Reconciliation loop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReconcileConfig {
    /// Containers younger than this many seconds are skipped, giving a
    /// just-created remote container time to finish booting before the
    /// reconciler probes it.
    #[serde(default = "default_grace_window_secs")]
    pub grace_window_secs: u64,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            grace_window_secs: default_grace_window_secs(),
        }
    }
}

fn default_grace_window_secs() -> u64 {
    60
}
