// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports `./ragadmin.toml` > `~/.config/ragadmin/ragadmin.toml` >
//! `/etc/ragadmin/ragadmin.toml` with environment variable overrides via
//! the `RAGADMIN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::RagAdminConfig;

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/ragadmin/ragadmin.toml` (system-wide)
/// 3. `~/.config/ragadmin/ragadmin.toml` (user XDG config)
/// 4. `./ragadmin.toml` (local directory)
/// 5. `RAGADMIN_*` environment variables
pub fn load_config() -> Result<RagAdminConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RagAdminConfig::default()))
        .merge(Toml::file("/etc/ragadmin/ragadmin.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("ragadmin/ragadmin.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("ragadmin.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no file hierarchy lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<RagAdminConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RagAdminConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RagAdminConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RagAdminConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay intact: `RAGADMIN_RECONCILE_GRACE_WINDOW_SECS` must map to
/// `reconcile.grace_window_secs`, not `reconcile.grace.window.secs`.
fn env_provider() -> Env {
    Env::prefixed("RAGADMIN_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("identity_", "identity.", 1)
            .replacen("rag_", "rag.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("reconcile_", "reconcile.", 1);
        mapped.into()
    })
}
