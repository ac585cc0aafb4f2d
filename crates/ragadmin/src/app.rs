// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service wiring shared by the `serve` and `reconcile` commands.

use std::sync::Arc;
use std::time::Duration;

use ragadmin_config::RagAdminConfig;
use ragadmin_core::{RagAdminError, RagTransport, RecordStore, SettingsStore, TokenSource};
use ragadmin_provision::Orchestrator;
use ragadmin_rag::{RagClient, TokenCache};
use ragadmin_reconcile::{ProviderConfigRegistry, Reconciler};
use ragadmin_storage::SqliteStore;

/// Fully wired service components backed by the SQLite store.
pub struct App {
    pub store: Arc<SqliteStore>,
    pub orchestrator: Arc<Orchestrator>,
    pub reconciler: Arc<Reconciler>,
}

/// Open the store and construct the orchestrator and reconciler from it.
pub async fn build(config: &RagAdminConfig) -> Result<App, RagAdminError> {
    let store = Arc::new(SqliteStore::open(&config.storage.database_path).await?);
    let settings: Arc<dyn SettingsStore> = store.clone();
    let records: Arc<dyn RecordStore> = store.clone();

    let timeout = Duration::from_secs(config.rag.http_timeout_secs);
    let tokens: Arc<dyn TokenSource> = Arc::new(TokenCache::new(
        settings.clone(),
        config.identity.token_url.clone(),
        timeout,
    )?);
    let rag: Arc<dyn RagTransport> = Arc::new(RagClient::new(settings.clone(), timeout)?);

    let orchestrator = Arc::new(Orchestrator::new(
        records.clone(),
        settings.clone(),
        tokens.clone(),
        rag.clone(),
    ));
    let reconciler = Arc::new(Reconciler::new(
        records,
        settings,
        tokens,
        rag,
        ProviderConfigRegistry::with_defaults(),
        config.reconcile.grace_window_secs,
    ));

    Ok(App {
        store,
        orchestrator,
        reconciler,
    })
}
