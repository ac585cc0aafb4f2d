// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ragadmin reconcile` command implementation.
//!
//! Runs a single reconciliation pass and prints the summary as JSON;
//! designed to be driven by cron.

use ragadmin_config::RagAdminConfig;
use ragadmin_core::RagAdminError;

use crate::app;

pub async fn run(config: &RagAdminConfig) -> Result<(), RagAdminError> {
    let app = app::build(config).await?;
    let summary = app.reconciler.process_unconfigured_containers().await?;
    let rendered = serde_json::to_string_pretty(&summary)
        .map_err(|e| RagAdminError::Internal(format!("failed to render summary: {e}")))?;
    println!("{rendered}");
    app.store.close().await?;
    Ok(())
}
