// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Container record queries.
//!
//! The reconciler only flips `configured` and replaces metadata; inserts
//! and deletes belong to the provisioning orchestrator.

use std::str::FromStr;

use ragadmin_core::types::{Container, ProviderType};
use ragadmin_core::RagAdminError;
use rusqlite::params;

use crate::database::Database;

const SELECT_COLUMNS: &str =
    "id, name, assistant_id, provider_type, configured, metadata, created_at";

fn row_to_container(
    row: &rusqlite::Row<'_>,
) -> Result<(Container, String, String), rusqlite::Error> {
    let provider_raw: String = row.get(3)?;
    let metadata_raw: String = row.get(5)?;
    Ok((
        Container {
            id: row.get(0)?,
            name: row.get(1)?,
            assistant_id: row.get(2)?,
            provider_type: ProviderType::OpenAI, // replaced in finish()
            configured: row.get::<_, i64>(4)? != 0,
            metadata: serde_json::Value::Null,
            created_at: row.get(6)?,
        },
        provider_raw,
        metadata_raw,
    ))
}

fn finish(
    triple: (Container, String, String),
) -> Result<Container, Box<dyn std::error::Error + Send + Sync>> {
    let (mut container, provider_raw, metadata_raw) = triple;
    container.provider_type = ProviderType::from_str(&provider_raw)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    container.metadata = serde_json::from_str(&metadata_raw)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    Ok(container)
}

/// Insert a new container.
pub async fn insert(db: &Database, container: &Container) -> Result<(), RagAdminError> {
    let container = container.clone();
    db.connection()
        .call(move |conn| {
            let metadata = serde_json::to_string(&container.metadata)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            conn.execute(
                "INSERT INTO containers (id, name, assistant_id, provider_type, configured, metadata, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    container.id,
                    container.name,
                    container.assistant_id,
                    container.provider_type.to_string(),
                    container.configured as i64,
                    metadata,
                    container.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}

/// List containers owned by an assistant, in creation order.
pub async fn for_assistant(
    db: &Database,
    assistant_id: &str,
) -> Result<Vec<Container>, RagAdminError> {
    let assistant_id = assistant_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM containers
                 WHERE assistant_id = ?1 ORDER BY created_at, name"
            ))?;
            let rows = stmt.query_map(params![assistant_id], row_to_container)?;
            let mut containers = Vec::new();
            for row in rows {
                containers.push(finish(row?)?);
            }
            Ok(containers)
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}

/// Delete all containers owned by an assistant (provisioning rollback).
pub async fn delete_for_assistant(
    db: &Database,
    assistant_id: &str,
) -> Result<(), RagAdminError> {
    let assistant_id = assistant_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM containers WHERE assistant_id = ?1",
                params![assistant_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Replace a container's metadata blob.
pub async fn update_metadata(
    db: &Database,
    id: &str,
    metadata: &serde_json::Value,
) -> Result<(), RagAdminError> {
    let id = id.to_string();
    let metadata = metadata.clone();
    db.connection()
        .call(move |conn| {
            let raw = serde_json::to_string(&metadata)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            conn.execute(
                "UPDATE containers SET metadata = ?2 WHERE id = ?1",
                params![id, raw],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}

/// Mark a container configured. Idempotent.
pub async fn mark_configured(db: &Database, id: &str) -> Result<(), RagAdminError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE containers SET configured = 1 WHERE id = ?1",
                params![id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List unconfigured containers created strictly before `cutoff`.
///
/// Timestamps are RFC 3339 UTC strings with fixed precision, so string
/// comparison matches chronological order.
pub async fn unconfigured_before(
    db: &Database,
    cutoff: &str,
) -> Result<Vec<Container>, RagAdminError> {
    let cutoff = cutoff.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM containers
                 WHERE configured = 0 AND created_at < ?1
                 ORDER BY created_at"
            ))?;
            let rows = stmt.query_map(params![cutoff], row_to_container)?;
            let mut containers = Vec::new();
            for row in rows {
                containers.push(finish(row?)?);
            }
            Ok(containers)
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}
