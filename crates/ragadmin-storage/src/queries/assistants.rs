// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant record queries.

use ragadmin_core::types::Assistant;
use ragadmin_core::RagAdminError;
use rusqlite::params;

use crate::database::Database;

fn row_to_assistant(row: &rusqlite::Row<'_>) -> Result<(Assistant, String), rusqlite::Error> {
    // Metadata comes back as raw JSON text; parsed by the caller so this
    // stays a plain rusqlite row mapper.
    let raw_metadata: String = row.get(4)?;
    Ok((
        Assistant {
            id: row.get(0)?,
            name: row.get(1)?,
            province_id: row.get(2)?,
            service_category_id: row.get(3)?,
            metadata: Default::default(),
            created_at: row.get(5)?,
        },
        raw_metadata,
    ))
}

fn finish(
    pair: (Assistant, String),
) -> Result<Assistant, Box<dyn std::error::Error + Send + Sync>> {
    let (mut assistant, raw) = pair;
    assistant.metadata = serde_json::from_str(&raw)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    Ok(assistant)
}

/// Find an assistant by its unique name.
pub async fn find_by_name(db: &Database, name: &str) -> Result<Option<Assistant>, RagAdminError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, province_id, service_category_id, metadata, created_at
                 FROM assistants WHERE name = ?1",
            )?;
            let result = stmt.query_row(params![name], row_to_assistant);
            match result {
                Ok(pair) => Ok(Some(finish(pair)?)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}

/// Get an assistant by record id.
pub async fn get(db: &Database, id: &str) -> Result<Option<Assistant>, RagAdminError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, province_id, service_category_id, metadata, created_at
                 FROM assistants WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], row_to_assistant);
            match result {
                Ok(pair) => Ok(Some(finish(pair)?)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}

/// Insert a new assistant.
pub async fn insert(db: &Database, assistant: &Assistant) -> Result<(), RagAdminError> {
    let assistant = assistant.clone();
    db.connection()
        .call(move |conn| {
            let metadata = serde_json::to_string(&assistant.metadata)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            conn.execute(
                "INSERT INTO assistants (id, name, province_id, service_category_id, metadata, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    assistant.id,
                    assistant.name,
                    assistant.province_id,
                    assistant.service_category_id,
                    metadata,
                    assistant.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}

/// Delete an assistant by id (provisioning rollback).
pub async fn delete(db: &Database, id: &str) -> Result<(), RagAdminError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("DELETE FROM assistants WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
