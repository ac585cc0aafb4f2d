// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value settings queries.
//!
//! Values are stored as serialized JSON text so a setting can hold either a
//! scalar (the RAG base URL) or a structured object (S3 credentials).

use ragadmin_core::RagAdminError;
use rusqlite::params;

use crate::database::Database;

/// Get a setting value by key, or `None` if absent.
pub async fn get_setting(
    db: &Database,
    key: &str,
) -> Result<Option<serde_json::Value>, RagAdminError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
            let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
            match result {
                Ok(raw) => {
                    let value = serde_json::from_str(&raw)
                        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
                    Ok(Some(value))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}

/// Create or replace a setting.
///
/// A replace keeps the existing description when the caller passes `None`.
pub async fn put_setting(
    db: &Database,
    key: &str,
    value: serde_json::Value,
    description: Option<&str>,
) -> Result<(), RagAdminError> {
    let key = key.to_string();
    let description = description.map(|d| d.to_string());
    db.connection()
        .call(move |conn| {
            let raw = serde_json::to_string(&value)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
            conn.execute(
                "INSERT INTO settings (key, value, description)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     description = COALESCE(excluded.description, settings.description)",
                params![key, raw, description],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}
