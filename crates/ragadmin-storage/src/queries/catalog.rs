// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Province and service-category lookup queries.
//!
//! These records are seeded by the operator (or tests) and resolved by the
//! orchestrator when validating a creation request.

use ragadmin_core::types::{Province, ServiceCategory};
use ragadmin_core::RagAdminError;
use rusqlite::params;

use crate::database::Database;

/// Find a province by its external identifier.
pub async fn find_province(
    db: &Database,
    external_id: i64,
) -> Result<Option<Province>, RagAdminError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, name, code FROM provinces WHERE external_id = ?1",
            )?;
            let result = stmt.query_row(params![external_id], |row| {
                Ok(Province {
                    id: row.get(0)?,
                    external_id: row.get(1)?,
                    name: row.get(2)?,
                    code: row.get(3)?,
                })
            });
            match result {
                Ok(province) => Ok(Some(province)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Find a service category by its external identifier.
pub async fn find_service_category(
    db: &Database,
    external_id: i64,
) -> Result<Option<ServiceCategory>, RagAdminError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, name FROM service_categories WHERE external_id = ?1",
            )?;
            let result = stmt.query_row(params![external_id], |row| {
                Ok(ServiceCategory {
                    id: row.get(0)?,
                    external_id: row.get(1)?,
                    name: row.get(2)?,
                })
            });
            match result {
                Ok(category) => Ok(Some(category)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Find a province by record id.
pub async fn get_province(db: &Database, id: &str) -> Result<Option<Province>, RagAdminError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, external_id, name, code FROM provinces WHERE id = ?1")?;
            let result = stmt.query_row(params![id], |row| {
                Ok(Province {
                    id: row.get(0)?,
                    external_id: row.get(1)?,
                    name: row.get(2)?,
                    code: row.get(3)?,
                })
            });
            match result {
                Ok(province) => Ok(Some(province)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Find a service category by record id.
pub async fn get_service_category(
    db: &Database,
    id: &str,
) -> Result<Option<ServiceCategory>, RagAdminError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn
                .prepare("SELECT id, external_id, name FROM service_categories WHERE id = ?1")?;
            let result = stmt.query_row(params![id], |row| {
                Ok(ServiceCategory {
                    id: row.get(0)?,
                    external_id: row.get(1)?,
                    name: row.get(2)?,
                })
            });
            match result {
                Ok(category) => Ok(Some(category)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a province (operator seeding).
pub async fn insert_province(db: &Database, province: &Province) -> Result<(), RagAdminError> {
    let province = province.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO provinces (id, external_id, name, code) VALUES (?1, ?2, ?3, ?4)",
                params![province.id, province.external_id, province.name, province.code],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a service category (operator seeding).
pub async fn insert_service_category(
    db: &Database,
    category: &ServiceCategory,
) -> Result<(), RagAdminError> {
    let category = category.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO service_categories (id, external_id, name) VALUES (?1, ?2, ?3)",
                params![category.id, category.external_id, category.name],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
