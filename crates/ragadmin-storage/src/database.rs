// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use ragadmin_core::RagAdminError;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// Handle to the single SQLite connection.
///
/// Opening a `Database` applies PRAGMAs and runs all pending embedded
/// migrations before returning.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run
    /// migrations.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RagAdminError> {
        let conn = Connection::open(path.as_ref())
            .await
            .map_err(|e| map_tr_err(e.into()))?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;",
            )?;
            migrations::run_migrations(conn)?;
            Ok(())
        })
        .await
        .map_err(map_tr_box_err)?;

        debug!(path = %path.as_ref().display(), "database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), RagAdminError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Convert a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err(err: tokio_rusqlite::Error) -> RagAdminError {
    RagAdminError::Storage {
        source: Box::new(err),
    }
}

/// Convert a tokio-rusqlite error carrying a boxed application error into
/// the workspace error type.
pub fn map_tr_box_err(
    err: tokio_rusqlite::Error<Box<dyn std::error::Error + Send + Sync>>,
) -> RagAdminError {
    // `Box<dyn Error>` does not itself implement `Error`, so the generic
    // error variant is unwrapped rather than boxed a second time.
    let source: Box<dyn std::error::Error + Send + Sync> = match err {
        tokio_rusqlite::Error::Error(e) => e,
        tokio_rusqlite::Error::ConnectionClosed => {
            let e: tokio_rusqlite::Error = tokio_rusqlite::Error::ConnectionClosed;
            Box::new(e)
        }
        tokio_rusqlite::Error::Close(inner) => {
            let e: tokio_rusqlite::Error = tokio_rusqlite::Error::Close(inner);
            Box::new(e)
        }
        // The enum is #[non_exhaustive]; treat unknown variants as a
        // closed connection.
        _ => {
            let e: tokio_rusqlite::Error = tokio_rusqlite::Error::ConnectionClosed;
            Box::new(e)
        }
    };
    RagAdminError::Storage { source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database_file_and_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("open.db");
        let db = Database::open(&path).await.unwrap();
        assert!(path.exists());

        // Migrations must have created the settings table.
        let count: i64 = db
            .connection()
            .call(|conn| {
                let n = conn.query_row(
                    "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='settings'",
                    [],
                    |row| row.get(0),
                )?;
                Ok::<_, rusqlite::Error>(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn open_twice_is_idempotent_for_migrations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        let db = Database::open(&path).await.unwrap();
        db.close().await.unwrap();
        // Second open re-runs the migration runner against applied history.
        Database::open(&path).await.unwrap();
    }
}
