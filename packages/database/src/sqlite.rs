//! `SQLite`-backed [`DocumentStore`].
//!
//! All collections share one `documents` table keyed by
//! `(collection, id)`. The document body is stored as serialized JSON in
//! `data`; an upsert overwrites `data` wholesale rather than merging.

use std::path::Path;

use async_trait::async_trait;
use moosicbox_json_utils::database::ToValue as _;
use switchy_database::{Database, DatabaseValue};
use switchy_database_connection::init_sqlite_rusqlite;

use crate::{DbError, DocumentStore};

/// Document store persisted to a `SQLite` file.
pub struct SqliteStore {
    db: Box<dyn Database>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Opens (or creates) the store at `path` and ensures the schema
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or schema
    /// creation fails.
    pub async fn open(path: &Path) -> Result<Self, DbError> {
        crate::paths::ensure_parent_dir(path)?;

        log::debug!("Opening document store at {}", path.display());
        let db = init_sqlite_rusqlite(Some(path)).map_err(|e| DbError::Database(e.to_string()))?;

        Self::from_database(db).await
    }

    /// Wraps an already-open connection and ensures the schema exists.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if schema creation fails.
    pub async fn from_database(db: Box<dyn Database>) -> Result<Self, DbError> {
        ensure_schema(db.as_ref()).await?;
        Ok(Self { db })
    }
}

/// Creates the `documents` table if it doesn't already exist.
async fn ensure_schema(db: &dyn Database) -> Result<(), DbError> {
    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS documents (
            collection  TEXT NOT NULL,
            id          TEXT NOT NULL,
            data        TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        )",
    )
    .await
    .map_err(|e| DbError::Database(e.to_string()))?;

    Ok(())
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn set(
        &self,
        collection: &str,
        key: &str,
        document: &serde_json::Value,
    ) -> Result<(), DbError> {
        let data = serde_json::to_string(document)?;
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .exec_raw_params(
                "INSERT INTO documents (collection, id, data, updated_at)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (collection, id) DO UPDATE SET
                   data = excluded.data,
                   updated_at = excluded.updated_at",
                &[
                    DatabaseValue::String(collection.to_string()),
                    DatabaseValue::String(key.to_string()),
                    DatabaseValue::String(data),
                    DatabaseValue::String(now),
                ],
            )
            .await
            .map_err(|e| DbError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DbError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT data FROM documents WHERE collection = $1 AND id = $2",
                &[
                    DatabaseValue::String(collection.to_string()),
                    DatabaseValue::String(key.to_string()),
                ],
            )
            .await
            .map_err(|e| DbError::Database(e.to_string()))?;

        let Some(row) = rows.first() else {
            return Ok(None);
        };

        let data: String = row
            .to_value("data")
            .map_err(|e| DbError::Database(e.to_string()))?;

        Ok(Some(serde_json::from_str(&data)?))
    }

    async fn count(&self, collection: &str) -> Result<u64, DbError> {
        let rows = self
            .db
            .query_raw_params(
                "SELECT COUNT(*) AS document_count FROM documents WHERE collection = $1",
                &[DatabaseValue::String(collection.to_string())],
            )
            .await
            .map_err(|e| DbError::Database(e.to_string()))?;

        let count: i64 = rows
            .first()
            .map(|row| row.to_value("document_count"))
            .transpose()
            .map_err(|e| DbError::Database(e.to_string()))?
            .unwrap_or(0);

        Ok(u64::try_from(count).unwrap_or(0))
    }
}
