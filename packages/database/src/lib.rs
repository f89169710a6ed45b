#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Document store for normalized Pokémon records.
//!
//! Documents are JSON objects grouped into named collections and addressed
//! by a string key. The only write is [`DocumentStore::set`], a
//! full-document upsert: it creates the document when the key is new and
//! replaces it wholesale otherwise, so fields dropped from the record
//! shape never linger in stored documents.
//!
//! [`sqlite::SqliteStore`] persists to a `SQLite` file through
//! `switchy_database`; [`memory::MemoryStore`] keeps everything in process
//! for tests and dry runs.

pub mod memory;
pub mod paths;
pub mod sqlite;

use async_trait::async_trait;

/// Errors that can occur during document store operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A database query or command failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored document could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key-addressed JSON document persistence with upsert semantics.
///
/// Created once per process and shared across batch runs. Implementations
/// must be safe for repeated sequential calls; concurrent writes to the
/// same key resolve as last-write-wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `document` at `key` in `collection`, replacing any existing
    /// document at that key in full.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the write fails.
    async fn set(
        &self,
        collection: &str,
        key: &str,
        document: &serde_json::Value,
    ) -> Result<(), DbError>;

    /// Reads the document at `key` in `collection`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the read fails or the stored data is corrupt.
    async fn get(&self, collection: &str, key: &str)
    -> Result<Option<serde_json::Value>, DbError>;

    /// Returns the number of documents in `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the query fails.
    async fn count(&self, collection: &str) -> Result<u64, DbError>;
}
