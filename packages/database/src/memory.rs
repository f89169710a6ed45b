//! In-process [`DocumentStore`] for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{DbError, DocumentStore};

/// Document store that keeps everything in a [`BTreeMap`].
///
/// Also counts calls to [`DocumentStore::set`] so callers can assert how
/// many writes a run performed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<(String, String), serde_json::Value>>,
    writes: Mutex<u64>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of [`DocumentStore::set`] calls so far.
    #[must_use]
    pub fn writes(&self) -> u64 {
        *self
            .writes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock(
        &self,
    ) -> std::sync::MutexGuard<'_, BTreeMap<(String, String), serde_json::Value>> {
        self.documents
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn set(
        &self,
        collection: &str,
        key: &str,
        document: &serde_json::Value,
    ) -> Result<(), DbError> {
        self.lock()
            .insert((collection.to_owned(), key.to_owned()), document.clone());
        *self
            .writes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) += 1;
        Ok(())
    }

    async fn get(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DbError> {
        Ok(self
            .lock()
            .get(&(collection.to_owned(), key.to_owned()))
            .cloned())
    }

    async fn count(&self, collection: &str) -> Result<u64, DbError> {
        Ok(self.lock().keys().filter(|(c, _)| c == collection).count() as u64)
    }
}
