//! Fetch, extract, and upsert for a single resource URL.

use std::sync::Arc;

use poke_loader_database::DocumentStore;
use poke_loader_ingest_models::ItemErrorKind;
use poke_loader_pokemon_models::Pokemon;
use poke_loader_source::SourceError;
use poke_loader_source::extract::extract_pokemon;
use poke_loader_source::fetch;

use crate::ItemError;
use crate::config::IngestConfig;

/// Loads one remote resource into the document store.
///
/// The record's own `id` is the document key, so processing the same URL
/// again overwrites the earlier document instead of adding another.
pub struct ItemProcessor {
    client: reqwest::Client,
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl std::fmt::Debug for ItemProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemProcessor")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl ItemProcessor {
    /// Creates a processor that fetches with `client` and writes into
    /// `collection` of `store`.
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            client,
            store,
            collection: collection.into(),
        }
    }

    /// Creates a processor with the timeout and collection from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the HTTP client cannot be built.
    pub fn from_config(
        config: &IngestConfig,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, SourceError> {
        let client = fetch::build_client(config.timeout)?;
        Ok(Self::new(client, store, config.collection.clone()))
    }

    /// Returns the collection this processor writes into.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Processes `url` and reports whether its record was persisted.
    ///
    /// Never fails: every error is logged and collapsed to `false`.
    pub async fn process(&self, url: &str) -> bool {
        match self.try_process(url).await {
            Ok(pokemon) => {
                log::info!(
                    "Saved Pokémon {} (ID: {})",
                    pokemon.display_name(),
                    pokemon.id
                );
                true
            }
            Err(e) => {
                match e.kind() {
                    ItemErrorKind::Network => log::warn!("{e}"),
                    ItemErrorKind::Unexpected => log::error!("{e}"),
                }
                false
            }
        }
    }

    /// Processes `url`, returning the stored record or the classified
    /// error.
    ///
    /// The store is only touched after the fetch and extraction both
    /// succeed.
    ///
    /// # Errors
    ///
    /// * [`ItemError::Fetch`] on timeout, connection failure, or non-2xx
    ///   status.
    /// * [`ItemError::Unexpected`] on malformed JSON, missing or mistyped
    ///   fields, or a failed store write.
    pub async fn try_process(&self, url: &str) -> Result<Pokemon, ItemError> {
        let body = fetch::fetch_json(&self.client, url)
            .await
            .map_err(|e| ItemError::from_fetch(url, e))?;

        let pokemon = extract_pokemon(&body).map_err(|e| ItemError::unexpected(url, e))?;

        let document = serde_json::to_value(&pokemon).map_err(|e| ItemError::unexpected(url, e))?;

        self.store
            .set(&self.collection, &pokemon.document_key(), &document)
            .await
            .map_err(|e| ItemError::unexpected(url, e))?;

        Ok(pokemon)
    }
}
