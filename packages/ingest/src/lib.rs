#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Library for loading Pokémon API resources into the document store.
//!
//! [`processor::ItemProcessor`] handles one URL end to end (fetch, extract,
//! upsert) and never lets an error escape. [`runner::BatchRunner`] walks
//! the URL list in order, tallies successes and failures, and produces the
//! summary returned to whoever triggered the run.

pub mod config;
pub mod processor;
pub mod runner;

use std::sync::Arc;

use poke_loader_database::sqlite::SqliteStore;
use poke_loader_database::{DbError, DocumentStore};
use poke_loader_ingest_models::ItemErrorKind;
use poke_loader_source::SourceError;
use poke_loader_source::url_list::FileUrlSource;

use crate::config::IngestConfig;
use crate::processor::ItemProcessor;
use crate::runner::BatchRunner;

/// Why a single URL failed to load.
///
/// Split into connectivity problems and everything else so logs can tell
/// an unreachable API apart from a payload it could not understand. Both
/// count as one failure in the batch tally.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// Timeout, connection failure, or non-2xx status while fetching.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// URL being processed.
        url: String,
        /// Underlying HTTP error.
        #[source]
        source: SourceError,
    },

    /// Malformed JSON, missing or mistyped fields, or a failed store write.
    #[error("Unexpected error processing {url}: {source}")]
    Unexpected {
        /// URL being processed.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ItemError {
    /// Wraps a fetch-stage error, routing non-network errors (such as a
    /// body that is not JSON) to [`ItemError::Unexpected`].
    #[must_use]
    pub fn from_fetch(url: &str, source: SourceError) -> Self {
        if source.is_network() {
            Self::Fetch {
                url: url.to_owned(),
                source,
            }
        } else {
            Self::unexpected(url, source)
        }
    }

    /// Wraps any other error as [`ItemError::Unexpected`].
    #[must_use]
    pub fn unexpected(
        url: &str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Unexpected {
            url: url.to_owned(),
            source: source.into(),
        }
    }

    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ItemErrorKind {
        match self {
            Self::Fetch { .. } => ItemErrorKind::Network,
            Self::Unexpected { .. } => ItemErrorKind::Unexpected,
        }
    }

    /// Returns the URL that failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. } | Self::Unexpected { url, .. } => url,
        }
    }
}

/// Errors that prevent a runner from being assembled.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The HTTP client could not be built.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The document store could not be opened.
    #[error(transparent)]
    Database(#[from] DbError),
}

/// Opens the `SQLite` document store named by `config`.
///
/// # Errors
///
/// Returns [`IngestError::Database`] if the store cannot be opened.
pub async fn open_store(config: &IngestConfig) -> Result<Arc<dyn DocumentStore>, IngestError> {
    let store = SqliteStore::open(&config.db_path).await?;
    Ok(Arc::new(store))
}

/// Builds a [`BatchRunner`] over the URL file named by `config`, writing
/// into `store`.
///
/// # Errors
///
/// Returns [`IngestError::Source`] if the HTTP client cannot be built.
pub fn runner_from_config(
    config: &IngestConfig,
    store: Arc<dyn DocumentStore>,
) -> Result<BatchRunner, IngestError> {
    let processor = ItemProcessor::from_config(config, store)?;
    let urls = FileUrlSource::new(config.urls_file.clone());
    Ok(BatchRunner::new(processor, Box::new(urls)))
}
