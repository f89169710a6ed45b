//! Runtime configuration for a batch run.
//!
//! Values come from environment variables, falling back to defaults when
//! unset or unparseable. Binaries read the environment once at startup and
//! then apply any command-line overrides.

use std::path::PathBuf;
use std::time::Duration;

use poke_loader_database::paths::DEFAULT_DB_PATH;
use poke_loader_pokemon_models::COLLECTION;
use poke_loader_source::fetch::DEFAULT_TIMEOUT;
use poke_loader_source::url_list::DEFAULT_URLS_FILE;

/// Path to the newline-delimited URL list.
pub const URLS_FILE_VAR: &str = "POKE_LOADER_URLS_FILE";
/// Path to the `SQLite` document store.
pub const DB_PATH_VAR: &str = "POKE_LOADER_DB_PATH";
/// Document-store collection name.
pub const COLLECTION_VAR: &str = "POKE_LOADER_COLLECTION";
/// Per-request timeout in whole seconds.
pub const TIMEOUT_SECS_VAR: &str = "POKE_LOADER_TIMEOUT_SECS";

/// Settings shared by the CLI and the HTTP trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Where the URL list is read from.
    pub urls_file: PathBuf,
    /// Where the `SQLite` document store lives.
    pub db_path: PathBuf,
    /// Collection the records are written to.
    pub collection: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            urls_file: PathBuf::from(DEFAULT_URLS_FILE),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            collection: COLLECTION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl IngestConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// are treated as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = get(TIMEOUT_SECS_VAR).map_or(defaults.timeout, |raw| {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    log::warn!(
                        "Ignoring invalid {TIMEOUT_SECS_VAR}={raw:?}, using {}s",
                        defaults.timeout.as_secs()
                    );
                    defaults.timeout
                }
            }
        });

        Self {
            urls_file: get(URLS_FILE_VAR).map_or(defaults.urls_file, PathBuf::from),
            db_path: get(DB_PATH_VAR).map_or(defaults.db_path, PathBuf::from),
            collection: get(COLLECTION_VAR).unwrap_or(defaults.collection),
            timeout,
        }
    }

    /// Overrides the URL list path.
    #[must_use]
    pub fn with_urls_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.urls_file = path.into();
        self
    }

    /// Overrides the document store path.
    #[must_use]
    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    /// Overrides the collection name.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
