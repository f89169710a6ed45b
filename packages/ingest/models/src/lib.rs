#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Batch run outcome, response, and item error-kind types.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// HTTP status returned for a completed run, regardless of item failures.
pub const STATUS_OK: u16 = 200;

/// HTTP status returned when the URL list could not be obtained.
pub const STATUS_SERVER_ERROR: u16 = 500;

/// Fixed message returned when the URL list could not be obtained.
pub const URL_LIST_UNAVAILABLE_MESSAGE: &str = "Erro: O arquivo urls.txt não foi encontrado.";

/// Coarse classification of a per-item failure, for logging.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemErrorKind {
    /// Connection failure, timeout, or non-2xx HTTP status.
    Network,
    /// Anything else: malformed JSON, missing or mistyped fields, or a
    /// failed store write.
    Unexpected,
}

/// Aggregate tally of one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Number of URLs whose record was persisted.
    pub successes: u64,
    /// Number of URLs that failed at any stage.
    pub failures: u64,
}

impl BatchOutcome {
    /// Records the result of one item.
    pub const fn record(&mut self, success: bool) {
        if success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
    }

    /// Total number of items processed.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.successes + self.failures
    }

    /// Human-readable summary returned to the trigger.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Processo finalizado. {} Pokémons salvos, {} falhas.",
            self.successes, self.failures
        )
    }
}

/// What the trigger sends back to its caller: a plain-text body and an
/// HTTP status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Plain-text response body.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Tally for completed runs; `None` when the run never started.
    pub outcome: Option<BatchOutcome>,
}

impl BatchResponse {
    /// Response for a run that processed the whole URL list.
    #[must_use]
    pub fn completed(outcome: BatchOutcome) -> Self {
        Self {
            message: outcome.summary(),
            status: STATUS_OK,
            outcome: Some(outcome),
        }
    }

    /// Response for a run whose URL list could not be loaded.
    #[must_use]
    pub fn url_list_unavailable() -> Self {
        Self {
            message: URL_LIST_UNAVAILABLE_MESSAGE.to_string(),
            status: STATUS_SERVER_ERROR,
            outcome: None,
        }
    }

    /// Whether the run completed (status 200).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}
