#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Remote Pokémon API access and normalization.
//!
//! [`fetch`] issues the bounded-timeout GET against a single resource URL,
//! [`extract`] reduces the JSON body to a
//! [`Pokemon`](poke_loader_pokemon_models::Pokemon), and [`url_list`]
//! provides the ordered list of resource URLs a batch run walks through.

pub mod extract;
pub mod fetch;
pub mod url_list;

/// Errors that can occur while fetching or normalizing a remote resource.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed: connection error, timeout, or error status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a status outside 2xx that the client did
    /// not turn into an error (for example an unfollowed 3xx).
    #[error("HTTP {status} from {url}")]
    Status {
        /// URL that was requested.
        url: String,
        /// Status code received.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (reading a URL list file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON was well-formed but lacked a required field or had a
    /// field of the wrong type.
    #[error("Normalization error: {message}")]
    Normalization {
        /// Description of what went wrong.
        message: String,
    },
}

impl SourceError {
    /// Returns `true` for connectivity-level failures (timeouts, refused
    /// connections, non-2xx statuses) as opposed to data-shape problems.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}
