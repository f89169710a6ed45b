//! Single-shot HTTP fetching for remote Pokémon resources.
//!
//! Every request goes through a shared [`reqwest::Client`] built by
//! [`build_client`], which carries the per-request timeout. There is no
//! retry: a failed request is reported to the caller immediately and the
//! batch moves on to the next URL.
//!
//! ```ignore
//! let client = fetch::build_client(fetch::DEFAULT_TIMEOUT)?;
//! let body = fetch::fetch_json(&client, "https://pokeapi.co/api/v2/pokemon/1").await?;
//! ```

use std::time::Duration;

use crate::SourceError;

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("poke-loader/", env!("CARGO_PKG_VERSION"));

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 500;

/// Builds the HTTP client shared by all fetches of a run.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(SourceError::Http)
}

/// Sends a GET to `url` and parses the response body as JSON.
///
/// The body is read as text first so a parse failure can be logged with a
/// preview of what the server actually sent.
///
/// # Errors
///
/// * [`SourceError::Http`] if the connection fails, the request times out,
///   the server answers with a 4xx/5xx status, or the body cannot be read.
/// * [`SourceError::Status`] for any other non-2xx status, such as a 3xx
///   that was not followed.
/// * [`SourceError::Json`] if the body is not valid JSON.
pub async fn fetch_json(
    client: &reqwest::Client,
    url: &str,
) -> Result<serde_json::Value, SourceError> {
    log::debug!("GET {url}");

    let response = client.get(url).send().await?.error_for_status()?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_owned(),
            status: status.as_u16(),
        });
    }
    let text = response.text().await?;

    serde_json::from_str(&text).map_err(|e| {
        let preview: String = text.chars().take(BODY_PREVIEW_LEN).collect();
        log::debug!(
            "JSON parse failed.\n  \
             url: {url}\n  \
             status: {status}\n  \
             received: {} bytes\n  \
             parse error: {e}\n  \
             body preview: {preview}",
            text.len(),
        );
        SourceError::Json(e)
    })
}
