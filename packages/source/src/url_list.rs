//! Ordered lists of resource URLs to ingest.
//!
//! A batch run asks a [`UrlSource`] for its URLs once, at the start of the
//! run. The file-backed source reads a newline-delimited list; the static
//! source holds an in-memory list supplied by the caller (a request
//! payload, a queue message, a test).

use std::path::PathBuf;

use async_trait::async_trait;

use crate::SourceError;

/// Default location of the newline-delimited URL list.
pub const DEFAULT_URLS_FILE: &str = "urls.txt";

/// Supplies the ordered sequence of URLs for a batch run.
///
/// Implementations return entries verbatim; blank-line filtering is done
/// by the caller via [`non_blank`].
#[async_trait]
pub trait UrlSource: Send + Sync {
    /// Short human-readable description for log output.
    fn describe(&self) -> String;

    /// Loads the URL entries in processing order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the list cannot be obtained.
    async fn load(&self) -> Result<Vec<String>, SourceError>;
}

/// Reads URLs from a newline-delimited text file, one per line.
#[derive(Debug, Clone)]
pub struct FileUrlSource {
    path: PathBuf,
}

impl FileUrlSource {
    /// Creates a source backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UrlSource for FileUrlSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn load(&self) -> Result<Vec<String>, SourceError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(text.lines().map(str::to_owned).collect())
    }
}

/// A fixed, in-memory list of URLs.
#[derive(Debug, Clone, Default)]
pub struct StaticUrlSource {
    urls: Vec<String>,
}

impl StaticUrlSource {
    /// Creates a source that always yields `urls`.
    #[must_use]
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl UrlSource for StaticUrlSource {
    fn describe(&self) -> String {
        format!("static list ({} entries)", self.urls.len())
    }

    async fn load(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.urls.clone())
    }
}

/// Trims each entry and drops the blank ones, preserving order.
#[must_use]
pub fn non_blank<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let trimmed = entry.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        })
        .collect()
}
