mod model;
mod parse;

pub use model::{Company, EsgScores, PillarScore};
pub use parse::{parse_companies, try_parse_companies};

use crate::{
    EsgError,
    core::{
        CsvSource,
        client::{CacheMode, RetryConfig},
    },
};

/// A builder for loading the company / ESG metadata file from a [`CsvSource`].
pub struct CompanyLoader<'a, S: CsvSource + ?Sized> {
    source: &'a S,
    path: Option<String>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl<'a, S: CsvSource + ?Sized> CompanyLoader<'a, S> {
    /// Creates a new `CompanyLoader` reading the source's default company path.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            path: None,
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Reads a different path than the source's default.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the cache mode for this specific load.
    pub fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific load.
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Fetches and parses the company file.
    ///
    /// # Errors
    /// Transport failures, a non-2xx status, and the total parse failures of
    /// [`try_parse_companies`].
    #[tracing::instrument(skip(self), err, fields(path = ?self.path))]
    pub async fn fetch(self) -> Result<Vec<Company>, EsgError> {
        let path = self
            .path
            .as_deref()
            .unwrap_or_else(|| self.source.company_path());
        let text = self
            .source
            .fetch_csv(path, self.cache_mode, self.retry_override.as_ref())
            .await?;
        try_parse_companies(&text)
    }
}
