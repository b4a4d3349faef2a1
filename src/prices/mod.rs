mod model;
mod table;

pub use model::{PricePoint, PriceRow};
pub use table::PriceTable;

use crate::{
    EsgError,
    core::{
        CsvSource,
        client::{CacheMode, RetryConfig},
    },
};

/// A builder for loading the wide-format price history from a [`CsvSource`].
pub struct PriceLoader<'a, S: CsvSource + ?Sized> {
    source: &'a S,
    path: Option<String>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl<'a, S: CsvSource + ?Sized> PriceLoader<'a, S> {
    /// Creates a new `PriceLoader` reading the source's default price path.
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

    /// Fetches and parses the whole price file.
    #[tracing::instrument(skip(self), err, fields(path = ?self.path))]
    pub async fn fetch_table(&self) -> Result<PriceTable, EsgError> {
        let path = self
            .path
            .as_deref()
            .unwrap_or_else(|| self.source.price_path());
        let text = self
            .source
            .fetch_csv(path, self.cache_mode, self.retry_override.as_ref())
            .await?;
        PriceTable::parse(&text)
    }

    /// Fetches the price file and extracts one ticker's series.
    ///
    /// # Errors
    /// Everything [`fetch_table`](Self::fetch_table) can return, plus
    /// [`EsgError::UnknownSymbol`] when the ticker has no column.
    pub async fn fetch_series(&self, symbol: &str) -> Result<Vec<PricePoint>, EsgError> {
        self.fetch_table().await?.series(symbol)
    }
}
