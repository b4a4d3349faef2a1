use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::core::{
    EsgClient, EsgError,
    client::{
        CacheMode, RetryConfig,
        constants::{DEFAULT_COMPANY_PATH, DEFAULT_PRICE_PATH},
    },
};

/// Boxed future returned by [`CsvSource::fetch_csv`].
pub type CsvFuture<'a> = Pin<Box<dyn Future<Output = Result<String, EsgError>> + Send + 'a>>;

/// Somewhere the dashboard's CSV resources can be read from.
///
/// This decouples the loaders and the [`DashboardStore`](crate::DashboardStore) from the
/// transport. It is implemented by [`EsgClient`] (HTTP) and [`DirSource`] (local files).
pub trait CsvSource: Send + Sync {
    /// Fetches the raw text of the resource at `path`.
    ///
    /// # Arguments
    /// * `path` - Resource path, relative to the source's root.
    /// * `cache_mode` - How a response cache, if the source has one, is consulted.
    /// * `retry_override` - Replaces the source's default retry policy for this call.
    fn fetch_csv<'a>(
        &'a self,
        path: &'a str,
        cache_mode: CacheMode,
        retry_override: Option<&'a RetryConfig>,
    ) -> CsvFuture<'a>;

    /// Default path of the company / ESG metadata file.
    fn company_path(&self) -> &str;

    /// Default path of the wide-format price history file.
    fn price_path(&self) -> &str;
}

impl CsvSource for EsgClient {
    fn fetch_csv<'a>(
        &'a self,
        path: &'a str,
        cache_mode: CacheMode,
        retry_override: Option<&'a RetryConfig>,
    ) -> CsvFuture<'a> {
        Box::pin(crate::core::net::fetch_csv(
            self,
            path,
            cache_mode,
            retry_override,
        ))
    }

    fn company_path(&self) -> &str {
        EsgClient::company_path(self)
    }

    fn price_path(&self) -> &str {
        EsgClient::price_path(self)
    }
}

/// Reads the CSV resources from a local directory, e.g. a front end's `static/` folder.
///
/// Caching and retry arguments are ignored.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    company_path: String,
    price_path: String,
}

impl DirSource {
    /// Creates a source rooted at `root` with the default file names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            company_path: DEFAULT_COMPANY_PATH.into(),
            price_path: DEFAULT_PRICE_PATH.into(),
        }
    }

    /// Overrides the company file name.
    #[must_use]
    pub fn with_company_path(mut self, path: impl Into<String>) -> Self {
        self.company_path = path.into();
        self
    }

    /// Overrides the price file name.
    #[must_use]
    pub fn with_price_path(mut self, path: impl Into<String>) -> Self {
        self.price_path = path.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CsvSource for DirSource {
    fn fetch_csv<'a>(
        &'a self,
        path: &'a str,
        _cache_mode: CacheMode,
        _retry_override: Option<&'a RetryConfig>,
    ) -> CsvFuture<'a> {
        Box::pin(async move {
            let full = self.root.join(path.trim_start_matches('/'));
            let body = tokio::fs::read_to_string(&full).await?;
            if body.trim().is_empty() {
                return Err(EsgError::EmptyBody {
                    url: full.display().to_string(),
                });
            }
            tracing::debug!(path = %full.display(), bytes = body.len(), "read CSV from disk");
            Ok(body)
        })
    }

    fn company_path(&self) -> &str {
        &self.company_path
    }

    fn price_path(&self) -> &str {
        &self.price_path
    }
}
