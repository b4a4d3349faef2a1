//! Public client surface + builder.
//! Internals are split into `retry` (policy + cache modes) and `constants` (UA + defaults).

pub(crate) mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::EsgError;
use constants::{DEFAULT_BASE_URL, DEFAULT_COMPANY_PATH, DEFAULT_PRICE_PATH, USER_AGENT};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug)]
struct CacheEntry {
    body: String,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheStore {
    map: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

/// HTTP client for the dashboard's static CSV resources.
///
/// Cloning is cheap; clones share the connection pool and the body cache.
#[derive(Debug, Clone)]
pub struct EsgClient {
    http: Client,
    base_url: Url,
    company_path: String,
    price_path: String,
    retry: RetryConfig,
    cache: Option<Arc<CacheStore>>,
}

impl Default for EsgClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl EsgClient {
    /// Create a new builder.
    pub fn builder() -> EsgClientBuilder {
        EsgClientBuilder::default()
    }

    /// The host every resource path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Path of the company / ESG metadata file.
    pub fn company_path(&self) -> &str {
        &self.company_path
    }

    /// Path of the wide-format price history file.
    pub fn price_path(&self) -> &str {
        &self.price_path
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /* -------- internal helpers used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn resolve(&self, path: &str) -> Result<Url, EsgError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) async fn cache_get(&self, url: &Url) -> Option<String> {
        let store = self.cache.as_ref()?;
        let guard = store.map.read().await;
        if let Some(entry) = guard.get(url.as_str())
            && Instant::now() <= entry.expires_at
        {
            return Some(entry.body.clone());
        }
        None
    }

    pub(crate) async fn cache_put(&self, url: &Url, body: &str) {
        let Some(store) = &self.cache else {
            return;
        };
        let entry = CacheEntry {
            body: body.to_string(),
            expires_at: Instant::now() + store.default_ttl,
        };
        store.map.write().await.insert(url.as_str().to_string(), entry);
    }

    /// Drops every cached body.
    pub async fn clear_cache(&self) {
        if let Some(store) = &self.cache {
            store.map.write().await.clear();
        }
    }

    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, EsgError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        if !cfg.enabled || cfg.max_retries == 0 {
            return Ok(req.send().await?);
        }

        let mut attempt = 0u32;
        loop {
            let this = req
                .try_clone()
                .ok_or_else(|| EsgError::Data("request cannot be retried".into()))?;

            match this.send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if attempt < cfg.max_retries && cfg.retry_on_status.contains(&status) {
                        let delay = cfg.backoff.delay(attempt);
                        tracing::warn!(status, attempt, ?delay, url = %resp.url(), "retrying after status");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Ok(resp);
                }
                Err(e) => {
                    let retryable = (cfg.retry_on_timeout && e.is_timeout())
                        || (cfg.retry_on_connect && e.is_connect());
                    if retryable && attempt < cfg.max_retries {
                        let delay = cfg.backoff.delay(attempt);
                        tracing::warn!(error = %e, attempt, ?delay, "retrying after transport error");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct EsgClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    company_path: Option<String>,
    price_path: Option<String>,
    retry: Option<RetryConfig>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
}

impl EsgClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the host serving the CSV files (e.g., `https://dashboard.example.com/static/`).
    ///
    /// Keep the trailing slash if the files live under a sub-path.
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Override the company / ESG metadata path. Default: `processed_sp500_esg_data.csv`.
    pub fn company_path(mut self, path: impl Into<String>) -> Self {
        self.company_path = Some(path.into());
        self
    }

    /// Override the price history path. Default: `sp500_price_data.csv`.
    pub fn price_path(mut self, path: impl Into<String>) -> Self {
        self.price_path = Some(path.into());
        self
    }

    /// Set the default retry policy. Default: disabled (one attempt per load).
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Enable in-memory caching of response bodies with a default TTL.
    /// If not set, caching is disabled.
    pub fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    pub fn build(self) -> Result<EsgClient, EsgError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(EsgClient {
            http,
            base_url,
            company_path: self
                .company_path
                .unwrap_or_else(|| DEFAULT_COMPANY_PATH.to_string()),
            price_path: self
                .price_path
                .unwrap_or_else(|| DEFAULT_PRICE_PATH.to_string()),
            retry: self.retry.unwrap_or_default(),
            cache: self.cache_ttl.map(|ttl| {
                Arc::new(CacheStore {
                    map: RwLock::new(HashMap::new()),
                    default_ttl: ttl,
                })
            }),
        })
    }
}
