use crate::core::{
    EsgClient, EsgError,
    client::{CacheMode, RetryConfig},
};

/// Read the response body as text.
/// In `test-mode`, if `ESG_RECORD=1`, the body is saved as a fixture named after the resource.
pub(crate) async fn get_text(resp: reqwest::Response, _name: &str) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if std::env::var("ESG_RECORD").ok().as_deref() == Some("1") {
            match crate::core::fixtures::record_fixture(_name, &text) {
                Ok(path) => tracing::debug!(path = %path.display(), "recorded fixture"),
                Err(e) => tracing::warn!(error = %e, name = _name, "failed to record fixture"),
            }
        }
    }

    Ok(text)
}

/// Fetches one CSV resource relative to the client's base URL.
///
/// A non-2xx status and a whitespace-only body are both errors; callers decide
/// whether to degrade them to "no data".
pub(crate) async fn fetch_csv(
    client: &EsgClient,
    path: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<String, EsgError> {
    let url = client.resolve(path)?;

    if cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(&url).await
    {
        tracing::debug!(%url, "serving CSV from cache");
        return Ok(body);
    }

    let resp = client
        .send_with_retry(client.http().get(url.clone()), retry_override)
        .await?;
    if !resp.status().is_success() {
        return Err(EsgError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let fixture_name = url
        .path_segments()
        .and_then(|mut s| s.next_back())
        .filter(|s| !s.is_empty())
        .unwrap_or("resource.csv")
        .to_string();
    let body = get_text(resp, &fixture_name).await?;

    if body.trim().is_empty() {
        return Err(EsgError::EmptyBody {
            url: url.to_string(),
        });
    }

    if cache_mode != CacheMode::Bypass {
        client.cache_put(&url, &body).await;
    }

    tracing::debug!(%url, bytes = body.len(), "fetched CSV");
    Ok(body)
}
