//! HTTP client that turns page URLs into plain text.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::ScraperError;
use crate::html::html_to_text;
use crate::rate_limit::retry_with_backoff;

/// Outcome of fetching one URL in a batch.
#[derive(Debug)]
pub struct FetchedPage {
    pub url: String,
    pub result: Result<String, ScraperError>,
}

/// Fetches pages one at a time with a politeness delay between requests.
///
/// Transient errors (429, 5xx, network failures) are retried with jittered
/// exponential backoff up to `max_retries` additional attempts.
pub struct PageClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
    delay: Duration,
}

impl PageClient {
    /// Creates a `PageClient` with the given timeout, `User-Agent` and retry
    /// policy, and no delay between batch requests.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
            delay: Duration::ZERO,
        })
    }

    /// Sleep `delay_ms` between consecutive requests in [`Self::fetch_all`].
    #[must_use]
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    /// Fetch `url` and return its text content.
    ///
    /// HTML (and XHTML) bodies are converted with [`html_to_text`];
    /// other `text/*` bodies are returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`]: not an absolute http(s) URL.
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: other non-2xx (5xx retried).
    /// - [`ScraperError::UnsupportedContent`]: binary or non-text body.
    /// - [`ScraperError::Http`]: network or TLS failure after all retries.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        let domain = parsed.host_str().unwrap_or(url).to_owned();

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let parsed = parsed.clone();
            let domain = domain.clone();
            async move { self.fetch_once(parsed, &domain).await }
        })
        .await
    }

    async fn fetch_once(&self, url: Url, domain: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,text/plain;q=0.9,*/*;q=0.5",
            )
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(0);
            return Err(ScraperError::RateLimited {
                domain: domain.to_owned(),
                retry_after_secs,
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        let is_markup = content_type.is_empty()
            || content_type.contains("html")
            || content_type.contains("xml");
        if !is_markup && !content_type.starts_with("text/") {
            return Err(ScraperError::UnsupportedContent {
                url: url.to_string(),
                content_type,
            });
        }

        let body = response.text().await?;
        Ok(if is_markup { html_to_text(&body) } else { body })
    }

    /// Fetch every URL in order, sleeping the configured delay between
    /// requests. Failures are returned per page rather than aborting.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<FetchedPage> {
        let mut pages = Vec::with_capacity(urls.len());

        for (idx, url) in urls.iter().enumerate() {
            if idx > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let result = self.fetch_text(url).await;
            match &result {
                Ok(text) => tracing::debug!(url = %url, chars = text.len(), "fetched page"),
                Err(e) => tracing::warn!(url = %url, error = %e, "page fetch failed"),
            }

            pages.push(FetchedPage {
                url: url.clone(),
                result,
            });
        }

        pages
    }
}
