use crate::config::SourceConfig;
use crate::error::{Result, ScraperError};
use crate::types::{DocumentFetcher, FetchResponse};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Fetches `url` and returns its body, treating anything but a non-empty
/// 200 response as a failure.
pub async fn fetch_document<F>(fetcher: &F, url: &str) -> Result<String>
where
    F: DocumentFetcher + ?Sized,
{
    let response = fetcher.fetch(url).await?;
    if response.status != 200 {
        return Err(ScraperError::Fetch {
            url: url.to_string(),
            reason: format!("unexpected status {}", response.status),
        });
    }
    if response.text.trim().is_empty() {
        return Err(ScraperError::Fetch {
            url: url.to_string(),
            reason: "empty response body".to_string(),
        });
    }
    Ok(response.text)
}

/// reqwest-backed fetcher for the live site.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let started = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(
            status,
            bytes = text.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched page"
        );
        if status != 200 {
            warn!(status, "non-success status");
        }
        Ok(FetchResponse { status, text })
    }
}

/// Keeps successful responses for the session so repeated builds and the
/// season check do not refetch the same page.
pub struct CachingFetcher<F> {
    inner: F,
    pages: Mutex<HashMap<String, FetchResponse>>,
}

impl<F: DocumentFetcher> CachingFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            pages: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.pages.lock().map(|pages| pages.len()).unwrap_or(0)
    }

    fn lookup(&self, url: &str) -> Option<FetchResponse> {
        self.pages.lock().ok()?.get(url).cloned()
    }
}

#[async_trait::async_trait]
impl<F: DocumentFetcher> DocumentFetcher for CachingFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        if let Some(hit) = self.lookup(url) {
            debug!(url, "cache hit");
            return Ok(hit);
        }

        let response = self.inner.fetch(url).await?;
        if response.is_success() {
            if let Ok(mut pages) = self.pages.lock() {
                pages.insert(url.to_string(), response.clone());
            }
        }
        Ok(response)
    }
}

/// In-memory pages keyed by URL, for fixtures and offline runs. Unknown URLs
/// answer with a 404 and an empty body.
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(url, text);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, text: impl Into<String>) {
        self.pages.insert(url.into(), text.into());
    }
}

impl FromIterator<(String, String)> for StaticFetcher {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        Ok(match self.pages.get(url) {
            Some(text) => FetchResponse::ok(text.clone()),
            None => FetchResponse {
                status: 404,
                text: String::new(),
            },
        })
    }
}
