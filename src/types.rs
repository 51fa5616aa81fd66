use crate::error::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Raw page as returned by a fetcher. Status and body are passed through
/// untouched; callers decide what counts as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub text: String,
}

impl FetchResponse {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            status: 200,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200 && !self.text.trim().is_empty()
    }
}

/// Team slug (lowercase) to conference slug for one season.
pub type ConferenceMap = HashMap<String, String>;

/// Retrieves raw documents by URL.
#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// Supplies the team to conference mapping for a season.
#[async_trait::async_trait]
pub trait ConferenceResolver: Send + Sync {
    async fn team_conference(&self, season: u16) -> Result<ConferenceMap>;
}

/// Source of "today", used to pick the current season.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[async_trait::async_trait]
impl<T: DocumentFetcher + ?Sized> DocumentFetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        (**self).fetch(url).await
    }
}
