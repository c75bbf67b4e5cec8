//! Offset-token pagination
//!
//! The list endpoint pages with an opaque `offset` token: a page that carries
//! one has more pages behind it, a page without one is the last. That sentinel
//! is modeled explicitly as [`NextPage`] instead of optional-field checks
//! scattered through calling code.
//!
//! Fetching goes through the [`PageFetcher`] capability so tests can supply
//! deterministic in-memory transports. Pagination is strictly sequential:
//! each request depends on the previous page's token, so no concurrent
//! fetches are ever issued.

use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::record::{Record, RecordPage};
use crate::types::QueryPairs;
use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;
use url::Url;

/// Result of inspecting a page for a continuation token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available; pass this token as the `offset` parameter
    Continue(String),
    /// No more pages
    Done,
}

impl NextPage {
    /// Read the continuation token off a page.
    ///
    /// An absent or empty `offset` means the listing is complete. An empty
    /// `records` list does NOT: the remote may return empty pages mid-listing.
    pub fn from_page(page: &RecordPage) -> Self {
        match page.offset.as_deref() {
            Some(token) if !token.is_empty() => Self::Continue(token.to_string()),
            _ => Self::Done,
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Transport capability for fetching one page of a listing.
///
/// Implemented by [`HttpClient`]; tests supply in-memory implementations.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page at `url` with the given query parameters.
    ///
    /// Must fail on non-2xx responses and on malformed page bodies.
    async fn fetch_page(&self, url: &Url, params: &[(String, String)]) -> Result<RecordPage>;
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &Url, params: &[(String, String)]) -> Result<RecordPage> {
        let config = RequestConfig::new().query_pairs(params);
        let body: serde_json::Value = self.request_json(Method::GET, url, config).await?;
        RecordPage::from_value(&body)
    }
}

/// A lazy, finite, forward-only sequence of listing pages.
///
/// Each [`next_page`](RecordPages::next_page) call issues at most one fetch,
/// threading the previous page's `offset` token into the request. Once
/// exhausted (or failed) the sequence stays exhausted; start a fresh one to
/// iterate again.
pub struct RecordPages<'a> {
    fetcher: &'a dyn PageFetcher,
    url: Url,
    params: QueryPairs,
    offset: Option<String>,
    done: bool,
}

impl<'a> RecordPages<'a> {
    /// Start a new page sequence
    pub fn new(fetcher: &'a dyn PageFetcher, url: Url, params: QueryPairs) -> Self {
        Self {
            fetcher,
            url,
            params,
            offset: None,
            done: false,
        }
    }

    /// Fetch the next page, or `None` when the listing is complete.
    ///
    /// A transport or decode failure exhausts the sequence; the caller must
    /// retry the whole listing.
    pub async fn next_page(&mut self) -> Result<Option<RecordPage>> {
        if self.done {
            return Ok(None);
        }

        let mut params = self.params.clone();
        if let Some(token) = &self.offset {
            params.push(("offset".to_string(), token.clone()));
        }

        let page = match self.fetcher.fetch_page(&self.url, &params).await {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };

        match NextPage::from_page(&page) {
            NextPage::Continue(token) => {
                debug!("page of {} records, more behind offset", page.records.len());
                self.offset = Some(token);
            }
            NextPage::Done => {
                debug!("final page of {} records", page.records.len());
                self.done = true;
            }
        }

        Ok(Some(page))
    }

    /// Check whether the sequence is exhausted
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl std::fmt::Debug for RecordPages<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordPages")
            .field("url", &self.url.as_str())
            .field("offset", &self.offset)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Aggregate every record of a listing across all pages.
///
/// Records keep page order, and array order within a page. All-or-nothing:
/// any fetch failure surfaces immediately and the partial aggregate is
/// discarded.
pub async fn fetch_all(
    fetcher: &dyn PageFetcher,
    url: &Url,
    params: &[(String, String)],
) -> Result<Vec<Record>> {
    let mut pages = RecordPages::new(fetcher, url.clone(), params.to_vec());
    let mut records = Vec::new();
    while let Some(page) = pages.next_page().await? {
        records.extend(page.records);
    }
    Ok(records)
}

#[cfg(test)]
mod tests;
