//! Tests for the pagination module

use super::*;
use crate::error::Error;
use crate::record::{Record, RecordPage};
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::Mutex;

fn record(id: &str) -> Record {
    Record {
        id: id.to_string(),
        fields: serde_json::Map::new(),
        created_time: None,
    }
}

fn page(ids: &[&str], offset: Option<&str>) -> RecordPage {
    RecordPage {
        records: ids.iter().map(|id| record(id)).collect(),
        offset: offset.map(ToString::to_string),
    }
}

fn listing_url() -> Url {
    Url::parse("https://api.airtable.com/v0/appX/tblY").unwrap()
}

/// In-memory fetcher that serves a scripted sequence of page results and
/// records the parameters of every call.
struct ScriptedFetcher {
    pages: Mutex<VecDeque<Result<RecordPage>>>,
    calls: Mutex<Vec<Vec<(String, String)>>>,
}

impl ScriptedFetcher {
    fn new(pages: Vec<Result<RecordPage>>) -> Self {
        Self {
            pages: Mutex::new(pages.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Vec<(String, String)>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, _url: &Url, params: &[(String, String)]) -> Result<RecordPage> {
        self.calls.lock().unwrap().push(params.to_vec());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::invalid_input("fetch past end of script")))
    }
}

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_from_page_with_offset() {
    let next = NextPage::from_page(&page(&["rec1"], Some("itrX")));
    assert!(next.is_continue());
    assert_eq!(next, NextPage::Continue("itrX".to_string()));
}

#[test]
fn test_next_page_from_page_without_offset() {
    let next = NextPage::from_page(&page(&["rec1"], None));
    assert!(next.is_done());
    assert!(!next.is_continue());
}

#[test]
fn test_next_page_empty_offset_is_done() {
    let next = NextPage::from_page(&page(&["rec1"], Some("")));
    assert!(next.is_done());
}

// ============================================================================
// fetch_all Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_all_aggregates_in_order() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(&["rec1", "rec2"], Some("itrX"))),
        Ok(page(&["rec3"], None)),
    ]);

    let records = fetch_all(&fetcher, &listing_url(), &[]).await.unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["rec1", "rec2", "rec3"]);
    assert_eq!(fetcher.calls().len(), 2);
}

#[tokio::test]
async fn test_fetch_all_continues_past_empty_page_with_offset() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(&[], Some("itrX"))),
        Ok(page(&["rec1"], None)),
    ]);

    let records = fetch_all(&fetcher, &listing_url(), &[]).await.unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["rec1"]);
}

#[tokio::test]
async fn test_fetch_all_stops_on_empty_final_page() {
    let fetcher = ScriptedFetcher::new(vec![Ok(page(&[], None))]);

    let records = fetch_all(&fetcher, &listing_url(), &[]).await.unwrap();
    assert!(records.is_empty());
    assert_eq!(fetcher.calls().len(), 1);
}

#[tokio::test]
async fn test_fetch_all_threads_offset_parameter() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(&["rec1"], Some("itrNext"))),
        Ok(page(&["rec2"], None)),
    ]);

    let base_params = vec![("view".to_string(), "Grid view".to_string())];
    fetch_all(&fetcher, &listing_url(), &base_params)
        .await
        .unwrap();

    let calls = fetcher.calls();
    assert_eq!(calls.len(), 2);

    // First call: no offset
    assert!(!calls[0].iter().any(|(k, _)| k == "offset"));
    // Second call: prior page's token, base params still present
    assert!(calls[1].contains(&("offset".to_string(), "itrNext".to_string())));
    assert!(calls[1].contains(&("view".to_string(), "Grid view".to_string())));
}

#[tokio::test]
async fn test_fetch_all_discards_partial_results_on_error() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(&["rec1", "rec2"], Some("itrX"))),
        Err(Error::api(503, "Service Unavailable")),
    ]);

    let result = fetch_all(&fetcher, &listing_url(), &[]).await;
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Api { status: 503, .. }));
}

// ============================================================================
// RecordPages Tests
// ============================================================================

#[tokio::test]
async fn test_record_pages_yields_pages_then_none() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(&["rec1"], Some("itrX"))),
        Ok(page(&["rec2"], None)),
    ]);

    let mut pages = RecordPages::new(&fetcher, listing_url(), vec![]);

    let first = pages.next_page().await.unwrap().unwrap();
    assert_eq!(first.records[0].id, "rec1");
    assert!(!pages.is_done());

    let second = pages.next_page().await.unwrap().unwrap();
    assert_eq!(second.records[0].id, "rec2");
    assert!(pages.is_done());

    assert!(pages.next_page().await.unwrap().is_none());
    // Exhausted for good: no further fetches are issued
    assert_eq!(fetcher.calls().len(), 2);
}

#[tokio::test]
async fn test_record_pages_error_exhausts_sequence() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(&["rec1"], Some("itrX"))),
        Err(Error::api(500, "boom")),
        Ok(page(&["rec2"], None)),
    ]);

    let mut pages = RecordPages::new(&fetcher, listing_url(), vec![]);
    pages.next_page().await.unwrap();

    assert!(pages.next_page().await.is_err());
    assert!(pages.is_done());
    // The scripted third page is never requested
    assert!(pages.next_page().await.unwrap().is_none());
    assert_eq!(fetcher.calls().len(), 2);
}
