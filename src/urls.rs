//! URL construction with canonical query strings
//!
//! All request URLs in this crate are built here so that two invariants hold
//! everywhere:
//!
//! - Path segments are percent-encoded and joined in order with `/`.
//! - Query parameters are serialized sorted by key, so the same parameter
//!   mapping always produces the same URL string regardless of insertion order.

use crate::error::{Error, Result};
use url::Url;

/// Default Airtable API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.airtable.com";

/// Airtable API version path segment
pub const API_VERSION: &str = "v0";

/// Join path segments onto a base URL.
///
/// Joining with an empty segment list returns the base unchanged. Segments are
/// percent-encoded, so table names may contain spaces or unicode.
pub fn join_url(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if segments.is_empty() {
        return Ok(url);
    }
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| Error::invalid_input("base URL cannot take path segments"))?;
        path.pop_if_empty();
        for segment in segments {
            if segment.is_empty() {
                return Err(Error::invalid_input("empty path segment"));
            }
            path.push(segment);
        }
    }
    Ok(url)
}

/// Append query parameters to a URL in canonical (sorted-key) order.
///
/// The sort is stable: repeated keys such as `fields[]` keep their relative
/// order. With no parameters the URL is left untouched (no trailing `?`).
pub fn append_query(url: &mut Url, params: &[(String, String)]) {
    if params.is_empty() {
        return;
    }
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    let mut pairs = url.query_pairs_mut();
    for (key, value) in sorted {
        pairs.append_pair(key, value);
    }
}

/// Build the URL for a table: `{endpoint}/v0/{base_id}/{table_name}`.
pub fn table_url(endpoint: &str, base_id: &str, table_name: &str) -> Result<Url> {
    join_url(endpoint, &[API_VERSION, base_id, table_name])
}

/// Build the URL for a single record: `{endpoint}/v0/{base_id}/{table_name}/{record_id}`.
pub fn record_url(endpoint: &str, base_id: &str, table_name: &str, record_id: &str) -> Result<Url> {
    join_url(endpoint, &[API_VERSION, base_id, table_name, record_id])
}
