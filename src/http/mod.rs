//! HTTP client module
//!
//! Provides the transport layer for all API calls:
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor,
//!   tuned to the Airtable 5 requests/second limit by default
//! - **Typed Errors**: Non-2xx responses surface the Airtable error body

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
