//! # Airtable Client
//!
//! A typed, async client for the Airtable Web API.
//!
//! ## Features
//!
//! - **Record CRUD**: Create, read, update, and delete table records
//! - **Pagination**: Lazy offset-token pagination with all-or-nothing aggregation
//! - **Canonical URLs**: Sorted, percent-encoded query strings for reproducible requests
//! - **Rate Limiting**: Token bucket limiter tuned to the Airtable 5 req/s limit
//! - **Retries**: Configurable backoff for transient transport failures
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use airtable_client::{Api, ListOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = Api::new("patXXXXXXXXXXXXXX");
//!     let table = api.table("appEioitPbxI72w06", "Contacts");
//!
//!     // Fetch every record, following offset tokens across pages
//!     let records = table.all(&ListOptions::new().view("Grid view")).await?;
//!     for record in &records {
//!         println!("{}: {:?}", record.id, record.fields);
//!     }
//!
//!     // Create a record
//!     let fields = serde_json::json!({ "Name": "John" });
//!     let created = table.create(fields.as_object().unwrap().clone(), false).await?;
//!     println!("created {}", created.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Api / Base / Table                      │
//! │  get  all  first  create  update  delete  batch_*        │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//! ┌──────────┬───────────────┴──────────┬───────────────────┐
//! │   urls   │        pagination        │       http        │
//! ├──────────┼──────────────────────────┼───────────────────┤
//! │ join     │ PageFetcher (injectable) │ GET/POST/...      │
//! │ encode   │ RecordPages (lazy)       │ Retry / Backoff   │
//! │ sort     │ fetch_all (aggregate)    │ Rate limit        │
//! └──────────┴──────────────────────────┴───────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// URL construction with canonical query strings
pub mod urls;

/// Record mapping between wire JSON and local types
pub mod record;

/// Listing query parameters
pub mod params;

/// Formula string helpers
pub mod formula;

/// HTTP client with retry and rate limiting
pub mod http;

/// Offset-token pagination
pub mod pagination;

/// High-level API objects (`Api`, `Base`, `Table`)
pub mod api;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::{Api, Base, Table};
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig, RequestConfig};
pub use pagination::{NextPage, PageFetcher, RecordPages};
pub use params::{ListOptions, SortDirection, SortField};
pub use record::{DeletedRecord, Record, RecordPage, RecordPatch, RecordUpsert};
pub use types::{BackoffType, CellFormat, Fields, JsonObject, JsonValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
