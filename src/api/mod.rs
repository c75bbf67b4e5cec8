//! High-level API objects
//!
//! [`Api`] owns the HTTP client and API key and exposes every operation with
//! explicit `base_id`/`table_name` arguments. [`Base`] fixes a `base_id`,
//! [`Table`] fixes both, and each delegates down. All three are cheap to
//! clone; they share one HTTP client (and its rate limiter).

mod base;
mod table;

pub use base::Base;
pub use table::Table;

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{self, RecordPages};
use crate::params::ListOptions;
use crate::record::{self, DeletedRecord, Record, RecordPatch, RecordUpsert};
use crate::types::{Fields, JsonValue};
use crate::urls;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use url::Url;

/// Maximum number of records the API accepts in one batch request
pub const MAX_RECORDS_PER_REQUEST: usize = 10;

/// Entry point for the Airtable Web API.
///
/// ```rust,ignore
/// let api = Api::new("patXXXXXXXXXXXXXX");
/// let record = api.get_record("appX", "Contacts", "recwPQIfs4wKPyc9D").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Api {
    http: Arc<HttpClient>,
}

impl Api {
    /// Create an API client with default configuration
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, HttpClientConfig::default())
    }

    /// Create an API client with custom HTTP configuration
    pub fn with_config(api_key: impl Into<String>, config: HttpClientConfig) -> Self {
        Self {
            http: Arc::new(HttpClient::with_config(api_key, config)),
        }
    }

    /// The API endpoint URL
    pub fn endpoint_url(&self) -> &str {
        self.http.endpoint_url()
    }

    /// Scope this client to one base
    pub fn base(&self, base_id: impl Into<String>) -> Base {
        Base::new(self.clone(), base_id)
    }

    /// Scope this client to one table
    pub fn table(&self, base_id: impl Into<String>, table_name: impl Into<String>) -> Table {
        Table::new(self.clone(), base_id, table_name)
    }

    /// URL of a table: `{endpoint}/v0/{base_id}/{table_name}`
    pub fn table_url(&self, base_id: &str, table_name: &str) -> Result<Url> {
        urls::table_url(self.endpoint_url(), base_id, table_name)
    }

    /// URL of a record: `{endpoint}/v0/{base_id}/{table_name}/{record_id}`
    pub fn record_url(&self, base_id: &str, table_name: &str, record_id: &str) -> Result<Url> {
        urls::record_url(self.endpoint_url(), base_id, table_name, record_id)
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// Retrieve a single record by id
    pub async fn get_record(
        &self,
        base_id: &str,
        table_name: &str,
        record_id: &str,
    ) -> Result<Record> {
        let url = self.record_url(base_id, table_name, record_id)?;
        let body: JsonValue = self.http.get_json(&url).await?;
        Record::from_value(&body)
    }

    /// List records page by page.
    ///
    /// Returns the lazy page sequence; use [`Api::list_records`] to aggregate
    /// everything in one call.
    pub fn record_pages(
        &self,
        base_id: &str,
        table_name: &str,
        options: &ListOptions,
    ) -> Result<RecordPages<'_>> {
        let url = self.table_url(base_id, table_name)?;
        Ok(RecordPages::new(
            self.http.as_ref(),
            url,
            options.to_query(),
        ))
    }

    /// List all records, following offset tokens across pages.
    ///
    /// All-or-nothing: a failure on any page discards the partial aggregate.
    pub async fn list_records(
        &self,
        base_id: &str,
        table_name: &str,
        options: &ListOptions,
    ) -> Result<Vec<Record>> {
        let url = self.table_url(base_id, table_name)?;
        pagination::fetch_all(self.http.as_ref(), &url, &options.to_query()).await
    }

    /// Retrieve the first matching record, if any
    pub async fn first(
        &self,
        base_id: &str,
        table_name: &str,
        options: &ListOptions,
    ) -> Result<Option<Record>> {
        let options = options.clone().max_records(1).page_size(1);
        let records = self.list_records(base_id, table_name, &options).await?;
        Ok(records.into_iter().next())
    }

    // ========================================================================
    // Write operations
    // ========================================================================

    /// Create a new record
    pub async fn create_record(
        &self,
        base_id: &str,
        table_name: &str,
        fields: Fields,
        typecast: bool,
    ) -> Result<Record> {
        let url = self.table_url(base_id, table_name)?;
        let body = json!({ "fields": fields, "typecast": typecast });
        let response: JsonValue = self
            .http
            .request_json(Method::POST, &url, RequestConfig::new().json(body))
            .await?;
        Record::from_value(&response)
    }

    /// Create records in batches of [`MAX_RECORDS_PER_REQUEST`].
    ///
    /// Created records are returned in input order.
    pub async fn batch_create(
        &self,
        base_id: &str,
        table_name: &str,
        records: Vec<Fields>,
        typecast: bool,
    ) -> Result<Vec<Record>> {
        let url = self.table_url(base_id, table_name)?;
        let mut created = Vec::with_capacity(records.len());
        for chunk in records.chunks(MAX_RECORDS_PER_REQUEST) {
            let entries: Vec<JsonValue> = chunk
                .iter()
                .map(|fields| json!({ "fields": fields }))
                .collect();
            let body = json!({ "records": entries, "typecast": typecast });
            let response: JsonValue = self
                .http
                .request_json(Method::POST, &url, RequestConfig::new().json(body))
                .await?;
            created.extend(record::parse_record_list(&response)?);
        }
        Ok(created)
    }

    /// Update a record by id.
    ///
    /// With `replace` set the record is replaced in its entirety (PUT):
    /// omitted fields are cleared. Otherwise only the provided fields are
    /// written (PATCH).
    pub async fn update_record(
        &self,
        base_id: &str,
        table_name: &str,
        record_id: &str,
        fields: Fields,
        replace: bool,
        typecast: bool,
    ) -> Result<Record> {
        let url = self.record_url(base_id, table_name, record_id)?;
        let method = if replace { Method::PUT } else { Method::PATCH };
        let body = json!({ "fields": fields, "typecast": typecast });
        let response: JsonValue = self
            .http
            .request_json(method, &url, RequestConfig::new().json(body))
            .await?;
        Record::from_value(&response)
    }

    /// Update records in batches of [`MAX_RECORDS_PER_REQUEST`].
    ///
    /// `replace` selects PUT semantics as in [`Api::update_record`].
    pub async fn batch_update(
        &self,
        base_id: &str,
        table_name: &str,
        patches: Vec<RecordPatch>,
        replace: bool,
        typecast: bool,
    ) -> Result<Vec<Record>> {
        let url = self.table_url(base_id, table_name)?;
        let method = if replace { Method::PUT } else { Method::PATCH };
        let mut updated = Vec::with_capacity(patches.len());
        for chunk in patches.chunks(MAX_RECORDS_PER_REQUEST) {
            let body = json!({ "records": chunk, "typecast": typecast });
            let response: JsonValue = self
                .http
                .request_json(method.clone(), &url, RequestConfig::new().json(body))
                .await?;
            updated.extend(record::parse_record_list(&response)?);
        }
        Ok(updated)
    }

    /// Update or create records in batches of [`MAX_RECORDS_PER_REQUEST`].
    ///
    /// Entries without an id are matched against existing records on
    /// `key_fields`; unmatched entries are created. Every entry without an
    /// id must carry all of `key_fields`; the whole call is rejected before
    /// any request goes out. `replace` selects PUT semantics as in
    /// [`Api::update_record`].
    pub async fn batch_upsert(
        &self,
        base_id: &str,
        table_name: &str,
        records: Vec<RecordUpsert>,
        key_fields: &[&str],
        replace: bool,
        typecast: bool,
    ) -> Result<Vec<Record>> {
        for entry in &records {
            if entry.id.is_some() {
                continue;
            }
            if let Some(missing) = key_fields
                .iter()
                .find(|field| !entry.fields.contains_key(**field))
            {
                return Err(Error::invalid_input(format!(
                    "record without id is missing merge field '{missing}'"
                )));
            }
        }

        let url = self.table_url(base_id, table_name)?;
        let method = if replace { Method::PUT } else { Method::PATCH };
        let mut upserted = Vec::with_capacity(records.len());
        for chunk in records.chunks(MAX_RECORDS_PER_REQUEST) {
            let body = json!({
                "records": chunk,
                "typecast": typecast,
                "performUpsert": { "fieldsToMergeOn": key_fields },
            });
            let response: JsonValue = self
                .http
                .request_json(method.clone(), &url, RequestConfig::new().json(body))
                .await?;
            upserted.extend(record::parse_record_list(&response)?);
        }
        Ok(upserted)
    }

    /// Delete a record by id
    pub async fn delete_record(
        &self,
        base_id: &str,
        table_name: &str,
        record_id: &str,
    ) -> Result<DeletedRecord> {
        let url = self.record_url(base_id, table_name, record_id)?;
        self.http
            .request_json(Method::DELETE, &url, RequestConfig::default())
            .await
    }

    /// Delete records in batches of [`MAX_RECORDS_PER_REQUEST`].
    ///
    /// Record ids travel as repeated `records[]` query parameters.
    pub async fn batch_delete(
        &self,
        base_id: &str,
        table_name: &str,
        record_ids: &[&str],
    ) -> Result<Vec<DeletedRecord>> {
        let url = self.table_url(base_id, table_name)?;
        let mut deleted = Vec::with_capacity(record_ids.len());
        for chunk in record_ids.chunks(MAX_RECORDS_PER_REQUEST) {
            let mut config = RequestConfig::new();
            for id in chunk {
                config = config.query("records[]", *id);
            }
            let response: DeletedRecordList = self
                .http
                .request_json(Method::DELETE, &url, config)
                .await?;
            deleted.extend(response.records);
        }
        Ok(deleted)
    }
}

/// Wire shape of a batch delete response
#[derive(Debug, Deserialize)]
struct DeletedRecordList {
    records: Vec<DeletedRecord>,
}
