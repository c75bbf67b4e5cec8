//! A client scoped to one table

use super::Api;
use crate::error::Result;
use crate::formula;
use crate::pagination::RecordPages;
use crate::params::ListOptions;
use crate::record::{DeletedRecord, Record, RecordPatch, RecordUpsert};
use crate::types::Fields;
use url::Url;

/// An [`Api`] bound to one `base_id` and `table_name`.
///
/// The usual working surface: construct one per table and call record
/// operations on it directly.
///
/// ```rust,ignore
/// let table = Api::new(api_key).table("appX", "Contacts");
/// let contacts = table.all(&ListOptions::new().view("Grid view")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    api: Api,
    base_id: String,
    table_name: String,
}

impl Table {
    pub(super) fn new(
        api: Api,
        base_id: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            api,
            base_id: base_id.into(),
            table_name: table_name.into(),
        }
    }

    /// The base id this table lives in
    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    /// The table name or table id
    pub fn name(&self) -> &str {
        &self.table_name
    }

    /// URL of this table
    pub fn url(&self) -> Result<Url> {
        self.api.table_url(&self.base_id, &self.table_name)
    }

    /// URL of one record in this table
    pub fn record_url(&self, record_id: &str) -> Result<Url> {
        self.api
            .record_url(&self.base_id, &self.table_name, record_id)
    }

    /// Retrieve a single record by id
    pub async fn get(&self, record_id: &str) -> Result<Record> {
        self.api
            .get_record(&self.base_id, &self.table_name, record_id)
            .await
    }

    /// Iterate pages of records lazily
    pub fn iterate(&self, options: &ListOptions) -> Result<RecordPages<'_>> {
        self.api
            .record_pages(&self.base_id, &self.table_name, options)
    }

    /// List all records across every page
    pub async fn all(&self, options: &ListOptions) -> Result<Vec<Record>> {
        self.api
            .list_records(&self.base_id, &self.table_name, options)
            .await
    }

    /// Retrieve the first matching record, if any
    pub async fn first(&self, options: &ListOptions) -> Result<Option<Record>> {
        self.api
            .first(&self.base_id, &self.table_name, options)
            .await
    }

    /// Retrieve the first record whose fields all equal the given values.
    ///
    /// Builds an `AND` of field-equality clauses; an empty `fields` map
    /// matches nothing and returns `None` without a request.
    pub async fn match_record(&self, fields: &Fields) -> Result<Option<Record>> {
        let Some(clause) = formula::match_fields(fields, false) else {
            return Ok(None);
        };
        self.first(&ListOptions::new().formula(clause)).await
    }

    /// Create a new record
    pub async fn create(&self, fields: Fields, typecast: bool) -> Result<Record> {
        self.api
            .create_record(&self.base_id, &self.table_name, fields, typecast)
            .await
    }

    /// Create records in batches
    pub async fn batch_create(&self, records: Vec<Fields>, typecast: bool) -> Result<Vec<Record>> {
        self.api
            .batch_create(&self.base_id, &self.table_name, records, typecast)
            .await
    }

    /// Update a record; `replace` selects full-replacement (PUT) semantics
    pub async fn update(
        &self,
        record_id: &str,
        fields: Fields,
        replace: bool,
        typecast: bool,
    ) -> Result<Record> {
        self.api
            .update_record(
                &self.base_id,
                &self.table_name,
                record_id,
                fields,
                replace,
                typecast,
            )
            .await
    }

    /// Update records in batches
    pub async fn batch_update(
        &self,
        patches: Vec<RecordPatch>,
        replace: bool,
        typecast: bool,
    ) -> Result<Vec<Record>> {
        self.api
            .batch_update(&self.base_id, &self.table_name, patches, replace, typecast)
            .await
    }

    /// Update or create records in batches, matching on `key_fields`
    pub async fn batch_upsert(
        &self,
        records: Vec<RecordUpsert>,
        key_fields: &[&str],
        replace: bool,
        typecast: bool,
    ) -> Result<Vec<Record>> {
        self.api
            .batch_upsert(
                &self.base_id,
                &self.table_name,
                records,
                key_fields,
                replace,
                typecast,
            )
            .await
    }

    /// Delete a record by id
    pub async fn delete(&self, record_id: &str) -> Result<DeletedRecord> {
        self.api
            .delete_record(&self.base_id, &self.table_name, record_id)
            .await
    }

    /// Delete records in batches
    pub async fn batch_delete(&self, record_ids: &[&str]) -> Result<Vec<DeletedRecord>> {
        self.api
            .batch_delete(&self.base_id, &self.table_name, record_ids)
            .await
    }
}
