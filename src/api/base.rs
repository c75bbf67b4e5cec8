//! A client scoped to one base

use super::{Api, Table};
use crate::error::Result;
use crate::pagination::RecordPages;
use crate::params::ListOptions;
use crate::record::{DeletedRecord, Record, RecordPatch, RecordUpsert};
use crate::types::Fields;
use url::Url;

/// An [`Api`] bound to one `base_id`.
///
/// Every operation mirrors the [`Api`] method of the same name with the
/// `base_id` argument filled in.
#[derive(Debug, Clone)]
pub struct Base {
    api: Api,
    base_id: String,
}

impl Base {
    pub(super) fn new(api: Api, base_id: impl Into<String>) -> Self {
        Self {
            api,
            base_id: base_id.into(),
        }
    }

    /// The base id this client is bound to
    pub fn id(&self) -> &str {
        &self.base_id
    }

    /// Scope further to one table
    pub fn table(&self, table_name: impl Into<String>) -> Table {
        Table::new(self.api.clone(), self.base_id.clone(), table_name)
    }

    /// URL of a table in this base
    pub fn table_url(&self, table_name: &str) -> Result<Url> {
        self.api.table_url(&self.base_id, table_name)
    }

    /// See [`Api::get_record`]
    pub async fn get_record(&self, table_name: &str, record_id: &str) -> Result<Record> {
        self.api
            .get_record(&self.base_id, table_name, record_id)
            .await
    }

    /// See [`Api::record_pages`]
    pub fn record_pages(
        &self,
        table_name: &str,
        options: &ListOptions,
    ) -> Result<RecordPages<'_>> {
        self.api.record_pages(&self.base_id, table_name, options)
    }

    /// See [`Api::list_records`]
    pub async fn list_records(
        &self,
        table_name: &str,
        options: &ListOptions,
    ) -> Result<Vec<Record>> {
        self.api
            .list_records(&self.base_id, table_name, options)
            .await
    }

    /// See [`Api::first`]
    pub async fn first(&self, table_name: &str, options: &ListOptions) -> Result<Option<Record>> {
        self.api.first(&self.base_id, table_name, options).await
    }

    /// See [`Api::create_record`]
    pub async fn create_record(
        &self,
        table_name: &str,
        fields: Fields,
        typecast: bool,
    ) -> Result<Record> {
        self.api
            .create_record(&self.base_id, table_name, fields, typecast)
            .await
    }

    /// See [`Api::batch_create`]
    pub async fn batch_create(
        &self,
        table_name: &str,
        records: Vec<Fields>,
        typecast: bool,
    ) -> Result<Vec<Record>> {
        self.api
            .batch_create(&self.base_id, table_name, records, typecast)
            .await
    }

    /// See [`Api::update_record`]
    pub async fn update_record(
        &self,
        table_name: &str,
        record_id: &str,
        fields: Fields,
        replace: bool,
        typecast: bool,
    ) -> Result<Record> {
        self.api
            .update_record(&self.base_id, table_name, record_id, fields, replace, typecast)
            .await
    }

    /// See [`Api::batch_update`]
    pub async fn batch_update(
        &self,
        table_name: &str,
        patches: Vec<RecordPatch>,
        replace: bool,
        typecast: bool,
    ) -> Result<Vec<Record>> {
        self.api
            .batch_update(&self.base_id, table_name, patches, replace, typecast)
            .await
    }

    /// See [`Api::batch_upsert`]
    pub async fn batch_upsert(
        &self,
        table_name: &str,
        records: Vec<RecordUpsert>,
        key_fields: &[&str],
        replace: bool,
        typecast: bool,
    ) -> Result<Vec<Record>> {
        self.api
            .batch_upsert(&self.base_id, table_name, records, key_fields, replace, typecast)
            .await
    }

    /// See [`Api::delete_record`]
    pub async fn delete_record(&self, table_name: &str, record_id: &str) -> Result<DeletedRecord> {
        self.api
            .delete_record(&self.base_id, table_name, record_id)
            .await
    }

    /// See [`Api::batch_delete`]
    pub async fn batch_delete(
        &self,
        table_name: &str,
        record_ids: &[&str],
    ) -> Result<Vec<DeletedRecord>> {
        self.api
            .batch_delete(&self.base_id, table_name, record_ids)
            .await
    }
}
