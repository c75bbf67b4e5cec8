//! Record mapping between wire JSON and local types
//!
//! The Airtable wire shapes are:
//!
//! - single record: `{"id": str, "fields": {..}, "createdTime": ISO8601-str}`
//! - list page: `{"records": [Record, ...], "offset"?: str}`
//! - delete result: `{"id": str, "deleted": bool}`
//!
//! Field values pass through untouched and keep the key order the API sent
//! (serde_json is built with `preserve_order`).

use crate::error::{Error, Result};
use crate::types::{Fields, JsonValue};
use serde::{Deserialize, Serialize};

/// A single Airtable record.
///
/// Immutable once received; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record id (`rec...`)
    pub id: String,
    /// Column name to cell value, order as received
    pub fields: Fields,
    /// Server-side creation timestamp, if present
    #[serde(rename = "createdTime", skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

impl Record {
    /// Map one raw JSON record object to a [`Record`].
    ///
    /// Fails with [`Error::MalformedRecord`] if `id` or `fields` is absent or
    /// has the wrong shape. `createdTime` is optional.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::malformed_record("record is not a JSON object"))?;

        let id = object
            .get("id")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::malformed_record("missing key 'id'"))?
            .to_string();

        let fields = object
            .get("fields")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| Error::malformed_record("missing key 'fields'"))?
            .clone();

        let created_time = object
            .get("createdTime")
            .and_then(JsonValue::as_str)
            .map(ToString::to_string);

        Ok(Self {
            id,
            fields,
            created_time,
        })
    }
}

/// One page of a listing response.
///
/// Transient; exists only during a single fetch call. Presence of `offset`
/// signals more pages remain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    /// Records in page order
    pub records: Vec<Record>,
    /// Continuation token, if more pages remain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

impl RecordPage {
    /// Map a raw listing response to a [`RecordPage`].
    ///
    /// A single malformed record fails the whole page.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::malformed_record("page is not a JSON object"))?;

        let raw_records = object
            .get("records")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| Error::malformed_record("missing key 'records'"))?;

        let records = raw_records
            .iter()
            .map(Record::from_value)
            .collect::<Result<Vec<_>>>()?;

        let offset = object
            .get("offset")
            .and_then(JsonValue::as_str)
            .map(ToString::to_string);

        Ok(Self { records, offset })
    }
}

/// Result of deleting a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedRecord {
    /// Id of the deleted record
    pub id: String,
    /// Always `true` on success
    pub deleted: bool,
}

/// One entry of a batch update: a record id and the fields to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    /// Record id (`rec...`)
    pub id: String,
    /// Fields to write
    pub fields: Fields,
}

impl RecordPatch {
    /// Create a patch for the given record id
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// One entry of a batch upsert: fields to write, with an optional record id.
///
/// Entries without an id are matched on the upsert's merge fields; unmatched
/// entries are created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordUpsert {
    /// Record id (`rec...`), if targeting a known record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Fields to write
    pub fields: Fields,
}

impl RecordUpsert {
    /// Create an entry matched on the upsert's merge fields
    pub fn new(fields: Fields) -> Self {
        Self { id: None, fields }
    }

    /// Create an entry targeting a known record id
    pub fn with_id(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: Some(id.into()),
            fields,
        }
    }
}

/// Extract the `records` array of a batch write response.
pub(crate) fn parse_record_list(value: &JsonValue) -> Result<Vec<Record>> {
    value
        .get("records")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::malformed_record("missing key 'records'"))?
        .iter()
        .map(Record::from_value)
        .collect()
}
