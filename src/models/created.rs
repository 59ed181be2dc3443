//! Response returned by every create endpoint.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::store::Record;

/// The created record as echoed by the store.
///
/// ```json
/// { "id": "recA1b2C3", "fields": { "Name": "Soup", "Description": "hot" } }
/// ```
#[derive(Debug, Serialize)]
pub struct CreatedRecordResponse {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl From<Record> for CreatedRecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            fields: record.fields,
        }
    }
}
