//! In-memory `RecordStore` used by tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{Direction, ListOptions, Record, RecordStore, StoreError};

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Record>>>,
    creates: AtomicUsize,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the upstream were down.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_records(self, table: &str, records: Vec<Record>) -> Self {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .extend(records);
        self
    }

    /// Number of `create` calls received.
    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn records(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

/// Build a record whose fields are the keys of a JSON object.
pub fn record(id: &str, fields: Value) -> Record {
    Record {
        id: id.to_string(),
        created_time: None,
        fields: fields.as_object().cloned().unwrap_or_default(),
    }
}

fn sort_key(record: &Record, field: &str) -> String {
    record
        .field(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| record.created_time.clone())
        .unwrap_or_default()
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, table: &str, options: ListOptions) -> Result<Vec<Record>, StoreError> {
        self.check()?;
        let mut records = self.records(table);
        if let Some(sort) = options.sort {
            records.sort_by_key(|r| sort_key(r, sort.field));
            if sort.direction == Direction::Desc {
                records.reverse();
            }
        }
        Ok(records)
    }

    async fn find(&self, table: &str, id: &str) -> Result<Option<Record>, StoreError> {
        self.check()?;
        Ok(self.records(table).into_iter().find(|r| r.id == id))
    }

    async fn create(&self, table: &str, fields: Map<String, Value>) -> Result<Record, StoreError> {
        self.check()?;
        let n = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        let record = Record {
            id: format!("recNew{n}"),
            created_time: Some("2025-06-01T12:00:00.000Z".to_string()),
            fields,
        };
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }
}
