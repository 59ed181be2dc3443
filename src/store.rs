//! Record store access.
//!
//! Every entity lives in an external Airtable base. This module defines the
//! `RecordStore` seam the services talk to, and `AirtableClient`, the
//! production implementation over the Airtable REST API.
//!
//! # Tables
//!
//! - `Recipes`
//! - `Ingredient`
//! - `Contacts`

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use url::Url;

#[cfg(test)]
pub mod memory;

pub const RECIPES_TABLE: &str = "Recipes";
pub const INGREDIENTS_TABLE: &str = "Ingredient";
pub const CONTACTS_TABLE: &str = "Contacts";

/// Field used for recency ordering.
pub const CREATED_AT_FIELD: &str = "CreatedAt";

/// Airtable caps list pages at 100 records.
const PAGE_SIZE: u32 = 100;

/// Errors raised while talking to the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport failure or undecodable response body.
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Base URL, base id or table name produced an invalid URL.
    #[error("Invalid store URL: {0}")]
    Url(#[from] url::ParseError),
}

/// One row as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,

    /// Store-assigned creation time (ISO 8601)
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,

    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Sort pushed down to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub direction: Direction,
}

/// Options for listing a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// `None` keeps the store's natural order.
    pub sort: Option<Sort>,
}

impl ListOptions {
    pub fn sorted(field: &'static str, direction: Direction) -> Self {
        Self {
            sort: Some(Sort { field, direction }),
        }
    }
}

/// Read/create access to the external record store.
///
/// There is no update or delete: the application only ever creates and reads.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch every record of `table`, following pagination to the end.
    async fn list(&self, table: &str, options: ListOptions) -> Result<Vec<Record>, StoreError>;

    /// Fetch one record. Returns `Ok(None)` when the id does not exist.
    async fn find(&self, table: &str, id: &str) -> Result<Option<Record>, StoreError>;

    /// Create one record and return it as stored.
    async fn create(&self, table: &str, fields: Map<String, Value>) -> Result<Record, StoreError>;
}

/// One page of a list response.
#[derive(Debug, Deserialize)]
struct ListPage {
    #[serde(default)]
    records: Vec<Record>,

    /// Continuation token, present while more pages remain
    offset: Option<String>,
}

/// Airtable REST client.
///
/// Constructed once at start-up and shared by every request.
#[derive(Clone)]
pub struct AirtableClient {
    http: reqwest::Client,
    api_url: String,
    base_id: String,
    api_key: String,
}

impl AirtableClient {
    pub fn new(
        api_url: &str,
        base_id: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            base_id: base_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Build `{api_url}/{base_id}/{table}[/{id}]` with each segment percent-encoded.
    fn table_url(&self, table: &str, id: Option<&str>) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.api_url)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
            segments.pop_if_empty().push(&self.base_id).push(table);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

/// Turn a non-success response into `StoreError::Status`.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RecordStore for AirtableClient {
    async fn list(&self, table: &str, options: ListOptions) -> Result<Vec<Record>, StoreError> {
        let url = self.table_url(table, None)?;
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = vec![("pageSize", PAGE_SIZE.to_string())];
            if let Some(sort) = options.sort {
                query.push(("sort[0][field]", sort.field.to_string()));
                query.push(("sort[0][direction]", sort.direction.as_str().to_string()));
            }
            if let Some(token) = &offset {
                query.push(("offset", token.clone()));
            }

            let response = self
                .http
                .get(url.clone())
                .bearer_auth(&self.api_key)
                .query(&query)
                .send()
                .await?;
            let page: ListPage = check_status(response).await?.json().await?;

            records.extend(page.records);
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        tracing::debug!(table, count = records.len(), "listed records");
        Ok(records)
    }

    async fn find(&self, table: &str, id: &str) -> Result<Option<Record>, StoreError> {
        let url = self.table_url(table, Some(id))?;
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let record = check_status(response).await?.json::<Record>().await?;
        Ok(Some(record))
    }

    async fn create(&self, table: &str, fields: Map<String, Value>) -> Result<Record, StoreError> {
        let url = self.table_url(table, None)?;
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        let record = check_status(response).await?.json::<Record>().await?;
        tracing::info!(table, id = %record.id, "record created");
        Ok(record)
    }
}
