//! Schemaless records and their JSON loader.
//!
//! # File format
//!
//! ```json
//! [
//!   { "id": "1", "fields": { "fqdn": "shop.example.com" } },
//!   { "fields": { "fqdn": null, "catalog": { "class": "Catalog", "identifiers": { "id": 7 } } } }
//! ]
//! ```
//!
//! `id` is optional; the repository assigns one when a record is stored
//! without it.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use fqdn_core::{
    application::ports::IdentityReader,
    domain::{FieldValue, RecordId},
    error::FqdnError,
};

/// A record with an optional identity and named field values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl DomainRecord {
    /// A record not yet stored.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Value of `field`, `Null` when absent.
    pub fn get(&self, field: &str) -> FieldValue {
        self.fields.get(field).cloned().unwrap_or(FieldValue::Null)
    }
}

/// Reads [`DomainRecord`]s for the entity validator.
///
/// The known fields are declared up front, usually as the union of the
/// fields present in a loaded record set.
#[derive(Debug, Clone, Default)]
pub struct DomainRecordReader {
    fields: BTreeSet<String>,
}

impl DomainRecordReader {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Every field name used by any of `records`.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a DomainRecord>) -> Self {
        Self::new(
            records
                .into_iter()
                .flat_map(|r| r.fields.keys().cloned()),
        )
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.fields.insert(field.into());
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}

impl IdentityReader for DomainRecordReader {
    type Record = DomainRecord;

    fn has_field(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    fn identity(&self, record: &DomainRecord) -> Option<RecordId> {
        record.id.clone()
    }

    fn read_field(&self, record: &DomainRecord, field: &str) -> FieldValue {
        record.get(field)
    }
}

/// Failure to load a records file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid records in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate record id '{id}' in {}", .path.display())]
    DuplicateId { path: PathBuf, id: RecordId },
}

impl From<LoadError> for FqdnError {
    fn from(err: LoadError) -> Self {
        FqdnError::Configuration {
            message: err.to_string(),
        }
    }
}

/// Load a JSON array of records from `path`.
#[instrument]
pub fn load_records(path: &Path) -> Result<Vec<DomainRecord>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seen = BTreeSet::new();
    for id in records.iter().filter_map(|r| r.id.as_ref()) {
        if !seen.insert(id) {
            return Err(LoadError::DuplicateId {
                path: path.to_path_buf(),
                id: id.clone(),
            });
        }
    }

    debug!(count = records.len(), "Records loaded");
    Ok(records)
}

/// Parse a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<DomainRecord>, serde_json::Error> {
    serde_json::from_str(json)
}
