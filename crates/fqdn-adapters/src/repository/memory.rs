//! In-memory record repository.

use std::{
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::{debug, instrument};
use uuid::Uuid;

use fqdn_core::{
    application::{ApplicationError, ports::Repository},
    domain::{FieldValue, Matches, NormalizedName, RecordId},
    error::FqdnResult,
};

use crate::record::{DomainRecord, load_records};

/// Thread-safe in-memory record store.
///
/// Records keep their insertion order, so lookups return matches in the
/// order the records were stored. Text values compare by their normalized
/// domain form, so `Shop.Example.com` and `shop.example.com` collide.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<RwLock<Vec<DomainRecord>>>,
}

impl InMemoryRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `records`.
    pub fn with_records(records: impl IntoIterator<Item = DomainRecord>) -> FqdnResult<Self> {
        let repository = Self::new();
        for record in records {
            repository.insert(record)?;
        }
        Ok(repository)
    }

    /// Load a JSON records file (see [`crate::record`] for the format).
    pub fn from_json_file(path: &Path) -> FqdnResult<Self> {
        Self::with_records(load_records(path)?)
    }

    /// Store a record, assigning a fresh id when it has none.
    pub fn insert(&self, mut record: DomainRecord) -> FqdnResult<RecordId> {
        let id = record
            .id
            .get_or_insert_with(|| RecordId::new(Uuid::new_v4().to_string()))
            .clone();

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.push(record);
        Ok(id)
    }

    /// Snapshot of every stored record.
    pub fn records(&self) -> FqdnResult<Vec<DomainRecord>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.clone())
    }

    /// Get the number of records.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Repository for InMemoryRepository {
    #[instrument(skip(self, value))]
    fn find_by(&self, field: &str, value: &FieldValue) -> FqdnResult<Matches> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let matches: Matches = inner
            .iter()
            .filter(|record| same_value(&record.get(field), value))
            .filter_map(|record| record.id.clone())
            .collect();

        debug!(count = matches.count(), "Lookup done");
        Ok(matches)
    }
}

/// Equality used for lookups. Text that normalizes as a domain name is
/// compared in normalized form; anything else compares as stored.
fn same_value(stored: &FieldValue, wanted: &FieldValue) -> bool {
    match (stored, wanted) {
        (FieldValue::Text(a), FieldValue::Text(b)) => {
            match (NormalizedName::parse(a), NormalizedName::parse(b)) {
                (Ok(a), Ok(b)) => a == b,
                _ => a == b,
            }
        }
        _ => stored == wanted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, fqdn: &str) -> DomainRecord {
        DomainRecord::new()
            .with_id(RecordId::new(id))
            .with_field("fqdn", fqdn)
    }

    #[test]
    fn finds_matches_in_insertion_order() {
        let repository = InMemoryRepository::with_records([
            record("b", "shop.example.com"),
            record("a", "blog.example.com"),
            record("c", "shop.example.com"),
        ])
        .unwrap();

        let matches = repository
            .find_by("fqdn", &FieldValue::text("shop.example.com"))
            .unwrap();

        let ids: Vec<&str> = matches.iter().map(RecordId::as_str).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn text_matches_ignore_case_and_encoding() {
        let repository = InMemoryRepository::with_records([
            record("1", "shop.example.com"),
            record("2", "xn--bcher-kva.example.com"),
        ])
        .unwrap();

        let upper = repository
            .find_by("fqdn", &FieldValue::text("Shop.Example.COM"))
            .unwrap();
        assert_eq!(upper.first(), Some(&RecordId::new("1")));

        let unicode = repository
            .find_by("fqdn", &FieldValue::text("bücher.example.com"))
            .unwrap();
        assert_eq!(unicode.first(), Some(&RecordId::new("2")));
    }

    #[test]
    fn values_of_different_types_never_match() {
        assert!(same_value(&FieldValue::Integer(1), &FieldValue::Integer(1)));
        assert!(!same_value(&FieldValue::text("1"), &FieldValue::Integer(1)));
        assert!(!same_value(&FieldValue::text("shop.example.com"), &FieldValue::Null));
    }

    #[test]
    fn absent_field_matches_null() {
        let repository = InMemoryRepository::with_records([
            DomainRecord::new().with_id(RecordId::new("1")),
            record("2", "shop.example.com"),
        ])
        .unwrap();

        let matches = repository.find_by("fqdn", &FieldValue::Null).unwrap();
        assert_eq!(matches.count(), 1);
        assert_eq!(matches.first(), Some(&RecordId::new("1")));
    }

    #[test]
    fn insert_assigns_missing_ids() {
        let repository = InMemoryRepository::new();
        let id = repository
            .insert(DomainRecord::new().with_field("fqdn", "shop.example.com"))
            .unwrap();

        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_eq!(repository.len(), 1);
        assert_eq!(repository.records().unwrap()[0].id, Some(id));
    }

    #[test]
    fn empty_repository_has_no_matches() {
        let repository = InMemoryRepository::new();
        assert!(repository.is_empty());
        assert!(
            repository
                .find_by("fqdn", &FieldValue::text("shop.example.com"))
                .unwrap()
                .is_empty()
        );
    }
}
