//! Domain value objects: NormalizedName, RecordId, FieldValue, Matches.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity of their
//! own. Parsing and display live here; policy decisions live in `policy.rs`
//! and `syntax.rs`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── NormalizedName ───────────────────────────────────────────────────────────

/// The ASCII-compatible (IDNA UTS-46, Punycode) lower-case form of a
/// candidate domain name.
///
/// Derived per call and never cached: the same candidate always normalizes to
/// the same value, and an already normalized name normalizes to itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Normalize a candidate name.
    ///
    /// Fails only when the input has no ASCII-compatible encoding. Malformed
    /// but encodable input (leading dots, long labels) normalizes fine and is
    /// rejected later by the syntax rules.
    pub fn parse(candidate: &str) -> Result<Self, DomainError> {
        let ascii =
            idna::domain_to_ascii(candidate).map_err(|e| DomainError::NotADomainString {
                value: candidate.to_string(),
                reason: format!("IDNA conversion failed ({e:?})"),
            })?;

        Ok(Self(ascii.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes; always ASCII so this is also the character count.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dot-separated labels, including empty ones.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// This name with every occurrence of `suffix` removed, together with
    /// the dot joining it to the preceding label. `None` when `suffix` does
    /// not occur anywhere in the name.
    ///
    /// `shop.example.com` and `shopexample.com` both yield `shop`;
    /// `shop.example.com.evil.org` yields `shop.evil.org`.
    pub fn remove_suffix(&self, suffix: &str) -> Option<String> {
        if suffix.is_empty() {
            return None;
        }
        let dotted = format!(".{suffix}");
        if self.0.contains(&dotted) {
            Some(self.0.replace(&dotted, ""))
        } else if self.0.contains(suffix) {
            Some(self.0.replace(suffix, ""))
        } else {
            None
        }
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for NormalizedName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── RecordId ─────────────────────────────────────────────────────────────────

/// Opaque identity of a persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a user supplied identifier; blank identifiers are rejected.
    pub fn parse(id: &str) -> Result<Self, DomainError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRecordId(
                "record id cannot be empty".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── FieldValue ───────────────────────────────────────────────────────────────

/// The current value of a record field.
///
/// In JSON the variants map to `null`, booleans, integers, RFC 3339 strings,
/// other strings and `{ "class": .., "identifiers": {..} }` objects, tried in
/// that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Timestamp(DateTime<Utc>),
    Text(String),
    Reference(ObjectRef),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short type name used in configuration errors.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Timestamp(_) => "timestamp",
            Self::Text(_) => "string",
            Self::Reference(_) => "object",
        }
    }

    /// Human readable rendering used in violation reports.
    ///
    /// See [`crate::domain::describe`] for the format.
    pub fn describe(&self) -> String {
        crate::domain::describe::describe(self)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<ObjectRef> for FieldValue {
    fn from(value: ObjectRef) -> Self {
        Self::Reference(value)
    }
}

/// A reference to another record, identified by its class and identifier
/// fields (a composite key may have several).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub class: String,
    #[serde(default)]
    pub identifiers: BTreeMap<String, FieldValue>,
}

impl ObjectRef {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            identifiers: BTreeMap::new(),
        }
    }

    pub fn with_identifier(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.identifiers.insert(field.into(), value.into());
        self
    }
}

// ── Matches ──────────────────────────────────────────────────────────────────

/// Ordered record identities returned by a repository lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches(Vec<RecordId>);

impl Matches {
    pub fn new(ids: Vec<RecordId>) -> Self {
        Self(ids)
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&RecordId> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordId> {
        self.0.iter()
    }
}

impl From<Vec<RecordId>> for Matches {
    fn from(ids: Vec<RecordId>) -> Self {
        Self(ids)
    }
}

impl FromIterator<RecordId> for Matches {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
