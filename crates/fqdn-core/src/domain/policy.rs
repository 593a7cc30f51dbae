//! Catalog domain policy configuration.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{error::DomainError, value_objects::NormalizedName};

/// Immutable policy consulted on every evaluation.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyConfig {
    catalog_cname: NormalizedName,
    catalog_domain_suffix: NormalizedName,
    reserved_names: BTreeSet<String>,
}

impl PolicyConfig {
    /// Build a policy, failing fast on unusable values.
    ///
    /// The suffix may be given with a leading dot (`.example.com`); it is
    /// stored without it. Reserved names are kept exactly as given and
    /// compared case-sensitively.
    pub fn new<I, S>(
        catalog_cname: &str,
        catalog_domain_suffix: &str,
        reserved_names: I,
    ) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let catalog_cname = normalize_setting("catalog_cname", catalog_cname)?;
        let catalog_domain_suffix = normalize_setting(
            "catalog_domain_suffix",
            catalog_domain_suffix.trim().trim_start_matches('.'),
        )?;

        let reserved_names = reserved_names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.trim().is_empty())
            .collect();

        Ok(Self {
            catalog_cname,
            catalog_domain_suffix,
            reserved_names,
        })
    }

    /// Hostname whose address every catalog subdomain must share.
    pub fn catalog_cname(&self) -> &NormalizedName {
        &self.catalog_cname
    }

    /// Root domain under which subdomains are assigned.
    pub fn catalog_domain_suffix(&self) -> &NormalizedName {
        &self.catalog_domain_suffix
    }

    pub fn reserved_names(&self) -> impl Iterator<Item = &str> {
        self.reserved_names.iter().map(String::as_str)
    }

    pub fn is_reserved(&self, label: &str) -> bool {
        self.reserved_names.contains(label)
    }
}

fn normalize_setting(key: &str, value: &str) -> Result<NormalizedName, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::InvalidPolicy(format!("{key} must not be empty")));
    }
    NormalizedName::parse(value)
        .map_err(|e| DomainError::InvalidPolicy(format!("{key}: {e}")))
}
