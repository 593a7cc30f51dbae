//! Validation outcomes.
//!
//! Rejections are values, not errors: a host turns an
//! [`ValidationOutcome::Invalid`] into a user-facing violation using the
//! kind's stable [`key`](ViolationKind::key) and [`message`](ViolationKind::message).

use std::fmt;

use serde::Serialize;

use crate::domain::{
    syntax::{MESSAGE_FQDN_INVALID, SyntaxViolation},
    value_objects::FieldValue,
};

/// Code attached to uniqueness violations.
pub const NOT_UNIQUE_ERROR: &str = "23bd9dbf-6b9b-41cd-a99e-4844bcf3077f";

/// Message attached to uniqueness violations.
pub const MESSAGE_ALREADY_USED: &str = "This value is already used.";

/// Every reason a candidate can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    FqdnInvalid,
    NotADomainString,
    PlaceDomainPrefix,
    ExceededSubdomainLevel,
    NameReserved,
    DomainNotFound,
    CatalogDomainNotFound,
    CatalogCnameMismatch,
    Conflict,
}

impl ViolationKind {
    /// Stable message key for translation tables.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::FqdnInvalid => "fqdn_invalid",
            Self::NotADomainString => "not_a_domain_string",
            Self::PlaceDomainPrefix => "place_domain_prefix",
            Self::ExceededSubdomainLevel => "exceeded_subdomain_level",
            Self::NameReserved => "name_reserved",
            Self::DomainNotFound => "domain_not_found",
            Self::CatalogDomainNotFound => "catalog_domain_not_found",
            Self::CatalogCnameMismatch => "cname_not_equal_catalog_cname",
            Self::Conflict => "already_used",
        }
    }

    /// Default English message.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::FqdnInvalid => MESSAGE_FQDN_INVALID,
            Self::NotADomainString => "This value is not a domain name string.",
            Self::PlaceDomainPrefix => "Place a name in front of the catalog domain.",
            Self::ExceededSubdomainLevel => "Only one subdomain level is allowed.",
            Self::NameReserved => "This name is reserved.",
            Self::DomainNotFound => "Domain not found.",
            Self::CatalogDomainNotFound => "Catalog domain not found.",
            Self::CatalogCnameMismatch => "Domain does not point at the catalog CNAME.",
            Self::Conflict => MESSAGE_ALREADY_USED,
        }
    }

    /// Machine code, set only where the host contract defines one.
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Conflict => Some(NOT_UNIQUE_ERROR),
            _ => None,
        }
    }

    /// `true` when the rejection reflects the environment (catalog DNS)
    /// rather than the user's input.
    pub const fn is_environmental(&self) -> bool {
        matches!(self, Self::CatalogDomainNotFound)
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<SyntaxViolation> for ViolationKind {
    fn from(violation: SyntaxViolation) -> Self {
        match violation {
            SyntaxViolation::NotADomainString => Self::NotADomainString,
            SyntaxViolation::Invalid(_) => Self::FqdnInvalid,
        }
    }
}

/// Result of a policy evaluation: exactly one of the two holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    Invalid(ViolationKind),
}

impl ValidationOutcome {
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub const fn violation(&self) -> Option<ViolationKind> {
        match self {
            Self::Valid => None,
            Self::Invalid(kind) => Some(*kind),
        }
    }
}

impl From<ViolationKind> for ValidationOutcome {
    fn from(kind: ViolationKind) -> Self {
        Self::Invalid(kind)
    }
}

/// Result of a uniqueness check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Uniqueness {
    Unique,
    Conflict {
        value: FieldValue,
        /// `value` rendered for the user (see [`crate::domain::describe`]).
        rendered: String,
    },
}

impl Uniqueness {
    /// Conflict on `value`, rendering it once up front.
    pub fn conflict(value: FieldValue) -> Self {
        let rendered = value.describe();
        Self::Conflict { value, rendered }
    }

    pub const fn is_unique(&self) -> bool {
        matches!(self, Self::Unique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::syntax::SyntaxRule;

    #[test]
    fn conflict_carries_code_and_message() {
        assert_eq!(ViolationKind::Conflict.code(), Some(NOT_UNIQUE_ERROR));
        assert_eq!(
            ViolationKind::Conflict.message(),
            "This value is already used."
        );
        assert_eq!(ViolationKind::NameReserved.code(), None);
    }

    #[test]
    fn syntax_violations_map_to_kinds() {
        assert_eq!(
            ViolationKind::from(SyntaxViolation::Invalid(SyntaxRule::TooFewLabels)),
            ViolationKind::FqdnInvalid
        );
        assert_eq!(
            ViolationKind::from(SyntaxViolation::NotADomainString),
            ViolationKind::NotADomainString
        );
    }

    #[test]
    fn outcome_serializes_with_reason_key() {
        let json = serde_json::to_string(&ValidationOutcome::Invalid(
            ViolationKind::CatalogCnameMismatch,
        ))
        .unwrap();
        assert_eq!(
            json,
            r#"{"status":"invalid","reason":"catalog_cname_mismatch"}"#
        );
        assert_eq!(
            serde_json::to_string(&ValidationOutcome::Valid).unwrap(),
            r#"{"status":"valid"}"#
        );
    }

    #[test]
    fn conflict_renders_value() {
        let uniqueness = Uniqueness::conflict(FieldValue::text("shop.example.com"));
        assert!(matches!(
            uniqueness,
            Uniqueness::Conflict { ref rendered, .. } if rendered == "\"shop.example.com\""
        ));
    }
}
