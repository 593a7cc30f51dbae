//! Entity service - policy and uniqueness for one field of a record.
//!
//! A host declares an [`FqdnConstraint`] on a field, supplies an
//! [`IdentityReader`] for its record type, and gets back one
//! [`EntityVerdict`] per record. Policy failures are reported at the field
//! itself, uniqueness conflicts at the constraint's error path.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{IdentityReader, Repository},
        services::{DomainPolicyValidator, UniquenessChecker},
    },
    domain::{FieldValue, Uniqueness, ValidationOutcome, ViolationKind},
    error::FqdnResult,
};

/// Declaration of the constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FqdnConstraint {
    field: String,
    error_path: Option<String>,
    ignore_null: bool,
}

impl FqdnConstraint {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error_path: None,
            ignore_null: true,
        }
    }

    /// Report uniqueness conflicts at `path` instead of the field.
    pub fn with_error_path(mut self, path: impl Into<String>) -> Self {
        self.error_path = Some(path.into());
        self
    }

    /// When `false`, the uniqueness lookup is skipped and only the domain
    /// policy runs. Null values are never looked up either way.
    pub fn ignore_null(mut self, ignore: bool) -> Self {
        self.ignore_null = ignore;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn error_path(&self) -> &str {
        self.error_path.as_deref().unwrap_or(&self.field)
    }

    pub const fn ignores_null(&self) -> bool {
        self.ignore_null
    }
}

/// A rejected record, ready to show to a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub invalid_value: FieldValue,
    pub rendered_value: String,
}

impl Violation {
    fn new(path: &str, kind: ViolationKind, value: FieldValue, rendered: String) -> Self {
        Self {
            path: path.to_string(),
            kind,
            message: kind.message().to_string(),
            code: kind.code().map(str::to_string),
            invalid_value: value,
            rendered_value: rendered,
        }
    }
}

/// Result of validating one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "violation", rename_all = "snake_case")]
pub enum EntityVerdict {
    Valid,
    Violation(Violation),
}

impl EntityVerdict {
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Valid => None,
            Self::Violation(v) => Some(v),
        }
    }
}

/// Policy plus uniqueness for records read through `R`.
pub struct FqdnEntityValidator<R: IdentityReader> {
    constraint: FqdnConstraint,
    reader: R,
    policy: DomainPolicyValidator,
    uniqueness: UniquenessChecker,
}

impl<R: IdentityReader> FqdnEntityValidator<R> {
    /// Bind the constraint to a record type.
    ///
    /// # Errors
    ///
    /// Fails when the field option is blank or the record type has no such
    /// field; these are setup mistakes and surface before any record is seen.
    pub fn new(
        constraint: FqdnConstraint,
        reader: R,
        policy: DomainPolicyValidator,
        repository: Box<dyn Repository>,
    ) -> FqdnResult<Self> {
        if constraint.field().trim().is_empty() {
            return Err(ApplicationError::ConstraintDefinition(
                "the field option must name a field".into(),
            )
            .into());
        }
        if !reader.has_field(constraint.field()) {
            return Err(ApplicationError::FieldNotMapped {
                field: constraint.field().to_string(),
            }
            .into());
        }

        let uniqueness = UniquenessChecker::new(constraint.field(), repository);
        Ok(Self {
            constraint,
            reader,
            policy,
            uniqueness,
        })
    }

    pub fn constraint(&self) -> &FqdnConstraint {
        &self.constraint
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Validate one record.
    ///
    /// `Err` is reserved for setup mistakes (a non-string field) and for
    /// collaborators that could not answer (DNS, repository).
    #[instrument(skip_all, fields(field = %self.constraint.field()))]
    pub fn validate(&self, record: &R::Record) -> FqdnResult<EntityVerdict> {
        let field = self.constraint.field();
        let value = self.reader.read_field(record, field);

        match &value {
            FieldValue::Null => {
                debug!("Null value, checks skipped");
                return Ok(EntityVerdict::Valid);
            }
            FieldValue::Text(candidate) => {
                if let ValidationOutcome::Invalid(kind) = self.policy.evaluate(candidate)? {
                    let rendered = value.describe();
                    return Ok(EntityVerdict::Violation(Violation::new(
                        field, kind, value, rendered,
                    )));
                }
            }
            other => {
                return Err(ApplicationError::UnexpectedFieldType {
                    field: field.to_string(),
                    found: other.type_name(),
                }
                .into());
            }
        }

        if !self.constraint.ignores_null() {
            debug!("Uniqueness lookup disabled");
            return Ok(EntityVerdict::Valid);
        }

        let identity = self.reader.identity(record);
        match self.uniqueness.check_unique(&value, identity.as_ref())? {
            Uniqueness::Unique => Ok(EntityVerdict::Valid),
            Uniqueness::Conflict { value, rendered } => Ok(EntityVerdict::Violation(
                Violation::new(
                    self.constraint.error_path(),
                    ViolationKind::Conflict,
                    value,
                    rendered,
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::{MockDnsResolver, MockRepository, Resolution};
    use crate::domain::{NOT_UNIQUE_ERROR, PolicyConfig, RecordId};
    use crate::error::FqdnError;

    const CATALOG_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 10));

    struct Row {
        id: Option<&'static str>,
        fqdn: FieldValue,
    }

    struct RowReader;

    impl IdentityReader for RowReader {
        type Record = Row;

        fn has_field(&self, field: &str) -> bool {
            field == "fqdn"
        }

        fn identity(&self, record: &Row) -> Option<RecordId> {
            record.id.map(RecordId::new)
        }

        fn read_field(&self, record: &Row, field: &str) -> FieldValue {
            match field {
                "fqdn" => record.fqdn.clone(),
                _ => FieldValue::Null,
            }
        }
    }

    fn policy() -> DomainPolicyValidator {
        let config =
            PolicyConfig::new("catalog.example.net", "example.com", ["www"]).unwrap();
        let mut resolver = MockDnsResolver::new();
        resolver
            .expect_resolve()
            .return_const(Resolution::Resolved(CATALOG_IP));
        DomainPolicyValidator::new(Arc::new(config), Box::new(resolver))
    }

    fn quiet_policy() -> DomainPolicyValidator {
        let config = PolicyConfig::new("catalog.example.net", "example.com", ["www"]).unwrap();
        let mut resolver = MockDnsResolver::new();
        resolver.expect_resolve().never();
        DomainPolicyValidator::new(Arc::new(config), Box::new(resolver))
    }

    fn repository_with(ids: &'static [&'static str]) -> Box<MockRepository> {
        let mut repository = MockRepository::new();
        repository
            .expect_find_by()
            .returning(move |_, _| Ok(ids.iter().map(|id| RecordId::new(*id)).collect()));
        Box::new(repository)
    }

    fn untouched_repository() -> Box<MockRepository> {
        let mut repository = MockRepository::new();
        repository.expect_find_by().never();
        Box::new(repository)
    }

    fn row(id: Option<&'static str>, fqdn: impl Into<FieldValue>) -> Row {
        Row {
            id,
            fqdn: fqdn.into(),
        }
    }

    #[test]
    fn blank_field_is_a_definition_error() {
        let result = FqdnEntityValidator::new(
            FqdnConstraint::new("  "),
            RowReader,
            quiet_policy(),
            untouched_repository(),
        );
        assert!(matches!(
            result,
            Err(FqdnError::Application(ApplicationError::ConstraintDefinition(_)))
        ));
    }

    #[test]
    fn unmapped_field_is_a_definition_error() {
        let result = FqdnEntityValidator::new(
            FqdnConstraint::new("hostname"),
            RowReader,
            quiet_policy(),
            untouched_repository(),
        );
        assert!(matches!(
            result,
            Err(FqdnError::Application(ApplicationError::FieldNotMapped { ref field }))
                if field == "hostname"
        ));
    }

    #[test]
    fn null_is_skipped_by_default() {
        let validator = FqdnEntityValidator::new(
            FqdnConstraint::new("fqdn"),
            RowReader,
            quiet_policy(),
            untouched_repository(),
        )
        .unwrap();

        let verdict = validator.validate(&row(None, FieldValue::Null)).unwrap();
        assert!(verdict.is_valid());
    }

    #[test]
    fn null_is_never_looked_up() {
        let validator = FqdnEntityValidator::new(
            FqdnConstraint::new("fqdn").ignore_null(false),
            RowReader,
            quiet_policy(),
            untouched_repository(),
        )
        .unwrap();

        let verdict = validator.validate(&row(None, FieldValue::Null)).unwrap();
        assert_eq!(verdict, EntityVerdict::Valid);
    }

    #[test]
    fn uniqueness_is_skipped_when_nulls_are_not_ignored() {
        let validator = FqdnEntityValidator::new(
            FqdnConstraint::new("fqdn").ignore_null(false),
            RowReader,
            policy(),
            untouched_repository(),
        )
        .unwrap();

        let verdict = validator.validate(&row(Some("mine"), "shop.example.com")).unwrap();
        assert_eq!(verdict, EntityVerdict::Valid);
    }

    #[test]
    fn policy_still_runs_when_nulls_are_not_ignored() {
        let validator = FqdnEntityValidator::new(
            FqdnConstraint::new("fqdn").ignore_null(false),
            RowReader,
            quiet_policy(),
            untouched_repository(),
        )
        .unwrap();

        let verdict = validator.validate(&row(None, "www.example.com")).unwrap();
        assert_eq!(
            verdict.violation().map(|v| v.kind),
            Some(ViolationKind::NameReserved)
        );
    }

    #[test]
    fn non_string_value_is_a_type_error() {
        let validator = FqdnEntityValidator::new(
            FqdnConstraint::new("fqdn"),
            RowReader,
            quiet_policy(),
            untouched_repository(),
        )
        .unwrap();

        let err = validator.validate(&row(None, 42_i64)).unwrap_err();
        assert!(matches!(
            err,
            FqdnError::Application(ApplicationError::UnexpectedFieldType { found: "integer", .. })
        ));
    }

    #[test]
    fn policy_violation_is_reported_at_the_field() {
        let validator = FqdnEntityValidator::new(
            FqdnConstraint::new("fqdn").with_error_path("catalog"),
            RowReader,
            quiet_policy(),
            untouched_repository(),
        )
        .unwrap();

        let verdict = validator.validate(&row(None, "www.example.com")).unwrap();
        let violation = verdict.violation().unwrap();

        assert_eq!(violation.path, "fqdn");
        assert_eq!(violation.kind, ViolationKind::NameReserved);
        assert_eq!(violation.message, "This name is reserved.");
        assert_eq!(violation.code, None);
        assert_eq!(violation.rendered_value, "\"www.example.com\"");
    }

    #[test]
    fn conflict_is_reported_at_the_error_path() {
        let validator = FqdnEntityValidator::new(
            FqdnConstraint::new("fqdn").with_error_path("catalog"),
            RowReader,
            policy(),
            repository_with(&["other"]),
        )
        .unwrap();

        let verdict = validator.validate(&row(Some("mine"), "shop.example.com")).unwrap();
        let violation = verdict.violation().unwrap();

        assert_eq!(violation.path, "catalog");
        assert_eq!(violation.kind, ViolationKind::Conflict);
        assert_eq!(violation.message, "This value is already used.");
        assert_eq!(violation.code.as_deref(), Some(NOT_UNIQUE_ERROR));
        assert_eq!(violation.invalid_value, FieldValue::text("shop.example.com"));
    }

    #[test]
    fn record_matching_itself_is_valid() {
        let validator = FqdnEntityValidator::new(
            FqdnConstraint::new("fqdn"),
            RowReader,
            policy(),
            repository_with(&["mine"]),
        )
        .unwrap();

        let verdict = validator.validate(&row(Some("mine"), "shop.example.com")).unwrap();
        assert_eq!(verdict, EntityVerdict::Valid);
    }

    #[test]
    fn error_path_defaults_to_field() {
        let constraint = FqdnConstraint::new("fqdn");
        assert_eq!(constraint.error_path(), "fqdn");
        assert!(constraint.ignores_null());
    }
}
