//! Integration tests for fqdn-core.
//!
//! The ports are implemented by small doubles here so the full path from a
//! record to a verdict runs without network or store.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use fqdn_core::prelude::*;

const CATALOG_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 10));

struct PinnedDns(HashMap<&'static str, IpAddr>);

impl DnsResolver for PinnedDns {
    fn resolve(&self, host: &str) -> Resolution {
        self.0
            .get(host)
            .map_or(Resolution::NotFound, |ip| Resolution::Resolved(*ip))
    }
}

#[derive(Clone)]
struct Tenant {
    id: Option<String>,
    fqdn: Option<String>,
}

struct Tenants(Vec<Tenant>);

impl Repository for Tenants {
    fn find_by(&self, field: &str, value: &FieldValue) -> FqdnResult<Matches> {
        assert_eq!(field, "fqdn");
        Ok(self
            .0
            .iter()
            .filter(|t| t.fqdn.as_deref() == value.as_text())
            .filter_map(|t| t.id.as_deref().map(RecordId::new))
            .collect())
    }
}

struct TenantReader;

impl IdentityReader for TenantReader {
    type Record = Tenant;

    fn has_field(&self, field: &str) -> bool {
        field == "fqdn"
    }

    fn identity(&self, record: &Tenant) -> Option<RecordId> {
        record.id.as_deref().map(RecordId::new)
    }

    fn read_field(&self, record: &Tenant, _field: &str) -> FieldValue {
        record
            .fqdn
            .clone()
            .map_or(FieldValue::Null, FieldValue::Text)
    }
}

fn dns() -> PinnedDns {
    PinnedDns(HashMap::from([
        ("catalog.example.net", CATALOG_IP),
        ("shop.example.com", CATALOG_IP),
        ("taken.example.com", CATALOG_IP),
        ("elsewhere.example.com", IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))),
    ]))
}

fn policy() -> Arc<PolicyConfig> {
    Arc::new(PolicyConfig::new("catalog.example.net", "example.com", ["www", "admin"]).unwrap())
}

fn entity_validator(stored: Vec<Tenant>) -> FqdnEntityValidator<TenantReader> {
    FqdnEntityValidator::new(
        FqdnConstraint::new("fqdn"),
        TenantReader,
        DomainPolicyValidator::new(policy(), Box::new(dns())),
        Box::new(Tenants(stored)),
    )
    .unwrap()
}

fn tenant(id: Option<&str>, fqdn: &str) -> Tenant {
    Tenant {
        id: id.map(str::to_string),
        fqdn: Some(fqdn.to_string()),
    }
}

#[test]
fn new_tenant_with_fresh_name_is_accepted() {
    let validator = entity_validator(vec![tenant(Some("1"), "taken.example.com")]);
    let verdict = validator.validate(&tenant(None, "shop.example.com")).unwrap();
    assert_eq!(verdict, EntityVerdict::Valid);
}

#[test]
fn new_tenant_with_taken_name_conflicts() {
    let validator = entity_validator(vec![tenant(Some("1"), "taken.example.com")]);
    let verdict = validator.validate(&tenant(None, "taken.example.com")).unwrap();

    let violation = verdict.violation().unwrap();
    assert_eq!(violation.kind, ViolationKind::Conflict);
    assert_eq!(violation.code.as_deref(), Some(NOT_UNIQUE_ERROR));
    assert_eq!(violation.rendered_value, "\"taken.example.com\"");
}

#[test]
fn existing_tenant_keeps_its_own_name() {
    let validator = entity_validator(vec![tenant(Some("1"), "taken.example.com")]);
    let verdict = validator.validate(&tenant(Some("1"), "taken.example.com")).unwrap();
    assert!(verdict.is_valid());
}

#[test]
fn policy_rejection_wins_over_uniqueness() {
    let validator = entity_validator(vec![tenant(Some("1"), "www.example.com")]);
    let verdict = validator.validate(&tenant(None, "www.example.com")).unwrap();
    assert_eq!(verdict.violation().unwrap().kind, ViolationKind::NameReserved);
}

#[test]
fn pointing_elsewhere_is_a_mismatch() {
    let outcome = evaluate("elsewhere.example.com", &policy(), &dns()).unwrap();
    assert_eq!(
        outcome,
        ValidationOutcome::Invalid(ViolationKind::CatalogCnameMismatch)
    );
}

#[test]
fn unknown_host_is_not_found() {
    let outcome = evaluate("ghost.example.com", &policy(), &dns()).unwrap();
    assert_eq!(outcome, ValidationOutcome::Invalid(ViolationKind::DomainNotFound));
}

#[test]
fn syntax_and_policy_agree_on_normalization() {
    assert!(SyntaxValidator::is_valid_fqdn("SHOP.Example.com"));
    let outcome = evaluate("SHOP.Example.com", &policy(), &dns()).unwrap();
    assert!(outcome.is_valid());
}

#[test]
fn outcomes_serialize_for_hosts() {
    let json = serde_json::to_value(ValidationOutcome::Invalid(ViolationKind::NameReserved)).unwrap();
    assert_eq!(json["status"], "invalid");
    assert_eq!(json["reason"], "name_reserved");
}
