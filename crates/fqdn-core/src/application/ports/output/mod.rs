//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the validators need from external systems.
//! The `fqdn-adapters` crate provides implementations.

use std::fmt;
use std::net::IpAddr;

use crate::domain::{FieldValue, Matches, RecordId};
use crate::error::FqdnResult;

/// Answer from a DNS lookup.
///
/// Failure is explicit: a resolver never returns the queried host in place
/// of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The host resolved; the first address in resolver order.
    Resolved(IpAddr),
    /// The resolver definitively found no address.
    NotFound,
    /// No definitive answer (timeout, network error, SERVFAIL).
    Transient(String),
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(ip) => write!(f, "{ip}"),
            Self::NotFound => f.write_str("not found"),
            Self::Transient(reason) => write!(f, "transient failure: {reason}"),
        }
    }
}

/// Port for host-to-address resolution (A/AAAA semantics).
///
/// Implemented by:
/// - `fqdn_adapters::dns::HickoryResolver` (production, bounded by timeout)
/// - `fqdn_adapters::dns::StaticResolver` (pinned answers, testing)
///
/// ## Design Notes
///
/// - Blocking; implementations must bound the call with a timeout
/// - `host` is already in normalized ASCII form
#[cfg_attr(test, mockall::automock)]
pub trait DnsResolver: Send + Sync {
    fn resolve(&self, host: &str) -> Resolution;
}

/// Port for the uniqueness lookup.
///
/// Implemented by:
/// - `fqdn_adapters::repository::InMemoryRepository`
///
/// Implementations must be safe to call from several validations at once.
#[cfg_attr(test, mockall::automock)]
pub trait Repository: Send + Sync {
    /// All records whose `field` currently equals `value`, in store order.
    fn find_by(&self, field: &str, value: &FieldValue) -> FqdnResult<Matches>;
}

/// Port for reading fields off a host record type.
///
/// Replaces reflection: the host implements this once per record type.
pub trait IdentityReader: Send + Sync {
    type Record;

    /// Whether records of this type have a field called `field`.
    fn has_field(&self, field: &str) -> bool;

    /// Identity of a persisted record; `None` for records not yet stored.
    fn identity(&self, record: &Self::Record) -> Option<RecordId>;

    /// Current value of `field`; `FieldValue::Null` when unset.
    fn read_field(&self, record: &Self::Record, field: &str) -> FieldValue;
}
