//! Domain policy service - decides whether a name may be assigned.
//!
//! Checks run in a fixed order and the first failing check wins:
//! 1. Empty candidate is skipped (required-ness is the caller's concern)
//! 2. Normalize (IDNA ASCII, lower-case)
//! 3. The bare catalog suffix itself is refused
//! 4. Only one label is allowed in front of the suffix
//! 5. Reserved labels are refused
//! 6. The candidate must resolve
//! 7. The catalog CNAME must resolve
//! 8. Both must resolve to the same address
//! 9. The candidate must pass the FQDN syntax rules

use std::net::IpAddr;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DnsResolver, Resolution},
    },
    domain::{
        NormalizedName, PolicyConfig, SyntaxValidator, ValidationOutcome, ViolationKind,
    },
    error::FqdnResult,
};

/// Policy validator bound to one configuration and one resolver.
pub struct DomainPolicyValidator {
    config: Arc<PolicyConfig>,
    resolver: Box<dyn DnsResolver>,
}

impl DomainPolicyValidator {
    /// Create a validator with its collaborators.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use fqdn_core::{application::DomainPolicyValidator, domain::PolicyConfig};
    ///
    /// let policy = Arc::new(PolicyConfig::new("catalog.example.net", "example.com", ["www"])?);
    /// let validator = DomainPolicyValidator::new(
    ///     policy,
    ///     resolver, // impl DnsResolver
    /// );
    /// let outcome = validator.evaluate("shop.example.com")?;
    /// ```
    pub fn new(config: Arc<PolicyConfig>, resolver: Box<dyn DnsResolver>) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Evaluate `candidate` against the bound policy.
    pub fn evaluate(&self, candidate: &str) -> FqdnResult<ValidationOutcome> {
        evaluate(candidate, &self.config, self.resolver.as_ref())
    }
}

/// Evaluate `candidate` against `config`, resolving through `resolver`.
///
/// Returns `Err` only when DNS gave no definitive answer; every rejection of
/// the candidate itself is an `Ok(ValidationOutcome::Invalid(..))`.
#[instrument(skip_all, fields(candidate = %candidate))]
pub fn evaluate(
    candidate: &str,
    config: &PolicyConfig,
    resolver: &dyn DnsResolver,
) -> FqdnResult<ValidationOutcome> {
    if candidate.is_empty() {
        debug!("Empty candidate, policy skipped");
        return Ok(ValidationOutcome::Valid);
    }

    let name = match NormalizedName::parse(candidate) {
        Ok(name) => name,
        Err(e) => {
            debug!(error = %e, "Candidate does not normalize");
            return Ok(reject(ViolationKind::NotADomainString));
        }
    };

    let suffix = config.catalog_domain_suffix();
    if &name == suffix {
        return Ok(reject(ViolationKind::PlaceDomainPrefix));
    }

    if let Some(subdomain) = name.remove_suffix(suffix.as_str()) {
        debug!(%subdomain, "Candidate contains the catalog suffix");

        if subdomain.splitn(2, '.').count() > 1 {
            return Ok(reject(ViolationKind::ExceededSubdomainLevel));
        }
        if config.is_reserved(&subdomain) {
            return Ok(reject(ViolationKind::NameReserved));
        }
    }

    let Some(candidate_ip) = lookup(resolver, &name)? else {
        return Ok(reject(ViolationKind::DomainNotFound));
    };

    let Some(catalog_ip) = lookup(resolver, config.catalog_cname())? else {
        return Ok(reject(ViolationKind::CatalogDomainNotFound));
    };

    if candidate_ip != catalog_ip {
        debug!(%candidate_ip, %catalog_ip, "Addresses differ");
        return Ok(reject(ViolationKind::CatalogCnameMismatch));
    }

    if let Err(violation) = SyntaxValidator::check(&name) {
        debug!(?violation, "Syntax check failed");
        return Ok(reject(violation.into()));
    }

    info!(name = %name, "Candidate accepted");
    Ok(ValidationOutcome::Valid)
}

/// Resolve `host`, turning a transient failure into a system error.
fn lookup(resolver: &dyn DnsResolver, host: &NormalizedName) -> FqdnResult<Option<IpAddr>> {
    match resolver.resolve(host.as_str()) {
        Resolution::Resolved(ip) => {
            debug!(host = %host, %ip, "Resolved");
            Ok(Some(ip))
        }
        Resolution::NotFound => {
            debug!(host = %host, "No address");
            Ok(None)
        }
        Resolution::Transient(reason) => {
            warn!(host = %host, %reason, "DNS lookup did not complete");
            Err(ApplicationError::DnsUnavailable {
                host: host.to_string(),
                reason,
            }
            .into())
        }
    }
}

fn reject(kind: ViolationKind) -> ValidationOutcome {
    info!(reason = kind.key(), "Candidate rejected");
    ValidationOutcome::Invalid(kind)
}
