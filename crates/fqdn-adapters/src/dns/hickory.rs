//! System DNS resolution via the hickory-resolver crate.

use std::time::Duration;

use hickory_resolver::{
    Resolver,
    config::{LookupIpStrategy, ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    system_conf,
};
use tracing::{debug, instrument, warn};

use fqdn_core::{
    application::ports::{DnsResolver, Resolution},
    error::{FqdnError, FqdnResult},
};

/// Bounds applied to every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Attempts before a lookup counts as failed.
    pub attempts: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(2000),
            attempts: 2,
        }
    }
}

/// Resolver backed by the host's DNS configuration (`/etc/resolv.conf` or
/// the platform equivalent), falling back to hickory's defaults when that
/// cannot be read.
pub struct HickoryResolver {
    inner: Resolver,
}

impl HickoryResolver {
    pub fn new(settings: ResolverSettings) -> FqdnResult<Self> {
        let (config, mut opts) = match system_conf::read_system_conf() {
            Ok(system) => system,
            Err(e) => {
                warn!(error = %e, "System DNS configuration unreadable, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };

        opts.timeout = settings.timeout;
        opts.attempts = settings.attempts;
        opts.ip_strategy = LookupIpStrategy::Ipv4thenIpv6;

        let inner = Resolver::new(config, opts).map_err(|e| FqdnError::Configuration {
            message: format!("cannot start DNS resolver: {e}"),
        })?;

        debug!(?settings, "DNS resolver ready");
        Ok(Self { inner })
    }
}

impl DnsResolver for HickoryResolver {
    #[instrument(skip(self))]
    fn resolve(&self, host: &str) -> Resolution {
        // Absolute form so search domains are never appended.
        let query = if host.ends_with('.') {
            host.to_string()
        } else {
            format!("{host}.")
        };

        match self.inner.lookup_ip(query.as_str()) {
            Ok(lookup) => match lookup.iter().next() {
                Some(ip) => Resolution::Resolved(ip),
                None => Resolution::NotFound,
            },
            Err(e) => classify(&e),
        }
    }
}

/// NXDOMAIN and empty answers are definitive; everything else may change on
/// the next attempt.
fn classify(error: &ResolveError) -> Resolution {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if matches!(response_code, ResponseCode::NXDomain | ResponseCode::NoError) =>
        {
            Resolution::NotFound
        }
        _ => Resolution::Transient(error.to_string()),
    }
}
