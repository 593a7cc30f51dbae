//! Pinned DNS answers, for offline runs and tests.

use std::{
    collections::HashMap,
    net::IpAddr,
    sync::{Arc, RwLock},
};

use tracing::debug;

use fqdn_core::{
    application::{
        ApplicationError,
        ports::{DnsResolver, Resolution},
    },
    error::FqdnResult,
};

/// Thread-safe resolver answering from a fixed table.
///
/// Hosts without an entry go to the fallback resolver when one is set and
/// are `NotFound` otherwise.
#[derive(Clone)]
pub struct StaticResolver {
    inner: Arc<RwLock<HashMap<String, Resolution>>>,
    fallback: Option<Arc<dyn DnsResolver>>,
}

impl StaticResolver {
    /// Create an empty resolver with no fallback.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            fallback: None,
        }
    }

    /// Send unpinned hosts to `fallback`.
    pub fn with_fallback(mut self, fallback: Arc<dyn DnsResolver>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Pin `host` to `ip`.
    pub fn with_record(self, host: &str, ip: IpAddr) -> FqdnResult<Self> {
        self.pin(host, Resolution::Resolved(ip))?;
        Ok(self)
    }

    /// Pin `host` as definitively absent, even when a fallback is set.
    pub fn with_missing(self, host: &str) -> FqdnResult<Self> {
        self.pin(host, Resolution::NotFound)?;
        Ok(self)
    }

    /// Pin an answer; hosts are matched case-insensitively and without a
    /// trailing dot.
    pub fn pin(&self, host: &str, answer: Resolution) -> FqdnResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(key(host), answer);
        Ok(())
    }

    /// Number of pinned hosts.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StaticResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsResolver for StaticResolver {
    fn resolve(&self, host: &str) -> Resolution {
        let pinned = match self.inner.read() {
            Ok(inner) => inner.get(&key(host)).cloned(),
            Err(_) => return Resolution::Transient("pinned answer table is poisoned".into()),
        };

        match (pinned, &self.fallback) {
            (Some(answer), _) => {
                debug!(host, %answer, "Pinned answer");
                answer
            }
            (None, Some(fallback)) => fallback.resolve(host),
            (None, None) => Resolution::NotFound,
        }
    }
}

fn key(host: &str) -> String {
    host.trim_end_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    const IP: IpAddr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 10));

    struct Always(Resolution);

    impl DnsResolver for Always {
        fn resolve(&self, _host: &str) -> Resolution {
            self.0.clone()
        }
    }

    #[test]
    fn pinned_hosts_resolve() {
        let resolver = StaticResolver::new()
            .with_record("Shop.Example.com.", IP)
            .unwrap();

        assert_eq!(resolver.resolve("shop.example.com"), Resolution::Resolved(IP));
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn unpinned_hosts_are_not_found_without_fallback() {
        let resolver = StaticResolver::new();
        assert_eq!(resolver.resolve("shop.example.com"), Resolution::NotFound);
        assert!(resolver.is_empty());
    }

    #[test]
    fn unpinned_hosts_use_fallback() {
        let resolver = StaticResolver::new()
            .with_fallback(Arc::new(Always(Resolution::Transient("timeout".into()))));

        assert!(matches!(
            resolver.resolve("shop.example.com"),
            Resolution::Transient(_)
        ));
    }

    #[test]
    fn missing_pin_overrides_fallback() {
        let resolver = StaticResolver::new()
            .with_fallback(Arc::new(Always(Resolution::Resolved(IP))))
            .with_missing("gone.example.com")
            .unwrap();

        assert_eq!(resolver.resolve("gone.example.com"), Resolution::NotFound);
        assert_eq!(resolver.resolve("other.example.com"), Resolution::Resolved(IP));
    }
}
