//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`PolicyConfig`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `FQDN_GUARD_<SECTION>__<KEY>`
//!    (e.g. `FQDN_GUARD_POLICY__RESERVED_NAMES=www,mail`)
//! 3. Config file (`--config FILE`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fqdn_adapters::ResolverSettings;
use fqdn_core::{domain::PolicyConfig, error::FqdnResult};

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "FQDN_GUARD";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog domain policy.
    pub policy: PolicySettings,
    /// DNS lookup bounds.
    pub dns: DnsSettings,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    /// Hostname every catalog subdomain must resolve like.
    pub catalog_cname: String,
    /// Root domain under which subdomains are handed out.
    pub catalog_domain_suffix: String,
    /// Labels that may never be assigned (case-sensitive).
    pub reserved_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsSettings {
    pub timeout_ms: u64,
    pub attempts: usize,
}

impl Default for DnsSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 2000,
            attempts: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        match config_file {
            Some(path) => Self::load_from(path, true),
            None => Self::load_from(&Self::config_path(), false),
        }
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        debug!(path = %path.display(), required, "Loading configuration");

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("Failed to encode defaults")?)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("policy.reserved_names")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to build config from {}", path.display()))?
            .try_deserialize::<Self>()
            .context("Failed to deserialize config")?;

        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.fqdn-guard.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "fqdn-guard", "fqdn-guard")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".fqdn-guard.toml"))
    }

    /// Build the core policy; fails when the catalog settings are unset.
    pub fn policy_config(&self) -> FqdnResult<PolicyConfig> {
        Ok(PolicyConfig::new(
            &self.policy.catalog_cname,
            &self.policy.catalog_domain_suffix,
            self.policy.reserved_names.iter().cloned(),
        )?)
    }

    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            timeout: Duration::from_millis(self.dns.timeout_ms),
            attempts: self.dns.attempts.max(1),
        }
    }

    /// Value of a dotted key, rendered for display.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "policy.catalog_cname" => self.policy.catalog_cname.clone(),
            "policy.catalog_domain_suffix" => self.policy.catalog_domain_suffix.clone(),
            "policy.reserved_names" => self.policy.reserved_names.join(","),
            "dns.timeout_ms" => self.dns.timeout_ms.to_string(),
            "dns.attempts" => self.dns.attempts.to_string(),
            "output.no_color" => self.output.no_color.to_string(),
            _ => return None,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_bound_dns() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.dns.timeout_ms, 2000);
        assert_eq!(cfg.dns.attempts, 2);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn default_policy_is_unusable_until_configured() {
        assert!(AppConfig::default().policy_config().is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[policy]
catalog_cname = "catalog.example.net"
catalog_domain_suffix = "example.com"
reserved_names = ["www", "mail"]

[dns]
timeout_ms = 500
"#
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(cfg.policy.catalog_domain_suffix, "example.com");
        assert_eq!(cfg.policy.reserved_names, ["www", "mail"]);
        assert_eq!(cfg.dns.timeout_ms, 500);
        assert_eq!(cfg.dns.attempts, 2);

        let policy = cfg.policy_config().unwrap();
        assert!(policy.is_reserved("mail"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("dns.attempts").as_deref(), Some("2"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn resolver_settings_never_zero_attempts() {
        let mut cfg = AppConfig::default();
        cfg.dns.attempts = 0;
        assert_eq!(cfg.resolver_settings().attempts, 1);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
