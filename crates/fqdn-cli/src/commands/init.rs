//! `fqdn-guard init` - write a default configuration file.

use std::path::PathBuf;

use tracing::info;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the default configuration to `--config FILE` or the platform path.
pub fn execute(args: InitArgs, global: &GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = global.config.clone().unwrap_or_else(AppConfig::config_path);
    write_default(&config_path, args.force)?;

    info!(path = %config_path.display(), "Configuration written");
    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;
    output.info("Set policy.catalog_cname and policy.catalog_domain_suffix before evaluating")?;

    Ok(())
}

fn write_default(path: &PathBuf, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::ConfigExists { path: path.clone() });
    }

    let toml = toml::to_string_pretty(&AppConfig::default())
        .with_cli_context(|| "Failed to serialise default config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}
