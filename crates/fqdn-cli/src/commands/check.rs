//! `fqdn-guard check` - syntax only.

use serde::Serialize;
use tracing::instrument;

use fqdn_core::domain::{SyntaxValidator, ViolationKind};

use crate::{
    cli::CheckArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One line of `check` output.
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    name: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

fn check_one(name: &str) -> CheckReport<'_> {
    match SyntaxValidator::validate(name) {
        Ok(normalized) => CheckReport {
            name,
            valid: true,
            normalized: Some(normalized.to_string()),
            reason: None,
            message: None,
        },
        Err(violation) => {
            let kind = ViolationKind::from(violation);
            CheckReport {
                name,
                valid: false,
                normalized: None,
                reason: Some(kind.key()),
                message: Some(kind.message()),
            }
        }
    }
}

#[instrument(skip_all, fields(names = args.names.len()))]
pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    let reports: Vec<CheckReport<'_>> = args.names.iter().map(|n| check_one(n)).collect();

    if output.is_json() {
        output.json(&reports)?;
    } else {
        for report in &reports {
            output.verdict(report.name, report.message)?;
        }
    }

    let rejected = reports.iter().filter(|r| !r.valid).count();
    if rejected > 0 {
        return Err(CliError::Rejected {
            count: rejected,
            total: reports.len(),
        });
    }
    Ok(())
}
