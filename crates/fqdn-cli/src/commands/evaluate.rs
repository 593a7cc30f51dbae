//! `fqdn-guard evaluate` - apply the catalog domain policy.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use fqdn_core::{
    application::DomainPolicyValidator,
    domain::{ValidationOutcome, ViolationKind},
};

use crate::{
    cli::EvaluateArgs,
    commands::build_resolver,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One entry of `evaluate` output.
#[derive(Debug, Serialize)]
struct EvaluateReport<'a> {
    name: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl<'a> EvaluateReport<'a> {
    fn new(name: &'a str, outcome: ValidationOutcome) -> Self {
        let kind = outcome.violation();
        Self {
            name,
            valid: outcome.is_valid(),
            reason: kind.map(|k| k.key()),
            message: kind.map(|k| k.message()),
        }
    }
}

#[instrument(skip_all, fields(names = args.names.len()))]
pub fn execute(args: EvaluateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let policy = Arc::new(config.policy_config()?);
    let resolver = build_resolver(&args.resolver, &config)?;
    let validator = DomainPolicyValidator::new(policy, resolver);

    let mut reports = Vec::with_capacity(args.names.len());
    let mut environmental = false;
    for name in &args.names {
        let outcome = validator.evaluate(name)?;
        environmental |= outcome
            .violation()
            .is_some_and(|kind: ViolationKind| kind.is_environmental());
        reports.push(EvaluateReport::new(name, outcome));
    }

    if output.is_json() {
        output.json(&reports)?;
    } else {
        for report in &reports {
            output.verdict(report.name, report.message)?;
        }
        if environmental {
            output.warning(&format!(
                "The catalog host {} did not resolve; check policy.catalog_cname",
                validator.config().catalog_cname()
            ))?;
        }
    }

    let rejected = reports.iter().filter(|r| !r.valid).count();
    info!(total = reports.len(), rejected, "Evaluation finished");
    if rejected > 0 {
        return Err(CliError::Rejected {
            count: rejected,
            total: reports.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_key_and_message() {
        let report = EvaluateReport::new(
            "www.example.com",
            ValidationOutcome::Invalid(ViolationKind::NameReserved),
        );
        assert!(!report.valid);
        assert_eq!(report.reason, Some("name_reserved"));
        assert_eq!(report.message, Some("This name is reserved."));
    }

    #[test]
    fn valid_report_has_no_reason() {
        let report = EvaluateReport::new("shop.example.com", ValidationOutcome::Valid);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "shop.example.com", "valid": true }));
    }
}
