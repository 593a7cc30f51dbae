//! `fqdn-guard validate` - policy plus uniqueness for one record.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use fqdn_adapters::{DomainRecord, DomainRecordReader, InMemoryRepository};
use fqdn_core::{
    application::{DomainPolicyValidator, EntityVerdict, FqdnConstraint, FqdnEntityValidator},
    domain::{FieldValue, RecordId},
};

use crate::{
    cli::ValidateArgs,
    commands::build_resolver,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// `validate` output.
#[derive(Debug, Serialize)]
struct ValidateReport<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a RecordId>,
    verdict: &'a EntityVerdict,
}

#[instrument(skip_all, fields(name = %args.name, records = %args.records.display()))]
pub fn execute(args: ValidateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if !args.records.is_file() {
        return Err(CliError::RecordsNotFound { path: args.records });
    }

    let policy = Arc::new(config.policy_config()?);
    let resolver = build_resolver(&args.resolver, &config)?;

    let repository = InMemoryRepository::from_json_file(&args.records)?;
    let reader = DomainRecordReader::from_records(&repository.records()?).with_field("fqdn");
    debug!(
        stored = repository.len(),
        fields = ?reader.fields().collect::<Vec<_>>(),
        "Records loaded"
    );

    let mut constraint = FqdnConstraint::new(&args.field);
    if let Some(path) = &args.error_path {
        constraint = constraint.with_error_path(path);
    }

    let validator = FqdnEntityValidator::new(
        constraint,
        reader,
        DomainPolicyValidator::new(policy, resolver),
        Box::new(repository),
    )?;

    let id = args
        .id
        .as_deref()
        .map(RecordId::parse)
        .transpose()
        .map_err(|e| CliError::InvalidInput {
            message: "--id must not be blank".into(),
            source: Some(Box::new(e)),
        })?;
    let mut candidate = DomainRecord::new().with_field(&args.field, FieldValue::text(&args.name));
    if let Some(id) = &id {
        candidate = candidate.with_id(id.clone());
    }

    let verdict = validator.validate(&candidate)?;

    if output.is_json() {
        output.json(&ValidateReport {
            name: &args.name,
            id: id.as_ref(),
            verdict: &verdict,
        })?;
    } else {
        match &verdict {
            EntityVerdict::Valid => output.verdict(&args.name, None)?,
            EntityVerdict::Violation(v) => {
                let detail = format!("{} [{}]", v.message, v.path);
                output.verdict(&args.name, Some(detail.as_str()))?;
                if let Some(code) = &v.code {
                    output.info(&format!("code {code}, value {}", v.rendered_value))?;
                }
            }
        }
    }

    match verdict {
        EntityVerdict::Valid => Ok(()),
        EntityVerdict::Violation(_) => Err(CliError::Rejected { count: 1, total: 1 }),
    }
}
