//! # Validate-field CLI: Check one field value in isolation.
//!
//! ```bash
//! lmc validate-field --field weight --value "5 lbs"
//! ```

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use lmc_core::{RecordField, Violation};
use lmc_engine::Detector;
use lmc_rules::RuleSet;

use crate::{print_json, OutputFormat, EXIT_CLEAN, EXIT_VIOLATIONS};

/// Validate-field subcommand arguments.
#[derive(Args, Debug)]
pub struct FieldArgs {
    /// Record field name, e.g. `weight` or `price_per_unit`.
    #[arg(long)]
    pub field: String,

    /// Field value as it appears in the listing.
    #[arg(long)]
    pub value: String,
}

/// Outcome of a single-field check.
#[derive(Debug, Serialize)]
pub struct FieldValidation {
    pub field: RecordField,
    pub value: String,
    pub is_valid: bool,
    pub violations: Vec<Violation>,
}

/// Validate `value` as the content of `field`.
pub fn validate(rules: &RuleSet, field: &str, value: &str) -> Result<FieldValidation> {
    let field = field
        .parse::<RecordField>()
        .map_err(anyhow::Error::msg)
        .context("unrecognized field name")?;
    let violations = Detector::new(rules).validate_field(field, value);
    Ok(FieldValidation {
        field,
        value: value.to_string(),
        is_valid: violations.is_empty(),
        violations,
    })
}

/// Execute the validate-field subcommand.
pub fn run_field(args: &FieldArgs, rules: &RuleSet, format: OutputFormat) -> Result<u8> {
    let validation = validate(rules, &args.field, &args.value)?;
    match format {
        OutputFormat::Json => print_json(&validation)?,
        OutputFormat::Text => {
            if validation.is_valid {
                println!("{}: valid", validation.field);
            }
            for violation in &validation.violations {
                println!(
                    "{}: [{}] {} - {}",
                    validation.field, violation.severity, violation.description, violation.suggested_fix
                );
            }
        }
    }
    Ok(if validation.is_valid {
        EXIT_CLEAN
    } else {
        EXIT_VIOLATIONS
    })
}
