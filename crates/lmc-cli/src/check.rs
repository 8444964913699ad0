//! # Check CLI: Compliance report for a single listing.
//!
//! ```bash
//! lmc check listing.json
//! lmc --format text check listing.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use lmc_engine::{check_product, ComplianceReport};
use lmc_rules::RuleSet;

use crate::{print_json, read_json, OutputFormat, EXIT_CLEAN, EXIT_VIOLATIONS};

/// Check subcommand arguments.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to a JSON object describing one product listing.
    pub record: PathBuf,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, rules: &RuleSet, format: OutputFormat) -> Result<u8> {
    let value = read_json(&args.record)?;
    let report = check_product(rules, &value)
        .with_context(|| format!("{} is not a product record", args.record.display()))?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", render_text(&report)),
    }

    Ok(if report.status.is_compliant() {
        EXIT_CLEAN
    } else {
        EXIT_VIOLATIONS
    })
}

/// Human-readable rendering of a report.
pub fn render_text(report: &ComplianceReport) -> String {
    let mut lines = vec![
        format!("Status:     {}", report.status),
        format!("Violations: {}", report.total_violations),
    ];
    for violation in &report.violations {
        lines.push(format!(
            "  [{}] {} ({}): {}",
            violation.severity, violation.violation_type, violation.field_name, violation.description
        ));
        lines.push(format!("      detected: {}", violation.detected_value));
        lines.push(format!("      {} | {}", violation.section_reference, violation.penalty_info));
        lines.push(format!("      fix: {}", violation.suggested_fix));
    }
    if !report.recommendations.is_empty() {
        lines.push("Recommendations:".to_string());
        for recommendation in &report.recommendations {
            lines.push(format!("  - {recommendation}"));
        }
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
