//! # Bulk CLI: Audit a batch of listings.
//!
//! ```bash
//! lmc bulk catalog.json
//! lmc bulk catalog.json --parallel
//! lmc --format text bulk catalog.json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lmc_core::Severity;
use lmc_engine::{BulkAggregator, BulkReport, NeverCancel};
use lmc_rules::RuleSet;

use crate::{print_json, read_records, OutputFormat, Stamped, EXIT_CLEAN, EXIT_VIOLATIONS};

/// Bulk subcommand arguments.
#[derive(Args, Debug)]
pub struct BulkArgs {
    /// JSON array of product records, or an object with a `products` array.
    pub records: PathBuf,

    /// Evaluate records on all cores.
    #[arg(long)]
    pub parallel: bool,
}

/// Execute the bulk subcommand.
pub fn run_bulk(args: &BulkArgs, rules: &RuleSet, format: OutputFormat) -> Result<u8> {
    let records = read_records(&args.records)?;
    tracing::info!(count = records.len(), parallel = args.parallel, "starting bulk audit");

    let aggregator = BulkAggregator::new(rules);
    let report = if args.parallel {
        aggregator.run_parallel(&records, &NeverCancel)
    } else {
        aggregator.run(&records, &NeverCancel)
    };

    let code = if report.summary.non_compliant_products == 0 {
        EXIT_CLEAN
    } else {
        EXIT_VIOLATIONS
    };
    match format {
        OutputFormat::Json => print_json(&Stamped::now(report))?,
        OutputFormat::Text => print!("{}", render_text(&report)),
    }
    Ok(code)
}

/// Human-readable batch summary with one line per product.
pub fn render_text(report: &BulkReport) -> String {
    let summary = &report.summary;
    let mut lines = vec![
        format!("Products:        {}", summary.total_products),
        format!(
            "Compliant:       {} ({:.1}%)",
            summary.compliant_products,
            summary.compliance_rate()
        ),
        format!("Non-compliant:   {}", summary.non_compliant_products),
        format!("Failed:          {}", summary.failed_products),
    ];
    for severity in Severity::all().iter().rev() {
        lines.push(format!(
            "  {:<9} {}",
            severity.as_str(),
            summary.severity_count(*severity)
        ));
    }
    if !summary.violation_types.is_empty() {
        lines.push("Violation types:".to_string());
        for (violation_type, count) in &summary.violation_types {
            lines.push(format!("  {violation_type}: {count}"));
        }
    }
    lines.push("Results:".to_string());
    for result in &report.detailed_results {
        let mut line = format!(
            "  {} [{}] {} violation(s) - {}",
            result.product_id, result.compliance_status, result.total_violations, result.product_title
        );
        if let Some(error) = &result.error {
            line.push_str(&format!(" ({error})"));
        }
        lines.push(line);
    }
    if report.cancelled {
        lines.push("Run cancelled before the last record.".to_string());
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report() -> BulkReport {
        let rules = RuleSet::builtin().unwrap();
        BulkAggregator::new(&rules).run(
            &[
                json!({"id": "R-1", "title": "Rice", "weight": "5 kg"}),
                json!({"id": "R-2", "title": "Oats", "weight": "2 lbs"}),
                json!(7),
            ],
            &NeverCancel,
        )
    }

    #[test]
    fn text_shows_counters_and_rows() {
        let text = render_text(&report());
        assert!(text.contains("Products:        3"));
        assert!(text.contains("Compliant:       1 (33.3%)"));
        assert!(text.contains("Failed:          1"));
        assert!(text.contains("non_standard_weight_unit: 1"));
        assert!(text.contains("R-2 [NON_COMPLIANT_HIGH] 1 violation(s) - Oats"));
        assert!(text.contains("product_3 [ERROR]"));
    }

    #[test]
    fn run_bulk_reads_file_and_sets_exit_code() {
        let rules = RuleSet::builtin().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        std::fs::write(&path, r#"[{"weight": "1 kg"}, {"volume": "2 l"}]"#).unwrap();
        let args = BulkArgs {
            records: path,
            parallel: true,
        };
        assert_eq!(run_bulk(&args, &rules, OutputFormat::Json).unwrap(), EXIT_CLEAN);
    }
}
