//! # Alerts CLI: Critical and high-priority alerts for a batch.
//!
//! ```bash
//! lmc alerts catalog.json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lmc_engine::{Alert, AlertBundle, AlertTriage, NeverCancel};
use lmc_rules::RuleSet;

use crate::{print_json, read_records, OutputFormat, Stamped, EXIT_CLEAN, EXIT_VIOLATIONS};

/// Alerts subcommand arguments.
#[derive(Args, Debug)]
pub struct AlertsArgs {
    /// JSON array of product records, or an object with a `products` array.
    pub records: PathBuf,

    /// Evaluate records on all cores.
    #[arg(long)]
    pub parallel: bool,
}

/// Execute the alerts subcommand.
pub fn run_alerts(args: &AlertsArgs, rules: &RuleSet, format: OutputFormat) -> Result<u8> {
    let records = read_records(&args.records)?;
    let triage = AlertTriage::new(rules);
    let bundle = if args.parallel {
        triage.run_parallel(&records, &NeverCancel)
    } else {
        triage.run(&records, &NeverCancel)
    };

    let code = if bundle.requires_immediate_action() {
        EXIT_VIOLATIONS
    } else {
        EXIT_CLEAN
    };
    match format {
        OutputFormat::Json => print_json(&Stamped::now(bundle))?,
        OutputFormat::Text => print!("{}", render_text(&bundle)),
    }
    Ok(code)
}

/// Human-readable alert listing.
pub fn render_text(bundle: &AlertBundle) -> String {
    let mut lines = vec![
        format!("Critical alerts:      {}", bundle.total_critical()),
        format!("High-priority alerts: {}", bundle.total_high_priority()),
        format!(
            "Immediate action:     {}",
            if bundle.requires_immediate_action() { "required" } else { "none" }
        ),
    ];
    push_section(&mut lines, "CRITICAL", bundle.critical_alerts());
    push_section(&mut lines, "HIGH", bundle.high_priority_alerts());
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn push_section(lines: &mut Vec<String>, label: &str, alerts: &[Alert]) {
    for alert in alerts {
        lines.push(format!(
            "{label} {} ({}): {}",
            alert.product_id, alert.product_title, alert.description
        ));
        lines.push(format!("    penalty: {}", alert.penalty_info));
        lines.push(format!("    fix:     {}", alert.suggested_fix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_lists_alerts_by_priority() {
        let rules = RuleSet::builtin().unwrap();
        let bundle = AlertTriage::new(&rules).run(
            &[
                json!({"id": "T-1", "title": "Tea", "price_per_unit": "₹4 per oz"}),
                json!({"id": "T-2", "title": "Jam", "package_type": "bottle", "net_quantity": "500 g", "manufacturer_details": "Acme"}),
            ],
            &NeverCancel,
        );
        let text = render_text(&bundle);
        assert!(text.contains("Critical alerts:      1"));
        assert!(text.contains("High-priority alerts: 1"));
        assert!(text.contains("Immediate action:     required"));
        assert!(text.contains("CRITICAL T-1 (Tea)"));
        assert!(text.contains("HIGH T-2 (Jam)"));
    }

    #[test]
    fn clean_batch_exits_clean() {
        let rules = RuleSet::builtin().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.json");
        std::fs::write(&path, r#"{"products": [{"title": "Salt 1 kg"}]}"#).unwrap();
        let args = AlertsArgs {
            records: path,
            parallel: false,
        };
        assert_eq!(run_alerts(&args, &rules, OutputFormat::Text).unwrap(), EXIT_CLEAN);
    }
}
