//! # Rules CLI: Print the active rule set.
//!
//! Shows the violation catalog, the unit tables actually in force (after
//! any `--config` overrides), the pre-packaging triggers, and the statute
//! sections most relevant to online listings.

use anyhow::Result;
use serde::Serialize;

use lmc_core::Dimension;
use lmc_rules::{CatalogEntry, RuleSet, StatuteSection, UnitTables, CRITICAL_SECTIONS};

use crate::{print_json, OutputFormat, EXIT_CLEAN};

/// Serializable view of a rule set.
#[derive(Debug, Serialize)]
pub struct RulesListing<'a> {
    pub catalog: &'a [CatalogEntry],
    pub units: &'a UnitTables,
    pub prepackaged_package_types: &'a [String],
    pub critical_sections: &'static [StatuteSection],
}

impl<'a> RulesListing<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            catalog: rules.catalog().entries(),
            units: rules.units(),
            prepackaged_package_types: rules.prepackaged_package_types(),
            critical_sections: CRITICAL_SECTIONS,
        }
    }
}

/// Execute the rules subcommand.
pub fn run_rules(rules: &RuleSet, format: OutputFormat) -> Result<u8> {
    let listing = RulesListing::new(rules);
    match format {
        OutputFormat::Json => print_json(&listing)?,
        OutputFormat::Text => print!("{}", render_text(&listing)),
    }
    Ok(EXIT_CLEAN)
}

/// Human-readable rule listing.
pub fn render_text(listing: &RulesListing<'_>) -> String {
    let mut lines = vec!["Violation catalog:".to_string()];
    for entry in listing.catalog {
        lines.push(format!(
            "  {:<34} {:<8} {}",
            entry.violation_type.as_str(),
            entry.severity.as_str(),
            entry.section_reference
        ));
    }

    lines.push("Standard units:".to_string());
    for dimension in Dimension::all() {
        lines.push(format!(
            "  {:<12} {}",
            dimension.as_str(),
            listing.units.standard_tokens(*dimension).join(", ")
        ));
    }

    lines.push("Non-standard patterns (scan order):".to_string());
    for (index, pattern) in listing.units.patterns().iter().enumerate() {
        lines.push(format!("  {}. {}", index + 1, pattern.name()));
    }

    lines.push(format!(
        "Pre-packaged package types: {}",
        listing.prepackaged_package_types.join(", ")
    ));

    lines.push("Critical sections:".to_string());
    for section in listing.critical_sections {
        lines.push(format!("  {}: {}", section.section, section.summary));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
