//! # lmc-cli: Command-Line Interface for the Compliance Engine
//!
//! Provides the `lmc` binary.
//!
//! ## Subcommands
//!
//! - `lmc check`: Compliance report for one listing.
//! - `lmc bulk`: Batch audit with summary counters.
//! - `lmc alerts`: Critical and high-priority alerts for a batch.
//! - `lmc validate-field`: Check a single field value.
//! - `lmc rules`: Print the violation catalog, unit tables and sections.
//!
//! ```bash
//! lmc check listing.json
//! lmc --config rules.yaml bulk catalog.json --parallel
//! lmc --format text alerts catalog.json
//! lmc validate-field --field weight --value "5 lbs"
//! ```
//!
//! Exit codes: `0` clean, `2` when violations (or actionable alerts) were
//! found, `1` on any error.

pub mod alerts;
pub mod bulk;
pub mod check;
pub mod field;
pub mod rules;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lmc_rules::{RuleSet, RulesConfig};
use serde::Serialize;

/// Process exit code when nothing needs attention.
pub const EXIT_CLEAN: u8 = 0;

/// Process exit code when violations were found.
pub const EXIT_VIOLATIONS: u8 = 2;

/// Output rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// Human-readable summary.
    Text,
}

/// Build the rule set, applying the rules file at `config` when given.
pub fn load_rules(config: Option<&Path>) -> Result<RuleSet> {
    let rules_config = match config {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("failed to load rules file: {}", path.display()))?,
        None => RulesConfig::default(),
    };
    RuleSet::from_config(&rules_config).context("failed to initialize rule tables")
}

/// Read and parse one JSON document.
pub fn read_json(path: &Path) -> Result<serde_json::Value> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("failed to parse JSON in {}", path.display()))
}

/// Read a batch of records.
///
/// Accepts a top-level array, or an object holding the array under
/// `products`.
pub fn read_records(path: &Path) -> Result<Vec<serde_json::Value>> {
    match read_json(path)? {
        serde_json::Value::Array(records) => Ok(records),
        serde_json::Value::Object(mut map) => match map.remove("products") {
            Some(serde_json::Value::Array(records)) => Ok(records),
            _ => anyhow::bail!(
                "{} must hold a JSON array of records or an object with a `products` array",
                path.display()
            ),
        },
        _ => anyhow::bail!("{} must hold a JSON array of records", path.display()),
    }
}

/// A batch output tagged with the time it was produced.
#[derive(Debug, Serialize)]
pub struct Stamped<T> {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Stamped<T> {
    pub fn now(body: T) -> Self {
        Self {
            generated_at: Utc::now(),
            body,
        }
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_rules_without_config_uses_builtins() {
        let rules = load_rules(None).unwrap();
        assert!(rules.is_prepackaged_type("box"));
    }

    #[test]
    fn load_rules_applies_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        std::fs::write(&path, "prepackaged_package_types: [jar]\n").unwrap();
        let rules = load_rules(Some(&path)).unwrap();
        assert!(rules.is_prepackaged_type("jar"));
        assert!(!rules.is_prepackaged_type("box"));
    }

    #[test]
    fn load_rules_reports_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        std::fs::write(&path, "standard_units: [oops\n").unwrap();
        let err = load_rules(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load rules file"));
    }

    #[test]
    fn read_records_accepts_array_and_products_object() {
        let dir = tempfile::tempdir().unwrap();
        let array = dir.path().join("array.json");
        std::fs::write(&array, r#"[{"id": "a"}, {"id": "b"}]"#).unwrap();
        assert_eq!(read_records(&array).unwrap().len(), 2);

        let wrapped = dir.path().join("wrapped.json");
        std::fs::write(&wrapped, r#"{"products": [{"id": "a"}]}"#).unwrap();
        assert_eq!(read_records(&wrapped).unwrap().len(), 1);
    }

    #[test]
    fn read_records_rejects_scalar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scalar.json");
        std::fs::write(&path, "17").unwrap();
        assert!(read_records(&path).is_err());
    }

    #[test]
    fn read_json_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn stamped_flattens_body() {
        #[derive(Serialize)]
        struct Body {
            total: usize,
        }
        let json = serde_json::to_value(Stamped::now(Body { total: 3 })).unwrap();
        assert_eq!(json["total"], 3);
        assert!(json["generated_at"].is_string());
    }
}
