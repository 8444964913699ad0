//! # lmc-rules: Reference Data for Legal Metrology Compliance
//!
//! The immutable reference data the detector evaluates records against:
//!
//! - **Units** (`units.rs`): standard-unit token tables per dimension and the
//!   ordered non-standard unit patterns.
//! - **Catalog** (`catalog.rs`): fixed severity, section, penalty and fix per
//!   violation type, plus the report recommendation where one exists.
//! - **Sections** (`sections.rs`): the statute sections listings engage.
//! - **Config** (`config.rs`): YAML overrides for the unit tables.
//!
//! Everything is assembled once into a [`RuleSet`] at startup and passed by
//! reference into the engine. A `RuleSet` is never mutated after
//! construction, so any number of threads may read it without locking.
//! Initialization failures are [`ConfigError`]s and are fatal.

pub mod catalog;
pub mod config;
pub mod sections;
pub mod units;

use lmc_core::ConfigError;
use serde::Serialize;

pub use catalog::{CatalogEntry, ViolationCatalog};
pub use config::{PatternSpec, RulesConfig, DEFAULT_PACKAGE_TYPES};
pub use sections::{StatuteSection, CRITICAL_SECTIONS};
pub use units::{NonStandardPattern, UnitTables};

/// Unit tables, violation catalog and pre-packaging triggers, validated
/// together.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSet {
    units: UnitTables,
    #[serde(skip)]
    catalog: &'static ViolationCatalog,
    prepackaged_package_types: Vec<String>,
}

impl RuleSet {
    /// The built-in rule set.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_config(&RulesConfig::default())
    }

    /// Built-in rules with `config` overrides applied.
    pub fn from_config(config: &RulesConfig) -> Result<Self, ConfigError> {
        let catalog = ViolationCatalog::standard();
        catalog.verify()?;

        let mut standard = units::builtin_standard_tables();
        for (dimension, tokens) in &config.standard_units {
            standard.insert(*dimension, tokens.clone());
        }

        let patterns = match &config.non_standard_patterns {
            Some(specs) => specs
                .iter()
                .map(PatternSpec::compile)
                .collect::<Result<Vec<_>, _>>()?,
            None => units::builtin_patterns()?,
        };

        let prepackaged_package_types = match &config.prepackaged_package_types {
            Some(types) => types.clone(),
            None => DEFAULT_PACKAGE_TYPES.iter().map(|t| t.to_string()).collect(),
        };

        let units = UnitTables::new(standard, patterns)?;
        tracing::debug!(
            patterns = units.patterns().len(),
            package_types = prepackaged_package_types.len(),
            "rule set initialized"
        );

        Ok(Self {
            units,
            catalog,
            prepackaged_package_types,
        })
    }

    /// Unit reference tables.
    pub fn units(&self) -> &UnitTables {
        &self.units
    }

    /// Violation catalog.
    pub fn catalog(&self) -> &ViolationCatalog {
        self.catalog
    }

    /// Package types that trigger the pre-packaged declaration check.
    pub fn prepackaged_package_types(&self) -> &[String] {
        &self.prepackaged_package_types
    }

    /// True when `package_type` marks a pre-packaged commodity.
    ///
    /// Comparison is exact, matching how listings declare package types.
    pub fn is_prepackaged_type(&self, package_type: &str) -> bool {
        self.prepackaged_package_types
            .iter()
            .any(|t| t == package_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lmc_core::Dimension;

    #[test]
    fn builtin_rule_set_initializes() {
        let rules = RuleSet::builtin().unwrap();
        assert_eq!(rules.units().patterns().len(), units::BUILTIN_PATTERNS.len());
        assert!(rules.is_prepackaged_type("pouch"));
        assert!(!rules.is_prepackaged_type("Pouch"));
        assert!(!rules.is_prepackaged_type("sack"));
    }

    #[test]
    fn standard_unit_override_replaces_one_dimension() {
        let cfg = RulesConfig::from_yaml_str("standard_units:\n  weight: [quintal]\n").unwrap();
        let rules = RuleSet::from_config(&cfg).unwrap();
        assert!(rules.units().has_standard_unit("2 quintal", Dimension::Weight));
        assert!(!rules.units().has_standard_unit("2 kg", Dimension::Weight));
        assert!(rules.units().has_standard_unit("2 cm", Dimension::Length));
    }

    #[test]
    fn pattern_override_replaces_the_list() {
        let cfg = RulesConfig::from_yaml_str(
            "non_standard_patterns:\n  - name: bushel\n    tokens: [bushel]\n",
        )
        .unwrap();
        let rules = RuleSet::from_config(&cfg).unwrap();
        assert_eq!(rules.units().patterns().len(), 1);
        assert_eq!(rules.units().first_non_standard_match("1 bushel"), Some(0));
        assert_eq!(rules.units().first_non_standard_match("5 lbs"), None);
    }

    #[test]
    fn empty_pattern_override_is_rejected() {
        let cfg = RulesConfig::from_yaml_str("non_standard_patterns: []\n").unwrap();
        assert!(matches!(RuleSet::from_config(&cfg), Err(ConfigError::NoPatterns)));
    }

    #[test]
    fn invalid_pattern_override_is_rejected() {
        let cfg = RulesConfig::from_yaml_str(
            "non_standard_patterns:\n  - name: broken\n    regex: '(lbs'\n",
        )
        .unwrap();
        assert!(matches!(
            RuleSet::from_config(&cfg),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn rule_set_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
