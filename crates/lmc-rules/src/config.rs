//! # Rules Configuration
//!
//! Optional YAML overrides for the unit reference tables. Every section is
//! optional; anything left out falls back to the built-in tables.
//!
//! ```yaml
//! standard_units:
//!   weight: [kg, g, mg, quintal]
//! non_standard_patterns:
//!   - name: imperial_weight
//!     tokens: [lb, lbs, pound, pounds, oz]
//!   - name: bushel
//!     regex: '\bbushels?\b'
//! prepackaged_package_types: [box, bottle, can, packet, pouch, jar]
//! ```
//!
//! A `standard_units` entry replaces the built-in table for that dimension
//! only. A `non_standard_patterns` list replaces the whole built-in list,
//! because its order is the tie-break.

use std::collections::BTreeMap;
use std::path::Path;

use lmc_core::{ConfigError, Dimension};
use serde::{Deserialize, Serialize};

use crate::units::NonStandardPattern;

/// Package types that mark a listing as a pre-packaged commodity.
pub const DEFAULT_PACKAGE_TYPES: &[&str] = &["box", "bottle", "can", "packet", "pouch"];

/// Deserialized rules file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Per-dimension standard token overrides.
    pub standard_units: BTreeMap<Dimension, Vec<String>>,
    /// Replacement for the ordered non-standard pattern list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_standard_patterns: Option<Vec<PatternSpec>>,
    /// Replacement for [`DEFAULT_PACKAGE_TYPES`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepackaged_package_types: Option<Vec<String>>,
}

/// One pattern definition. Exactly one of `tokens` or `regex` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternSpec {
    /// Pattern name, used in logs and listings.
    pub name: String,
    /// Literal whole-word tokens.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
    /// Raw regular expression, matched case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
}

impl PatternSpec {
    /// Compile this definition.
    pub fn compile(&self) -> Result<NonStandardPattern, ConfigError> {
        match (&self.regex, self.tokens.is_empty()) {
            (Some(regex), true) => NonStandardPattern::from_regex(&self.name, regex),
            (None, false) => NonStandardPattern::from_tokens(&self.name, &self.tokens),
            _ => Err(ConfigError::AmbiguousPattern {
                name: self.name.clone(),
            }),
        }
    }
}

impl RulesConfig {
    /// Parse a rules file body.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read and parse a rules file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let body = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&body)
    }
}
