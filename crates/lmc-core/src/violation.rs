//! # Violation Taxonomy
//!
//! [`ViolationType`] is the closed set of findings the detector can emit.
//! Every variant has exactly one entry in the violation catalog
//! (`lmc-rules`); the catalog is indexed by [`ViolationType::ordinal`].
//!
//! A [`Violation`] is an immutable finding. Its severity, section reference,
//! penalty and suggested fix always equal the catalog entry for its type.
//! Only `field_name`, `detected_value` and the field interpolated into the
//! description vary between instances.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Closed set of violation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// Imperial or traditional unit in a declared weight field.
    NonStandardWeightUnit,
    /// Imperial or traditional unit in a declared length/dimension field.
    NonStandardLengthUnit,
    /// Imperial or traditional unit in a declared volume field.
    NonStandardVolumeUnit,
    /// Non-standard unit in a unit-price quotation.
    NonStandardUnitInPricing,
    /// Non-standard unit in titles, descriptions or feature text.
    NonStandardUnitInDescription,
    /// A mandatory pre-packaged commodity declaration is absent.
    MissingPrepackagedDeclaration,
}

/// Total number of violation types.
pub const VIOLATION_TYPE_COUNT: usize = 6;

impl ViolationType {
    /// Returns all violation types in catalog order.
    pub fn all() -> &'static [ViolationType] {
        &[
            Self::NonStandardWeightUnit,
            Self::NonStandardLengthUnit,
            Self::NonStandardVolumeUnit,
            Self::NonStandardUnitInPricing,
            Self::NonStandardUnitInDescription,
            Self::MissingPrepackagedDeclaration,
        ]
    }

    /// Position of this type in [`ViolationType::all`].
    pub fn ordinal(&self) -> usize {
        match self {
            Self::NonStandardWeightUnit => 0,
            Self::NonStandardLengthUnit => 1,
            Self::NonStandardVolumeUnit => 2,
            Self::NonStandardUnitInPricing => 3,
            Self::NonStandardUnitInDescription => 4,
            Self::MissingPrepackagedDeclaration => 5,
        }
    }

    /// Returns the snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonStandardWeightUnit => "non_standard_weight_unit",
            Self::NonStandardLengthUnit => "non_standard_length_unit",
            Self::NonStandardVolumeUnit => "non_standard_volume_unit",
            Self::NonStandardUnitInPricing => "non_standard_unit_in_pricing",
            Self::NonStandardUnitInDescription => "non_standard_unit_in_description",
            Self::MissingPrepackagedDeclaration => "missing_prepackaged_declaration",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViolationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown violation type: {s:?}"))
    }
}

/// A single compliance finding on one field of one product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Violation type (catalog key).
    #[serde(rename = "type")]
    pub violation_type: ViolationType,
    /// Severity copied from the catalog.
    pub severity: Severity,
    /// Human-readable description naming the offending field.
    pub description: String,
    /// Statute section(s), e.g. "Section 11, 25".
    #[serde(rename = "section")]
    pub section_reference: String,
    /// Penalty exposure text.
    #[serde(rename = "penalty")]
    pub penalty_info: String,
    /// Remediation guidance.
    #[serde(rename = "fix")]
    pub suggested_fix: String,
    /// Record field that was examined.
    #[serde(rename = "field")]
    pub field_name: String,
    /// Value found in that field, or "Missing".
    pub detected_value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_matches_position_in_all() {
        assert_eq!(ViolationType::all().len(), VIOLATION_TYPE_COUNT);
        for (i, ty) in ViolationType::all().iter().enumerate() {
            assert_eq!(ty.ordinal(), i, "{ty} ordinal drifted");
        }
    }

    #[test]
    fn serde_format_matches_as_str() {
        for ty in ViolationType::all() {
            let json = serde_json::to_string(ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
            assert_eq!(ty.as_str().parse::<ViolationType>().unwrap(), *ty);
        }
    }

    #[test]
    fn violation_uses_report_field_names() {
        let v = Violation {
            violation_type: ViolationType::NonStandardWeightUnit,
            severity: Severity::High,
            description: "Non-standard weight unit detected in weight".into(),
            section_reference: "Section 11, 25".into(),
            penalty_info: "Fine".into(),
            suggested_fix: "Use kg".into(),
            field_name: "weight".into(),
            detected_value: "5 lbs".into(),
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "non_standard_weight_unit");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["section"], "Section 11, 25");
        assert_eq!(json["penalty"], "Fine");
        assert_eq!(json["fix"], "Use kg");
        assert_eq!(json["field"], "weight");
        assert_eq!(json["detected_value"], "5 lbs");
    }
}
