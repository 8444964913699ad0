//! # Violation Catalog
//!
//! Fixed metadata for every [`ViolationType`]: severity, statute section,
//! penalty exposure, suggested fix, and the report recommendation line where
//! the type has one.
//!
//! The catalog is a process-wide constant. Entries are stored in
//! [`ViolationType::all`] order so that lookup is a direct index by
//! [`ViolationType::ordinal`]; [`ViolationCatalog::verify`] checks that
//! ordering once at startup.
//!
//! Violations are only ever built through [`ViolationCatalog::violation`],
//! which is what guarantees that a violation's severity, section, penalty
//! and fix always equal its catalog entry.

use lmc_core::{ConfigError, RecordField, Severity, Violation, ViolationType, VIOLATION_TYPE_COUNT};
use serde::Serialize;

/// Placeholder replaced by the field name in description templates.
const FIELD_PLACEHOLDER: &str = "{field}";

/// Penalty under Section 25 (non-standard weights or measures).
const PENALTY_NON_STANDARD_MEASURE: &str =
    "Fine up to ₹25,000, imprisonment up to 6 months for repeat offenses";
/// Penalty under Section 11 (quotation in non-standard units).
const PENALTY_QUOTATION: &str =
    "Fine up to ₹10,000, imprisonment up to 1 year for repeat offenses";
/// Penalty under Section 36 (non-compliant pre-packaged commodities).
const PENALTY_PREPACKAGED: &str =
    "Fine up to ₹1,00,000, imprisonment up to 1 year for repeat offenses";

/// Fixed metadata for one violation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Violation type this entry describes.
    pub violation_type: ViolationType,
    /// Severity of every violation of this type.
    pub severity: Severity,
    /// Description, with a `{field}` placeholder where the type spans
    /// several fields.
    pub description_template: &'static str,
    /// Statute section(s).
    pub section_reference: &'static str,
    /// Penalty exposure.
    pub penalty_info: &'static str,
    /// Remediation guidance attached to each violation.
    pub suggested_fix: &'static str,
    /// Report-level recommendation emitted once per distinct type.
    /// Pricing and description findings carry none.
    pub recommendation: Option<&'static str>,
}

impl CatalogEntry {
    /// Render the description for `field`.
    pub fn describe(&self, field: &str) -> String {
        self.description_template.replace(FIELD_PLACEHOLDER, field)
    }
}

/// The immutable violation catalog.
#[derive(Debug, Serialize)]
pub struct ViolationCatalog {
    entries: [CatalogEntry; VIOLATION_TYPE_COUNT],
}

static STANDARD_CATALOG: ViolationCatalog = ViolationCatalog {
    entries: [
        CatalogEntry {
            violation_type: ViolationType::NonStandardWeightUnit,
            severity: Severity::High,
            description_template: "Non-standard weight unit detected in {field}",
            section_reference: "Section 11, 25",
            penalty_info: PENALTY_NON_STANDARD_MEASURE,
            suggested_fix: "Use standard metric units: kg, g, mg",
            recommendation: Some("Convert all weight measurements to metric units (kg, g, mg)"),
        },
        CatalogEntry {
            violation_type: ViolationType::NonStandardLengthUnit,
            severity: Severity::High,
            description_template: "Non-standard length unit detected in {field}",
            section_reference: "Section 11, 25",
            penalty_info: PENALTY_NON_STANDARD_MEASURE,
            suggested_fix: "Use standard metric units: m, cm, mm",
            recommendation: Some("Convert all length measurements to metric units (m, cm, mm)"),
        },
        CatalogEntry {
            violation_type: ViolationType::NonStandardVolumeUnit,
            severity: Severity::High,
            description_template: "Non-standard volume unit detected in {field}",
            section_reference: "Section 11, 25",
            penalty_info: PENALTY_NON_STANDARD_MEASURE,
            suggested_fix: "Use standard metric units: l, ml",
            recommendation: Some("Convert all volume measurements to metric units (l, ml)"),
        },
        CatalogEntry {
            violation_type: ViolationType::NonStandardUnitInPricing,
            severity: Severity::Critical,
            description_template: "Price per unit uses non-standard measurement units",
            section_reference: "Section 11",
            penalty_info: PENALTY_QUOTATION,
            suggested_fix: "Quote prices only in standard metric units",
            recommendation: None,
        },
        CatalogEntry {
            violation_type: ViolationType::NonStandardUnitInDescription,
            severity: Severity::Medium,
            description_template: "Non-standard units found in {field}",
            section_reference: "Section 11",
            penalty_info: PENALTY_QUOTATION,
            suggested_fix: "Replace with standard metric units in product descriptions",
            recommendation: None,
        },
        CatalogEntry {
            violation_type: ViolationType::MissingPrepackagedDeclaration,
            severity: Severity::High,
            description_template: "Missing required declaration: {field}",
            section_reference: "Section 18",
            penalty_info: PENALTY_PREPACKAGED,
            suggested_fix:
                "Declare net quantity, manufacturer details and packaging date on the listing",
            recommendation: Some("Add all required pre-packaged commodity declarations"),
        },
    ],
};

impl ViolationCatalog {
    /// The process-wide standard catalog.
    pub fn standard() -> &'static ViolationCatalog {
        &STANDARD_CATALOG
    }

    /// Check that entry `i` describes `ViolationType::all()[i]`.
    pub fn verify(&self) -> Result<(), ConfigError> {
        for (index, (entry, expected)) in self
            .entries
            .iter()
            .zip(ViolationType::all())
            .enumerate()
        {
            if entry.violation_type != *expected {
                return Err(ConfigError::CatalogMismatch {
                    index,
                    expected: expected.to_string(),
                    found: entry.violation_type.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Entry for `violation_type`.
    pub fn entry(&self, violation_type: ViolationType) -> &CatalogEntry {
        &self.entries[violation_type.ordinal()]
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Build a violation of `violation_type` on `field`.
    ///
    /// Severity, section, penalty and fix come from the catalog entry.
    pub fn violation(
        &self,
        violation_type: ViolationType,
        field: RecordField,
        detected_value: impl Into<String>,
    ) -> Violation {
        let entry = self.entry(violation_type);
        Violation {
            violation_type,
            severity: entry.severity,
            description: entry.describe(field.as_str()),
            section_reference: entry.section_reference.to_string(),
            penalty_info: entry.penalty_info.to_string(),
            suggested_fix: entry.suggested_fix.to_string(),
            field_name: field.as_str().to_string(),
            detected_value: detected_value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_is_ordered() {
        ViolationCatalog::standard().verify().unwrap();
        assert_eq!(ViolationCatalog::standard().entries().len(), VIOLATION_TYPE_COUNT);
    }

    #[test]
    fn every_type_has_exactly_one_entry() {
        let catalog = ViolationCatalog::standard();
        for ty in ViolationType::all() {
            let matching = catalog
                .entries()
                .iter()
                .filter(|e| e.violation_type == *ty)
                .count();
            assert_eq!(matching, 1, "{ty} must have exactly one entry");
            assert_eq!(catalog.entry(*ty).violation_type, *ty);
        }
    }

    #[test]
    fn severities_match_regulatory_weight() {
        let catalog = ViolationCatalog::standard();
        assert_eq!(
            catalog.entry(ViolationType::NonStandardUnitInPricing).severity,
            Severity::Critical
        );
        assert_eq!(
            catalog.entry(ViolationType::NonStandardUnitInDescription).severity,
            Severity::Medium
        );
        assert_eq!(
            catalog.entry(ViolationType::MissingPrepackagedDeclaration).severity,
            Severity::High
        );
        assert_eq!(
            catalog.entry(ViolationType::NonStandardWeightUnit).severity,
            Severity::High
        );
    }

    #[test]
    fn violation_copies_catalog_metadata() {
        let catalog = ViolationCatalog::standard();
        let v = catalog.violation(
            ViolationType::MissingPrepackagedDeclaration,
            RecordField::PackageDate,
            "Missing",
        );
        let entry = catalog.entry(ViolationType::MissingPrepackagedDeclaration);
        assert_eq!(v.severity, entry.severity);
        assert_eq!(v.section_reference, entry.section_reference);
        assert_eq!(v.penalty_info, entry.penalty_info);
        assert_eq!(v.suggested_fix, entry.suggested_fix);
        assert_eq!(v.description, "Missing required declaration: package_date");
        assert_eq!(v.field_name, "package_date");
        assert_eq!(v.detected_value, "Missing");
    }

    #[test]
    fn multi_field_templates_carry_the_field_placeholder() {
        for entry in ViolationCatalog::standard().entries() {
            if entry.violation_type == ViolationType::NonStandardUnitInPricing {
                continue;
            }
            assert!(
                entry.description_template.contains(FIELD_PLACEHOLDER),
                "{} template lacks {FIELD_PLACEHOLDER}",
                entry.violation_type
            );
        }
    }

    #[test]
    fn pricing_description_is_fixed() {
        let v = ViolationCatalog::standard().violation(
            ViolationType::NonStandardUnitInPricing,
            RecordField::PricePerUnit,
            "₹50 per lb",
        );
        assert_eq!(v.description, "Price per unit uses non-standard measurement units");
        assert_eq!(v.field_name, "price_per_unit");
    }

    #[test]
    fn only_unit_and_declaration_types_carry_recommendations() {
        let catalog = ViolationCatalog::standard();
        let with_recommendation: Vec<ViolationType> = catalog
            .entries()
            .iter()
            .filter(|e| e.recommendation.is_some())
            .map(|e| e.violation_type)
            .collect();
        assert_eq!(
            with_recommendation,
            vec![
                ViolationType::NonStandardWeightUnit,
                ViolationType::NonStandardLengthUnit,
                ViolationType::NonStandardVolumeUnit,
                ViolationType::MissingPrepackagedDeclaration,
            ]
        );
    }

    #[test]
    fn mismatched_catalog_is_a_config_error() {
        let mut entries = STANDARD_CATALOG.entries.clone();
        entries.swap(0, 1);
        let catalog = ViolationCatalog { entries };
        let err = catalog.verify().unwrap_err();
        assert!(matches!(err, ConfigError::CatalogMismatch { index: 0, .. }));
    }
}
