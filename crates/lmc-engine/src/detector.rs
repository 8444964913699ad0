//! # Violation Detector
//!
//! Maps one [`ProductRecord`] to the list of violations it carries. Six
//! check categories run in a fixed order, each over a fixed field allowlist:
//!
//! | Category    | Standard-unit exemption | Violation type                      |
//! |-------------|-------------------------|-------------------------------------|
//! | Weight      | weight                  | `non_standard_weight_unit`          |
//! | Length      | length                  | `non_standard_length_unit`          |
//! | Volume      | volume                  | `non_standard_volume_unit`          |
//! | Pricing     | none                    | `non_standard_unit_in_pricing`      |
//! | Description | none                    | `non_standard_unit_in_description`  |
//! | Prepackaged | n/a                     | `missing_prepackaged_declaration`   |
//!
//! A scanned field yields at most one violation: the first matching
//! non-standard pattern wins, so `"5 lbs 3 oz"` is a single finding.
//!
//! A field holding a structured value fails with
//! [`CheckError::MalformedValue`]. The failure is logged and recorded as a
//! [`SkippedCheck`]. The other fields of that category and the remaining
//! categories still run.

use std::fmt;

use lmc_core::{
    CheckError, Dimension, FieldValue, InvalidInputError, ProductRecord, RecordField, Violation,
    ViolationType,
};
use lmc_rules::RuleSet;
use serde::Serialize;

/// Detected value recorded for an absent declaration.
pub const MISSING_VALUE: &str = "Missing";

/// Fields scanned by the weight check.
pub const WEIGHT_FIELDS: &[RecordField] = &[
    RecordField::Weight,
    RecordField::NetWeight,
    RecordField::GrossWeight,
    RecordField::PackageWeight,
];

/// Fields scanned by the length check.
pub const LENGTH_FIELDS: &[RecordField] = &[
    RecordField::Length,
    RecordField::Width,
    RecordField::Height,
    RecordField::Dimensions,
    RecordField::Size,
];

/// Fields scanned by the volume check.
pub const VOLUME_FIELDS: &[RecordField] = &[
    RecordField::Volume,
    RecordField::Capacity,
    RecordField::Contents,
    RecordField::LiquidVolume,
];

/// Fields scanned by the pricing check.
pub const PRICING_FIELDS: &[RecordField] = &[RecordField::PricePerUnit];

/// Free-text fields scanned by the description check.
pub const DESCRIPTION_FIELDS: &[RecordField] = &[
    RecordField::Title,
    RecordField::Description,
    RecordField::Features,
    RecordField::Specifications,
];

/// Declarations a pre-packaged commodity must carry.
pub const DECLARATION_FIELDS: &[RecordField] = &[
    RecordField::NetQuantity,
    RecordField::ManufacturerDetails,
    RecordField::PackageDate,
];

// ---------------------------------------------------------------------------
// CheckCategory
// ---------------------------------------------------------------------------

/// One detector check category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Weight,
    Length,
    Volume,
    Pricing,
    Description,
    Prepackaged,
}

impl CheckCategory {
    /// All categories in evaluation order.
    pub fn all() -> &'static [CheckCategory] {
        &[
            Self::Weight,
            Self::Length,
            Self::Volume,
            Self::Pricing,
            Self::Description,
            Self::Prepackaged,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Length => "length",
            Self::Volume => "volume",
            Self::Pricing => "pricing",
            Self::Description => "description",
            Self::Prepackaged => "prepackaged",
        }
    }

    /// The field allowlist this category examines.
    pub fn fields(&self) -> &'static [RecordField] {
        match self {
            Self::Weight => WEIGHT_FIELDS,
            Self::Length => LENGTH_FIELDS,
            Self::Volume => VOLUME_FIELDS,
            Self::Pricing => PRICING_FIELDS,
            Self::Description => DESCRIPTION_FIELDS,
            Self::Prepackaged => DECLARATION_FIELDS,
        }
    }

    /// The violation type this category emits.
    pub fn violation_type(&self) -> ViolationType {
        match self {
            Self::Weight => ViolationType::NonStandardWeightUnit,
            Self::Length => ViolationType::NonStandardLengthUnit,
            Self::Volume => ViolationType::NonStandardVolumeUnit,
            Self::Pricing => ViolationType::NonStandardUnitInPricing,
            Self::Description => ViolationType::NonStandardUnitInDescription,
            Self::Prepackaged => ViolationType::MissingPrepackagedDeclaration,
        }
    }

    /// Dimension whose standard tokens exempt a field from the scan.
    pub fn exemption(&self) -> Option<Dimension> {
        match self {
            Self::Weight => Some(Dimension::Weight),
            Self::Length => Some(Dimension::Length),
            Self::Volume => Some(Dimension::Volume),
            Self::Pricing | Self::Description | Self::Prepackaged => None,
        }
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field that could not be evaluated for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCheck {
    pub category: CheckCategory,
    pub field: RecordField,
    pub reason: String,
}

/// Full detector output for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inspection {
    /// Violations in category order, then field allowlist order.
    pub violations: Vec<Violation>,
    /// Fields skipped because of malformed values.
    pub skipped_checks: Vec<SkippedCheck>,
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

/// Stateless violation detector over a shared [`RuleSet`].
#[derive(Debug, Clone, Copy)]
pub struct Detector<'r> {
    rules: &'r RuleSet,
}

impl<'r> Detector<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'r RuleSet {
        self.rules
    }

    /// Violations for `record`. Deterministic for a given rule set.
    pub fn check(&self, record: &ProductRecord) -> Vec<Violation> {
        self.inspect(record).violations
    }

    /// Violations plus any fields skipped on malformed values.
    pub fn inspect(&self, record: &ProductRecord) -> Inspection {
        let mut inspection = Inspection::default();
        for &category in CheckCategory::all() {
            self.run_category(category, record, &mut inspection);
        }
        inspection
    }

    /// Parse an untyped JSON record and check it.
    pub fn check_value(&self, value: &serde_json::Value) -> Result<Vec<Violation>, InvalidInputError> {
        let record = ProductRecord::from_value(value)?;
        Ok(self.check(&record))
    }

    /// Check a single field in isolation, returning only that field's
    /// violations.
    ///
    /// A lone declaration field never triggers the pre-packaged check, since
    /// the trigger fields are absent.
    pub fn validate_field(&self, field: RecordField, value: impl Into<FieldValue>) -> Vec<Violation> {
        let record = ProductRecord::default().with(field, value);
        self.check(&record)
            .into_iter()
            .filter(|v| v.field_name == field.as_str())
            .collect()
    }

    fn run_category(&self, category: CheckCategory, record: &ProductRecord, into: &mut Inspection) {
        match category {
            CheckCategory::Prepackaged => into.violations.extend(self.check_declarations(record)),
            CheckCategory::Weight
            | CheckCategory::Length
            | CheckCategory::Volume
            | CheckCategory::Pricing
            | CheckCategory::Description => {
                for &field in category.fields() {
                    match self.scan_field(category, field, record) {
                        Ok(found) => into.violations.extend(found),
                        Err(err) => {
                            tracing::warn!(
                                category = %category,
                                field = %field,
                                error = %err,
                                "field check skipped"
                            );
                            into.skipped_checks.push(SkippedCheck {
                                category,
                                field,
                                reason: err.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }

    /// At most one violation for `field` under `category`.
    fn scan_field(
        &self,
        category: CheckCategory,
        field: RecordField,
        record: &ProductRecord,
    ) -> Result<Option<Violation>, CheckError> {
        let Some(value) = record.get(field) else {
            return Ok(None);
        };
        if !value.is_truthy() {
            return Ok(None);
        }
        let text = value.as_text().ok_or(CheckError::MalformedValue {
            field,
            kind: value.kind(),
        })?;

        let units = self.rules.units();
        if category
            .exemption()
            .is_some_and(|dimension| units.has_standard_unit(&text, dimension))
        {
            return Ok(None);
        }

        let Some(index) = units.first_non_standard_match(&text) else {
            return Ok(None);
        };
        let violation_type = category.violation_type();
        tracing::debug!(
            field = %field,
            violation_type = %violation_type,
            pattern = units.pattern(index).map(|p| p.name()).unwrap_or_default(),
            "non-standard unit detected"
        );
        Ok(Some(
            self.rules
                .catalog()
                .violation(violation_type, field, text.into_owned()),
        ))
    }

    fn check_declarations(&self, record: &ProductRecord) -> Vec<Violation> {
        if !self.is_prepackaged(record) {
            return Vec::new();
        }
        DECLARATION_FIELDS
            .iter()
            .filter(|&&field| !record.is_truthy(field))
            .map(|&field| {
                tracing::debug!(field = %field, "pre-packaged declaration missing");
                self.rules.catalog().violation(
                    ViolationType::MissingPrepackagedDeclaration,
                    field,
                    MISSING_VALUE,
                )
            })
            .collect()
    }

    fn is_prepackaged(&self, record: &ProductRecord) -> bool {
        if record.is_truthy(RecordField::IsPrepackaged) {
            return true;
        }
        match record.get(RecordField::PackageType) {
            Some(FieldValue::Text(package_type)) => self.rules.is_prepackaged_type(package_type),
            _ => false,
        }
    }
}
