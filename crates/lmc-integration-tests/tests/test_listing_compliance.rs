//! # Listing Compliance Test
//!
//! Drives single listings through rules, detector and report generator:
//! - The wheat flour listing that trips every check category
//! - Standard-unit exemptions and first-match-wins scanning
//! - Pre-packaged declaration fan-out
//! - Status priority and recommendation ordering
//! - Field isolation on malformed values

use lmc_core::{ComplianceStatus, ProductRecord, RecordField, Severity, ViolationType};
use lmc_engine::{check_product, CheckCategory, Detector, COMPLIANT_MESSAGE};
use lmc_rules::RuleSet;
use serde_json::json;

fn rules() -> RuleSet {
    RuleSet::builtin().expect("built-in rules initialize")
}

fn wheat_flour() -> serde_json::Value {
    json!({
        "title": "Organic Wheat Flour - 5 pounds bag",
        "weight": "5 lbs",
        "dimensions": "12 x 8 x 4 inches",
        "price_per_unit": "₹150 per pound",
        "is_prepackaged": true,
        "net_quantity": "5 pounds",
    })
}

// ---------------------------------------------------------------------------
// 1. End-to-end wheat flour listing
// ---------------------------------------------------------------------------

#[test]
fn wheat_flour_trips_every_category() {
    let rules = rules();
    let report = check_product(&rules, &wheat_flour()).unwrap();

    let found: Vec<(ViolationType, &str)> = report
        .violations
        .iter()
        .map(|v| (v.violation_type, v.field_name.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (ViolationType::NonStandardWeightUnit, "weight"),
            (ViolationType::NonStandardLengthUnit, "dimensions"),
            (ViolationType::NonStandardUnitInPricing, "price_per_unit"),
            (ViolationType::NonStandardUnitInDescription, "title"),
            (ViolationType::MissingPrepackagedDeclaration, "manufacturer_details"),
            (ViolationType::MissingPrepackagedDeclaration, "package_date"),
        ]
    );
    assert_eq!(report.status, ComplianceStatus::NonCompliantCritical);
    assert_eq!(report.total_violations, 6);
    assert_eq!(report.count(Severity::Critical), 1);
    assert_eq!(report.count(Severity::High), 4);
    assert_eq!(report.count(Severity::Medium), 1);
    assert_eq!(
        report.recommendations,
        vec![
            "Convert all weight measurements to metric units (kg, g, mg)".to_string(),
            "Convert all length measurements to metric units (m, cm, mm)".to_string(),
            "Add all required pre-packaged commodity declarations".to_string(),
        ]
    );
}

#[test]
fn description_only_listing_has_no_recommendations() {
    let rules = rules();
    let report = check_product(&rules, &json!({"title": "Rice 5 pounds"})).unwrap();
    assert_eq!(report.status, ComplianceStatus::NonCompliantMinor);
    assert_eq!(report.total_violations, 1);
    assert!(report.recommendations.is_empty());
}

#[test]
fn wheat_flour_report_json_shape() {
    let rules = rules();
    let report = check_product(&rules, &wheat_flour()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["status"], "NON_COMPLIANT_CRITICAL");
    assert_eq!(json["total_violations"], 6);
    assert_eq!(json["severity_breakdown"]["high"], 4);
    let first = &json["violations"][0];
    assert_eq!(first["type"], "non_standard_weight_unit");
    assert_eq!(first["severity"], "high");
    assert_eq!(first["section"], "Section 11, 25");
    assert_eq!(first["field"], "weight");
    assert_eq!(first["detected_value"], "5 lbs");
    assert_eq!(
        json["violations"][2]["description"],
        "Price per unit uses non-standard measurement units"
    );
    assert!(first["penalty"].as_str().unwrap().contains("₹25,000"));
    assert!(first["fix"].as_str().unwrap().contains("kg"));
    assert_eq!(json["violations"][5]["detected_value"], "Missing");
}

// ---------------------------------------------------------------------------
// 2. Clean listings
// ---------------------------------------------------------------------------

#[test]
fn listing_without_measurements_is_compliant() {
    let rules = rules();
    let report = check_product(&rules, &json!({"id": "X-1", "brand": "Acme"})).unwrap();
    assert_eq!(report.status, ComplianceStatus::Compliant);
    assert!(report.violations.is_empty());
    assert_eq!(report.recommendations, vec![COMPLIANT_MESSAGE.to_string()]);
}

#[test]
fn fully_declared_metric_listing_is_compliant() {
    let rules = rules();
    let report = check_product(
        &rules,
        &json!({
            "title": "Sunflower Oil 1 l",
            "volume": "1 litre",
            "net_weight": "910 g",
            "price_per_unit": "₹180 per litre",
            "package_type": "bottle",
            "net_quantity": "1 l",
            "manufacturer_details": "Acme Oils, Pune",
            "package_date": "2024-03",
        }),
    )
    .unwrap();
    assert_eq!(report.status, ComplianceStatus::Compliant, "{:?}", report.violations);
}

// ---------------------------------------------------------------------------
// 3. Exemptions and scanning
// ---------------------------------------------------------------------------

#[test]
fn standard_unit_exempts_mixed_weight() {
    let rules = rules();
    let detector = Detector::new(&rules);
    let record = ProductRecord::default().with(RecordField::Weight, "5 kg (approx 11 lbs)");
    assert!(detector.check(&record).is_empty());
}

#[test]
fn exemption_does_not_reach_description() {
    let rules = rules();
    let detector = Detector::new(&rules);
    let record = ProductRecord::default().with(RecordField::Description, "5 kg (approx 11 lbs)");
    let found = detector.check(&record);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].violation_type, ViolationType::NonStandardUnitInDescription);
    assert_eq!(found[0].severity, Severity::Medium);
}

#[test]
fn one_violation_per_field() {
    let rules = rules();
    let detector = Detector::new(&rules);
    let record = ProductRecord::default()
        .with(RecordField::Weight, "5 lbs 3 oz")
        .with(RecordField::GrossWeight, "6 pounds");
    let found = detector.check(&record);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].field_name, "weight");
    assert_eq!(found[1].field_name, "gross_weight");
}

#[test]
fn traditional_units_are_flagged() {
    let rules = rules();
    let detector = Detector::new(&rules);
    let record = ProductRecord::default().with(RecordField::NetWeight, "2 seer");
    let found = detector.check(&record);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].violation_type, ViolationType::NonStandardWeightUnit);
}

// ---------------------------------------------------------------------------
// 4. Pre-packaged declarations
// ---------------------------------------------------------------------------

#[test]
fn net_quantity_alone_leaves_two_missing() {
    let rules = rules();
    let report = check_product(
        &rules,
        &json!({"is_prepackaged": true, "net_quantity": "5 kg"}),
    )
    .unwrap();
    let fields: Vec<&str> = report.violations.iter().map(|v| v.field_name.as_str()).collect();
    assert_eq!(fields, vec!["manufacturer_details", "package_date"]);
    assert_eq!(report.status, ComplianceStatus::NonCompliantHigh);
}

#[test]
fn empty_declaration_counts_as_missing() {
    let rules = rules();
    let report = check_product(
        &rules,
        &json!({
            "package_type": "packet",
            "net_quantity": "",
            "manufacturer_details": "Acme",
            "package_date": "2024-01",
        }),
    )
    .unwrap();
    assert_eq!(report.total_violations, 1);
    assert_eq!(report.violations[0].field_name, "net_quantity");
}

#[test]
fn unlisted_package_type_does_not_trigger() {
    let rules = rules();
    let report = check_product(&rules, &json!({"package_type": "loose"})).unwrap();
    assert_eq!(report.status, ComplianceStatus::Compliant);
}

// ---------------------------------------------------------------------------
// 5. Status priority
// ---------------------------------------------------------------------------

#[test]
fn description_only_is_minor() {
    let rules = rules();
    let report = check_product(&rules, &json!({"title": "Mangoes, 1 dozen"})).unwrap();
    assert_eq!(report.status, ComplianceStatus::NonCompliantMinor);
}

#[test]
fn pricing_makes_listing_critical() {
    let rules = rules();
    let report = check_product(
        &rules,
        &json!({"weight": "2 lbs", "price_per_unit": "₹90 per lb"}),
    )
    .unwrap();
    assert_eq!(report.status, ComplianceStatus::NonCompliantCritical);
}

// ---------------------------------------------------------------------------
// 6. Field isolation
// ---------------------------------------------------------------------------

#[test]
fn structured_weight_skips_only_weight() {
    let rules = rules();
    let record = ProductRecord::from_value(&json!({
        "weight": {"value": 5, "unit": "lbs"},
        "price_per_unit": "₹5 per oz",
        "title": "Widget",
    }))
    .unwrap();
    let inspection = Detector::new(&rules).inspect(&record);
    assert_eq!(inspection.skipped_checks.len(), 1);
    assert_eq!(inspection.skipped_checks[0].category, CheckCategory::Weight);
    assert!(inspection.skipped_checks[0].reason.contains("weight"));
    assert_eq!(inspection.violations.len(), 1);
    assert_eq!(
        inspection.violations[0].violation_type,
        ViolationType::NonStandardUnitInPricing
    );
}

#[test]
fn malformed_weight_still_flags_net_weight() {
    let rules = rules();
    let report = check_product(&rules, &json!({"weight": ["5"], "net_weight": "5 lbs"})).unwrap();
    assert_eq!(report.status, ComplianceStatus::NonCompliantHigh);
    assert_eq!(report.total_violations, 1);
    assert_eq!(report.violations[0].field_name, "net_weight");
    assert_eq!(report.violations[0].detected_value, "5 lbs");
}

#[test]
fn non_object_input_is_rejected() {
    let rules = rules();
    assert!(check_product(&rules, &json!("5 lbs")).is_err());
    assert!(check_product(&rules, &json!([{"weight": "5 lbs"}])).is_err());
}
