//! # Compliance Report
//!
//! Folds a violation list into a [`ComplianceReport`]: overall status from
//! the worst severity, a per-severity breakdown, and one recommendation per
//! distinct violation type in catalog order. Types without a catalog
//! recommendation add none, so a non-compliant report may list none at all.

use std::collections::{BTreeMap, BTreeSet};

use lmc_core::{ComplianceStatus, Severity, Violation, ViolationType};
use lmc_rules::ViolationCatalog;
use serde::Serialize;

/// Sole recommendation for a listing with no violations.
pub const COMPLIANT_MESSAGE: &str =
    "Product listing appears to be compliant with Legal Metrology Act 2009";

/// Compliance verdict for one product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub status: ComplianceStatus,
    pub total_violations: usize,
    /// Count per severity. Severities with no violations are absent.
    pub severity_breakdown: BTreeMap<Severity, usize>,
    /// Violations in detector emission order.
    pub violations: Vec<Violation>,
    pub recommendations: Vec<String>,
}

impl ComplianceReport {
    /// Number of violations at `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.severity_breakdown.get(&severity).copied().unwrap_or(0)
    }
}

/// Builds reports against a violation catalog.
#[derive(Debug, Clone, Copy)]
pub struct ReportGenerator<'r> {
    catalog: &'r ViolationCatalog,
}

impl<'r> ReportGenerator<'r> {
    pub fn new(catalog: &'r ViolationCatalog) -> Self {
        Self { catalog }
    }

    /// Build the report for `violations`.
    pub fn generate(&self, violations: Vec<Violation>) -> ComplianceReport {
        if violations.is_empty() {
            return ComplianceReport {
                status: ComplianceStatus::Compliant,
                total_violations: 0,
                severity_breakdown: BTreeMap::new(),
                violations,
                recommendations: vec![COMPLIANT_MESSAGE.to_string()],
            };
        }

        let mut severity_breakdown = BTreeMap::new();
        for violation in &violations {
            *severity_breakdown.entry(violation.severity).or_insert(0) += 1;
        }
        let status = ComplianceStatus::from_severities(violations.iter().map(|v| v.severity));

        let present: BTreeSet<ViolationType> =
            violations.iter().map(|v| v.violation_type).collect();
        let recommendations = self
            .catalog
            .entries()
            .iter()
            .filter(|entry| present.contains(&entry.violation_type))
            .filter_map(|entry| entry.recommendation.map(str::to_string))
            .collect();

        ComplianceReport {
            status,
            total_violations: violations.len(),
            severity_breakdown,
            violations,
            recommendations,
        }
    }
}
