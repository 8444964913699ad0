//! # Bulk Aggregator
//!
//! Evaluates an ordered batch of records and folds the per-record results
//! into a [`BulkSummary`]. Summaries combine with [`BulkSummary::merge`],
//! which is associative and commutative, so the rayon-parallel run and the
//! sequential run produce identical reports.
//!
//! A record that cannot be read becomes an `ERROR` result and the batch
//! continues.

use std::collections::BTreeMap;

use lmc_core::{ComplianceStatus, ProductRecord, Severity, Violation, ViolationType};
use lmc_rules::RuleSet;
use rayon::prelude::*;
use serde::Serialize;

use crate::cancel::Cancellable;
use crate::detector::{Detector, SkippedCheck};
use crate::report::ReportGenerator;

/// Outcome for one record of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductResult {
    pub product_id: String,
    pub product_title: String,
    pub compliance_status: ComplianceStatus,
    pub total_violations: usize,
    pub violations: Vec<Violation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_checks: Vec<SkippedCheck>,
    /// Why the record could not be evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProductResult {
    fn failed(product_id: String, error: String) -> Self {
        Self {
            product_id,
            product_title: lmc_core::UNKNOWN_PRODUCT_TITLE.to_string(),
            compliance_status: ComplianceStatus::Error,
            total_violations: 0,
            violations: Vec::new(),
            skipped_checks: Vec::new(),
            error: Some(error),
        }
    }
}

// ---------------------------------------------------------------------------
// BulkSummary
// ---------------------------------------------------------------------------

/// Batch counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub total_products: usize,
    pub compliant_products: usize,
    /// Includes failed records.
    pub non_compliant_products: usize,
    pub failed_products: usize,
    pub critical_violations: usize,
    pub high_violations: usize,
    pub medium_violations: usize,
    pub low_violations: usize,
    pub violation_types: BTreeMap<ViolationType, usize>,
}

impl BulkSummary {
    /// Summary of a single result.
    pub fn from_result(result: &ProductResult) -> Self {
        let mut summary = Self::default();
        summary.record(result);
        summary
    }

    /// Count `result` into this summary.
    pub fn record(&mut self, result: &ProductResult) {
        self.total_products += 1;
        if result.compliance_status.is_compliant() {
            self.compliant_products += 1;
        } else {
            self.non_compliant_products += 1;
        }
        if result.compliance_status == ComplianceStatus::Error {
            self.failed_products += 1;
        }
        for violation in &result.violations {
            *self.severity_slot_mut(violation.severity) += 1;
            *self
                .violation_types
                .entry(violation.violation_type)
                .or_insert(0) += 1;
        }
    }

    /// Add `other`'s counts to this summary.
    pub fn merge(&mut self, other: &BulkSummary) {
        self.total_products += other.total_products;
        self.compliant_products += other.compliant_products;
        self.non_compliant_products += other.non_compliant_products;
        self.failed_products += other.failed_products;
        self.critical_violations += other.critical_violations;
        self.high_violations += other.high_violations;
        self.medium_violations += other.medium_violations;
        self.low_violations += other.low_violations;
        for (violation_type, count) in &other.violation_types {
            *self.violation_types.entry(*violation_type).or_insert(0) += count;
        }
    }

    /// By-value [`BulkSummary::merge`], for folds and reductions.
    pub fn merged(mut self, other: BulkSummary) -> Self {
        self.merge(&other);
        self
    }

    /// Violations counted at `severity`.
    pub fn severity_count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical_violations,
            Severity::High => self.high_violations,
            Severity::Medium => self.medium_violations,
            Severity::Low => self.low_violations,
        }
    }

    /// Sum of the per-severity counters.
    pub fn total_violations(&self) -> usize {
        Severity::all().iter().map(|&s| self.severity_count(s)).sum()
    }

    /// Percentage of compliant products, `0.0` for an empty batch.
    pub fn compliance_rate(&self) -> f64 {
        if self.total_products == 0 {
            return 0.0;
        }
        self.compliant_products as f64 * 100.0 / self.total_products as f64
    }

    fn severity_slot_mut(&mut self, severity: Severity) -> &mut usize {
        match severity {
            Severity::Critical => &mut self.critical_violations,
            Severity::High => &mut self.high_violations,
            Severity::Medium => &mut self.medium_violations,
            Severity::Low => &mut self.low_violations,
        }
    }
}

/// Batch output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkReport {
    pub summary: BulkSummary,
    /// Results in input order.
    pub detailed_results: Vec<ProductResult>,
    /// True when the run stopped before the last record.
    pub cancelled: bool,
}

// ---------------------------------------------------------------------------
// BulkAggregator
// ---------------------------------------------------------------------------

/// Runs the detector and report generator over batches.
#[derive(Debug, Clone, Copy)]
pub struct BulkAggregator<'r> {
    detector: Detector<'r>,
    generator: ReportGenerator<'r>,
}

impl<'r> BulkAggregator<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            detector: Detector::new(rules),
            generator: ReportGenerator::new(rules.catalog()),
        }
    }

    /// Evaluate the record at zero-based `index` of a batch.
    pub fn evaluate(&self, index: usize, value: &serde_json::Value) -> ProductResult {
        let position = index + 1;
        match ProductRecord::from_value(value) {
            Ok(record) => self.evaluate_record(position, &record),
            Err(err) => {
                tracing::warn!(position, error = %err, "record could not be evaluated");
                ProductResult::failed(format!("product_{position}"), err.to_string())
            }
        }
    }

    /// Evaluate a parsed record at one-based `position`.
    pub fn evaluate_record(&self, position: usize, record: &ProductRecord) -> ProductResult {
        let inspection = self.detector.inspect(record);
        let report = self.generator.generate(inspection.violations);
        ProductResult {
            product_id: record.product_id(position),
            product_title: record.product_title(),
            compliance_status: report.status,
            total_violations: report.total_violations,
            violations: report.violations,
            skipped_checks: inspection.skipped_checks,
            error: None,
        }
    }

    /// Evaluate `records` in order on the calling thread.
    pub fn run<C>(&self, records: &[serde_json::Value], cancel: &C) -> BulkReport
    where
        C: Cancellable + ?Sized,
    {
        let mut report = BulkReport::default();
        for (index, value) in records.iter().enumerate() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            let result = self.evaluate(index, value);
            report.summary.record(&result);
            report.detailed_results.push(result);
        }
        log_completion(&report);
        report
    }

    /// Evaluate `records` on the rayon pool.
    ///
    /// Results keep input order. On cancellation, records not yet started
    /// are dropped and the report holds the ones that finished.
    pub fn run_parallel<C>(&self, records: &[serde_json::Value], cancel: &C) -> BulkReport
    where
        C: Cancellable + Sync + ?Sized,
    {
        let evaluated: Vec<Option<ProductResult>> = records
            .par_iter()
            .enumerate()
            .map(|(index, value)| {
                if cancel.is_cancelled() {
                    None
                } else {
                    Some(self.evaluate(index, value))
                }
            })
            .collect();

        let cancelled = evaluated.iter().any(Option::is_none);
        let detailed_results: Vec<ProductResult> = evaluated.into_iter().flatten().collect();
        let summary = detailed_results
            .par_iter()
            .map(BulkSummary::from_result)
            .reduce(BulkSummary::default, BulkSummary::merged);

        let report = BulkReport {
            summary,
            detailed_results,
            cancelled,
        };
        log_completion(&report);
        report
    }
}

fn log_completion(report: &BulkReport) {
    tracing::info!(
        total = report.summary.total_products,
        compliant = report.summary.compliant_products,
        non_compliant = report.summary.non_compliant_products,
        failed = report.summary.failed_products,
        cancelled = report.cancelled,
        "bulk compliance run complete"
    );
}
