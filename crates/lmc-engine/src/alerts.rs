//! # Alert Triage
//!
//! Selects the violations that need action across a batch: every Critical
//! violation becomes a critical alert, every High violation a
//! high-priority alert. Medium and Low findings are not surfaced here.

use lmc_core::{ProductRecord, Severity, ViolationType};
use lmc_rules::RuleSet;
use rayon::prelude::*;
use serde::Serialize;

use crate::cancel::Cancellable;
use crate::detector::Detector;

/// One actionable violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub product_id: String,
    pub product_title: String,
    pub violation_type: ViolationType,
    pub description: String,
    pub penalty_info: String,
    pub suggested_fix: String,
}

/// Critical and high-priority alerts for a batch.
///
/// Totals and the immediate-action flag are derived from the lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertBundle {
    critical_alerts: Vec<Alert>,
    high_priority_alerts: Vec<Alert>,
    total_critical: usize,
    total_high_priority: usize,
    requires_immediate_action: bool,
    cancelled: bool,
}

impl AlertBundle {
    pub fn new(critical_alerts: Vec<Alert>, high_priority_alerts: Vec<Alert>) -> Self {
        let mut bundle = Self {
            critical_alerts,
            high_priority_alerts,
            ..Self::default()
        };
        bundle.refresh();
        bundle
    }

    pub fn critical_alerts(&self) -> &[Alert] {
        &self.critical_alerts
    }

    pub fn high_priority_alerts(&self) -> &[Alert] {
        &self.high_priority_alerts
    }

    pub fn total_critical(&self) -> usize {
        self.total_critical
    }

    pub fn total_high_priority(&self) -> usize {
        self.total_high_priority
    }

    /// True when either alert list is non-empty.
    pub fn requires_immediate_action(&self) -> bool {
        self.requires_immediate_action
    }

    /// True when triage stopped before the last record.
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// Append `other`'s alerts after this bundle's.
    pub fn merge(&mut self, other: AlertBundle) {
        self.critical_alerts.extend(other.critical_alerts);
        self.high_priority_alerts.extend(other.high_priority_alerts);
        self.cancelled |= other.cancelled;
        self.refresh();
    }

    /// By-value [`AlertBundle::merge`].
    pub fn merged(mut self, other: AlertBundle) -> Self {
        self.merge(other);
        self
    }

    fn refresh(&mut self) {
        self.total_critical = self.critical_alerts.len();
        self.total_high_priority = self.high_priority_alerts.len();
        self.requires_immediate_action = self.total_critical > 0 || self.total_high_priority > 0;
    }
}

/// Collects alerts over batches.
#[derive(Debug, Clone, Copy)]
pub struct AlertTriage<'r> {
    detector: Detector<'r>,
}

impl<'r> AlertTriage<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self {
            detector: Detector::new(rules),
        }
    }

    /// Alerts for one parsed record at one-based `position`.
    pub fn triage_record(&self, position: usize, record: &ProductRecord) -> AlertBundle {
        let product_id = record.product_id(position);
        let product_title = record.product_title();
        let mut critical = Vec::new();
        let mut high = Vec::new();

        for violation in self.detector.check(record) {
            let bucket = match violation.severity {
                Severity::Critical => &mut critical,
                Severity::High => &mut high,
                Severity::Medium | Severity::Low => continue,
            };
            bucket.push(Alert {
                product_id: product_id.clone(),
                product_title: product_title.clone(),
                violation_type: violation.violation_type,
                description: violation.description,
                penalty_info: violation.penalty_info,
                suggested_fix: violation.suggested_fix,
            });
        }
        AlertBundle::new(critical, high)
    }

    /// Alerts for the record at zero-based `index`; unreadable records
    /// contribute nothing.
    fn triage_value(&self, index: usize, value: &serde_json::Value) -> AlertBundle {
        match ProductRecord::from_value(value) {
            Ok(record) => self.triage_record(index + 1, &record),
            Err(err) => {
                tracing::warn!(position = index + 1, error = %err, "record skipped during triage");
                AlertBundle::default()
            }
        }
    }

    /// Triage `records` in order on the calling thread.
    pub fn run<C>(&self, records: &[serde_json::Value], cancel: &C) -> AlertBundle
    where
        C: Cancellable + ?Sized,
    {
        let mut bundle = AlertBundle::default();
        for (index, value) in records.iter().enumerate() {
            if cancel.is_cancelled() {
                bundle.cancelled = true;
                break;
            }
            bundle.merge(self.triage_value(index, value));
        }
        log_completion(&bundle);
        bundle
    }

    /// Triage `records` on the rayon pool. Alerts keep input order.
    pub fn run_parallel<C>(&self, records: &[serde_json::Value], cancel: &C) -> AlertBundle
    where
        C: Cancellable + Sync + ?Sized,
    {
        let bundle = records
            .par_iter()
            .enumerate()
            .map(|(index, value)| {
                if cancel.is_cancelled() {
                    AlertBundle {
                        cancelled: true,
                        ..AlertBundle::default()
                    }
                } else {
                    self.triage_value(index, value)
                }
            })
            .reduce(AlertBundle::default, AlertBundle::merged);
        log_completion(&bundle);
        bundle
    }
}

fn log_completion(bundle: &AlertBundle) {
    tracing::info!(
        critical = bundle.total_critical,
        high = bundle.total_high_priority,
        cancelled = bundle.cancelled,
        "alert triage complete"
    );
}
