//! # lmc-engine: Legal Metrology Compliance Evaluation
//!
//! Turns product listings into compliance verdicts against a shared
//! [`RuleSet`]:
//!
//! - **Detector** (`detector.rs`): one record to a list of violations.
//! - **Report** (`report.rs`): violations to a [`ComplianceReport`].
//! - **Bulk** (`bulk.rs`): batches to per-record results plus a
//!   mergeable [`BulkSummary`].
//! - **Alerts** (`alerts.rs`): batches to critical and high-priority alerts.
//! - **Cancel** (`cancel.rs`): cooperative stop signal for batch runs.
//!
//! ```text
//! ProductRecord → Detector → Vec<Violation> → ReportGenerator → ComplianceReport
//! ```
//!
//! All components borrow the rule set and hold no other state, so they are
//! `Copy` and can be handed to rayon workers freely.

pub mod alerts;
pub mod bulk;
pub mod cancel;
pub mod detector;
pub mod report;

use lmc_core::{LmcError, ProductRecord};
use lmc_rules::RuleSet;

pub use alerts::{Alert, AlertBundle, AlertTriage};
pub use bulk::{BulkAggregator, BulkReport, BulkSummary, ProductResult};
pub use cancel::{Cancellable, CancellationToken, NeverCancel};
pub use detector::{CheckCategory, Detector, Inspection, SkippedCheck};
pub use report::{ComplianceReport, ReportGenerator, COMPLIANT_MESSAGE};

/// Check one untyped JSON record and build its report.
pub fn check_product(rules: &RuleSet, value: &serde_json::Value) -> Result<ComplianceReport, LmcError> {
    let record = ProductRecord::from_value(value)?;
    let violations = Detector::new(rules).check(&record);
    Ok(ReportGenerator::new(rules.catalog()).generate(violations))
}
