//! # Severity & Compliance Status
//!
//! [`Severity`] is the ordinal classification of a single violation.
//! [`ComplianceStatus`] is the classification of a whole record, derived
//! purely from the multiset of its violation severities.
//!
//! ## Status Derivation
//!
//! ```text
//! any Critical          → NON_COMPLIANT_CRITICAL
//! else any High         → NON_COMPLIANT_HIGH
//! else any Medium/Low   → NON_COMPLIANT_MINOR
//! no violations         → COMPLIANT
//! ```
//!
//! The derivation matches exhaustively on [`Severity`], so a new severity
//! level is a compile error until its status mapping is chosen.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a single violation. Ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Cosmetic or advisory finding.
    Low,
    /// Non-standard units in free-text marketing copy.
    Medium,
    /// Non-standard units in declared measurements, missing declarations.
    High,
    /// Non-standard units in price quotations.
    Critical,
}

/// Total number of severity levels.
pub const SEVERITY_COUNT: usize = 4;

impl Severity {
    /// Returns all severities in ascending order.
    pub fn all() -> &'static [Severity] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    /// Returns the snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| format!("unknown severity: {s:?}"))
    }
}

/// Overall compliance classification of one product record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    /// No violations were detected.
    Compliant,
    /// Only Medium/Low violations were detected.
    NonCompliantMinor,
    /// At least one High violation and no Critical ones.
    NonCompliantHigh,
    /// At least one Critical violation.
    NonCompliantCritical,
    /// The record could not be evaluated. Only produced by bulk runs for
    /// inputs that are not key/value mappings; never derived from severities.
    Error,
}

impl ComplianceStatus {
    /// Derive the status from a multiset of severities.
    ///
    /// Pure and order-independent: only the worst severity matters.
    pub fn from_severities<I>(severities: I) -> Self
    where
        I: IntoIterator<Item = Severity>,
    {
        match severities.into_iter().max() {
            None => Self::Compliant,
            Some(worst) => match worst {
                Severity::Critical => Self::NonCompliantCritical,
                Severity::High => Self::NonCompliantHigh,
                Severity::Medium | Severity::Low => Self::NonCompliantMinor,
            },
        }
    }

    /// Returns the upper snake case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "COMPLIANT",
            Self::NonCompliantMinor => "NON_COMPLIANT_MINOR",
            Self::NonCompliantHigh => "NON_COMPLIANT_HIGH",
            Self::NonCompliantCritical => "NON_COMPLIANT_CRITICAL",
            Self::Error => "ERROR",
        }
    }

    /// True only for [`ComplianceStatus::Compliant`].
    pub fn is_compliant(&self) -> bool {
        matches!(self, Self::Compliant)
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
