//! # lmc-core: Foundational Types for the Legal Metrology Compliance Engine
//!
//! Defines the vocabulary shared by every other crate in the workspace:
//! the typed product record, the closed violation taxonomy, severities,
//! compliance statuses, measurement dimensions, and the error hierarchy.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums, exhaustive matches.** `Severity`, `ComplianceStatus`,
//!    `ViolationType`, `Dimension` and `RecordField` are plain enums. Adding
//!    a violation type is a compile error until the catalog, recommendations
//!    and status logic handle it.
//!
//! 2. **Typed records.** `ProductRecord` has one `Option<FieldValue>` per
//!    recognized key. "Absent" and "present but falsy" stay distinguishable.
//!
//! 3. **Status is a pure function of severities.**
//!    `ComplianceStatus::from_severities` looks only at the worst severity.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lmc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod dimension;
pub mod error;
pub mod record;
pub mod severity;
pub mod violation;

// Re-export primary types for ergonomic imports.
pub use dimension::Dimension;
pub use error::{CheckError, ConfigError, InvalidInputError, LmcError};
pub use record::{FieldValue, ProductRecord, RecordField, UNKNOWN_PRODUCT_TITLE};
pub use severity::{ComplianceStatus, Severity, SEVERITY_COUNT};
pub use violation::{Violation, ViolationType, VIOLATION_TYPE_COUNT};
