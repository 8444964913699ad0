//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout the compliance engine. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - [`InvalidInputError`] fails a whole single-record check: the input was
//!   not a key/value mapping at all.
//! - [`ConfigError`] is fatal at startup. Reference tables that fail to
//!   initialize are never retried per call.
//! - [`CheckError`] is scoped to one field of one check category. The
//!   detector catches it, skips that field, and keeps evaluating the rest of
//!   the record.
//! - Missing or falsy optional fields are not errors anywhere.

use thiserror::Error;

use crate::record::RecordField;

/// Top-level error type for the compliance engine.
#[derive(Error, Debug)]
pub enum LmcError {
    /// The supplied product record is not a well-formed mapping.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Reference tables or the violation catalog failed to initialize.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// A product record that cannot be evaluated at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    /// The record was a JSON scalar or array rather than an object.
    #[error("product record must be a key/value mapping, found {found}")]
    NotAMapping {
        /// JSON kind that was supplied instead (e.g. "array", "string").
        found: &'static str,
    },

    /// The record text could not be parsed as JSON.
    #[error("product record is not valid JSON: {0}")]
    Malformed(String),
}

/// Reference data failed to initialize.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The rules file could not be read.
    #[error("failed to read rules file {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The rules file is not valid YAML for the expected shape.
    #[error("failed to parse rules configuration: {0}")]
    Parse(String),

    /// A standard-unit token list contains an empty token, which would
    /// match every piece of text.
    #[error("empty standard-unit token in {dimension} table")]
    EmptyToken {
        /// Dimension whose table holds the empty token.
        dimension: String,
    },

    /// A non-standard pattern failed to compile.
    #[error("non-standard pattern {name:?} is invalid: {reason}")]
    InvalidPattern {
        /// Pattern name.
        name: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A pattern definition must carry exactly one of `tokens` or `regex`.
    #[error("non-standard pattern {name:?} must define exactly one of `tokens` or `regex`")]
    AmbiguousPattern {
        /// Pattern name.
        name: String,
    },

    /// The non-standard pattern list is empty.
    #[error("non-standard pattern list must not be empty")]
    NoPatterns,

    /// The violation catalog is not ordered like the violation type enum.
    #[error("violation catalog entry {index} is {found}, expected {expected}")]
    CatalogMismatch {
        /// Position in the catalog.
        index: usize,
        /// Violation type expected at that position.
        expected: String,
        /// Violation type actually found there.
        found: String,
    },
}

/// Failure while evaluating one check category of one record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// A field carried a structured value (array/object) where text,
    /// a number, or a flag was expected.
    #[error("field {field} holds a malformed {kind} value")]
    MalformedValue {
        /// Field that carried the value.
        field: RecordField,
        /// JSON kind of the value.
        kind: &'static str,
    },
}
