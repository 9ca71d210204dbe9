//! Error types for the HYP coefficient engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading regulation tables
//! or validating caller input.

use thiserror::Error;

use crate::models::CriterionType;

/// The main error type for the HYP coefficient engine.
///
/// Every fallible operation in the engine returns this error type. The
/// calculations themselves are total: errors only arise from malformed
/// input or regulation tables, and are raised before any computation starts.
///
/// # Example
///
/// ```
/// use hyp_engine::error::EngineError;
///
/// let error = EngineError::InvalidArgument {
///     field: "period".to_string(),
///     message: "expected YYYY-MM".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid argument 'period': expected YYYY-MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A caller-supplied value was malformed or out of range.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        /// The input field that was rejected.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The regulation in use has no success band for a criterion.
    #[error("No success band configured for criterion '{criterion}'")]
    CriterionBandNotFound {
        /// The criterion without a band.
        criterion: CriterionType,
    },

    /// Regulation file or directory was not found at the specified path.
    #[error("Regulation file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Regulation file could not be parsed.
    #[error("Failed to parse regulation file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A regulation table was parsed but contains inconsistent values.
    #[error("Invalid regulation: {message}")]
    InvalidRegulation {
        /// A description of the inconsistency.
        message: String,
    },

    /// No loaded regulation is in force for the requested period.
    #[error("No regulation in force for period {period}")]
    RegulationNotFound {
        /// The requested period.
        period: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidArgument`].
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }
}
