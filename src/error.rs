//! Error types for the Payslip Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The calculators themselves degrade numerically instead of failing (a zero
//! divisor yields a zero rate), so errors are limited to configuration loading
//! and to pay cycles that cannot be represented as calendar dates.

use thiserror::Error;

/// The main error type for the Payslip Engine.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payment.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payment.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A pay cycle could not be built from the given year, month and start day.
    #[error("Invalid salary cycle: {message}")]
    InvalidCycle {
        /// A description of why the cycle is invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
