//! Error types for the Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax law
//! configuration or computing a salary breakdown.

use thiserror::Error;

/// The main error type for the Salary Engine.
///
/// All fallible operations in the engine return this error type. A
/// breakdown for valid input against a valid configuration never fails;
/// errors come from configuration loading or from rejected input.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/insurance.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/insurance.yaml"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

    /// A configuration value is outside its permitted range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A bracket table does not partition taxable income correctly.
    #[error("Invalid tax bracket table for {year}: {message}")]
    InvalidBracketTable {
        /// The law year owning the table.
        year: u16,
        /// A description of the defect.
        message: String,
    },

    /// No tax law is configured for the requested year.
    #[error("No tax law configured for year {year}")]
    LawNotConfigured {
        /// The year that was requested.
        year: u16,
    },

    /// A numeric year does not correspond to a supported tax law.
    #[error("Unsupported tax year: {year}")]
    UnsupportedYear {
        /// The year that was supplied.
        year: u16,
    },

    /// Salary input was rejected at the boundary.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
