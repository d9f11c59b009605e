//! Error types for the payslip engine.
//!
//! Missing payroll data is never an error here: the resolver degrades to a
//! fallback record instead. Errors come from configuration loading, period
//! parsing at the edges, and document export.

use thiserror::Error;

/// The main error type for the payslip engine.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
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

    /// Configuration parsed but holds a value outside its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A (year, month) pair could not be turned into a period.
    #[error("Invalid period '{value}': {message}")]
    InvalidPeriod {
        /// The raw value that was rejected.
        value: String,
        /// A description of what made the period invalid.
        message: String,
    },

    /// A document exporter failed to produce its artifact.
    #[error("Export via {strategy} failed: {message}")]
    ExportFailed {
        /// The export strategy that failed.
        strategy: String,
        /// A description of the failure.
        message: String,
    },

    /// Writing an exported artifact to disk failed.
    #[error("I/O error at '{path}': {message}")]
    Io {
        /// The path being written.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
