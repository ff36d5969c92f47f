//! Error types for the staff audit.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that stops a run. Per-row anomalies that the checks
//! tolerate (an empty exception cell, a missing end date) never surface here.

use thiserror::Error;

/// The main error type for the staff audit.
///
/// # Example
///
/// ```
/// use staff_audit::error::AuditError;
///
/// let error = AuditError::SheetNotFound {
///     sheet: "Exceptions".to_string(),
/// };
/// assert_eq!(error.to_string(), "Sheet not found in workbook: Exceptions");
/// assert_eq!(error.exit_code(), 1);
/// ```
#[derive(Debug, Error)]
pub enum AuditError {
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

    /// A configuration value was present but unusable.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending key.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The workbook could not be opened or decoded.
    #[error("Failed to load workbook '{path}': {message}")]
    WorkbookLoad {
        /// Path of the workbook.
        path: String,
        /// A description of the load failure.
        message: String,
    },

    /// A required sheet is absent from the workbook.
    #[error("Sheet not found in workbook: {sheet}")]
    SheetNotFound {
        /// The sheet that was requested.
        sheet: String,
    },

    /// A column the checks depend on is absent from a sheet's header row.
    #[error("Column '{column}' not found in sheet '{sheet}'")]
    MissingColumn {
        /// The sheet that was searched.
        sheet: String,
        /// The lowercased header name that was not found.
        column: String,
    },

    /// A staff row could not be decoded into a typed record.
    #[error("Invalid staff row {row}: {message}")]
    InvalidStaffRow {
        /// One-based row number within the sheet.
        row: usize,
        /// A description of what made the row invalid.
        message: String,
    },

    /// The spreadsheet download did not succeed.
    #[error("Failed to download spreadsheet from '{url}': {message}")]
    DownloadFailed {
        /// The URL that was requested.
        url: String,
        /// Status or transport error description.
        message: String,
    },

    /// A wiki API request did not succeed.
    #[error("Wiki request to '{url}' failed: {message}")]
    WikiRequestFailed {
        /// The URL that was requested.
        url: String,
        /// Status or transport error description.
        message: String,
    },

    /// Reading or writing a local file failed.
    #[error("I/O error on '{path}': {message}")]
    Io {
        /// The local path involved.
        path: String,
        /// The underlying error.
        message: String,
    },

    /// The downloaded copy could not be removed after the run.
    #[error("Failed to remove downloaded file '{path}': {message}")]
    CleanupFailed {
        /// The local path that was not removed.
        path: String,
        /// The underlying error.
        message: String,
    },
}

impl AuditError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AuditError::CleanupFailed { .. } => 2,
            _ => 1,
        }
    }
}

/// A type alias for Results that return AuditError.
pub type AuditResult<T> = Result<T, AuditError>;
