//! Unified application error type.
//! The store, the engines and the CLI all return AppError so that the
//! caller decides how to surface a failure.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid shift: {0} (use morning, afternoon or night)")]
    InvalidShift(String),

    // ---------------------------
    // Lookups
    // ---------------------------
    #[error("A machine named '{0}' already exists")]
    DuplicateName(String),

    #[error("Machine not found: {0}")]
    MachineNotFound(String),

    #[error("Production record not found: {0}")]
    RecordNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// True for errors raised before any write was attempted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::InvalidRange { .. }
                | AppError::InvalidDate(_)
                | AppError::InvalidShift(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
