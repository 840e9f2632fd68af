//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

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
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Record was modified concurrently: {0}")]
    StaleRecord(String),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Workflow errors
    // ---------------------------
    #[error("Already recorded: {0}")]
    AlreadyRecorded(String),

    #[error("Stage '{stage}' is not available: {reason}")]
    StageBlocked { stage: String, reason: String },

    #[error("Shift conflict: {0}")]
    ShiftConflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

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

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Stable, flat error code shown next to the localized message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingField(_) => "MISSING_REQUIRED_FIELD",
            AppError::InvalidFormat(_) | AppError::InvalidDate(_) | AppError::InvalidTime(_) => {
                "INVALID_FORMAT"
            }
            AppError::AlreadyRecorded(_) => "ALREADY_RECORDED",
            AppError::WriteFailed(_) | AppError::Db(_) | AppError::Migration(_) => "WRITE_FAILED",
            AppError::StaleRecord(_) => "STALE_RECORD",
            AppError::StageBlocked { .. } => "STAGE_BLOCKED",
            AppError::ShiftConflict(_) => "SHIFT_CONFLICT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Config(_) | AppError::ConfigLoad | AppError::ConfigSave => "CONFIG_ERROR",
            AppError::Io(_) | AppError::Export(_) | AppError::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Wrap a persistence failure raised by a mutating operation.
    pub fn write_failed(e: rusqlite::Error) -> Self {
        AppError::WriteFailed(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
