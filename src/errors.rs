//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
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

    // ---------------------------
    // Ingestion errors (fatal for the current upload, nothing is saved)
    // ---------------------------
    #[error("Ingestion error: {0}")]
    Ingest(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    // ---------------------------
    // Record lookups
    // ---------------------------
    #[error("No batch found with id {0}")]
    BatchNotFound(i64),

    #[error("No entry '{0}' in batch {1}")]
    EntryNotFound(String, i64),

    #[error("No profile named '{0}'")]
    ProfileNotFound(String),

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
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
