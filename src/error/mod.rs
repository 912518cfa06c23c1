//! # Error Module
//!
//! User-friendly error types for the watermark detector.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, sizes, what went wrong
//! - **User-friendly messages** - non-technical users should understand
//! - **Recovery hints** - suggest how to fix when possible

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum WatermarkDetectorError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while reading text to analyze
#[derive(Error, Debug)]
pub enum InputError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Text is too large: {length} characters (limit {limit}). \
         Split the input and analyze the parts separately."
    )]
    TextTooLarge { length: usize, limit: usize },
}

/// Errors that occur while writing reports
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialization(String),

    #[error("Failed to write report stream: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Failed to write report to {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, WatermarkDetectorError>;
