//! # Text Watermark Detector
//!
//! Detects hidden watermarks in text: invisible Unicode characters and
//! statistically unusual spacing patterns.
//!
//! ## Core Philosophy
//! - **Never modify silently** - The cleaned text is offered, never forced
//! - **Show WHY** - Every verdict comes with the evidence behind it
//! - **Build trust** - Confidence scores are explained, not oracular
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation layers:
//! - `core` - The watermark detection engine
//! - `events` - Event-driven progress reporting (GUI-ready)
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{Result, WatermarkDetectorError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
