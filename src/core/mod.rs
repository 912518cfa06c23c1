//! # Core Module
//!
//! The UI-agnostic watermark detection engine.
//!
//! ## Modules
//! - `registry` - The fixed table of watermark-capable codepoints
//! - `options` - User-facing option table and analysis filter
//! - `paragraphs` - Paragraph splitting shared by both pipelines
//! - `characters` - Hidden character detection pipeline
//! - `spacing` - Statistical spacing analysis pipeline
//! - `analyzer` - Orchestrates both pipelines into one run
//! - `report` - The merged report document, export, and telemetry
//! - `samples` - Built-in demonstration texts

pub mod analyzer;
pub mod characters;
pub mod options;
pub mod paragraphs;
pub mod registry;
pub mod report;
pub mod samples;
pub mod spacing;

// Re-export commonly used types
pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use characters::CharacterAnalysis;
pub use options::{AnalysisFilter, WatermarkOption};
pub use report::AnalysisReport;
pub use spacing::{Likelihood, SpacingAnalysis};
