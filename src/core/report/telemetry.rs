//! Usage telemetry records.
//!
//! A privacy-preserving summary of one analysis run: what kinds of
//! watermarks turned up and how confident the detectors were. The record
//! never carries the analyzed text, only counts and labels. Building the
//! record is all the core does; forwarding it anywhere is the caller's
//! business.

use super::AnalysisReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Summary of one analysis run with no text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Caller-chosen id grouping runs from one session
    pub session_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Length of the analyzed text in characters
    pub text_chars: usize,
    /// Labels of detected watermark types, character categories first
    pub detected_types: Vec<String>,
    pub character_confidence: u32,
    /// Absent when the text was too short for spacing analysis
    pub spacing_confidence: Option<u32>,
}

impl UsageRecord {
    /// Build a record from a finished report.
    pub fn from_report(session_id: Uuid, report: &AnalysisReport) -> Self {
        let mut detected_types = Vec::new();
        for summary in &report.characters.categories {
            let label = summary.category.to_string();
            if !detected_types.contains(&label) {
                detected_types.push(label);
            }
        }
        if let Some(spacing) = &report.spacing {
            for pattern in &spacing.patterns {
                let label = pattern.name().to_string();
                if !detected_types.contains(&label) {
                    detected_types.push(label);
                }
            }
        }

        Self {
            session_id,
            timestamp: Utc::now(),
            text_chars: report.original_text.chars().count(),
            detected_types,
            character_confidence: report.characters.confidence,
            spacing_confidence: report.spacing.as_ref().map(|s| s.confidence),
        }
    }
}
