//! # Likelihood Assessment
//!
//! Folds every spacing signal into a single low/medium/high verdict with a
//! human-readable evidence list. Each signal contributes a fixed score;
//! the verdict and the confidence percentage both derive from the total.

use crate::core::spacing::extract::SpacingStats;
use crate::core::spacing::multispace::MultiSpaceReport;
use crate::core::spacing::paragraph::ParagraphSpacingRecord;
use crate::core::spacing::sequences::{PatternScan, CONSISTENCY_CV_THRESHOLD};
use crate::core::spacing::strategy::StrategyAnalysis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall verdict on whether the spacing carries a watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Likelihood {
    Low,
    Medium,
    High,
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Likelihood::Low => write!(f, "Low"),
            Likelihood::Medium => write!(f, "Medium"),
            Likelihood::High => write!(f, "High"),
        }
    }
}

/// The verdict plus everything that argued for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikelihoodAssessment {
    pub likelihood: Likelihood,
    pub evidence: Vec<String>,
    pub confidence: u32,
}

const HIGH_SCORE: usize = 5;
const MEDIUM_SCORE: usize = 2;
const CONFIDENCE_PER_POINT: u32 = 10;
/// Multi-space volume contributes at most this many points.
const MULTI_SPACE_SCORE_CAP: usize = 3;

/// Weigh every spacing signal into one assessment.
pub fn assess(
    stats: &SpacingStats,
    scan: &PatternScan,
    multi: &MultiSpaceReport,
    records: &[ParagraphSpacingRecord],
    strategy: Option<&StrategyAnalysis>,
) -> LikelihoodAssessment {
    let mut evidence = Vec::new();
    let mut score = 0usize;

    if stats.coefficient_of_variation() < CONSISTENCY_CV_THRESHOLD {
        evidence.push("Unusually consistent spacing throughout text".to_string());
        score += 2;
    }
    if stats.bimodal {
        evidence.push("Bimodal distribution of spacing (two common patterns)".to_string());
        score += 2;
    }

    if let Some(description) = &scan.description {
        evidence.push(description.clone());
        score += 3;
    }
    for found in &scan.matches {
        evidence.push(format!(
            "{}: {} (Confidence: {}%)",
            found.name(),
            found.description(),
            (found.confidence() * 100.0).round() as u32
        ));
    }
    score += scan.matches.len();

    if multi.counts.total > 0 {
        if multi.has_regular_interval {
            if let Some(description) = &multi.interval_description {
                evidence.push(description.clone());
            }
            score += 3;
        }
        if multi.counts.total > 5 {
            evidence.push(format!(
                "Found {} instances of multiple spaces ({} double, {} triple, {} 4+ spaces)",
                multi.counts.total,
                multi.counts.double,
                multi.counts.triple,
                multi.counts.four_plus
            ));
            score += (multi.counts.total / 5).min(MULTI_SPACE_SCORE_CAP);
        }
    }

    for record in records {
        for pattern in &record.specific_patterns {
            evidence.push(pattern.description.clone());
            score += 2;
        }
    }

    if let Some(strategy) = strategy {
        evidence.push(
            "Different paragraphs use different watermarking techniques - strong evidence of intentional watermarking"
                .to_string(),
        );
        evidence.push(format!(
            "Watermarking Strategy Analysis: {}",
            strategy.description
        ));
        score += 7;
    }

    let likelihood = if score >= HIGH_SCORE {
        Likelihood::High
    } else if score >= MEDIUM_SCORE {
        Likelihood::Medium
    } else {
        Likelihood::Low
    };

    LikelihoodAssessment {
        likelihood,
        evidence,
        confidence: (score as u32 * CONFIDENCE_PER_POINT).min(100),
    }
}
