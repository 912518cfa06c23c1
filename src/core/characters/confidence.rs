//! # Character Confidence Scoring
//!
//! Turns a raw [`CharacterScan`](super::scanner::CharacterScan) into a 0-100
//! confidence score, per-category placement patterns, and a summary of the
//! watermarking strategy the evidence points at.

use crate::core::characters::placement::Placement;
use crate::core::characters::scanner::DetectedCharacter;
use crate::core::registry::{Category, LikelihoodTier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How often one placement occurs within a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementStat {
    pub placement: Placement,
    pub count: usize,
    /// Share of the category total, rounded to whole percent.
    pub percentage: u32,
}

/// Placement distribution of one character category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementPattern {
    pub category: Category,
    /// Occurrences contributing placements, across all characters of the
    /// category.
    pub total: usize,
    pub dominant_placement: Placement,
    pub dominant_percentage: u32,
    /// Full breakdown, sorted by count descending.
    pub placements: Vec<PlacementStat>,
}

/// Occurrence totals per likelihood tier.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TierCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

/// The insertion technique the character evidence points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryStrategy {
    CharacterInsertion,
    None,
}

impl fmt::Display for PrimaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryStrategy::CharacterInsertion => write!(f, "Character Insertion"),
            PrimaryStrategy::None => write!(f, "None"),
        }
    }
}

/// Strategy-level reading of the detected characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatermarkSummary {
    pub confidence: u32,
    pub primary_strategy: PrimaryStrategy,
    /// Set when a primary strategy is accompanied by medium or low tier
    /// characters as well.
    pub hybrid_strategy: bool,
    pub evidence: Vec<String>,
    pub tier_counts: TierCounts,
}

/// Minimum placements a category needs before its distribution is reported.
const MIN_PLACEMENTS_FOR_PATTERN: usize = 3;

/// Compute the 0-100 confidence that the detected characters are a
/// deliberate watermark.
///
/// Three capped components: likelihood-weighted occurrence count (up to 50),
/// category variety (10 per category, up to 30), and hidden-character
/// density (up to 20).
pub fn confidence_score(detected: &[DetectedCharacter], text_chars: usize) -> u32 {
    if detected.is_empty() {
        return 0;
    }

    let weighted: f64 = detected
        .iter()
        .map(|record| record.count as f64 * record.likelihood.weight())
        .sum();
    let mut categories: Vec<Category> = detected.iter().map(|record| record.category).collect();
    categories.sort_by_key(|c| *c as usize);
    categories.dedup();

    let total: usize = detected.iter().map(|record| record.count).sum();
    let density = if text_chars > 0 {
        total as f64 / text_chars as f64
    } else {
        0.0
    };

    let count_score = weighted.min(50.0);
    let category_score = ((categories.len() * 10) as f64).min(30.0);
    let density_score = (density * 1000.0).min(20.0);

    (count_score + category_score + density_score).round() as u32
}

/// Placement distribution per category, for categories with enough data.
pub fn placement_patterns(detected: &[DetectedCharacter]) -> Vec<PlacementPattern> {
    // First-seen order follows the count-sorted detected list
    let mut order: Vec<Category> = Vec::new();
    let mut groups: HashMap<Category, Vec<Placement>> = HashMap::new();
    for record in detected {
        if !groups.contains_key(&record.category) {
            order.push(record.category);
        }
        groups
            .entry(record.category)
            .or_default()
            .extend(record.placements.iter().copied());
    }

    let mut patterns = Vec::new();
    for category in order {
        let placements = &groups[&category];
        let total = placements.len();
        if total < MIN_PLACEMENTS_FOR_PATTERN {
            continue;
        }

        let mut counts: Vec<(Placement, usize)> = Vec::new();
        for &placement in placements {
            match counts.iter_mut().find(|(p, _)| *p == placement) {
                Some((_, count)) => *count += 1,
                None => counts.push((placement, 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let stats: Vec<PlacementStat> = counts
            .into_iter()
            .map(|(placement, count)| PlacementStat {
                placement,
                count,
                percentage: (count as f64 / total as f64 * 100.0).round() as u32,
            })
            .collect();

        patterns.push(PlacementPattern {
            category,
            total,
            dominant_placement: stats[0].placement,
            dominant_percentage: stats[0].percentage,
            placements: stats,
        });
    }
    patterns
}

/// Summarize the strategy behind the detected characters.
pub fn summarize(
    detected: &[DetectedCharacter],
    patterns: &[PlacementPattern],
    confidence: u32,
) -> WatermarkSummary {
    let mut tiers = TierCounts::default();
    for record in detected {
        match record.likelihood {
            LikelihoodTier::High => tiers.high += record.count,
            LikelihoodTier::Medium => tiers.medium += record.count,
            LikelihoodTier::Low => tiers.low += record.count,
        }
    }
    tiers.total = tiers.high + tiers.medium + tiers.low;

    let mut primary_strategy = PrimaryStrategy::None;
    let mut evidence = Vec::new();

    if tiers.high > 0 {
        primary_strategy = PrimaryStrategy::CharacterInsertion;
        evidence.push(format!(
            "{} high-likelihood hidden characters detected",
            tiers.high
        ));

        if let Some(pattern) = patterns
            .iter()
            .find(|p| p.category == Category::ZeroWidth)
        {
            evidence.push(format!(
                "{}% of zero-width characters appear {}",
                pattern.dominant_percentage, pattern.dominant_placement
            ));
        }
    }

    let hybrid_strategy =
        primary_strategy != PrimaryStrategy::None && (tiers.medium > 0 || tiers.low > 0);

    WatermarkSummary {
        confidence,
        primary_strategy,
        hybrid_strategy,
        evidence,
        tier_counts: tiers,
    }
}
