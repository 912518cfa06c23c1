//! # Watermark Strategy Synthesis
//!
//! Builds the document-level view of which watermarking technique governs
//! which paragraphs. Only fires when the evidence spans the document: at
//! least two paragraphs carrying paragraph-local patterns, of at least two
//! distinct kinds.

use crate::core::spacing::paragraph::{ParagraphSpacingRecord, SpacingPatternKind};
use serde::{Deserialize, Serialize};

/// Contiguous run of paragraphs sharing a dominant spacing technique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRange {
    /// First paragraph of the range, 0-based.
    pub start_paragraph: usize,
    /// Last paragraph of the range, inclusive.
    pub end_paragraph: usize,
    pub kind: SpacingPatternKind,
    pub description: String,
}

/// Cross-paragraph view of how the document was watermarked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyAnalysis {
    pub strategies: Vec<StrategyRange>,
    /// Multi-line narrative, one technique per line.
    pub description: String,
    pub combined_confidence: u32,
}

const BASE_CONFIDENCE: u32 = 70;
const PER_RANGE_CONFIDENCE: u32 = 10;

/// Synthesize a strategy report when distinct techniques span paragraphs.
///
/// `hidden_paragraphs` lists paragraph indices where the character pipeline
/// found high-likelihood hidden characters; they lead the narrative but do
/// not count toward the combined confidence.
pub fn synthesize(
    records: &[ParagraphSpacingRecord],
    hidden_paragraphs: &[usize],
) -> Option<StrategyAnalysis> {
    let flagged: Vec<&ParagraphSpacingRecord> = records
        .iter()
        .filter(|r| !r.specific_patterns.is_empty())
        .collect();
    if flagged.len() < 2 {
        return None;
    }

    let mut kinds: Vec<SpacingPatternKind> = flagged
        .iter()
        .flat_map(|r| r.specific_patterns.iter().map(|p| p.kind))
        .collect();
    kinds.sort_by_key(|k| *k as usize);
    kinds.dedup();
    if kinds.len() < 2 {
        return None;
    }

    let mut strategies: Vec<StrategyRange> = Vec::new();
    for record in &flagged {
        let dominant = record
            .specific_patterns
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence));
        if let Some(dominant) = dominant {
            match strategies.last_mut() {
                Some(range)
                    if range.kind == dominant.kind
                        && record.index == range.end_paragraph + 1 =>
                {
                    range.end_paragraph = record.index;
                }
                _ => strategies.push(StrategyRange {
                    start_paragraph: record.index,
                    end_paragraph: record.index,
                    kind: dominant.kind,
                    description: dominant.kind.narrative().to_string(),
                }),
            }
        }
    }

    let mut lines = vec!["This document uses multiple watermarking techniques:".to_string()];
    if !hidden_paragraphs.is_empty() {
        let mut hidden = hidden_paragraphs.to_vec();
        hidden.sort_unstable();
        hidden.dedup();
        lines.push(format!(
            "  - Paragraphs {}: Hidden Unicode characters",
            collapse_ranges(&hidden)
        ));
    }
    for range in &strategies {
        lines.push(format!(
            "  - {}: {}",
            paragraph_label(range),
            range.description
        ));
    }

    let combined_confidence =
        (BASE_CONFIDENCE + strategies.len() as u32 * PER_RANGE_CONFIDENCE).min(100);

    Some(StrategyAnalysis {
        strategies,
        description: lines.join("\n"),
        combined_confidence,
    })
}

fn paragraph_label(range: &StrategyRange) -> String {
    if range.start_paragraph == range.end_paragraph {
        format!("Paragraph {}", range.start_paragraph + 1)
    } else {
        format!(
            "Paragraphs {}-{}",
            range.start_paragraph + 1,
            range.end_paragraph + 1
        )
    }
}

/// Collapse sorted indices into a 1-based "1, 3-4" style list.
fn collapse_ranges(indices: &[usize]) -> String {
    let mut parts = Vec::new();
    let mut i = 0;
    while i < indices.len() {
        let start = indices[i];
        let mut end = start;
        while i + 1 < indices.len() && indices[i + 1] == end + 1 {
            i += 1;
            end = indices[i];
        }
        if start == end {
            parts.push(format!("{}", start + 1));
        } else {
            parts.push(format!("{}-{}", start + 1, end + 1));
        }
        i += 1;
    }
    parts.join(", ")
}
