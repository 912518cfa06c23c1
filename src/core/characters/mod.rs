//! # Hidden Character Detection
//!
//! The character pipeline: scan the text for registered invisible and
//! control characters, score the evidence, and describe placement patterns
//! and the apparent insertion strategy.

pub mod confidence;
pub mod placement;
pub mod proximity;
pub mod scanner;

pub use confidence::{
    PlacementPattern, PlacementStat, PrimaryStrategy, TierCounts, WatermarkSummary,
};
pub use placement::Placement;
pub use proximity::ProximityIndex;
pub use scanner::{
    CategorySummary, CharContext, CharacterScan, CharacterTally, DetectedCharacter,
    ParagraphCharacters,
};

use crate::core::options::AnalysisFilter;
use serde::{Deserialize, Serialize};

/// Complete result of the character detection pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterAnalysis {
    /// Input with every detected character removed.
    pub cleaned_text: String,
    /// Distinct detected characters, sorted by count descending.
    pub detected: Vec<DetectedCharacter>,
    /// Occurrence totals per category, sorted by count descending.
    pub categories: Vec<CategorySummary>,
    /// Confidence 0-100 that the characters form a deliberate watermark.
    pub confidence: u32,
    pub total_hidden: usize,
    /// Paragraphs containing hidden characters.
    pub paragraph_breakdown: Vec<ParagraphCharacters>,
    pub placement_patterns: Vec<PlacementPattern>,
    pub summary: WatermarkSummary,
}

/// Run the full character pipeline over `text`.
pub fn analyze(text: &str, filter: &AnalysisFilter) -> CharacterAnalysis {
    let scan = scanner::scan(text, filter);
    let confidence = confidence::confidence_score(&scan.detected, scan.text_chars);
    let placement_patterns = confidence::placement_patterns(&scan.detected);
    let summary = confidence::summarize(&scan.detected, &placement_patterns, confidence);

    CharacterAnalysis {
        cleaned_text: scan.cleaned_text,
        detected: scan.detected,
        categories: scan.categories,
        confidence,
        total_hidden: scan.total_hidden,
        paragraph_breakdown: scan.paragraph_breakdown,
        placement_patterns,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_yields_an_empty_analysis() {
        let result = analyze("Nothing hiding in here.", &AnalysisFilter::all());
        assert!(result.detected.is_empty());
        assert_eq!(result.confidence, 0);
        assert_eq!(result.total_hidden, 0);
        assert_eq!(result.summary.primary_strategy, PrimaryStrategy::None);
    }

    #[test]
    fn watermarked_text_raises_confidence_and_strategy() {
        let text = "Some\u{200B} words\u{200B} carry\u{200B} invisible\u{200B} separators.";
        let result = analyze(text, &AnalysisFilter::all());
        assert_eq!(result.total_hidden, 4);
        assert!(result.confidence > 0);
        assert_eq!(
            result.summary.primary_strategy,
            PrimaryStrategy::CharacterInsertion
        );
        assert_eq!(result.placement_patterns.len(), 1);
        assert!(!result.cleaned_text.contains('\u{200B}'));
    }
}
