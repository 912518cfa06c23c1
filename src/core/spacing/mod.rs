//! # Spacing Analysis Pipeline
//!
//! Statistical analysis of inter-word spacing. Samples interior space runs,
//! derives descriptive statistics, runs the sequence matchers and
//! multi-space detector globally and per paragraph, synthesizes a
//! cross-paragraph strategy view, and folds everything into a likelihood
//! verdict with chart-ready visualization data.
//!
//! Texts shorter than 20 characters or yielding fewer than 5 samples carry
//! too little signal; [`analyze`] returns `None` for them.

pub mod extract;
pub mod likelihood;
pub mod multispace;
pub mod paragraph;
pub mod sequences;
pub mod strategy;
pub mod visualization;

pub use extract::{compute_stats, extract_samples, FrequencyEntry, SpacingStats};
pub use likelihood::{Likelihood, LikelihoodAssessment};
pub use multispace::{MultiSpaceCounts, MultiSpaceFinding, MultiSpaceKind, MultiSpaceReport};
pub use paragraph::{
    ParagraphPatternFinding, ParagraphSpacingRecord, PatternDetail, SpacingPatternKind,
    SpecificPattern,
};
pub use sequences::{PatternScan, SequenceMatch};
pub use strategy::{StrategyAnalysis, StrategyRange};
pub use visualization::VisualizationData;

use crate::core::options::{AnalysisFilter, SpacingFeature};
use serde::{Deserialize, Serialize};

/// Texts below this many scalar values are not analyzed.
pub(crate) const MIN_ANALYZABLE_CHARS: usize = 20;
/// Minimum spacing samples for meaningful statistics.
pub(crate) const MIN_SPACING_SAMPLES: usize = 5;
/// Frequency entries surfaced in the top-level report.
const TOP_FREQUENCY_ENTRIES: usize = 5;

/// Complete spacing analysis of one text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacingAnalysis {
    pub average_spacing: f64,
    pub median_spacing: f64,
    pub std_deviation: f64,
    /// Headline for the strongest whole-text pattern, if any fired.
    pub pattern_description: Option<String>,
    pub patterns: Vec<SequenceMatch>,
    pub multi_space: MultiSpaceReport,
    pub evidence: Vec<String>,
    pub likelihood: Likelihood,
    pub confidence: u32,
    /// Most common spacing widths, most frequent first.
    pub spacing_frequency: Vec<FrequencyEntry>,
    pub visualization: VisualizationData,
    pub paragraphs: Vec<ParagraphSpacingRecord>,
    pub paragraph_pattern_summary: Vec<ParagraphPatternFinding>,
    pub strategy: Option<StrategyAnalysis>,
}

/// Run the full spacing pipeline over one text.
///
/// `hidden_paragraphs` carries paragraph indices where the character
/// pipeline found high-likelihood hidden characters; pass an empty slice
/// when running the spacing analysis on its own. Returns `None` when the
/// text is too short to analyze.
pub fn analyze(
    text: &str,
    filter: &AnalysisFilter,
    hidden_paragraphs: &[usize],
) -> Option<SpacingAnalysis> {
    if text.chars().count() < MIN_ANALYZABLE_CHARS {
        return None;
    }
    let samples = extract_samples(text);
    if samples.len() < MIN_SPACING_SAMPLES {
        return None;
    }

    let stats = compute_stats(&samples);
    let scan = sequences::detect_patterns(&samples, &stats, filter);
    let multi_space = if filter.feature_enabled(SpacingFeature::MultipleSpaces) {
        multispace::detect_multiple_spaces(text)
    } else {
        MultiSpaceReport::default()
    };
    let records = paragraph::analyze_paragraphs(text, filter);
    let strategy = strategy::synthesize(&records, hidden_paragraphs);
    let assessment = likelihood::assess(&stats, &scan, &multi_space, &records, strategy.as_ref());
    let visualization = visualization::build(&samples, &scan.matches);
    let summary = paragraph::paragraph_pattern_summary(&records);

    Some(SpacingAnalysis {
        average_spacing: stats.mean,
        median_spacing: stats.median,
        std_deviation: stats.std_dev,
        pattern_description: scan.description,
        patterns: scan.matches,
        multi_space,
        evidence: assessment.evidence,
        likelihood: assessment.likelihood,
        confidence: assessment.confidence,
        spacing_frequency: stats
            .frequency
            .iter()
            .take(TOP_FREQUENCY_ENTRIES)
            .copied()
            .collect(),
        visualization,
        paragraphs: records,
        paragraph_pattern_summary: summary,
        strategy,
    })
}
