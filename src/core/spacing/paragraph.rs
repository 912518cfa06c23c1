//! # Per-Paragraph Spacing Analysis
//!
//! Reruns extraction, statistics, sequence matching, and multi-space
//! detection inside each paragraph, then applies the paragraph-local
//! heuristics: dominant double-spacing, prime-indexed triple-spacing, and
//! short-window Fibonacci and arithmetic matches.

use crate::core::options::{AnalysisFilter, Severity, SpacingFeature};
use crate::core::paragraphs::{preview, split_paragraphs};
use crate::core::spacing::extract::{compute_stats, extract_samples, SpacingStats};
use crate::core::spacing::multispace::{detect_multiple_spaces, MultiSpaceReport};
use crate::core::spacing::sequences::{
    detect_patterns, match_arithmetic, match_fibonacci, SequenceMatch, CONSISTENCY_CV_THRESHOLD,
    PRIMES,
};
use crate::core::spacing::{MIN_ANALYZABLE_CHARS, MIN_SPACING_SAMPLES};
use serde::{Deserialize, Serialize};

/// Kind of a paragraph-local spacing pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpacingPatternKind {
    ConsistentSpacing,
    PrimeNumbers,
    Fibonacci,
    ArithmeticProgression,
    ConsistentStatistics,
}

impl SpacingPatternKind {
    /// Short phrase used when narrating a cross-paragraph strategy.
    pub fn narrative(&self) -> &'static str {
        match self {
            SpacingPatternKind::ConsistentSpacing => "consistent double spaces",
            SpacingPatternKind::PrimeNumbers => "triple spaces in a mathematical pattern",
            SpacingPatternKind::Fibonacci => "spacing following a Fibonacci sequence",
            SpacingPatternKind::ArithmeticProgression => "spacing in arithmetic progression",
            SpacingPatternKind::ConsistentStatistics => "unusual spacing pattern",
        }
    }
}

/// Kind-specific data behind a [`SpecificPattern`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternDetail {
    DoubleSpacing {
        count: usize,
        word_count: usize,
        coverage: f64,
    },
    PrimeIndexed {
        word_indices: Vec<usize>,
        matched_primes: Vec<usize>,
    },
    FibonacciLike {
        sequence: Vec<u32>,
    },
    Arithmetic {
        increment: f64,
        sequence: Vec<u32>,
    },
}

/// One paragraph-local heuristic finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecificPattern {
    pub kind: SpacingPatternKind,
    pub description: String,
    pub confidence: f64,
    /// How noticeable the technique would be to a human reader.
    pub severity: Severity,
    pub detail: PatternDetail,
}

/// Full spacing analysis of one paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphSpacingRecord {
    /// Index within the `\n+` paragraph split of the whole text.
    pub index: usize,
    pub preview: String,
    pub char_len: usize,
    pub stats: SpacingStats,
    pub matches: Vec<SequenceMatch>,
    pub multi_space: MultiSpaceReport,
    pub specific_patterns: Vec<SpecificPattern>,
    pub has_distinctive_pattern: bool,
}

/// One row of the cross-paragraph pattern summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphPatternFinding {
    pub paragraph_index: usize,
    pub preview: String,
    pub kind: SpacingPatternKind,
    pub description: String,
    pub confidence: f64,
}

/// Double-space runs must outnumber this fraction of tokens.
const DOUBLE_SPACE_COVERAGE: f64 = 0.7;
const DOUBLE_SPACING_CONFIDENCE: f64 = 0.9;
/// Triple runs needed before prime indexing is considered.
const MIN_TRIPLE_RUNS: usize = 3;
/// Fraction of triple-run word indices that must be prime.
const PRIME_INDEX_FRACTION: f64 = 0.6;
const PRIME_INDEXED_CONFIDENCE: f64 = 0.85;
const CONSISTENT_STATISTICS_CONFIDENCE: f64 = 0.8;

/// Analyze every paragraph long enough to carry spacing signal.
///
/// Paragraphs shorter than 20 chars or yielding fewer than 5 samples are
/// skipped entirely; record indices still refer to the full paragraph
/// split, so they line up with the character pipeline's indices.
pub fn analyze_paragraphs(text: &str, filter: &AnalysisFilter) -> Vec<ParagraphSpacingRecord> {
    let mut records = Vec::new();

    for (index, paragraph) in split_paragraphs(text).iter().enumerate() {
        if paragraph.char_len < MIN_ANALYZABLE_CHARS {
            continue;
        }
        let samples = extract_samples(paragraph.text);
        if samples.len() < MIN_SPACING_SAMPLES {
            continue;
        }

        let stats = compute_stats(&samples);
        let scan = detect_patterns(&samples, &stats, filter);
        let multi_space = if filter.feature_enabled(SpacingFeature::MultipleSpaces) {
            detect_multiple_spaces(paragraph.text)
        } else {
            MultiSpaceReport::default()
        };
        let specific_patterns = specific_patterns(paragraph.text, &samples, index, filter);

        records.push(ParagraphSpacingRecord {
            index,
            preview: preview(paragraph.text, 50),
            char_len: paragraph.char_len,
            stats,
            matches: scan.matches,
            multi_space,
            has_distinctive_pattern: !specific_patterns.is_empty(),
            specific_patterns,
        });
    }

    records
}

/// Run the paragraph-local heuristics over one paragraph.
fn specific_patterns(
    paragraph: &str,
    samples: &[u32],
    index: usize,
    filter: &AnalysisFilter,
) -> Vec<SpecificPattern> {
    let number = index + 1;
    let mut patterns = Vec::new();
    let runs = space_runs(paragraph);

    if filter.feature_enabled(SpacingFeature::MultipleSpaces) {
        let count = runs.iter().filter(|&&(_, len)| len == 2).count();
        let word_count = paragraph.split_whitespace().count();
        if word_count > 0 && count as f64 > word_count as f64 * DOUBLE_SPACE_COVERAGE {
            patterns.push(SpecificPattern {
                kind: SpacingPatternKind::ConsistentSpacing,
                description: format!(
                    "Paragraph {number} uses consistent double spaces between most words"
                ),
                confidence: DOUBLE_SPACING_CONFIDENCE,
                severity: Severity::Low,
                detail: PatternDetail::DoubleSpacing {
                    count,
                    word_count,
                    coverage: count as f64 / word_count as f64,
                },
            });
        }
    }

    if filter.feature_enabled(SpacingFeature::MathematicalPatterns) {
        if let Some(pattern) = prime_indexed_triples(&runs, number) {
            patterns.push(pattern);
        }

        if let Some(SequenceMatch::Fibonacci {
            sequence,
            confidence,
        }) = match_fibonacci(samples)
        {
            patterns.push(SpecificPattern {
                kind: SpacingPatternKind::Fibonacci,
                description: format!(
                    "Paragraph {number} has spacing following a Fibonacci-like sequence"
                ),
                confidence,
                severity: Severity::Medium,
                detail: PatternDetail::FibonacciLike { sequence },
            });
        }

        let window = &samples[..samples.len().min(10)];
        if let Some(SequenceMatch::Arithmetic {
            increment,
            confidence,
        }) = match_arithmetic(window)
        {
            patterns.push(SpecificPattern {
                kind: SpacingPatternKind::ArithmeticProgression,
                description: format!(
                    "Paragraph {number} has spacing that increases by {increment:.2} each time"
                ),
                confidence,
                severity: Severity::Medium,
                detail: PatternDetail::Arithmetic {
                    increment,
                    sequence: window.to_vec(),
                },
            });
        }
    }

    patterns
}

/// Triple-space runs whose word positions follow the prime sequence.
///
/// The word index of a run is the number of space runs starting before it,
/// matched against the same fixed prime table the sequence matcher uses.
fn prime_indexed_triples(runs: &[(usize, usize)], number: usize) -> Option<SpecificPattern> {
    let word_indices: Vec<usize> = runs
        .iter()
        .enumerate()
        .filter(|(_, &(_, len))| len == 3)
        .map(|(run_index, _)| run_index)
        .collect();
    if word_indices.len() < MIN_TRIPLE_RUNS {
        return None;
    }

    let mut matched_primes: Vec<usize> = word_indices
        .iter()
        .copied()
        .filter(|&index| PRIMES.iter().any(|&p| p as usize == index))
        .collect();
    matched_primes.sort_unstable();

    let enough = matched_primes.len() >= MIN_TRIPLE_RUNS
        && matched_primes.len() as f64 >= word_indices.len() as f64 * PRIME_INDEX_FRACTION;
    if !enough {
        return None;
    }

    Some(SpecificPattern {
        kind: SpacingPatternKind::PrimeNumbers,
        description: format!("Paragraph {number} has triple spaces at prime number positions"),
        confidence: PRIME_INDEXED_CONFIDENCE,
        severity: Severity::Medium,
        detail: PatternDetail::PrimeIndexed {
            word_indices,
            matched_primes,
        },
    })
}

/// Maximal runs of U+0020, as (char offset, length) pairs.
fn space_runs(text: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    let mut offset = 0;
    for ch in text.chars() {
        if ch == ' ' {
            if start.is_none() {
                start = Some(offset);
            }
        } else if let Some(begin) = start.take() {
            runs.push((begin, offset - begin));
        }
        offset += 1;
    }
    if let Some(begin) = start {
        runs.push((begin, offset - begin));
    }
    runs
}

/// Flatten per-paragraph findings into one confidence-sorted summary.
pub fn paragraph_pattern_summary(
    records: &[ParagraphSpacingRecord],
) -> Vec<ParagraphPatternFinding> {
    let mut summary = Vec::new();

    for record in records {
        for pattern in &record.specific_patterns {
            summary.push(ParagraphPatternFinding {
                paragraph_index: record.index,
                preview: record.preview.clone(),
                kind: pattern.kind,
                description: pattern.description.clone(),
                confidence: pattern.confidence,
            });
        }
    }

    for record in records {
        if record.stats.coefficient_of_variation() < CONSISTENCY_CV_THRESHOLD {
            summary.push(ParagraphPatternFinding {
                paragraph_index: record.index,
                preview: record.preview.clone(),
                kind: SpacingPatternKind::ConsistentStatistics,
                description: format!(
                    "Paragraph {} has unusually consistent spacing (low variance)",
                    record.index + 1
                ),
                confidence: CONSISTENT_STATISTICS_CONFIDENCE,
            });
        }
    }

    summary.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze_all(text: &str) -> Vec<ParagraphSpacingRecord> {
        analyze_paragraphs(text, &AnalysisFilter::all())
    }

    const DOUBLE_SPACED: &str = "alpha  beta  gamma  delta  epsilon  zeta  eta  theta  iota  kappa  lambda";

    #[test]
    fn dominant_double_spacing_is_flagged() {
        let records = analyze_all(DOUBLE_SPACED);
        assert_eq!(records.len(), 1);
        let pattern = records[0]
            .specific_patterns
            .iter()
            .find(|p| p.kind == SpacingPatternKind::ConsistentSpacing)
            .unwrap();
        assert_eq!(pattern.confidence, 0.9);
        assert_eq!(pattern.severity, Severity::Low);
        assert_eq!(
            pattern.description,
            "Paragraph 1 uses consistent double spaces between most words"
        );
        match &pattern.detail {
            PatternDetail::DoubleSpacing {
                count, word_count, ..
            } => {
                assert_eq!(*count, 10);
                assert_eq!(*word_count, 11);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
        assert!(records[0].has_distinctive_pattern);
    }

    #[test]
    fn single_spaced_paragraph_has_no_double_pattern() {
        let records = analyze_all("one two three four five six seven eight nine ten");
        assert!(records[0].specific_patterns.is_empty());
        assert!(!records[0].has_distinctive_pattern);
    }

    #[test]
    fn prime_positioned_triples_are_flagged() {
        let records = analyze_all("one two three   four   five six   seven eight");
        let pattern = records[0]
            .specific_patterns
            .iter()
            .find(|p| p.kind == SpacingPatternKind::PrimeNumbers)
            .unwrap();
        assert_eq!(pattern.confidence, 0.85);
        assert_eq!(pattern.severity, Severity::Medium);
        assert_eq!(
            pattern.description,
            "Paragraph 1 has triple spaces at prime number positions"
        );
        match &pattern.detail {
            PatternDetail::PrimeIndexed {
                word_indices,
                matched_primes,
            } => {
                assert_eq!(word_indices, &[2, 3, 5]);
                assert_eq!(matched_primes, &[2, 3, 5]);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn nonprime_triples_are_not_flagged() {
        // Triples at word indices 0, 1, and 6
        let records = analyze_all("one   two   three four five six seven   eight nine");
        assert!(records[0]
            .specific_patterns
            .iter()
            .all(|p| p.kind != SpacingPatternKind::PrimeNumbers));
    }

    #[test]
    fn fibonacci_spacing_is_flagged() {
        let records = analyze_all("alpha beta cat  dog   emu     fox");
        let pattern = records[0]
            .specific_patterns
            .iter()
            .find(|p| p.kind == SpacingPatternKind::Fibonacci)
            .unwrap();
        assert_eq!(pattern.confidence, 1.0);
        assert_eq!(
            pattern.description,
            "Paragraph 1 has spacing following a Fibonacci-like sequence"
        );
        match &pattern.detail {
            PatternDetail::FibonacciLike { sequence } => {
                assert_eq!(sequence, &[1, 1, 2, 3, 5]);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn arithmetic_spacing_is_flagged() {
        let records = analyze_all("a b  c   d    e     f      g");
        let pattern = records[0]
            .specific_patterns
            .iter()
            .find(|p| p.kind == SpacingPatternKind::ArithmeticProgression)
            .unwrap();
        assert_eq!(
            pattern.description,
            "Paragraph 1 has spacing that increases by 1.00 each time"
        );
        match &pattern.detail {
            PatternDetail::Arithmetic {
                increment,
                sequence,
            } => {
                assert_eq!(*increment, 1.0);
                assert_eq!(sequence, &[1, 2, 3, 4, 5, 6]);
            }
            other => panic!("unexpected detail: {other:?}"),
        }
    }

    #[test]
    fn short_and_sparse_paragraphs_are_skipped() {
        // First too short, second long enough but only one spacing sample
        let text = "tiny\n\nhyphenated-words-without-any spaces\n\nthe last paragraph has plenty of words to sample from";
        let records = analyze_all(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, 2);
    }

    #[test]
    fn record_indices_follow_the_paragraph_split() {
        let text = "short\n\nthe second paragraph carries enough words to analyze properly";
        let records = analyze_all(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].index, 1);
    }

    #[test]
    fn disabled_mathematical_patterns_suppress_prime_findings() {
        use crate::core::options::WatermarkOption;
        let filter = AnalysisFilter::from_options([WatermarkOption::DoubleSpaces]);
        let records =
            analyze_paragraphs("one two three   four   five six   seven eight", &filter);
        assert!(records[0].specific_patterns.is_empty());
    }

    #[test]
    fn summary_includes_consistent_statistics() {
        let summary =
            paragraph_pattern_summary(&analyze_all("one two three four five six seven"));
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].kind, SpacingPatternKind::ConsistentStatistics);
        assert_eq!(summary[0].confidence, 0.8);
        assert_eq!(
            summary[0].description,
            "Paragraph 1 has unusually consistent spacing (low variance)"
        );
    }

    #[test]
    fn summary_sorts_by_confidence() {
        let text = format!("alpha beta cat  dog   emu     fox\n\n{DOUBLE_SPACED}");
        let summary = paragraph_pattern_summary(&analyze_all(&text));
        assert!(summary.len() >= 2);
        for pair in summary.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        assert_eq!(summary[0].kind, SpacingPatternKind::Fibonacci);
    }

    #[test]
    fn narratives_name_each_technique() {
        assert_eq!(
            SpacingPatternKind::ConsistentSpacing.narrative(),
            "consistent double spaces"
        );
        assert_eq!(
            SpacingPatternKind::PrimeNumbers.narrative(),
            "triple spaces in a mathematical pattern"
        );
    }
}
