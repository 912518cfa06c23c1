//! # Sequence Matchers
//!
//! Seven independent matchers that test a spacing sample against known
//! mathematical shapes, plus a low-variance consistency signal. Each matcher
//! is a pure function returning `Some` only when its thresholds are met; a
//! sample may fire several matchers at once and all of them are reported.

use crate::core::options::{AnalysisFilter, SpacingFeature};
use crate::core::spacing::extract::SpacingStats;
use serde::{Deserialize, Serialize};

/// Fixed reference sequences the positional matchers compare against.
pub const PRIMES: [u32; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];
const TRIANGULAR: [u32; 10] = [1, 3, 6, 10, 15, 21, 28, 36, 45, 55];
const POWERS_OF_TWO: [u32; 9] = [1, 2, 4, 8, 16, 32, 64, 128, 256];

/// Per-element relative error below this counts as matching the reference.
const ELEMENT_ERROR_TOLERANCE: f64 = 0.1;
/// Fraction of compared elements that must match a reference sequence.
const REFERENCE_MATCH_FRACTION: f64 = 0.6;
/// Fraction of repeated blocks that must equal the candidate block.
const BLOCK_MATCH_THRESHOLD: f64 = 0.7;
/// Coefficient of variation below this marks unusually consistent spacing.
pub const CONSISTENCY_CV_THRESHOLD: f64 = 0.1;

/// A spacing sample matching one of the recognized shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SequenceMatch {
    Repeating { block: Vec<u32>, match_ratio: f64 },
    Arithmetic { increment: f64, confidence: f64 },
    Geometric { ratio: f64, confidence: f64 },
    Fibonacci { sequence: Vec<u32>, confidence: f64 },
    Prime { matches: usize, compared: usize, confidence: f64 },
    Triangular { matches: usize, compared: usize, confidence: f64 },
    PowersOfTwo { matches: usize, compared: usize, confidence: f64 },
    ConsistentSpacing { coefficient_of_variation: f64 },
}

impl SequenceMatch {
    pub fn name(&self) -> &'static str {
        match self {
            SequenceMatch::Repeating { .. } => "Repeating Sequence",
            SequenceMatch::Arithmetic { .. } => "Arithmetic Progression",
            SequenceMatch::Geometric { .. } => "Geometric Progression",
            SequenceMatch::Fibonacci { .. } => "Fibonacci-like Sequence",
            SequenceMatch::Prime { .. } => "Prime Number Sequence",
            SequenceMatch::Triangular { .. } => "Triangular Number Sequence",
            SequenceMatch::PowersOfTwo { .. } => "Powers of 2 Sequence",
            SequenceMatch::ConsistentSpacing { .. } => "Consistent Spacing",
        }
    }

    pub fn description(&self) -> String {
        match self {
            SequenceMatch::Repeating { block, .. } => {
                format!("Pattern repeats every {} spaces", block.len())
            }
            SequenceMatch::Arithmetic { increment, .. } => {
                format!("Spaces increase by {increment:.2} each time")
            }
            SequenceMatch::Geometric { ratio, .. } => {
                format!("Spaces multiply by {ratio:.2} each time")
            }
            SequenceMatch::Fibonacci { .. } => {
                "Each space is approximately the sum of the two preceding spaces".to_string()
            }
            SequenceMatch::Prime { .. } => {
                "Spacing follows prime numbers (2, 3, 5, 7, 11, ...)".to_string()
            }
            SequenceMatch::Triangular { .. } => {
                "Spacing follows triangular numbers (1, 3, 6, 10, 15, ...)".to_string()
            }
            SequenceMatch::PowersOfTwo { .. } => {
                "Spacing follows powers of 2 (1, 2, 4, 8, 16, ...)".to_string()
            }
            SequenceMatch::ConsistentSpacing {
                coefficient_of_variation,
            } => format!(
                "Very low variation in spacing (CV: {coefficient_of_variation:.3})"
            ),
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            SequenceMatch::Repeating { match_ratio, .. } => *match_ratio,
            SequenceMatch::Arithmetic { confidence, .. }
            | SequenceMatch::Geometric { confidence, .. }
            | SequenceMatch::Fibonacci { confidence, .. }
            | SequenceMatch::Prime { confidence, .. }
            | SequenceMatch::Triangular { confidence, .. }
            | SequenceMatch::PowersOfTwo { confidence, .. } => *confidence,
            SequenceMatch::ConsistentSpacing {
                coefficient_of_variation,
            } => 1.0 - coefficient_of_variation,
        }
    }
}

/// Result of running every matcher over one sample.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternScan {
    /// Headline for the first matcher group that fired, if any.
    pub description: Option<String>,
    pub matches: Vec<SequenceMatch>,
}

impl PatternScan {
    pub fn has_pattern(&self) -> bool {
        self.description.is_some()
    }
}

/// Run every enabled matcher over the sample.
///
/// The headline description comes from the first group that fires: a
/// repeating block, then the first mathematical shape, then the consistency
/// signal. The consistency signal is always tested; the mathematical
/// matchers honor the filter.
pub fn detect_patterns(
    samples: &[u32],
    stats: &SpacingStats,
    filter: &AnalysisFilter,
) -> PatternScan {
    let mut scan = PatternScan::default();

    if filter.feature_enabled(SpacingFeature::MathematicalPatterns) {
        if let Some(SequenceMatch::Repeating { block, match_ratio }) =
            match_repeating_block(samples)
        {
            scan.description = Some(format!(
                "Repeating pattern detected: {}",
                join_values(&block)
            ));
            scan.matches
                .push(SequenceMatch::Repeating { block, match_ratio });
        }

        let mathematical = [
            match_arithmetic(samples),
            match_geometric(samples),
            match_fibonacci(samples),
            match_prime(samples),
            match_triangular(samples),
            match_powers_of_two(samples),
        ];
        for found in mathematical.into_iter().flatten() {
            if scan.description.is_none() {
                scan.description = Some(format!("Mathematical pattern detected: {}", found.name()));
            }
            scan.matches.push(found);
        }
    }

    if let Some(found) = match_consistent(samples, stats) {
        if scan.description.is_none() {
            scan.description = Some("Unusually consistent spacing detected".to_string());
        }
        scan.matches.push(found);
    }

    scan
}

fn join_values(values: &[u32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A short block of values repeating through the sample.
///
/// Tries block lengths 2 through 5; a candidate (the first `len` samples)
/// matches when over 70% of the subsequent non-overlapping blocks equal it
/// exactly, with at least 3 repetitions worth of data available.
pub fn match_repeating_block(samples: &[u32]) -> Option<SequenceMatch> {
    for len in 2..=5 {
        if samples.len() < len * 3 {
            continue;
        }

        let candidate = &samples[..len];
        let mut matches = 0usize;
        let mut comparisons = 0usize;

        let mut start = len;
        while start + len <= samples.len() {
            if &samples[start..start + len] == candidate {
                matches += 1;
            }
            comparisons += 1;
            start += len;
        }

        if comparisons > 0 {
            let ratio = matches as f64 / comparisons as f64;
            if ratio > BLOCK_MATCH_THRESHOLD {
                return Some(SequenceMatch::Repeating {
                    block: candidate.to_vec(),
                    match_ratio: ratio,
                });
            }
        }
    }
    None
}

/// Near-constant difference between consecutive samples.
pub fn match_arithmetic(samples: &[u32]) -> Option<SequenceMatch> {
    if samples.len() <= 5 {
        return None;
    }

    let diffs: Vec<f64> = samples
        .windows(2)
        .map(|pair| pair[1] as f64 - pair[0] as f64)
        .collect();
    let mean = diffs.iter().sum::<f64>() / diffs.len() as f64;
    let variance = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / diffs.len() as f64;

    if variance < 0.5 && mean.abs() > 0.05 {
        Some(SequenceMatch::Arithmetic {
            increment: mean,
            confidence: 1.0 - variance / 2.0,
        })
    } else {
        None
    }
}

/// Near-constant ratio between consecutive samples.
pub fn match_geometric(samples: &[u32]) -> Option<SequenceMatch> {
    let ratios: Vec<f64> = samples
        .windows(2)
        .filter(|pair| pair[0] != 0)
        .map(|pair| pair[1] as f64 / pair[0] as f64)
        .collect();
    if ratios.len() <= 3 {
        return None;
    }

    let mean = ratios.iter().sum::<f64>() / ratios.len() as f64;
    let variance = ratios.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / ratios.len() as f64;

    if variance < 0.1 && (mean - 1.0).abs() > 0.1 {
        Some(SequenceMatch::Geometric {
            ratio: mean,
            confidence: 1.0 - variance,
        })
    } else {
        None
    }
}

/// Each sample approximately the sum of the two before it.
///
/// Checks the first eight samples; every element must be within 10% of the
/// Fibonacci expectation.
pub fn match_fibonacci(samples: &[u32]) -> Option<SequenceMatch> {
    if samples.len() < 5 {
        return None;
    }

    let checked = samples.len().min(8);
    let mut errors = Vec::new();
    for i in 2..checked {
        let expected = (samples[i - 1] + samples[i - 2]) as f64;
        let error = (expected - samples[i] as f64).abs() / expected.max(1.0);
        if error > ELEMENT_ERROR_TOLERANCE {
            return None;
        }
        errors.push(error);
    }

    let mean_error = errors.iter().sum::<f64>() / errors.len() as f64;
    Some(SequenceMatch::Fibonacci {
        sequence: samples[..checked].to_vec(),
        confidence: 1.0 - mean_error,
    })
}

pub fn match_prime(samples: &[u32]) -> Option<SequenceMatch> {
    let (matches, compared, confidence) = match_reference(samples, &PRIMES, 4)?;
    Some(SequenceMatch::Prime {
        matches,
        compared,
        confidence,
    })
}

pub fn match_triangular(samples: &[u32]) -> Option<SequenceMatch> {
    let (matches, compared, confidence) = match_reference(samples, &TRIANGULAR, 4)?;
    Some(SequenceMatch::Triangular {
        matches,
        compared,
        confidence,
    })
}

pub fn match_powers_of_two(samples: &[u32]) -> Option<SequenceMatch> {
    let (matches, compared, confidence) = match_reference(samples, &POWERS_OF_TWO, 3)?;
    Some(SequenceMatch::PowersOfTwo {
        matches,
        compared,
        confidence,
    })
}

/// Compare the sample prefix against a fixed reference sequence.
fn match_reference(
    samples: &[u32],
    reference: &[u32],
    min_matches: usize,
) -> Option<(usize, usize, f64)> {
    let compared = samples.len().min(reference.len());
    if compared == 0 {
        return None;
    }

    let mut matches = 0usize;
    let mut error_sum = 0.0;
    for i in 0..compared {
        let error = (samples[i] as f64 - reference[i] as f64).abs() / reference[i] as f64;
        error_sum += error;
        if error < ELEMENT_ERROR_TOLERANCE {
            matches += 1;
        }
    }

    if matches >= min_matches && matches as f64 >= compared as f64 * REFERENCE_MATCH_FRACTION {
        Some((matches, compared, 1.0 - error_sum / compared as f64))
    } else {
        None
    }
}

/// Unusually low variation across a sample of meaningful size.
pub fn match_consistent(samples: &[u32], stats: &SpacingStats) -> Option<SequenceMatch> {
    let cv = stats.coefficient_of_variation();
    if cv < CONSISTENCY_CV_THRESHOLD && samples.len() > 10 {
        Some(SequenceMatch::ConsistentSpacing {
            coefficient_of_variation: cv,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spacing::extract::compute_stats;

    fn scan_all(samples: &[u32]) -> PatternScan {
        detect_patterns(samples, &compute_stats(samples), &AnalysisFilter::all())
    }

    #[test]
    fn repeating_block_of_two_is_found() {
        let found = match_repeating_block(&[1, 2, 1, 2, 1, 2, 1, 2]).unwrap();
        match found {
            SequenceMatch::Repeating { block, match_ratio } => {
                assert_eq!(block, vec![1, 2]);
                assert_eq!(match_ratio, 1.0);
            }
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn noisy_block_below_threshold_is_rejected() {
        // Only 1 of 3 subsequent blocks equals the candidate
        assert!(match_repeating_block(&[1, 2, 1, 2, 3, 4, 5, 6]).is_none());
    }

    #[test]
    fn short_sample_cannot_repeat() {
        assert!(match_repeating_block(&[1, 2, 1, 2, 1]).is_none());
    }

    #[test]
    fn arithmetic_progression_is_found() {
        let found = match_arithmetic(&[1, 2, 3, 4, 5, 6]).unwrap();
        match found {
            SequenceMatch::Arithmetic {
                increment,
                confidence,
            } => {
                assert_eq!(increment, 1.0);
                assert_eq!(confidence, 1.0);
            }
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn constant_sample_is_not_arithmetic() {
        // Mean difference 0 fails the increment floor
        assert!(match_arithmetic(&[2, 2, 2, 2, 2, 2]).is_none());
    }

    #[test]
    fn arithmetic_needs_more_than_five_samples() {
        assert!(match_arithmetic(&[1, 2, 3, 4, 5]).is_none());
    }

    #[test]
    fn geometric_progression_is_found() {
        let found = match_geometric(&[1, 2, 4, 8, 16]).unwrap();
        match found {
            SequenceMatch::Geometric { ratio, confidence } => {
                assert_eq!(ratio, 2.0);
                assert_eq!(confidence, 1.0);
            }
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn unit_ratio_is_not_geometric() {
        assert!(match_geometric(&[3, 3, 3, 3, 3]).is_none());
    }

    #[test]
    fn fibonacci_sequence_is_found() {
        let found = match_fibonacci(&[1, 1, 2, 3, 5, 8]).unwrap();
        match found {
            SequenceMatch::Fibonacci {
                sequence,
                confidence,
            } => {
                assert_eq!(sequence, vec![1, 1, 2, 3, 5, 8]);
                assert_eq!(confidence, 1.0);
            }
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn fibonacci_checks_only_the_first_eight() {
        // Samples beyond index 7 may break the shape freely
        assert!(match_fibonacci(&[1, 1, 2, 3, 5, 8, 13, 21, 99, 99]).is_some());
        assert!(match_fibonacci(&[1, 1, 2, 3, 5, 8, 13, 99]).is_none());
    }

    #[test]
    fn fibonacci_needs_five_samples() {
        assert!(match_fibonacci(&[1, 1, 2, 3]).is_none());
    }

    #[test]
    fn prime_sequence_is_found() {
        let found = match_prime(&[2, 3, 5, 7, 11, 13, 17, 19]).unwrap();
        match found {
            SequenceMatch::Prime {
                matches,
                compared,
                confidence,
            } => {
                assert_eq!(matches, 8);
                assert_eq!(compared, 8);
                assert_eq!(confidence, 1.0);
            }
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn partial_prime_match_respects_fraction() {
        // 4 of 8 match exactly; below the 60% fraction
        assert!(match_prime(&[2, 3, 5, 7, 20, 20, 20, 50]).is_none());
    }

    #[test]
    fn triangular_sequence_is_found() {
        assert!(match_triangular(&[1, 3, 6, 10, 15]).is_some());
    }

    #[test]
    fn powers_of_two_accepts_three_matches() {
        let found = match_powers_of_two(&[1, 2, 4, 9, 30]);
        // 3 matches of 5 compared = 60%, minimum 3 satisfied
        assert!(found.is_some());
    }

    #[test]
    fn consistency_needs_more_than_ten_samples() {
        let short = [2u32; 10];
        assert!(match_consistent(&short, &compute_stats(&short)).is_none());
        let long = [2u32; 11];
        let found = match_consistent(&long, &compute_stats(&long)).unwrap();
        match found {
            SequenceMatch::ConsistentSpacing {
                coefficient_of_variation,
            } => assert_eq!(coefficient_of_variation, 0.0),
            other => panic!("unexpected match: {other:?}"),
        }
    }

    #[test]
    fn scan_headline_prefers_repeating_over_consistency() {
        let scan = scan_all(&[1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2]);
        let headline = scan.description.unwrap();
        assert_eq!(headline, "Repeating pattern detected: 1, 2");
    }

    #[test]
    fn scan_headline_names_first_mathematical_match() {
        let scan = scan_all(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(
            scan.description.unwrap(),
            "Mathematical pattern detected: Arithmetic Progression"
        );
    }

    #[test]
    fn consistency_headline_needs_no_exact_repetition() {
        // One early outlier breaks every block candidate but leaves CV low
        let scan = scan_all(&[10, 9, 10, 10, 10, 10, 10, 10, 10, 10, 10, 10]);
        assert_eq!(
            scan.description.unwrap(),
            "Unusually consistent spacing detected"
        );
        assert!(scan
            .matches
            .iter()
            .any(|m| matches!(m, SequenceMatch::ConsistentSpacing { .. })));
    }

    #[test]
    fn disabled_mathematical_patterns_leave_consistency_active() {
        use crate::core::options::WatermarkOption;
        let filter = AnalysisFilter::from_options([WatermarkOption::DoubleSpaces]);
        let samples = [3u32; 12];
        let scan = detect_patterns(&samples, &compute_stats(&samples), &filter);
        assert_eq!(scan.matches.len(), 1);
        assert!(matches!(
            scan.matches[0],
            SequenceMatch::ConsistentSpacing { .. }
        ));
    }

    #[test]
    fn one_sample_can_fire_multiple_matchers() {
        // The prime prefix also happens to keep ratio variance low
        let scan = scan_all(&[2, 3, 5, 7, 11, 13]);
        assert!(scan
            .matches
            .iter()
            .any(|m| matches!(m, SequenceMatch::Prime { .. })));
        assert!(scan
            .matches
            .iter()
            .any(|m| matches!(m, SequenceMatch::Geometric { .. })));
    }
}
