//! # Spacing Extraction and Descriptive Statistics
//!
//! Reduces text to the ordered lengths of its interior space runs and
//! computes the summary statistics later stages score against.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One distinct sample value and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: u32,
    pub count: usize,
}

/// Descriptive statistics over a spacing sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpacingStats {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Most frequent sample value; first value to reach the top count wins.
    pub mode: Option<u32>,
    /// Two near-equally common values dominate the distribution.
    pub bimodal: bool,
    /// Distinct values sorted by count descending, ties by value ascending.
    pub frequency: Vec<FrequencyEntry>,
}

/// Second-to-first frequency ratio above this marks a bimodal distribution.
const BIMODAL_RATIO: f64 = 0.7;

impl SpacingStats {
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean > 0.0 {
            self.std_dev / self.mean
        } else {
            0.0
        }
    }
}

/// Extract inter-word spacing samples from text.
///
/// A run of consecutive U+0020 characters between two non-space characters
/// contributes one sample equal to its length. Runs at the start or end of
/// the text separate nothing and are discarded.
pub fn extract_samples(text: &str) -> Vec<u32> {
    let mut samples = Vec::new();
    let mut run = 0u32;
    let mut seen_word = false;

    for ch in text.chars() {
        if ch == ' ' {
            if seen_word {
                run += 1;
            }
        } else {
            if run > 0 {
                samples.push(run);
                run = 0;
            }
            seen_word = true;
        }
    }

    samples
}

/// Compute descriptive statistics over a spacing sample.
pub fn compute_stats(samples: &[u32]) -> SpacingStats {
    if samples.is_empty() {
        return SpacingStats {
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            mode: None,
            bimodal: false,
            frequency: Vec::new(),
        };
    }

    let n = samples.len() as f64;
    let mean = samples.iter().map(|&v| v as f64).sum::<f64>() / n;

    let mut sorted: Vec<u32> = samples.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    };

    let variance = samples
        .iter()
        .map(|&v| (v as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    let mut counts: HashMap<u32, usize> = HashMap::new();
    let mut mode = None;
    let mut top_count = 0;
    for &value in samples {
        let count = counts.entry(value).or_insert(0);
        *count += 1;
        if *count > top_count {
            top_count = *count;
            mode = Some(value);
        }
    }

    let mut frequency: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(value, count)| FrequencyEntry { value, count })
        .collect();
    frequency.sort_by(|a, b| b.count.cmp(&a.count).then(a.value.cmp(&b.value)));

    let bimodal = frequency.len() > 1
        && frequency[1].count as f64 / frequency[0].count as f64 > BIMODAL_RATIO;

    SpacingStats {
        mean,
        median,
        std_dev,
        mode,
        bimodal,
        frequency,
    }
}
