//! Chart-ready projections of the spacing data: a frequency series, an
//! expected-versus-actual series per projectable match, and a ten-bin
//! heatmap of the sample range.

use crate::core::spacing::sequences::SequenceMatch;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How often one spacing width occurs, ordered by width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyPoint {
    pub spacing: u32,
    pub frequency: usize,
}

/// Expected-versus-actual series for one matched sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternProjection {
    pub name: String,
    /// Ideal continuation of the matched shape. `None` when the shape has
    /// no closed form from a start value, as with Fibonacci.
    pub expected: Option<Vec<f64>>,
    pub actual: Vec<u32>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapBin {
    pub label: String,
    pub count: usize,
    /// Count relative to the fullest bin, 0 to 1.
    pub intensity: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpacingHeatmap {
    pub bins: Vec<HeatmapBin>,
    pub max_count: usize,
}

/// Everything a renderer needs to chart the spacing analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualizationData {
    pub frequency: Vec<FrequencyPoint>,
    pub projections: Vec<PatternProjection>,
    pub heatmap: SpacingHeatmap,
    /// Raw sample prefix for sparklines.
    pub spacing_values: Vec<u32>,
}

const PROJECTION_POINTS: usize = 10;
const HEATMAP_BINS: usize = 10;
const RAW_VALUE_CAP: usize = 100;

/// Build the visualization series for one sample and its matches.
pub fn build(samples: &[u32], matches: &[SequenceMatch]) -> VisualizationData {
    VisualizationData {
        frequency: frequency_series(samples),
        projections: matches.iter().filter_map(|m| project(m, samples)).collect(),
        heatmap: heatmap(samples),
        spacing_values: samples.iter().take(RAW_VALUE_CAP).copied().collect(),
    }
}

fn frequency_series(samples: &[u32]) -> Vec<FrequencyPoint> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for &value in samples {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut series: Vec<FrequencyPoint> = counts
        .into_iter()
        .map(|(spacing, frequency)| FrequencyPoint { spacing, frequency })
        .collect();
    series.sort_by_key(|point| point.spacing);
    series
}

fn project(found: &SequenceMatch, samples: &[u32]) -> Option<PatternProjection> {
    let start = samples.first().copied().unwrap_or(1) as f64;
    let actual: Vec<u32> = samples.iter().take(PROJECTION_POINTS).copied().collect();

    let (expected, actual) = match found {
        SequenceMatch::Arithmetic { increment, .. } => {
            let series = (0..PROJECTION_POINTS)
                .map(|i| start + increment * i as f64)
                .collect();
            (Some(series), actual)
        }
        SequenceMatch::Geometric { ratio, .. } => {
            let series = (0..PROJECTION_POINTS)
                .map(|i| start * ratio.powi(i as i32))
                .collect();
            (Some(series), actual)
        }
        SequenceMatch::Fibonacci { sequence, .. } => (None, sequence.clone()),
        _ => return None,
    };

    Some(PatternProjection {
        name: found.name().to_string(),
        expected,
        actual,
        confidence: found.confidence(),
    })
}

fn heatmap(samples: &[u32]) -> SpacingHeatmap {
    let (min, max) = match (samples.iter().min(), samples.iter().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return SpacingHeatmap::default(),
    };

    let bin_size = if max == min {
        1.0
    } else {
        (max - min) as f64 / HEATMAP_BINS as f64
    };

    let mut counts = vec![0usize; HEATMAP_BINS];
    for &value in samples {
        let index = (((value - min) as f64 / bin_size).floor() as usize).min(HEATMAP_BINS - 1);
        counts[index] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(0);

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let from = min as f64 + i as f64 * bin_size;
            let to = min as f64 + (i + 1) as f64 * bin_size;
            HeatmapBin {
                label: format!("{from:.1}-{to:.1}"),
                count,
                intensity: if max_count > 0 {
                    count as f64 / max_count as f64
                } else {
                    0.0
                },
            }
        })
        .collect();

    SpacingHeatmap { bins, max_count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_series_is_sorted_by_width() {
        let data = build(&[3, 1, 2, 3, 3, 2], &[]);
        assert_eq!(
            data.frequency,
            vec![
                FrequencyPoint {
                    spacing: 1,
                    frequency: 1
                },
                FrequencyPoint {
                    spacing: 2,
                    frequency: 2
                },
                FrequencyPoint {
                    spacing: 3,
                    frequency: 3
                },
            ]
        );
    }

    #[test]
    fn arithmetic_projection_extends_from_the_first_sample() {
        let matches = [SequenceMatch::Arithmetic {
            increment: 1.0,
            confidence: 1.0,
        }];
        let data = build(&[1, 2, 3, 4, 5, 6], &matches);
        assert_eq!(data.projections.len(), 1);
        let projection = &data.projections[0];
        assert_eq!(projection.name, "Arithmetic Progression");
        assert_eq!(
            projection.expected.as_deref(),
            Some(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0][..])
        );
        assert_eq!(projection.actual, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn geometric_projection_multiplies_from_the_first_sample() {
        let matches = [SequenceMatch::Geometric {
            ratio: 2.0,
            confidence: 1.0,
        }];
        let data = build(&[1, 2, 4, 8, 16], &matches);
        let expected = data.projections[0].expected.as_ref().unwrap();
        assert_eq!(expected.len(), 10);
        assert_eq!(expected[0], 1.0);
        assert_eq!(expected[9], 512.0);
    }

    #[test]
    fn fibonacci_projection_reports_the_matched_sequence() {
        let matches = [SequenceMatch::Fibonacci {
            sequence: vec![1, 1, 2, 3, 5],
            confidence: 1.0,
        }];
        let data = build(&[1, 1, 2, 3, 5], &matches);
        let projection = &data.projections[0];
        assert!(projection.expected.is_none());
        assert_eq!(projection.actual, vec![1, 1, 2, 3, 5]);
    }

    #[test]
    fn positional_matches_have_no_projection() {
        let matches = [
            SequenceMatch::Prime {
                matches: 5,
                compared: 5,
                confidence: 1.0,
            },
            SequenceMatch::ConsistentSpacing {
                coefficient_of_variation: 0.0,
            },
        ];
        let data = build(&[2, 3, 5, 7, 11], &matches);
        assert!(data.projections.is_empty());
    }

    #[test]
    fn heatmap_buckets_cover_the_sample_range() {
        let samples: Vec<u32> = (1..=20).collect();
        let data = build(&samples, &[]);
        assert_eq!(data.heatmap.bins.len(), 10);
        assert_eq!(data.heatmap.bins[0].label, "1.0-2.9");
        assert_eq!(data.heatmap.bins[9].label, "18.1-20.0");
        assert_eq!(data.heatmap.max_count, 2);
        assert!(data.heatmap.bins.iter().all(|b| b.count == 2));
        assert!(data.heatmap.bins.iter().all(|b| b.intensity == 1.0));
    }

    #[test]
    fn constant_samples_fill_the_first_bucket() {
        let data = build(&[4, 4, 4, 4], &[]);
        assert_eq!(data.heatmap.bins[0].count, 4);
        assert_eq!(data.heatmap.bins[0].label, "4.0-5.0");
        assert_eq!(data.heatmap.bins[0].intensity, 1.0);
        assert!(data.heatmap.bins[1..].iter().all(|b| b.count == 0));
    }

    #[test]
    fn raw_values_cap_at_one_hundred() {
        let samples = vec![2u32; 150];
        let data = build(&samples, &[]);
        assert_eq!(data.spacing_values.len(), 100);
    }

    #[test]
    fn empty_samples_yield_an_empty_visualization() {
        let data = build(&[], &[]);
        assert!(data.frequency.is_empty());
        assert!(data.heatmap.bins.is_empty());
        assert_eq!(data.heatmap.max_count, 0);
        assert!(data.spacing_values.is_empty());
    }
}
