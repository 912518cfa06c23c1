//! # Multi-Space Detection
//!
//! Finds maximal runs of two or more spaces, classifies each run once by
//! length, and tests whether the runs recur at suspiciously regular
//! intervals.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Length class of one space run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiSpaceKind {
    Double,
    Triple,
    FourPlus,
}

/// One maximal space run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiSpaceFinding {
    pub kind: MultiSpaceKind,
    /// Char offset of the first space in the run.
    pub position: usize,
    /// Run length in spaces.
    pub length: usize,
    /// Surrounding text with the run replaced by a "[N SPACES]" marker.
    pub context: String,
}

/// Exclusive per-class counts. A four-space run counts once as four-plus,
/// never additionally as double or triple.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MultiSpaceCounts {
    pub double: usize,
    pub triple: usize,
    pub four_plus: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiSpaceReport {
    pub counts: MultiSpaceCounts,
    /// All runs in text order.
    pub findings: Vec<MultiSpaceFinding>,
    pub has_regular_interval: bool,
    pub interval_description: Option<String>,
}

/// Context window either side of a run, in chars.
const CONTEXT_RADIUS: usize = 10;
/// Findings needed before interval regularity is considered.
const MIN_FINDINGS_FOR_INTERVAL: usize = 4;
/// Variance-to-mean ratio of position deltas below this counts as regular.
const INTERVAL_DISPERSION_THRESHOLD: f64 = 0.2;

/// Find and classify every maximal multi-space run in `text`.
pub fn detect_multiple_spaces(text: &str) -> MultiSpaceReport {
    let run_pattern = Regex::new(r" {2,}").unwrap();
    let runs: Vec<(usize, usize)> = run_pattern
        .find_iter(text)
        .map(|m| (m.start(), m.len()))
        .collect();
    if runs.is_empty() {
        return MultiSpaceReport::default();
    }

    let chars: Vec<char> = text.chars().collect();

    // Match offsets are in bytes; translate run starts to char offsets in
    // one pass. Space runs are ASCII so byte length equals char length.
    let mut run_starts = Vec::with_capacity(runs.len());
    let mut pending = runs.iter();
    let mut next = pending.next();
    for (char_offset, (byte_offset, _)) in text.char_indices().enumerate() {
        match next {
            Some(&(start, _)) if start == byte_offset => {
                run_starts.push(char_offset);
                next = pending.next();
            }
            Some(_) => {}
            None => break,
        }
    }

    let mut counts = MultiSpaceCounts::default();
    let mut findings = Vec::with_capacity(runs.len());
    for (&(_, length), &position) in runs.iter().zip(&run_starts) {
        let kind = match length {
            2 => {
                counts.double += 1;
                MultiSpaceKind::Double
            }
            3 => {
                counts.triple += 1;
                MultiSpaceKind::Triple
            }
            _ => {
                counts.four_plus += 1;
                MultiSpaceKind::FourPlus
            }
        };

        let before: String = chars[position.saturating_sub(CONTEXT_RADIUS)..position]
            .iter()
            .collect();
        let after_end = (position + length + CONTEXT_RADIUS).min(chars.len());
        let after: String = chars[position + length..after_end].iter().collect();

        findings.push(MultiSpaceFinding {
            kind,
            position,
            length,
            context: format!("{before}[{length} SPACES]{after}"),
        });
    }
    counts.total = findings.len();

    let (has_regular_interval, interval_description) = interval_regularity(&run_starts);

    MultiSpaceReport {
        counts,
        findings,
        has_regular_interval,
        interval_description,
    }
}

fn interval_regularity(positions: &[usize]) -> (bool, Option<String>) {
    if positions.len() < MIN_FINDINGS_FOR_INTERVAL {
        return (false, None);
    }

    let deltas: Vec<f64> = positions
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as f64)
        .collect();
    let mean = deltas.iter().sum::<f64>() / deltas.len() as f64;
    let variance = deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / deltas.len() as f64;

    if variance / mean < INTERVAL_DISPERSION_THRESHOLD {
        let description = format!(
            "Multiple spaces appear at regular intervals of ~{} characters",
            mean.round() as u64
        );
        (true, Some(description))
    } else {
        (false, None)
    }
}
