//! Deliberate-insertion heuristic for hidden characters.
//!
//! An occurrence looks deliberate when its surroundings show the regularity
//! a watermarking tool leaves behind: near-constant line spacing, local
//! repetition of the same character, repeated paragraph-initial placement,
//! or a recurring three-character window around the occurrence.
//!
//! The signals are cheap to evaluate against a [`ProximityIndex`] built in
//! a single pass over the text, so scanning stays linear even when a
//! character occurs thousands of times.

use crate::core::characters::placement::is_word_char;
use crate::core::paragraphs::split_paragraphs;
use crate::core::registry;
use std::collections::HashMap;

/// Per-scan index backing the proximity signals.
pub struct ProximityIndex {
    regular_line_spacing: bool,
    char_offsets: HashMap<char, Vec<usize>>,
    paragraph_initial: HashMap<char, usize>,
    trigram_counts: HashMap<(char, char, char), u32>,
}

/// Occurrences of a character required inside the 200-character window.
const WINDOW_REPEAT_THRESHOLD: usize = 3;

/// Half-width of the local repetition window, in scalar values.
const WINDOW_RADIUS: usize = 100;

impl ProximityIndex {
    /// Build the index for one input text.
    pub fn build(text: &str) -> Self {
        let mut line_feed_offsets = Vec::new();
        let mut char_offsets: HashMap<char, Vec<usize>> = HashMap::new();
        let mut trigram_counts: HashMap<(char, char, char), u32> = HashMap::new();

        let mut prev: Option<char> = None;
        let mut prev_prev: Option<char> = None;
        for (offset, ch) in text.chars().enumerate() {
            if ch == '\n' {
                line_feed_offsets.push(offset);
            } else if registry::is_registered(ch) {
                char_offsets.entry(ch).or_default().push(offset);
            }

            // Trigrams are only ever queried with a registered middle
            if let (Some(p2), Some(p1)) = (prev_prev, prev) {
                if p1 != '\n' && registry::is_registered(p1) {
                    *trigram_counts.entry((p2, p1, ch)).or_insert(0) += 1;
                }
            }
            prev_prev = prev;
            prev = Some(ch);
        }

        let mut paragraph_initial: HashMap<char, usize> = HashMap::new();
        for paragraph in split_paragraphs(text) {
            if let Some(first) = paragraph.text.chars().next() {
                if registry::is_registered(first) {
                    *paragraph_initial.entry(first).or_insert(0) += 1;
                }
            }
        }

        Self {
            regular_line_spacing: has_regular_line_spacing(&line_feed_offsets),
            char_offsets,
            paragraph_initial,
            trigram_counts,
        }
    }

    /// Does the occurrence of `ch` at `offset` look deliberately inserted?
    ///
    /// `prev` and `next` are the characters immediately around the
    /// occurrence, if any.
    pub fn looks_deliberate(
        &self,
        offset: usize,
        ch: char,
        prev: Option<char>,
        next: Option<char>,
    ) -> bool {
        if ch == '\n' {
            return self.regular_line_spacing;
        }

        if let Some(offsets) = self.char_offsets.get(&ch) {
            let low = offset.saturating_sub(WINDOW_RADIUS);
            let high = offset + WINDOW_RADIUS;
            let first = offsets.partition_point(|&o| o < low);
            let last = offsets.partition_point(|&o| o < high);
            if last - first >= WINDOW_REPEAT_THRESHOLD {
                return true;
            }
        }

        if self.paragraph_initial.get(&ch).copied().unwrap_or(0) >= 2 {
            return true;
        }

        if let (Some(before), Some(after)) = (prev, next) {
            if is_flank_char(before) && is_flank_char(after) {
                let recurrences = self
                    .trigram_counts
                    .get(&(before, ch, after))
                    .copied()
                    .unwrap_or(0);
                if recurrences >= 2 {
                    return true;
                }
            }
        }

        false
    }
}

/// Three consecutive line-feed deltas within two characters of each other.
fn has_regular_line_spacing(line_feed_offsets: &[usize]) -> bool {
    if line_feed_offsets.len() < 3 {
        return false;
    }
    let deltas: Vec<i64> = line_feed_offsets
        .windows(2)
        .map(|w| w[1] as i64 - w[0] as i64)
        .collect();
    deltas
        .windows(3)
        .any(|w| (w[2] - w[1]).abs() <= 2 && (w[1] - w[0]).abs() <= 2)
}

fn is_flank_char(ch: char) -> bool {
    is_word_char(ch) || ch.is_whitespace()
}
