//! # Character Scanner
//!
//! Walks the input once by Unicode scalar value and accumulates every
//! registered hidden character into per-character statistics: positions,
//! paragraph indices, placement labels, and context windows. Ordinary line
//! feeds are exempted so prose with normal paragraph breaks does not light
//! up as watermarked.

use crate::core::characters::placement::Placement;
use crate::core::characters::proximity::ProximityIndex;
use crate::core::options::{AnalysisFilter, SpacingFeature};
use crate::core::paragraphs::{paragraph_index_at, preview, split_paragraphs};
use crate::core::registry::{self, Category, LikelihoodTier};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Context captured around one occurrence of a hidden character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharContext {
    /// Offset of the occurrence, in scalar values.
    pub offset: usize,
    /// Up to ten characters preceding the occurrence.
    pub before: String,
    /// Up to ten characters following the occurrence.
    pub after: String,
    /// Paragraph index containing the occurrence.
    pub paragraph: usize,
    pub placement: Placement,
}

/// Accumulated statistics for one distinct hidden character.
///
/// The per-occurrence vectors are parallel: index `i` of `positions`,
/// `paragraphs`, `placements`, and `contexts` all describe occurrence `i`,
/// and `count` equals their shared length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedCharacter {
    pub character: char,
    /// Zero-padded uppercase hex scalar value ("200D").
    pub codepoint: String,
    pub name: String,
    pub category: Category,
    pub likelihood: LikelihoodTier,
    pub count: usize,
    pub positions: Vec<usize>,
    pub paragraphs: Vec<usize>,
    pub placements: Vec<Placement>,
    /// Occurrences the proximity heuristic judged deliberately inserted.
    pub deliberate_occurrences: usize,
    pub contexts: Vec<CharContext>,
}

/// Total occurrences per category, sorted by count descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub count: usize,
}

/// Count of one distinct character inside one paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterTally {
    pub character: char,
    pub name: String,
    pub count: usize,
    pub likelihood: LikelihoodTier,
}

/// Hidden-character distribution of one paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphCharacters {
    pub index: usize,
    pub preview: String,
    pub char_len: usize,
    pub characters: Vec<CharacterTally>,
    pub total_hidden: usize,
}

/// Raw output of one scan, before confidence scoring.
#[derive(Debug, Clone)]
pub struct CharacterScan {
    /// Distinct detected characters, sorted by count descending.
    pub detected: Vec<DetectedCharacter>,
    pub categories: Vec<CategorySummary>,
    /// Input with every occurrence of every detected character removed.
    pub cleaned_text: String,
    /// Paragraphs that contain at least one hidden character.
    pub paragraph_breakdown: Vec<ParagraphCharacters>,
    pub total_hidden: usize,
    /// Input length in scalar values; used for density scoring.
    pub text_chars: usize,
}

/// Context window width either side of an occurrence, in scalar values.
const CONTEXT_RADIUS: usize = 10;

/// Window consulted when judging whether a line feed is ordinary.
const SENTENCE_WINDOW: usize = 50;

/// Scan text for registered hidden characters.
pub fn scan(text: &str, filter: &AnalysisFilter) -> CharacterScan {
    let chars: Vec<char> = text.chars().collect();
    let paragraphs = split_paragraphs(text);
    let proximity = ProximityIndex::build(text);

    let mut detected: Vec<DetectedCharacter> = Vec::new();
    let mut by_char: HashMap<char, usize> = HashMap::new();
    // Insertion-ordered category tallies, like the detected list
    let mut categories: Vec<CategorySummary> = Vec::new();

    for (offset, &ch) in chars.iter().enumerate() {
        let entry = match registry::lookup(ch) {
            Some(entry) => entry,
            None => continue,
        };

        let enabled = match ch {
            '\n' => filter.feature_enabled(SpacingFeature::LineBreaks),
            '\t' => filter.feature_enabled(SpacingFeature::TabCharacters),
            _ => filter.category_enabled(entry.category),
        };
        if !enabled {
            continue;
        }

        if ch == '\n' && is_normal_line_feed(&chars, offset, &proximity) {
            continue;
        }

        let before: String = chars[offset.saturating_sub(CONTEXT_RADIUS)..offset]
            .iter()
            .collect();
        let after_end = (offset + 1 + CONTEXT_RADIUS).min(chars.len());
        let after: String = chars[offset + 1..after_end].iter().collect();

        let paragraph = paragraph_index_at(&paragraphs, offset);
        let placement = Placement::from_context(&before, &after);
        let prev = offset.checked_sub(1).map(|i| chars[i]);
        let next = chars.get(offset + 1).copied();
        let deliberate = proximity.looks_deliberate(offset, ch, prev, next);

        let index = *by_char.entry(ch).or_insert_with(|| {
            detected.push(DetectedCharacter {
                character: ch,
                codepoint: registry::codepoint_hex(ch),
                name: entry.name.to_string(),
                category: entry.category,
                likelihood: entry.category.likelihood_tier(),
                count: 0,
                positions: Vec::new(),
                paragraphs: Vec::new(),
                placements: Vec::new(),
                deliberate_occurrences: 0,
                contexts: Vec::new(),
            });
            detected.len() - 1
        });

        let record = &mut detected[index];
        record.count += 1;
        record.positions.push(offset);
        record.paragraphs.push(paragraph);
        record.placements.push(placement);
        if deliberate {
            record.deliberate_occurrences += 1;
        }
        record.contexts.push(CharContext {
            offset,
            before,
            after,
            paragraph,
            placement,
        });

        match categories.iter_mut().find(|c| c.category == entry.category) {
            Some(summary) => summary.count += 1,
            None => categories.push(CategorySummary {
                category: entry.category,
                count: 1,
            }),
        }
    }

    detected.sort_by(|a, b| b.count.cmp(&a.count));
    categories.sort_by(|a, b| b.count.cmp(&a.count));

    let detected_set: HashSet<char> = detected.iter().map(|d| d.character).collect();
    let cleaned_text: String = if detected_set.is_empty() {
        text.to_string()
    } else {
        chars
            .iter()
            .copied()
            .filter(|c| !detected_set.contains(c))
            .collect()
    };

    let mut paragraph_breakdown = Vec::new();
    for (index, paragraph) in paragraphs.iter().enumerate() {
        let mut tallies = Vec::new();
        for record in &detected {
            let count = record.paragraphs.iter().filter(|&&p| p == index).count();
            if count > 0 {
                tallies.push(CharacterTally {
                    character: record.character,
                    name: record.name.clone(),
                    count,
                    likelihood: record.likelihood,
                });
            }
        }
        if !tallies.is_empty() {
            let total_hidden = tallies.iter().map(|t| t.count).sum();
            paragraph_breakdown.push(ParagraphCharacters {
                index,
                preview: preview(paragraph.text, 50),
                char_len: paragraph.char_len,
                characters: tallies,
                total_hidden,
            });
        }
    }

    let total_hidden = detected.iter().map(|d| d.count).sum();

    CharacterScan {
        detected,
        categories,
        cleaned_text,
        paragraph_breakdown,
        total_hidden,
        text_chars: chars.len(),
    }
}

/// An ordinary paragraph break: isolated, at a sentence boundary, and with
/// no suspicious line-spacing regularity.
fn is_normal_line_feed(chars: &[char], offset: usize, proximity: &ProximityIndex) -> bool {
    if offset > 0 && chars[offset - 1] == '\n' {
        return false;
    }
    if offset + 1 < chars.len() && chars[offset + 1] == '\n' {
        return false;
    }
    if proximity.looks_deliberate(offset, '\n', None, None) {
        return false;
    }

    let before: String = chars[offset.saturating_sub(SENTENCE_WINDOW)..offset]
        .iter()
        .collect();
    let after_end = (offset + 1 + SENTENCE_WINDOW).min(chars.len());
    let after: String = chars[offset + 1..after_end].iter().collect();

    let ends_with_punctuation = matches!(
        before.trim_end().chars().last(),
        Some('.') | Some('!') | Some('?')
    );
    let starts_with_capital = after
        .chars()
        .find(|c| !c.is_whitespace())
        .map_or(false, |c| c.is_ascii_uppercase());

    ends_with_punctuation && starts_with_capital
}
