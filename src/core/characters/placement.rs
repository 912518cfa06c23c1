//! Placement classification for hidden-character occurrences.
//!
//! Labels where in its textual neighborhood a hidden character sits, based
//! on the context windows captured by the scanner. Placement distributions
//! feed the per-category pattern summary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a hidden character sits relative to the visible text around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    BetweenWords,
    AfterPunctuation,
    BeforePunctuation,
    StartOfLine,
    EndOfLine,
    /// Part of the reported vocabulary; word-flanked occurrences classify
    /// as `BetweenWords` before this label is ever reached.
    WithinWord,
    Other,
}

impl Placement {
    /// Classify from the context windows either side of the occurrence.
    pub fn from_context(before: &str, after: &str) -> Placement {
        let before_ends_word = before.chars().last().map_or(false, is_word_char);
        let after_starts_word = after.chars().next().map_or(false, is_word_char);

        if before_ends_word && after_starts_word {
            return Placement::BetweenWords;
        }

        if before.chars().last().map_or(false, is_sentence_punctuation) {
            return Placement::AfterPunctuation;
        }

        if after.chars().next().map_or(false, is_sentence_punctuation) {
            return Placement::BeforePunctuation;
        }

        if before.trim().is_empty() || before.ends_with('\n') {
            return Placement::StartOfLine;
        }

        if after.trim().is_empty() || after.starts_with('\n') {
            return Placement::EndOfLine;
        }

        Placement::Other
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Placement::BetweenWords => "between words",
            Placement::AfterPunctuation => "after punctuation",
            Placement::BeforePunctuation => "before punctuation",
            Placement::StartOfLine => "at the start of lines",
            Placement::EndOfLine => "at the end of lines",
            Placement::WithinWord => "within words",
            Placement::Other => "in other contexts",
        };
        write!(f, "{}", label)
    }
}

/// Word characters for placement purposes: alphanumerics plus underscore.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn is_sentence_punctuation(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | ',' | ';' | ':')
}
