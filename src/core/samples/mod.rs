//! # Sample Texts
//!
//! Built-in demonstration texts, one per watermarking technique the
//! detectors look for. Handy for trying the tool without hunting down a
//! watermarked document first.

/// One built-in demonstration text.
#[derive(Debug, Clone, Copy)]
pub struct SampleText {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub text: &'static str,
}

const SAMPLES: &[SampleText] = &[
    SampleText {
        id: "zwj",
        name: "Zero-Width Joiner Example",
        description: "Text with zero-width joiners (ZWJ) hidden between words",
        text: "This\u{200D} text\u{200D} contains\u{200D} zero-width\u{200D} joiners\u{200D} between\u{200D} words.",
    },
    SampleText {
        id: "zwsp",
        name: "Zero-Width Space Example",
        description: "Text with zero-width spaces hidden throughout",
        text: "This\u{200B} text\u{200B} has\u{200B} zero-width\u{200B} spaces\u{200B} inserted\u{200B} between\u{200B} words.",
    },
    SampleText {
        id: "mixed",
        name: "Mixed Hidden Characters",
        description: "Text with various hidden characters mixed in",
        text: "This\u{2060} text\u{2060} has\u{2060} various\u{2060} hidden\u{2060} characters\u{2060} like\u{2060} ZWJ\u{200D}, ZWSP\u{200B}, and\u{2060} word\u{2060} joiners\u{2060}.",
    },
    SampleText {
        id: "spacing",
        name: "Spacing Pattern Example",
        description: "Text with unusual spacing patterns that follow a mathematical sequence",
        text: "This  text  has  unusual   spacing   patterns    that     follow      mathematical       sequences.",
    },
];

/// All built-in samples, in display order.
pub fn all_samples() -> &'static [SampleText] {
    SAMPLES
}

/// Look up a sample by its id.
pub fn by_id(id: &str) -> Option<&'static SampleText> {
    SAMPLES.iter().find(|s| s.id == id)
}
