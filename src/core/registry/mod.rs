//! # Codepoint Registry
//!
//! The fixed table of Unicode scalar values that can carry text watermarks:
//! zero-width characters, direction controls, variation selectors, control
//! characters, and the various invisible fillers. Every other detector
//! consults this table; it is built at compile time and never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a registered codepoint.
///
/// Serialized with the human-readable labels shown in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Control character")]
    ControlCharacter,
    #[serde(rename = "Information separator")]
    InformationSeparator,
    #[serde(rename = "Zero-width")]
    ZeroWidth,
    #[serde(rename = "Direction control")]
    DirectionControl,
    #[serde(rename = "Variation selector")]
    VariationSelector,
    #[serde(rename = "Formatting")]
    Formatting,
    #[serde(rename = "Combining")]
    Combining,
    #[serde(rename = "Filler")]
    Filler,
    #[serde(rename = "Braille")]
    Braille,
    #[serde(rename = "Invisible math")]
    InvisibleMath,
    #[serde(rename = "Deprecated format")]
    DeprecatedFormat,
}

impl Category {
    /// How likely a character of this category is to be a deliberate
    /// watermark rather than an artifact of ordinary text processing.
    pub fn likelihood_tier(&self) -> LikelihoodTier {
        match self {
            Category::ZeroWidth => LikelihoodTier::High,
            Category::DirectionControl
            | Category::VariationSelector
            | Category::InformationSeparator => LikelihoodTier::Medium,
            _ => LikelihoodTier::Low,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::ControlCharacter => "Control character",
            Category::InformationSeparator => "Information separator",
            Category::ZeroWidth => "Zero-width",
            Category::DirectionControl => "Direction control",
            Category::VariationSelector => "Variation selector",
            Category::Formatting => "Formatting",
            Category::Combining => "Combining",
            Category::Filler => "Filler",
            Category::Braille => "Braille",
            Category::InvisibleMath => "Invisible math",
            Category::DeprecatedFormat => "Deprecated format",
        };
        write!(f, "{}", label)
    }
}

/// Watermark likelihood tier for a single character occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LikelihoodTier {
    High,
    Medium,
    Low,
}

impl LikelihoodTier {
    /// Weight applied to occurrence counts when scoring confidence.
    pub fn weight(&self) -> f64 {
        match self {
            LikelihoodTier::High => 1.5,
            LikelihoodTier::Medium => 1.0,
            LikelihoodTier::Low => 0.5,
        }
    }
}

impl fmt::Display for LikelihoodTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LikelihoodTier::High => write!(f, "High"),
            LikelihoodTier::Medium => write!(f, "Medium"),
            LikelihoodTier::Low => write!(f, "Low"),
        }
    }
}

/// One registered codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodepointEntry {
    pub codepoint: char,
    pub name: &'static str,
    pub category: Category,
}

const fn entry(codepoint: char, name: &'static str, category: Category) -> CodepointEntry {
    CodepointEntry {
        codepoint,
        name,
        category,
    }
}

use Category::*;

/// All registered codepoints, sorted by scalar value for binary search.
pub const REGISTRY: &[CodepointEntry] = &[
    // C0 controls
    entry('\u{0000}', "NULL", ControlCharacter),
    entry('\u{0001}', "START OF HEADING", ControlCharacter),
    entry('\u{0002}', "START OF TEXT", ControlCharacter),
    entry('\u{0003}', "END OF TEXT", ControlCharacter),
    entry('\u{0004}', "END OF TRANSMISSION", ControlCharacter),
    entry('\u{0005}', "ENQUIRY", ControlCharacter),
    entry('\u{0006}', "ACKNOWLEDGE", ControlCharacter),
    entry('\u{0007}', "BELL", ControlCharacter),
    entry('\u{0008}', "BACKSPACE", ControlCharacter),
    entry('\u{0009}', "CHARACTER TABULATION", ControlCharacter),
    entry('\u{000A}', "LINE FEED", ControlCharacter),
    entry('\u{000B}', "LINE TABULATION", ControlCharacter),
    entry('\u{000C}', "FORM FEED", ControlCharacter),
    entry('\u{000D}', "CARRIAGE RETURN", ControlCharacter),
    entry('\u{000E}', "SHIFT OUT", ControlCharacter),
    entry('\u{000F}', "SHIFT IN", ControlCharacter),
    entry('\u{0010}', "DATA LINK ESCAPE", ControlCharacter),
    entry('\u{0011}', "DEVICE CONTROL ONE", ControlCharacter),
    entry('\u{0012}', "DEVICE CONTROL TWO", ControlCharacter),
    entry('\u{0013}', "DEVICE CONTROL THREE", ControlCharacter),
    entry('\u{0014}', "DEVICE CONTROL FOUR", ControlCharacter),
    entry('\u{0015}', "NEGATIVE ACKNOWLEDGE", ControlCharacter),
    entry('\u{0016}', "SYNCHRONOUS IDLE", ControlCharacter),
    entry('\u{0017}', "END OF TRANSMISSION BLOCK", ControlCharacter),
    entry('\u{0018}', "CANCEL", ControlCharacter),
    entry('\u{0019}', "END OF MEDIUM", ControlCharacter),
    entry('\u{001A}', "SUBSTITUTE", ControlCharacter),
    entry('\u{001B}', "ESCAPE", ControlCharacter),
    // Information separators
    entry(
        '\u{001C}',
        "INFORMATION SEPARATOR FOUR (File Separator)",
        InformationSeparator,
    ),
    entry(
        '\u{001D}',
        "INFORMATION SEPARATOR THREE (Group Separator)",
        InformationSeparator,
    ),
    entry(
        '\u{001E}',
        "INFORMATION SEPARATOR TWO (Record Separator)",
        InformationSeparator,
    ),
    entry(
        '\u{001F}',
        "INFORMATION SEPARATOR ONE (Unit Separator)",
        InformationSeparator,
    ),
    // C1 controls
    entry('\u{0080}', "PADDING CHARACTER", ControlCharacter),
    entry('\u{0081}', "HIGH OCTET PRESET", ControlCharacter),
    entry('\u{0082}', "BREAK PERMITTED HERE", ControlCharacter),
    entry('\u{0083}', "NO BREAK HERE", ControlCharacter),
    entry('\u{0084}', "INDEX", ControlCharacter),
    entry('\u{0085}', "NEXT LINE", ControlCharacter),
    entry('\u{0086}', "START OF SELECTED AREA", ControlCharacter),
    entry('\u{0087}', "END OF SELECTED AREA", ControlCharacter),
    entry('\u{0088}', "CHARACTER TABULATION SET", ControlCharacter),
    entry(
        '\u{0089}',
        "CHARACTER TABULATION WITH JUSTIFICATION",
        ControlCharacter,
    ),
    entry('\u{008A}', "LINE TABULATION SET", ControlCharacter),
    entry('\u{008B}', "PARTIAL LINE FORWARD", ControlCharacter),
    entry('\u{008C}', "PARTIAL LINE BACKWARD", ControlCharacter),
    entry('\u{008D}', "REVERSE LINE FEED", ControlCharacter),
    entry('\u{008E}', "SINGLE SHIFT TWO", ControlCharacter),
    entry('\u{008F}', "SINGLE SHIFT THREE", ControlCharacter),
    entry('\u{0090}', "DEVICE CONTROL STRING", ControlCharacter),
    entry('\u{0091}', "PRIVATE USE ONE", ControlCharacter),
    entry('\u{0092}', "PRIVATE USE TWO", ControlCharacter),
    entry('\u{0093}', "SET TRANSMIT STATE", ControlCharacter),
    entry('\u{0094}', "CANCEL CHARACTER", ControlCharacter),
    entry('\u{0095}', "MESSAGE WAITING", ControlCharacter),
    entry('\u{0096}', "START OF GUARDED AREA", ControlCharacter),
    entry('\u{0097}', "END OF GUARDED AREA", ControlCharacter),
    entry('\u{0098}', "START OF STRING", ControlCharacter),
    entry(
        '\u{0099}',
        "SINGLE GRAPHIC CHARACTER INTRODUCER",
        ControlCharacter,
    ),
    entry('\u{009A}', "SINGLE CHARACTER INTRODUCER", ControlCharacter),
    entry('\u{009B}', "CONTROL SEQUENCE INTRODUCER", ControlCharacter),
    entry('\u{009C}', "STRING TERMINATOR", ControlCharacter),
    entry('\u{009D}', "OPERATING SYSTEM COMMAND", ControlCharacter),
    entry('\u{009E}', "PRIVACY MESSAGE", ControlCharacter),
    entry('\u{009F}', "APPLICATION PROGRAM COMMAND", ControlCharacter),
    // Soft hyphen and language-specific invisibles
    entry('\u{00AD}', "Soft Hyphen", Formatting),
    entry('\u{034F}', "Combining Grapheme Joiner", Combining),
    entry('\u{061C}', "Arabic Letter Mark", DirectionControl),
    entry('\u{115F}', "Hangul Choseong Filler", Filler),
    entry('\u{1160}', "Hangul Jungseong Filler", Filler),
    entry('\u{17B4}', "Khmer Vowel Inherent AQ", Filler),
    entry('\u{17B5}', "Khmer Vowel Inherent AA", Filler),
    entry('\u{180E}', "Mongolian Vowel Separator", Formatting),
    // Zero-width characters
    entry('\u{200B}', "Zero Width Space", ZeroWidth),
    entry('\u{200C}', "Zero Width Non-Joiner", ZeroWidth),
    entry('\u{200D}', "Zero Width Joiner", ZeroWidth),
    // Bidirectional text control
    entry('\u{200E}', "Left-to-Right Mark", DirectionControl),
    entry('\u{200F}', "Right-to-Left Mark", DirectionControl),
    entry('\u{2028}', "Line Separator", Formatting),
    entry('\u{2029}', "Paragraph Separator", Formatting),
    entry('\u{202A}', "Left-to-Right Embedding", DirectionControl),
    entry('\u{202B}', "Right-to-Left Embedding", DirectionControl),
    entry('\u{202C}', "Pop Directional Formatting", DirectionControl),
    entry('\u{202D}', "Left-to-Right Override", DirectionControl),
    entry('\u{202E}', "Right-to-Left Override", DirectionControl),
    entry('\u{2060}', "Word Joiner", ZeroWidth),
    // Invisible mathematical operators
    entry('\u{2061}', "Function Application", InvisibleMath),
    entry('\u{2062}', "Invisible Times", InvisibleMath),
    entry('\u{2063}', "Invisible Separator", InvisibleMath),
    entry('\u{2064}', "Invisible Plus", InvisibleMath),
    entry('\u{2066}', "Left-to-Right Isolate", DirectionControl),
    entry('\u{2067}', "Right-to-Left Isolate", DirectionControl),
    entry('\u{2068}', "First Strong Isolate", DirectionControl),
    entry('\u{2069}', "Pop Directional Isolate", DirectionControl),
    // Deprecated format characters
    entry('\u{206A}', "Inhibit Symmetric Swapping", DeprecatedFormat),
    entry('\u{206B}', "Activate Symmetric Swapping", DeprecatedFormat),
    entry('\u{206C}', "Inhibit Arabic Form Shaping", DeprecatedFormat),
    entry('\u{206D}', "Activate Arabic Form Shaping", DeprecatedFormat),
    entry('\u{206E}', "National Digit Shapes", DeprecatedFormat),
    entry('\u{206F}', "Nominal Digit Shapes", DeprecatedFormat),
    entry('\u{2800}', "Braille Pattern Blank", Braille),
    entry('\u{3164}', "Hangul Filler", Filler),
    // Variation selectors
    entry('\u{FE00}', "Variation Selector-1", VariationSelector),
    entry('\u{FE01}', "Variation Selector-2", VariationSelector),
    entry('\u{FE02}', "Variation Selector-3", VariationSelector),
    entry('\u{FE03}', "Variation Selector-4", VariationSelector),
    entry('\u{FE04}', "Variation Selector-5", VariationSelector),
    entry('\u{FE05}', "Variation Selector-6", VariationSelector),
    entry('\u{FE06}', "Variation Selector-7", VariationSelector),
    entry('\u{FE07}', "Variation Selector-8", VariationSelector),
    entry('\u{FE08}', "Variation Selector-9", VariationSelector),
    entry('\u{FE09}', "Variation Selector-10", VariationSelector),
    entry('\u{FE0A}', "Variation Selector-11", VariationSelector),
    entry('\u{FE0B}', "Variation Selector-12", VariationSelector),
    entry('\u{FE0C}', "Variation Selector-13", VariationSelector),
    entry('\u{FE0D}', "Variation Selector-14", VariationSelector),
    entry('\u{FE0E}', "Variation Selector-15", VariationSelector),
    entry('\u{FE0F}', "Variation Selector-16", VariationSelector),
    entry('\u{FEFF}', "Zero Width No-Break Space (BOM)", ZeroWidth),
    entry('\u{FFA0}', "Halfwidth Hangul Filler", Filler),
];

/// Look up a scalar value in the registry.
pub fn lookup(codepoint: char) -> Option<&'static CodepointEntry> {
    REGISTRY
        .binary_search_by(|e| e.codepoint.cmp(&codepoint))
        .ok()
        .map(|index| &REGISTRY[index])
}

/// True if the scalar value is a registered hidden character.
pub fn is_registered(codepoint: char) -> bool {
    lookup(codepoint).is_some()
}

/// Format a scalar value as a zero-padded uppercase hex string ("200D").
pub fn codepoint_hex(codepoint: char) -> String {
    format!("{:04X}", codepoint as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_sorted_for_binary_search() {
        for window in REGISTRY.windows(2) {
            assert!(
                window[0].codepoint < window[1].codepoint,
                "registry out of order at U+{:04X}",
                window[1].codepoint as u32
            );
        }
    }

    #[test]
    fn lookup_finds_zero_width_joiner() {
        let entry = lookup('\u{200D}').unwrap();
        assert_eq!(entry.name, "Zero Width Joiner");
        assert_eq!(entry.category, Category::ZeroWidth);
    }

    #[test]
    fn lookup_misses_visible_characters() {
        assert!(lookup('a').is_none());
        assert!(lookup(' ').is_none());
        assert!(lookup('é').is_none());
    }

    #[test]
    fn line_feed_is_registered_as_control() {
        let entry = lookup('\n').unwrap();
        assert_eq!(entry.category, Category::ControlCharacter);
    }

    #[test]
    fn tiers_follow_category() {
        assert_eq!(
            Category::ZeroWidth.likelihood_tier(),
            LikelihoodTier::High
        );
        assert_eq!(
            Category::DirectionControl.likelihood_tier(),
            LikelihoodTier::Medium
        );
        assert_eq!(
            Category::VariationSelector.likelihood_tier(),
            LikelihoodTier::Medium
        );
        assert_eq!(
            Category::InformationSeparator.likelihood_tier(),
            LikelihoodTier::Medium
        );
        assert_eq!(
            Category::ControlCharacter.likelihood_tier(),
            LikelihoodTier::Low
        );
        assert_eq!(Category::Filler.likelihood_tier(), LikelihoodTier::Low);
    }

    #[test]
    fn tier_weights_order_high_to_low() {
        assert!(LikelihoodTier::High.weight() > LikelihoodTier::Medium.weight());
        assert!(LikelihoodTier::Medium.weight() > LikelihoodTier::Low.weight());
    }

    #[test]
    fn category_serializes_to_display_label() {
        let json = serde_json::to_string(&Category::ZeroWidth).unwrap();
        assert_eq!(json, "\"Zero-width\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::ZeroWidth);
    }

    #[test]
    fn hex_formatting_pads_to_four_digits() {
        assert_eq!(codepoint_hex('\u{0007}'), "0007");
        assert_eq!(codepoint_hex('\u{200D}'), "200D");
        assert_eq!(codepoint_hex('\u{FEFF}'), "FEFF");
    }
}
