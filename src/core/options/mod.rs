//! # Watermark Options
//!
//! The fixed table of user-facing watermark options, grouped for display,
//! and the [`AnalysisFilter`] that translates a selection into the category
//! and feature gates both pipelines consult. With no selection, everything
//! is enabled.

use crate::core::registry::Category;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier for one toggleable watermark option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum WatermarkOption {
    ZeroWidth,
    ControlChars,
    DirectionControl,
    VariationSelectors,
    FormattingChars,
    DoubleSpaces,
    LineBreaks,
    MathematicalPatterns,
    TabChars,
    InvisibleMath,
    Fillers,
}

/// Display grouping for the option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionGroup {
    UnicodeCharacters,
    SpacingPatterns,
    OtherTechniques,
}

impl fmt::Display for OptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionGroup::UnicodeCharacters => write!(f, "Unicode Characters"),
            OptionGroup::SpacingPatterns => write!(f, "Spacing Patterns"),
            OptionGroup::OtherTechniques => write!(f, "Other Techniques"),
        }
    }
}

/// How noticeable or severe a watermarking technique is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
        }
    }
}

/// Spacing-pipeline features an option can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpacingFeature {
    MultipleSpaces,
    LineBreaks,
    MathematicalPatterns,
    TabCharacters,
}

/// Static description of one watermark option.
#[derive(Debug, Clone, Copy)]
pub struct OptionInfo {
    pub id: WatermarkOption,
    pub name: &'static str,
    pub group: OptionGroup,
    pub description: &'static str,
    pub severity: Severity,
    pub severity_description: &'static str,
    pub default_enabled: bool,
}

const OPTIONS: &[OptionInfo] = &[
    OptionInfo {
        id: WatermarkOption::ZeroWidth,
        name: "Hidden Unicode Characters",
        group: OptionGroup::UnicodeCharacters,
        description: "Invisible characters like zero-width spaces, joiners, and direction markers inserted between visible characters.",
        severity: Severity::High,
        severity_description: "Very difficult to detect without tools",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::ControlChars,
        name: "Control Characters",
        group: OptionGroup::UnicodeCharacters,
        description: "Special control characters that can be used to manipulate text display or serve as hidden markers.",
        severity: Severity::High,
        severity_description: "Completely invisible to humans",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::DirectionControl,
        name: "Direction Control Characters",
        group: OptionGroup::UnicodeCharacters,
        description: "Characters that control text direction (RTL/LTR) which can be used to hide watermarks.",
        severity: Severity::Medium,
        severity_description: "May cause subtle text rendering issues",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::VariationSelectors,
        name: "Variation Selectors",
        group: OptionGroup::UnicodeCharacters,
        description: "Characters that specify a specific visual variant of the preceding character.",
        severity: Severity::Medium,
        severity_description: "May affect text appearance subtly",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::FormattingChars,
        name: "Formatting Characters",
        group: OptionGroup::UnicodeCharacters,
        description: "Special characters used for text formatting that can be used as watermarks.",
        severity: Severity::Medium,
        severity_description: "May affect text formatting",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::DoubleSpaces,
        name: "Double Spaces",
        group: OptionGroup::SpacingPatterns,
        description: "Multiple consecutive spaces between words that follow specific patterns.",
        severity: Severity::Medium,
        severity_description: "May be noticeable with careful reading",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::LineBreaks,
        name: "Line Breaks",
        group: OptionGroup::SpacingPatterns,
        description: "Extra line breaks or specific line break patterns used as watermarks.",
        severity: Severity::Low,
        severity_description: "May affect document formatting",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::MathematicalPatterns,
        name: "Mathematical Sequences",
        group: OptionGroup::SpacingPatterns,
        description: "Spacing patterns that follow mathematical progressions like Fibonacci sequences or prime numbers.",
        severity: Severity::High,
        severity_description: "Sophisticated and difficult to detect",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::TabChars,
        name: "Tab Characters",
        group: OptionGroup::SpacingPatterns,
        description: "Tab characters used in specific patterns as watermarks.",
        severity: Severity::Medium,
        severity_description: "May affect text alignment",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::InvisibleMath,
        name: "Invisible Math Operators",
        group: OptionGroup::OtherTechniques,
        description: "Special Unicode characters for mathematical notation that are invisible in normal text.",
        severity: Severity::High,
        severity_description: "Completely invisible to humans",
        default_enabled: true,
    },
    OptionInfo {
        id: WatermarkOption::Fillers,
        name: "Language-specific Fillers",
        group: OptionGroup::OtherTechniques,
        description: "Special characters used as fillers in various languages that can be used as watermarks.",
        severity: Severity::Medium,
        severity_description: "May affect text rendering in specific languages",
        default_enabled: true,
    },
];

/// The full option table, in display order.
pub fn all_options() -> &'static [OptionInfo] {
    OPTIONS
}

/// Options enabled by default.
pub fn default_selection() -> Vec<WatermarkOption> {
    OPTIONS
        .iter()
        .filter(|o| o.default_enabled)
        .map(|o| o.id)
        .collect()
}

/// Options belonging to one display group, in table order.
pub fn options_in_group(group: OptionGroup) -> Vec<&'static OptionInfo> {
    OPTIONS.iter().filter(|o| o.group == group).collect()
}

impl WatermarkOption {
    /// Static description of this option.
    pub fn info(&self) -> &'static OptionInfo {
        // Table order matches declaration order; locked by a test below
        &OPTIONS[*self as usize]
    }

    /// Codepoint categories this option enables.
    pub fn categories(&self) -> &'static [Category] {
        match self {
            WatermarkOption::ZeroWidth => &[Category::ZeroWidth],
            WatermarkOption::ControlChars => {
                &[Category::ControlCharacter, Category::InformationSeparator]
            }
            WatermarkOption::DirectionControl => &[Category::DirectionControl],
            WatermarkOption::VariationSelectors => &[Category::VariationSelector],
            WatermarkOption::FormattingChars => &[Category::Formatting],
            WatermarkOption::InvisibleMath => &[Category::InvisibleMath],
            WatermarkOption::Fillers => &[Category::Filler, Category::Braille],
            _ => &[],
        }
    }

    /// Spacing features this option enables.
    pub fn spacing_features(&self) -> &'static [SpacingFeature] {
        match self {
            WatermarkOption::DoubleSpaces => &[SpacingFeature::MultipleSpaces],
            WatermarkOption::LineBreaks => &[SpacingFeature::LineBreaks],
            WatermarkOption::MathematicalPatterns => {
                &[SpacingFeature::MathematicalPatterns]
            }
            WatermarkOption::TabChars => &[SpacingFeature::TabCharacters],
            _ => &[],
        }
    }
}

/// Category and feature gates derived from an option selection.
///
/// Line feeds and tabs are gated by the `LineBreaks` and `TabCharacters`
/// features rather than their control-character category, since they have
/// dedicated options in the table.
#[derive(Debug, Clone)]
pub struct AnalysisFilter {
    categories: HashSet<Category>,
    features: HashSet<SpacingFeature>,
}

impl AnalysisFilter {
    /// Everything enabled. Equivalent to passing no selection at all.
    ///
    /// Broader than selecting every option: categories without an option
    /// mapping (Combining, Deprecated format) are enabled here too.
    pub fn all() -> Self {
        let categories = [
            Category::ControlCharacter,
            Category::InformationSeparator,
            Category::ZeroWidth,
            Category::DirectionControl,
            Category::VariationSelector,
            Category::Formatting,
            Category::Combining,
            Category::Filler,
            Category::Braille,
            Category::InvisibleMath,
            Category::DeprecatedFormat,
        ]
        .into_iter()
        .collect();
        let features = [
            SpacingFeature::MultipleSpaces,
            SpacingFeature::LineBreaks,
            SpacingFeature::MathematicalPatterns,
            SpacingFeature::TabCharacters,
        ]
        .into_iter()
        .collect();
        Self {
            categories,
            features,
        }
    }

    /// Gates derived from a specific selection.
    pub fn from_options<I>(selected: I) -> Self
    where
        I: IntoIterator<Item = WatermarkOption>,
    {
        let mut categories = HashSet::new();
        let mut features = HashSet::new();
        for option in selected {
            categories.extend(option.categories().iter().copied());
            features.extend(option.spacing_features().iter().copied());
        }
        Self {
            categories,
            features,
        }
    }

    pub fn category_enabled(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn feature_enabled(&self, feature: SpacingFeature) -> bool {
        self.features.contains(&feature)
    }
}

impl Default for AnalysisFilter {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_eleven_options_in_three_groups() {
        assert_eq!(OPTIONS.len(), 11);
        assert_eq!(options_in_group(OptionGroup::UnicodeCharacters).len(), 5);
        assert_eq!(options_in_group(OptionGroup::SpacingPatterns).len(), 4);
        assert_eq!(options_in_group(OptionGroup::OtherTechniques).len(), 2);
    }

    #[test]
    fn every_option_is_enabled_by_default() {
        assert_eq!(default_selection().len(), OPTIONS.len());
    }

    #[test]
    fn table_order_matches_declaration_order() {
        for (index, option) in OPTIONS.iter().enumerate() {
            assert_eq!(option.id as usize, index);
            assert_eq!(option.id.info().name, option.name);
        }
    }

    #[test]
    fn full_filter_enables_everything() {
        let filter = AnalysisFilter::all();
        assert!(filter.category_enabled(Category::ZeroWidth));
        assert!(filter.category_enabled(Category::Braille));
        // Categories with no option mapping are still on by default
        assert!(filter.category_enabled(Category::Combining));
        assert!(filter.category_enabled(Category::DeprecatedFormat));
        assert!(filter.feature_enabled(SpacingFeature::MultipleSpaces));
        assert!(filter.feature_enabled(SpacingFeature::LineBreaks));
    }

    #[test]
    fn spacing_only_selection_disables_character_categories() {
        let filter = AnalysisFilter::from_options([
            WatermarkOption::DoubleSpaces,
            WatermarkOption::MathematicalPatterns,
        ]);
        assert!(!filter.category_enabled(Category::ZeroWidth));
        assert!(!filter.category_enabled(Category::ControlCharacter));
        assert!(filter.feature_enabled(SpacingFeature::MultipleSpaces));
        assert!(filter.feature_enabled(SpacingFeature::MathematicalPatterns));
        assert!(!filter.feature_enabled(SpacingFeature::LineBreaks));
    }

    #[test]
    fn control_chars_option_covers_information_separators() {
        let filter = AnalysisFilter::from_options([WatermarkOption::ControlChars]);
        assert!(filter.category_enabled(Category::ControlCharacter));
        assert!(filter.category_enabled(Category::InformationSeparator));
        assert!(!filter.category_enabled(Category::ZeroWidth));
    }

    #[test]
    fn option_ids_serialize_as_kebab_case() {
        let json = serde_json::to_string(&WatermarkOption::ZeroWidth).unwrap();
        assert_eq!(json, "\"zero-width\"");
        let json = serde_json::to_string(&WatermarkOption::MathematicalPatterns).unwrap();
        assert_eq!(json, "\"mathematical-patterns\"");
    }
}
