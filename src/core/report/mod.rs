//! # Analysis Reports
//!
//! The merged output document: both pipeline results plus the submitted
//! text, its cleaned form, and run metadata. Everything downstream of the
//! analyzer (JSON export, telemetry) works from this one structure.

mod export;
mod telemetry;

pub use export::{export_to_file, to_json, write_json};
pub use telemetry::UsageRecord;

use crate::core::characters::CharacterAnalysis;
use crate::core::options::{default_selection, WatermarkOption};
use crate::core::spacing::{Likelihood, SpacingAnalysis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Complete result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    /// When the analysis ran, RFC 3339 in serialized form
    pub created_at: DateTime<Utc>,
    /// The text exactly as submitted
    pub original_text: String,
    /// Input with every detected hidden character removed
    pub cleaned_text: String,
    /// Options in effect for this run
    pub selected_options: Vec<WatermarkOption>,
    pub characters: CharacterAnalysis,
    /// Absent when the text was too short for spacing statistics
    pub spacing: Option<SpacingAnalysis>,
    pub duration_ms: u64,
}

impl AnalysisReport {
    /// Assemble a report from both pipeline results.
    ///
    /// With no explicit selection, the default option set is recorded.
    pub fn new(
        original_text: &str,
        characters: CharacterAnalysis,
        spacing: Option<SpacingAnalysis>,
        selected_options: Option<Vec<WatermarkOption>>,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            original_text: original_text.to_string(),
            cleaned_text: characters.cleaned_text.clone(),
            selected_options: selected_options.unwrap_or_else(default_selection),
            characters,
            spacing,
            duration_ms,
        }
    }

    /// True when either pipeline found evidence worth reporting.
    pub fn has_findings(&self) -> bool {
        self.characters.total_hidden > 0
            || self
                .spacing
                .as_ref()
                .map_or(false, |s| s.likelihood >= Likelihood::Medium)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::characters;
    use crate::core::options::AnalysisFilter;
    use crate::core::spacing;

    fn analyze_both(text: &str) -> (CharacterAnalysis, Option<SpacingAnalysis>) {
        let filter = AnalysisFilter::all();
        let chars = characters::analyze(text, &filter);
        let spacing = spacing::analyze(text, &filter, &[]);
        (chars, spacing)
    }

    #[test]
    fn report_records_cleaned_text_and_defaults() {
        let text = "Watermarked\u{200B} words in an otherwise ordinary sentence here.";
        let (chars, spacing) = analyze_both(text);
        let report = AnalysisReport::new(text, chars, spacing, None, 2);

        assert_eq!(report.original_text, text);
        assert!(!report.cleaned_text.contains('\u{200B}'));
        assert_eq!(report.selected_options, default_selection());
        assert!(report.has_findings());
    }

    #[test]
    fn explicit_selection_is_preserved() {
        let text = "Plain words only, nothing hidden in this sentence at all.";
        let (chars, spacing) = analyze_both(text);
        let selection = vec![WatermarkOption::ZeroWidth, WatermarkOption::DoubleSpaces];
        let report = AnalysisReport::new(text, chars, spacing, Some(selection.clone()), 1);

        assert_eq!(report.selected_options, selection);
    }

    #[test]
    fn clean_short_text_has_no_findings() {
        let text = "Nothing here.";
        let (chars, spacing) = analyze_both(text);
        assert!(spacing.is_none());

        let report = AnalysisReport::new(text, chars, spacing, None, 0);
        assert!(!report.has_findings());
    }

    #[test]
    fn reports_get_distinct_ids() {
        let text = "Two reports over the same text still get their own ids.";
        let (chars_a, spacing_a) = analyze_both(text);
        let (chars_b, spacing_b) = analyze_both(text);

        let a = AnalysisReport::new(text, chars_a, spacing_a, None, 0);
        let b = AnalysisReport::new(text, chars_b, spacing_b, None, 0);
        assert_ne!(a.id, b.id);
    }
}
