//! # Analyzer Module
//!
//! Orchestrates the full watermark detection workflow.
//!
//! ## Stages
//! 1. **Characters** - Scan for registered hidden codepoints
//! 2. **Spacing** - Statistical analysis of inter-word spacing
//! 3. **Report** - Merge both results into one report
//!
//! Paragraphs where the character scan found high-likelihood codepoints
//! feed the spacing strategy synthesis, so documents mixing techniques
//! across paragraphs are described as one combined strategy.

use crate::core::characters::{self, CharacterAnalysis};
use crate::core::options::{AnalysisFilter, WatermarkOption};
use crate::core::registry::LikelihoodTier;
use crate::core::report::AnalysisReport;
use crate::core::spacing;
use crate::events::{null_sender, AnalysisPhase, AnalysisSummary, Event, EventSender};
use std::time::Instant;

/// Configuration for the analyzer
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    /// Options to detect. None means everything is enabled.
    pub selected_options: Option<Vec<WatermarkOption>>,
}

/// Builder for analyzer configuration
pub struct AnalyzerBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerBuilder {
    /// Create a new analyzer builder
    pub fn new() -> Self {
        Self {
            config: AnalyzerConfig::default(),
        }
    }

    /// Restrict detection to the given options
    pub fn options(mut self, options: Vec<WatermarkOption>) -> Self {
        self.config.selected_options = Some(options);
        self
    }

    /// Build the analyzer
    pub fn build(self) -> Analyzer {
        Analyzer {
            config: self.config,
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The watermark detection engine
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create a new analyzer builder
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Run the analysis without events
    pub fn run(&self, text: &str) -> AnalysisReport {
        self.run_with_events(text, &null_sender())
    }

    /// Run the analysis with event reporting
    pub fn run_with_events(&self, text: &str, events: &EventSender) -> AnalysisReport {
        let start_time = Instant::now();
        let filter = match &self.config.selected_options {
            Some(selection) => AnalysisFilter::from_options(selection.iter().copied()),
            None => AnalysisFilter::all(),
        };

        events.send(Event::Started {
            text_chars: text.chars().count(),
        });

        // Phase 1: Hidden characters
        events.send(Event::PhaseChanged {
            phase: AnalysisPhase::Characters,
        });

        let characters = characters::analyze(text, &filter);
        tracing::debug!(
            hidden = characters.total_hidden,
            confidence = characters.confidence,
            "character scan finished"
        );

        // Phase 2: Spacing statistics
        events.send(Event::PhaseChanged {
            phase: AnalysisPhase::Spacing,
        });

        let hidden_paragraphs = hidden_paragraph_indices(&characters);
        let spacing = spacing::analyze(text, &filter, &hidden_paragraphs);
        tracing::debug!(analyzed = spacing.is_some(), "spacing analysis finished");

        // Phase 3: Merge
        events.send(Event::PhaseChanged {
            phase: AnalysisPhase::Reporting,
        });

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let report = AnalysisReport::new(
            text,
            characters,
            spacing,
            self.config.selected_options.clone(),
            duration_ms,
        );

        events.send(Event::Completed {
            summary: AnalysisSummary {
                hidden_characters: report.characters.total_hidden,
                character_confidence: report.characters.confidence,
                spacing_likelihood: report.spacing.as_ref().map(|s| s.likelihood),
                duration_ms: report.duration_ms,
            },
        });

        report
    }
}

/// Paragraph indices holding high-likelihood hidden characters.
///
/// The spacing strategy synthesis folds these in so that hidden characters
/// in some paragraphs and spacing patterns in others read as one
/// multi-technique strategy.
fn hidden_paragraph_indices(characters: &CharacterAnalysis) -> Vec<usize> {
    let mut indices: Vec<usize> = characters
        .detected
        .iter()
        .filter(|d| d.likelihood == LikelihoodTier::High)
        .flat_map(|d| d.paragraphs.iter().copied())
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spacing::Likelihood;
    use crate::events::EventChannel;

    #[test]
    fn run_merges_both_pipelines() {
        let analyzer = Analyzer::builder().build();
        let text = "Joined\u{200D} words\u{200D} hide\u{200D} a watermark in plain-looking prose.";

        let report = analyzer.run(text);

        assert_eq!(report.characters.total_hidden, 3);
        assert!(report.spacing.is_some());
        assert!(!report.cleaned_text.contains('\u{200D}'));
    }

    #[test]
    fn option_selection_gates_the_character_scan() {
        let analyzer = Analyzer::builder()
            .options(vec![WatermarkOption::DoubleSpaces])
            .build();
        let text = "Only\u{200B} spacing options are on, so this joiner goes unreported.";

        let report = analyzer.run(text);

        assert!(report.characters.detected.is_empty());
        assert_eq!(report.selected_options, vec![WatermarkOption::DoubleSpaces]);
    }

    #[test]
    fn events_arrive_in_phase_order() {
        let (sender, receiver) = EventChannel::new();
        let analyzer = Analyzer::builder().build();

        analyzer.run_with_events("A sentence long enough to produce spacing samples.", &sender);
        drop(sender);

        let events: Vec<Event> = receiver.iter().collect();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], Event::Started { .. }));
        assert!(matches!(
            events[1],
            Event::PhaseChanged {
                phase: AnalysisPhase::Characters
            }
        ));
        assert!(matches!(
            events[2],
            Event::PhaseChanged {
                phase: AnalysisPhase::Spacing
            }
        ));
        assert!(matches!(
            events[3],
            Event::PhaseChanged {
                phase: AnalysisPhase::Reporting
            }
        ));
        match &events[4] {
            Event::Completed { summary } => {
                assert_eq!(summary.hidden_characters, 0);
                assert_eq!(summary.spacing_likelihood, Some(Likelihood::High));
            }
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[test]
    fn hidden_paragraphs_flow_into_the_strategy() {
        // First paragraph carries zero-width characters, the next two carry
        // distinct spacing patterns; the merged strategy should span all of
        // them.
        let text = "Hidden\u{200B} markers\u{200B} sit\u{200B} inside\u{200B} this\u{200B} leading\u{200B} paragraph.\n\n\
                    alpha  beta  gamma  delta  epsilon  zeta  eta  theta  iota  kappa  lambda\n\n\
                    a b  c   d    e     f      g";

        let analyzer = Analyzer::builder().build();
        let report = analyzer.run(text);

        let spacing = report.spacing.unwrap();
        let strategy = spacing.strategy.expect("strategy should synthesize");
        assert!(strategy
            .description
            .contains("Hidden Unicode characters"));
    }

    #[test]
    fn short_text_still_produces_a_character_report() {
        let analyzer = Analyzer::builder().build();
        let report = analyzer.run("Tiny\u{200B} text");

        assert_eq!(report.characters.total_hidden, 1);
        assert!(report.spacing.is_none());
    }
}
