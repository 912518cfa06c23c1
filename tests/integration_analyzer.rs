//! Integration tests for the analyzer module.
//!
//! These tests run the full detection workflow over the built-in sample
//! texts and verify:
//! - Character detection and text cleaning
//! - Spacing statistics and likelihood verdicts
//! - Option filtering
//! - JSON export and telemetry records

use text_watermark_detector::core::analyzer::Analyzer;
use text_watermark_detector::core::options::WatermarkOption;
use text_watermark_detector::core::registry::Category;
use text_watermark_detector::core::report::{self, AnalysisReport, UsageRecord};
use text_watermark_detector::core::samples;
use text_watermark_detector::core::spacing::Likelihood;
use tempfile::TempDir;
use uuid::Uuid;

/// Run the default analyzer over a built-in sample.
fn run_sample(id: &str) -> AnalysisReport {
    let sample = samples::by_id(id).expect("sample id should exist");
    Analyzer::builder().build().run(sample.text)
}

#[test]
fn zwj_sample_is_fully_detected_and_cleaned() {
    let report = run_sample("zwj");

    assert_eq!(report.characters.detected.len(), 1);
    let detected = &report.characters.detected[0];
    assert_eq!(detected.character, '\u{200D}');
    assert_eq!(detected.codepoint, "200D");
    assert_eq!(detected.count, 6);
    assert_eq!(detected.category, Category::ZeroWidth);

    assert_eq!(report.characters.confidence, 39);
    assert_eq!(
        report.cleaned_text,
        "This text contains zero-width joiners between words."
    );
    assert!(report.spacing.is_some());
    assert!(report.has_findings());
}

#[test]
fn zwsp_sample_cleans_back_to_plain_text() {
    let report = run_sample("zwsp");

    assert_eq!(report.characters.total_hidden, 7);
    assert_eq!(
        report.cleaned_text,
        "This text has zero-width spaces inserted between words."
    );
}

#[test]
fn mixed_sample_reports_three_distinct_characters() {
    let report = run_sample("mixed");

    assert_eq!(report.characters.detected.len(), 3);
    assert_eq!(report.characters.total_hidden, 12);
    assert_eq!(report.characters.categories.len(), 1);
    assert_eq!(report.characters.categories[0].category, Category::ZeroWidth);
    assert_eq!(report.characters.categories[0].count, 12);
}

#[test]
fn spacing_sample_reads_as_high_likelihood() {
    let report = run_sample("spacing");

    // No hidden characters in this sample, only spacing signal
    assert_eq!(report.characters.total_hidden, 0);
    assert_eq!(report.cleaned_text, report.original_text);

    let spacing = report.spacing.expect("sample is long enough to analyze");
    assert_eq!(spacing.likelihood, Likelihood::High);
    assert_eq!(spacing.confidence, 70);
    assert_eq!(
        spacing.pattern_description.as_deref(),
        Some("Mathematical pattern detected: Arithmetic Progression")
    );
    assert_eq!(spacing.patterns.len(), 1);
    assert_eq!(spacing.patterns[0].name(), "Arithmetic Progression");

    assert!((spacing.average_spacing - 34.0 / 9.0).abs() < 1e-9);
    assert_eq!(spacing.median_spacing, 3.0);
    assert_eq!(spacing.multi_space.counts.double, 3);
    assert_eq!(spacing.multi_space.counts.triple, 2);
    assert_eq!(spacing.multi_space.counts.four_plus, 4);
    assert_eq!(spacing.multi_space.counts.total, 9);
    assert!(spacing.evidence.contains(
        &"Found 9 instances of multiple spaces (3 double, 2 triple, 4 4+ spaces)".to_string()
    ));
}

#[test]
fn selection_restricts_detection_to_chosen_options() {
    let sample = samples::by_id("zwsp").unwrap();
    let analyzer = Analyzer::builder()
        .options(vec![
            WatermarkOption::DoubleSpaces,
            WatermarkOption::MathematicalPatterns,
        ])
        .build();

    let report = analyzer.run(sample.text);

    assert!(report.characters.detected.is_empty());
    assert_eq!(report.characters.confidence, 0);
    assert!(report.spacing.is_some());
    assert_eq!(
        report.selected_options,
        vec![
            WatermarkOption::DoubleSpaces,
            WatermarkOption::MathematicalPatterns,
        ]
    );
}

#[test]
fn exported_report_round_trips_through_json() {
    let report = run_sample("mixed");
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.json");

    report::export_to_file(&report, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: AnalysisReport = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed.id, report.id);
    assert_eq!(parsed.characters.total_hidden, 12);
    assert!(parsed.spacing.is_some());
}

#[test]
fn usage_record_summarizes_without_leaking_text() {
    let report = run_sample("zwj");
    let record = UsageRecord::from_report(Uuid::new_v4(), &report);

    assert_eq!(record.character_confidence, 39);
    assert!(record.detected_types.iter().any(|t| t == "Zero-width"));

    let json = serde_json::to_string(&record).unwrap();
    assert!(!json.contains("joiners"));
    assert!(!json.contains("between words"));
}
