//! # CLI Module
//!
//! Command-line interface for the text watermark detector.
//!
//! ## Usage
//! ```bash
//! # Analyze a file
//! watermark-scan analyze essay.txt
//!
//! # Analyze inline text
//! watermark-scan analyze --text "Some suspicious text"
//!
//! # Restrict detection to specific options
//! watermark-scan analyze essay.txt --options zero-width --options double-spaces
//!
//! # JSON output, exported to a file
//! watermark-scan analyze essay.txt --output json --export report.json
//!
//! # Built-in demonstration texts
//! watermark-scan samples --analyze
//! ```

use text_watermark_detector::core::analyzer::Analyzer;
use text_watermark_detector::core::options::{self, OptionGroup, Severity, WatermarkOption};
use text_watermark_detector::core::report::{self, AnalysisReport};
use text_watermark_detector::core::samples;
use text_watermark_detector::core::spacing::Likelihood;
use text_watermark_detector::error::{InputError, Result, WatermarkDetectorError};
use text_watermark_detector::events::{Event, EventChannel};
use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Longest accepted input, in characters.
const MAX_TEXT_CHARS: usize = 100_000;

/// Text Watermark Detector - Find hidden watermarks and see the evidence
#[derive(Parser, Debug)]
#[command(name = "watermark-scan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze files or text for watermarks
    Analyze {
        /// Files to analyze; stdin is read when no file or --text is given
        files: Vec<PathBuf>,

        /// Analyze this text instead of reading files
        #[arg(short, long, conflicts_with = "files")]
        text: Option<String>,

        /// Restrict detection to specific options (repeatable)
        #[arg(long = "options", value_name = "OPTION")]
        options: Vec<WatermarkOption>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Write the full JSON report to this path (single input only)
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the built-in sample texts
    Samples {
        /// Run the analyzer over each sample
        #[arg(long)]
        analyze: bool,
    },

    /// Show the watermark option table
    Options,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (flagged inputs only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            files,
            text,
            options,
            output,
            export,
            verbose,
        } => run_analyze(files, text, options, output, export, verbose),
        Commands::Samples { analyze } => run_samples(analyze),
        Commands::Options => run_options(),
    }
}

fn run_analyze(
    files: Vec<PathBuf>,
    text: Option<String>,
    options: Vec<WatermarkOption>,
    output: OutputFormat,
    export: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    // Print header
    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Text Watermark Detector").bold().cyan(),
            style("v0.1.0").dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let inputs = gather_inputs(files, text)?;

    if export.is_some() && inputs.len() > 1 {
        return Err(WatermarkDetectorError::Config(
            "--export works with a single input only".to_string(),
        ));
    }

    let mut builder = Analyzer::builder();
    if !options.is_empty() {
        builder = builder.options(options);
    }
    let analyzer = builder.build();

    let reports = if inputs.len() == 1 {
        let (label, content) = &inputs[0];
        let report = analyze_with_spinner(&analyzer, content, output);
        vec![(label.clone(), report)]
    } else {
        analyze_many(&analyzer, &inputs, output)
    };

    if let Some(path) = export {
        let (_, report) = &reports[0];
        report::export_to_file(report, &path)?;
        if matches!(output, OutputFormat::Pretty) {
            term.write_line(&format!(
                "{} Report written to {}",
                style("✓").green(),
                path.display()
            ))
            .ok();
        }
    }

    // Output results
    match output {
        OutputFormat::Pretty => {
            for (label, report) in &reports {
                print_pretty_report(&term, label, report, verbose);
            }
            print_pretty_summary(&term, &reports);
        }
        OutputFormat::Json => print_json_results(&reports),
        OutputFormat::Minimal => print_minimal_results(&reports),
    }

    Ok(())
}

/// Analyze one input with a phase spinner on pretty output.
fn analyze_with_spinner(
    analyzer: &Analyzer,
    content: &str,
    output: OutputFormat,
) -> AnalysisReport {
    let (sender, receiver) = EventChannel::new();

    let spinner = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        Some(pb)
    } else {
        None
    };

    let spinner_clone = spinner.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::PhaseChanged { phase } => {
                    if let Some(ref pb) = spinner_clone {
                        pb.set_message(format!("{}", phase));
                    }
                }
                Event::Completed { .. } => {
                    if let Some(ref pb) = spinner_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    let report = analyzer.run_with_events(content, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();

    report
}

/// Analyze several inputs in parallel with a progress bar.
fn analyze_many(
    analyzer: &Analyzer,
    inputs: &[(String, String)],
    output: OutputFormat,
) -> Vec<(String, AnalysisReport)> {
    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let completed = AtomicUsize::new(0);

    let reports: Vec<(String, AnalysisReport)> = inputs
        .par_iter()
        .map(|(label, content)| {
            let report = analyzer.run(content);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(ref pb) = progress {
                pb.set_position(done as u64);
                pb.set_message(label.clone());
            }
            (label.clone(), report)
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    reports
}

/// Collect (label, content) pairs from files, inline text, or stdin.
fn gather_inputs(files: Vec<PathBuf>, text: Option<String>) -> Result<Vec<(String, String)>> {
    if let Some(text) = text {
        check_length(&text)?;
        return Ok(vec![("(inline)".to_string(), text)]);
    }

    if files.is_empty() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| InputError::ReadFile {
                path: PathBuf::from("-"),
                source,
            })?;
        check_length(&buffer)?;
        return Ok(vec![("(stdin)".to_string(), buffer)]);
    }

    let mut inputs = Vec::with_capacity(files.len());
    for path in files {
        let content = read_input(&path)?;
        check_length(&content)?;
        inputs.push((path.display().to_string(), content));
    }
    Ok(inputs)
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    std::fs::read_to_string(path).map_err(|source| {
        InputError::ReadFile {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn check_length(content: &str) -> Result<()> {
    let length = content.chars().count();
    if length > MAX_TEXT_CHARS {
        return Err(InputError::TextTooLarge {
            length,
            limit: MAX_TEXT_CHARS,
        }
        .into());
    }
    Ok(())
}

fn print_pretty_report(term: &Term, label: &str, report: &AnalysisReport, verbose: bool) {
    term.write_line("").ok();
    term.write_line(&format!("{}", style(label).bold().underlined()))
        .ok();

    // Hidden characters
    if report.characters.total_hidden == 0 {
        term.write_line(&format!("  {} No hidden characters", style("✓").green()))
            .ok();
    } else {
        term.write_line(&format!(
            "  {} {} hidden characters, {} distinct (confidence {}%)",
            style("✗").red().bold(),
            style(report.characters.total_hidden).cyan(),
            report.characters.detected.len(),
            report.characters.confidence
        ))
        .ok();

        for detected in &report.characters.detected {
            term.write_line(&format!(
                "      U+{} {} ×{} ({})",
                detected.codepoint,
                detected.name,
                detected.count,
                detected.category
            ))
            .ok();
        }

        if verbose {
            for line in &report.characters.summary.evidence {
                term.write_line(&format!("      {}", style(line).dim())).ok();
            }
        }
    }

    // Spacing
    match &report.spacing {
        Some(spacing) => {
            let verdict = format!("{} ({}%)", spacing.likelihood, spacing.confidence);
            let styled = match spacing.likelihood {
                Likelihood::High => style(verdict).red().bold(),
                Likelihood::Medium => style(verdict).yellow(),
                Likelihood::Low => style(verdict).green(),
            };
            term.write_line(&format!("  Spacing watermark likelihood: {}", styled))
                .ok();

            if let Some(description) = &spacing.pattern_description {
                term.write_line(&format!("      {}", description)).ok();
            }

            if verbose {
                for line in &spacing.evidence {
                    term.write_line(&format!("      {}", style(line).dim())).ok();
                }
            }

            if let Some(strategy) = &spacing.strategy {
                term.write_line("").ok();
                for line in strategy.description.lines() {
                    term.write_line(&format!("  {}", style(line).yellow())).ok();
                }
            }
        }
        None => {
            term.write_line(&format!(
                "  {} Text too short for spacing analysis",
                style("-").dim()
            ))
            .ok();
        }
    }
}

fn print_pretty_summary(term: &Term, reports: &[(String, AnalysisReport)]) {
    let flagged = reports.iter().filter(|(_, r)| r.has_findings()).count();

    term.write_line("").ok();
    if flagged == 0 {
        term.write_line(&format!(
            "{} Analyzed {} inputs, no watermark evidence found",
            style("✓").green().bold(),
            reports.len()
        ))
        .ok();
    } else {
        term.write_line(&format!(
            "{} Analyzed {} inputs, {} with watermark evidence",
            style("!").red().bold(),
            reports.len(),
            flagged
        ))
        .ok();
    }

    term.write_line(&format!(
        "{}",
        style("Remember: Nothing was modified. The cleaned text is in the JSON report.").dim()
    ))
    .ok();
}

fn print_json_results(reports: &[(String, AnalysisReport)]) {
    let documents: Vec<serde_json::Value> = reports
        .iter()
        .map(|(label, report)| {
            serde_json::json!({
                "input": label,
                "report": report,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&documents).unwrap());
}

fn print_minimal_results(reports: &[(String, AnalysisReport)]) {
    for (label, report) in reports {
        if report.has_findings() {
            println!("{}", label);
        }
    }
}

fn run_samples(analyze: bool) -> Result<()> {
    let term = Term::stderr();

    term.write_line(&format!("{}", style("Built-in sample texts").bold().cyan()))
        .ok();
    term.write_line("").ok();

    let analyzer = Analyzer::builder().build();

    for sample in samples::all_samples() {
        term.write_line(&format!("  {} {}", style(sample.id).bold().cyan(), sample.name))
            .ok();
        term.write_line(&format!("      {}", style(sample.description).dim()))
            .ok();

        if analyze {
            let report = analyzer.run(sample.text);
            let spacing_verdict = match &report.spacing {
                Some(spacing) => format!("{} ({}%)", spacing.likelihood, spacing.confidence),
                None => "too short".to_string(),
            };
            term.write_line(&format!(
                "      {} hidden characters (confidence {}%), spacing likelihood {}",
                report.characters.total_hidden, report.characters.confidence, spacing_verdict
            ))
            .ok();
        }

        term.write_line("").ok();
    }

    Ok(())
}

fn run_options() -> Result<()> {
    let term = Term::stderr();

    let groups = [
        OptionGroup::UnicodeCharacters,
        OptionGroup::SpacingPatterns,
        OptionGroup::OtherTechniques,
    ];

    for group in groups {
        term.write_line(&format!("{}", style(group).bold().underlined()))
            .ok();

        for info in options::options_in_group(group) {
            let flag = info
                .id
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_else(|| format!("{:?}", info.id));

            term.write_line(&format!(
                "  {} {} {}",
                style(format!("{:<22}", flag)).cyan(),
                severity_badge(info.severity),
                info.name
            ))
            .ok();
            term.write_line(&format!("      {}", style(info.description).dim()))
                .ok();
        }

        term.write_line("").ok();
    }

    Ok(())
}

fn severity_badge(severity: Severity) -> String {
    match severity {
        Severity::High => style("[high]  ").red().to_string(),
        Severity::Medium => style("[medium]").yellow().to_string(),
        Severity::Low => style("[low]   ").green().to_string(),
    }
}
