//! # Analyze Subcommand
//!
//! Loads the baseline and benchmark documents, builds the control set,
//! classifies it, and writes the report.
//!
//! ## Control Sources
//!
//! - default: settings extracted from the two documents.
//! - `--controls <file>`: a YAML/JSON control set; no documents are read.
//! - `--example-dataset`: the documents are loaded and validated but the
//!   built-in seven-control example set is evaluated instead.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cisgap_core::{example_controls, CisgapError, ControlSet};
use cisgap_document::{display_name, extract_controls, load, LoadedDocument};
use cisgap_report::ReportMeta;

use crate::config::CliConfig;
use crate::pipeline::{analyze_controls, load_control_file, publish, save_record};
use crate::prompt::path_or_prompt;

/// Arguments for the analyze subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Baseline security document (PDF, DOCX, TXT or CSV). Prompted for when omitted.
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// CIS benchmark document (PDF, DOCX, TXT or CSV). Prompted for when omitted.
    #[arg(long)]
    pub benchmark: Option<PathBuf>,

    /// Evaluate a structured control set instead of reading documents.
    #[arg(long, conflicts_with_all = ["baseline", "benchmark", "example_dataset"])]
    pub controls: Option<PathBuf>,

    /// Evaluate the built-in example control set.
    #[arg(long)]
    pub example_dataset: bool,

    /// Also save the analysis as JSON for `cisgap report`.
    #[arg(long)]
    pub save_results: Option<PathBuf>,
}

/// Execute the analyze subcommand against the process's stdin/stderr.
pub fn run_analyze(args: &AnalyzeArgs, config: &CliConfig) -> Result<u8> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut prompt_out = std::io::stderr();
    run_analyze_with(args, config, &mut input, &mut prompt_out)
}

/// Execute the analyze subcommand with explicit prompt streams.
pub fn run_analyze_with<R: BufRead, W: Write>(
    args: &AnalyzeArgs,
    config: &CliConfig,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<u8> {
    let (meta, controls) = match &args.controls {
        Some(path) => {
            let controls = load_control_file(path)?;
            let name = display_name(path);
            (ReportMeta::new(name.clone(), name), controls)
        }
        None => from_documents(args, input, prompt_out)?,
    };

    let catalog = config.remediation_catalog()?;
    let record = analyze_controls(meta, controls, &catalog);
    println!(
        "Compliance analysis complete. Overall score: {:.2}%",
        record.result.score
    );

    if let Some(path) = &args.save_results {
        save_record(path, &record)
            .with_context(|| format!("failed to save results to {}", path.display()))?;
        println!("Results saved as '{}'", path.display());
    }

    let written = publish(&record, &config.output_dir, &config.output_names())?;
    println!("Report saved as '{}'", written.report_path.display());
    println!("Visualization saved as '{}'", written.chart_path.display());
    Ok(0)
}

fn from_documents<R: BufRead, W: Write>(
    args: &AnalyzeArgs,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<(ReportMeta, ControlSet), CisgapError> {
    let (baseline, benchmark) =
        load_documents(args.baseline.as_ref(), args.benchmark.as_ref(), input, prompt_out)?;
    println!("Successfully loaded baseline document: {}", baseline.path.display());
    println!("Successfully loaded CIS benchmark: {}", benchmark.path.display());
    let meta = ReportMeta::new(baseline.display_name(), benchmark.display_name());

    let controls = if args.example_dataset {
        tracing::warn!("evaluating the built-in example control set; document contents are not used");
        example_controls()
    } else {
        extract_controls(&baseline.text, &benchmark.text)
    };
    Ok((meta, controls))
}

/// Resolve (prompting if needed) and load both documents.
pub fn load_documents<R: BufRead, W: Write>(
    baseline: Option<&PathBuf>,
    benchmark: Option<&PathBuf>,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<(LoadedDocument, LoadedDocument), CisgapError> {
    let baseline_path = path_or_prompt(baseline, "baseline document", input, prompt_out)?;
    let benchmark_path = path_or_prompt(benchmark, "CIS benchmark document", input, prompt_out)?;

    let baseline = load(&baseline_path)?;
    let benchmark = load(&benchmark_path)?;
    tracing::info!(
        baseline = %baseline_path.display(),
        benchmark = %benchmark_path.display(),
        "loaded documents"
    );
    Ok((baseline, benchmark))
}
