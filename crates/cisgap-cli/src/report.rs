//! # Report Subcommand
//!
//! Re-renders the HTML report and chart from an analysis saved with
//! `cisgap analyze --save-results`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::CliConfig;
use crate::pipeline::{load_record, publish};

/// Arguments for the report subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Saved analysis JSON.
    #[arg(long)]
    pub results: PathBuf,
}

/// Execute the report subcommand.
pub fn run_report(args: &ReportArgs, config: &CliConfig) -> Result<u8> {
    let record = load_record(&args.results)?;
    tracing::debug!(
        results = %args.results.display(),
        controls = record.result.total,
        "rendering saved analysis"
    );

    let written = publish(&record, &config.output_dir, &config.output_names())?;
    println!("Report saved as '{}'", written.report_path.display());
    println!("Visualization saved as '{}'", written.chart_path.display());
    Ok(0)
}
