//! # cisgap CLI entry point
//!
//! Parses command-line arguments, sets up logging and configuration, and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cisgap_cli::analyze::{run_analyze, AnalyzeArgs};
use cisgap_cli::config::CliConfig;
use cisgap_cli::controls::{run_controls, ControlsArgs};
use cisgap_cli::report::{run_report, ReportArgs};
use cisgap_core::CisgapError;

/// Security baseline vs. CIS benchmark compliance reporting.
///
/// Compares the settings in a baseline document with the expected values
/// of a CIS benchmark, scores compliance, and writes an HTML report with
/// remediation advice and status charts.
#[derive(Parser, Debug)]
#[command(name = "cisgap", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for generated artifacts.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare a baseline with a CIS benchmark and write the compliance report.
    Analyze(AnalyzeArgs),

    /// Render the report from a saved analysis.
    Report(ReportArgs),

    /// Print the control set extracted from a baseline and a benchmark.
    Controls(ControlsArgs),
}

/// Exit code when the user cancels input selection.
const EXIT_CANCELLED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("cisgap v{} starting", env!("CARGO_PKG_VERSION"));

    let result = CliConfig::load(cli.config.as_deref())
        .map(|config| config.with_output_dir(cli.output_dir.clone()))
        .and_then(|config| match &cli.command {
            Commands::Analyze(args) => run_analyze(args, &config),
            Commands::Report(args) => run_report(args, &config),
            Commands::Controls(args) => run_controls(args),
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => match e.downcast_ref::<CisgapError>() {
            Some(CisgapError::NoSelection { .. }) => {
                eprintln!("{e}. Exiting.");
                ExitCode::from(EXIT_CANCELLED)
            }
            _ => {
                tracing::error!("{e:#}");
                ExitCode::from(1)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_analyze_with_documents() {
        let cli = Cli::try_parse_from([
            "cisgap",
            "analyze",
            "--baseline",
            "baseline.docx",
            "--benchmark",
            "cis.pdf",
        ])
        .unwrap();
        if let Commands::Analyze(args) = cli.command {
            assert_eq!(args.baseline, Some(PathBuf::from("baseline.docx")));
            assert_eq!(args.benchmark, Some(PathBuf::from("cis.pdf")));
            assert!(args.controls.is_none());
            assert!(!args.example_dataset);
            assert!(args.save_results.is_none());
        } else {
            panic!("expected analyze");
        }
    }

    #[test]
    fn cli_parse_analyze_without_paths() {
        let cli = Cli::try_parse_from(["cisgap", "analyze"]).unwrap();
        if let Commands::Analyze(args) = cli.command {
            assert!(args.baseline.is_none());
            assert!(args.benchmark.is_none());
        }
    }

    #[test]
    fn cli_parse_analyze_example_dataset_and_save() {
        let cli = Cli::try_parse_from([
            "cisgap",
            "analyze",
            "--baseline",
            "b.txt",
            "--benchmark",
            "c.txt",
            "--example-dataset",
            "--save-results",
            "run.json",
        ])
        .unwrap();
        if let Commands::Analyze(args) = cli.command {
            assert!(args.example_dataset);
            assert_eq!(args.save_results, Some(PathBuf::from("run.json")));
        }
    }

    #[test]
    fn cli_parse_controls_conflicts_with_documents() {
        let result = Cli::try_parse_from([
            "cisgap",
            "analyze",
            "--controls",
            "controls.yaml",
            "--baseline",
            "b.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_report_requires_results() {
        assert!(Cli::try_parse_from(["cisgap", "report"]).is_err());
        let cli = Cli::try_parse_from(["cisgap", "report", "--results", "run.json"]).unwrap();
        if let Commands::Report(args) = cli.command {
            assert_eq!(args.results, PathBuf::from("run.json"));
        }
    }

    #[test]
    fn cli_parse_controls_example() {
        let cli = Cli::try_parse_from(["cisgap", "controls", "--example-dataset"]).unwrap();
        assert!(matches!(cli.command, Commands::Controls(_)));
    }

    #[test]
    fn cli_parse_global_options() {
        let cli = Cli::try_parse_from([
            "cisgap",
            "-vv",
            "--config",
            "cisgap.yaml",
            "--output-dir",
            "reports",
            "analyze",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("cisgap.yaml")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("reports")));
    }

    #[test]
    fn cli_parse_global_options_after_subcommand() {
        let cli =
            Cli::try_parse_from(["cisgap", "analyze", "-v", "--output-dir", "out"]).unwrap();
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["cisgap"]).is_err());
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        assert!(Cli::try_parse_from(["cisgap", "nonexistent"]).is_err());
    }
}
