//! # Controls Subcommand
//!
//! Prints the control set that `analyze` would evaluate, as YAML. The
//! output can be edited and fed back with `cisgap analyze --controls`.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cisgap_core::{example_controls, ControlSet};
use cisgap_document::extract_controls;

use crate::analyze::load_documents;

/// Arguments for the controls subcommand.
#[derive(Args, Debug)]
pub struct ControlsArgs {
    /// Baseline security document. Prompted for when omitted.
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// CIS benchmark document. Prompted for when omitted.
    #[arg(long)]
    pub benchmark: Option<PathBuf>,

    /// Print the built-in example control set instead.
    #[arg(long, conflicts_with_all = ["baseline", "benchmark"])]
    pub example_dataset: bool,
}

/// Execute the controls subcommand. The YAML is the only thing written to
/// stdout; prompts go to stderr.
pub fn run_controls(args: &ControlsArgs) -> Result<u8> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_controls_with(args, &mut stdin.lock(), &mut std::io::stderr(), &mut stdout.lock())
}

/// Execute the controls subcommand with explicit streams.
pub fn run_controls_with<R: BufRead, P: Write, O: Write>(
    args: &ControlsArgs,
    input: &mut R,
    prompt_out: &mut P,
    out: &mut O,
) -> Result<u8> {
    let controls = if args.example_dataset {
        example_controls()
    } else {
        let (baseline, benchmark) = load_documents(
            args.baseline.as_ref(),
            args.benchmark.as_ref(),
            input,
            prompt_out,
        )?;
        extract_controls(&baseline.text, &benchmark.text)
    };
    out.write_all(to_yaml(&controls)?.as_bytes())
        .context("failed to write control set")?;
    Ok(0)
}

fn to_yaml(controls: &ControlSet) -> Result<String> {
    serde_yaml::to_string(controls).context("failed to serialize control set")
}
