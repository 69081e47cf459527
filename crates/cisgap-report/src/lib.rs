//! # cisgap-report — Report Rendering
//!
//! Renders a [`ClassificationResult`] and its recommendations as:
//!
//! - a self-contained HTML report with inline styling ([`html`]), and
//! - a two-panel SVG chart: status distribution pie and status count bars
//!   ([`chart`]).
//!
//! Rendering is pure string formatting. [`write_report()`] puts both
//! artifacts on disk.

pub mod chart;
pub mod html;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use cisgap_core::{CisgapError, ClassificationResult};
use cisgap_remediation::Recommendation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default report file name.
pub const DEFAULT_REPORT_FILE: &str = "security_compliance_report.html";

/// Default chart file name.
pub const DEFAULT_CHART_FILE: &str = "compliance_charts.svg";

/// Error writing report artifacts.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ReportError> for CisgapError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::Write { source, .. } => CisgapError::Io(source),
        }
    }
}

/// Descriptive fields shown in the report summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub baseline_name: String,
    pub benchmark_name: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportMeta {
    /// Metadata stamped with the current time.
    pub fn new(baseline_name: impl Into<String>, benchmark_name: impl Into<String>) -> Self {
        Self {
            baseline_name: baseline_name.into(),
            benchmark_name: benchmark_name.into(),
            generated_at: Utc::now(),
        }
    }
}

/// The rendered artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub html: String,
    pub chart: String,
}

/// File names for the written artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputNames {
    pub report_file: String,
    pub chart_file: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            report_file: DEFAULT_REPORT_FILE.to_string(),
            chart_file: DEFAULT_CHART_FILE.to_string(),
        }
    }
}

/// Paths the artifacts were written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub report_path: PathBuf,
    pub chart_path: PathBuf,
}

/// Render the HTML report and chart.
pub fn render(
    meta: &ReportMeta,
    result: &ClassificationResult,
    recommendations: &[Recommendation],
) -> RenderedReport {
    let chart = chart::render_svg(&result.breakdown());
    let html = html::render_html(meta, result, recommendations, &chart);
    tracing::debug!(
        html_bytes = html.len(),
        chart_bytes = chart.len(),
        "rendered report"
    );
    RenderedReport { html, chart }
}

/// Write both artifacts into `dir`, creating it if needed.
pub fn write_report(
    dir: &Path,
    report: &RenderedReport,
    names: &OutputNames,
) -> Result<WrittenReport, ReportError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let report_path = dir.join(&names.report_file);
    write_file(&report_path, &report.html)?;
    let chart_path = dir.join(&names.chart_file);
    write_file(&chart_path, &report.chart)?;

    tracing::info!(
        report = %report_path.display(),
        chart = %chart_path.display(),
        "report written"
    );
    Ok(WrittenReport {
        report_path,
        chart_path,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
