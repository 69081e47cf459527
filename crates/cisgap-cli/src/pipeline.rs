//! # Analysis Pipeline
//!
//! Wires the stages together. Each stage takes the previous stage's output
//! as a value:
//!
//! ```text
//! documents ─▶ ControlSet ─▶ ClassificationResult ─▶ Vec<Recommendation> ─▶ report
//! ```
//!
//! The [`AnalysisRecord`] bundles everything the report needs so an
//! analysis can be saved and rendered later by `cisgap report`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use cisgap_core::{classify, CisgapError, ClassificationResult, ControlSet};
use cisgap_remediation::{Recommendation, RemediationCatalog};
use cisgap_report::{render, write_report, OutputNames, ReportMeta, WrittenReport};

/// A completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub meta: ReportMeta,
    pub controls: ControlSet,
    pub result: ClassificationResult,
    pub recommendations: Vec<Recommendation>,
}

/// Classify `controls` and generate recommendations.
pub fn analyze_controls(
    meta: ReportMeta,
    controls: ControlSet,
    catalog: &RemediationCatalog,
) -> AnalysisRecord {
    if controls.is_empty() {
        tracing::warn!("no controls to evaluate; the report will be empty");
    }
    let result = classify(&controls);
    let recommendations = catalog.recommend(&result.non_compliant, &result.missing);
    tracing::info!(
        score = result.score,
        recommendations = recommendations.len(),
        "compliance analysis complete"
    );
    AnalysisRecord {
        meta,
        controls,
        result,
        recommendations,
    }
}

/// Read a structured control set (YAML or JSON mapping of name to
/// `{expected, current}`).
pub fn load_control_file(path: &Path) -> Result<ControlSet, CisgapError> {
    let text = std::fs::read_to_string(path).map_err(|e| CisgapError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_yaml::from_str(&text).map_err(|e| CisgapError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Save an analysis as pretty-printed JSON.
pub fn save_record(path: &Path, record: &AnalysisRecord) -> Result<(), CisgapError> {
    let json = serde_json::to_string_pretty(record)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "saved analysis");
    Ok(())
}

/// Load a saved analysis. A results file that does not exist means the
/// analysis step has not run yet.
pub fn load_record(path: &Path) -> Result<AnalysisRecord, CisgapError> {
    if !path.exists() {
        return Err(CisgapError::PrematureOperation {
            operation: "report generation".into(),
            prerequisite: format!("analysis (no results at {})", path.display()),
        });
    }
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Render the report for `record` and write it to `dir`.
pub fn publish(
    record: &AnalysisRecord,
    dir: &Path,
    names: &OutputNames,
) -> Result<WrittenReport, CisgapError> {
    let report = render(&record.meta, &record.result, &record.recommendations);
    Ok(write_report(dir, &report, names)?)
}
