//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`:
//!
//! ```yaml
//! output_dir: reports
//! report_file: mysql_report.html
//! chart_file: mysql_charts.svg
//! remediation_catalog: remediations.yaml
//! ```
//!
//! Every field is optional. A relative `remediation_catalog` is looked up
//! next to the config file first.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cisgap_remediation::RemediationCatalog;
use cisgap_report::{OutputNames, DEFAULT_CHART_FILE, DEFAULT_REPORT_FILE};

use crate::resolve_path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Directory report artifacts are written to.
    pub output_dir: PathBuf,
    pub report_file: String,
    pub chart_file: String,
    /// Catalog layered over the built-in remediation catalog.
    pub remediation_catalog: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            chart_file: DEFAULT_CHART_FILE.to_string(),
            remediation_catalog: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: CliConfig = serde_yaml::from_str(&yaml)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        if let (Some(catalog), Some(base)) = (&config.remediation_catalog, path.parent()) {
            config.remediation_catalog = Some(resolve_path(catalog, base));
        }

        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// Apply the `--output-dir` flag, which takes precedence over the file.
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn output_names(&self) -> OutputNames {
        OutputNames {
            report_file: self.report_file.clone(),
            chart_file: self.chart_file.clone(),
        }
    }

    /// The built-in catalog, with the configured catalog layered on top.
    pub fn remediation_catalog(&self) -> Result<RemediationCatalog> {
        let builtin = RemediationCatalog::builtin()?;
        match &self.remediation_catalog {
            Some(path) => {
                let user = RemediationCatalog::from_path(path)?;
                Ok(builtin.merge(user))
            }
            None => Ok(builtin),
        }
    }
}
