//! # Remediation Catalog
//!
//! Maps control names to remediation templates. Lookup is by exact control
//! name; anything unmatched uses the catalog's default templates, and a
//! catalog without defaults uses the generic messages below.

use std::path::Path;

use cisgap_core::{CisgapError, NonCompliantControl};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::{render, TemplateVars};
use crate::Recommendation;

/// Catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/remediations.yaml");

/// Fallback for a non-compliant control with no template.
pub const GENERIC_NON_COMPLIANT: &str = "Update {control} configuration from {current} to {expected}";

/// Fallback for a missing control with no template.
pub const GENERIC_MISSING: &str = "Implement {control} according to CIS benchmark guidelines";

/// Error loading a remediation catalog.
#[derive(Error, Debug)]
pub enum RemediationError {
    /// The catalog file could not be read.
    #[error("failed to read remediation catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid YAML or does not match the catalog shape.
    #[error("invalid remediation catalog {origin}: {reason}")]
    Invalid { origin: String, reason: String },
}

impl From<RemediationError> for CisgapError {
    fn from(e: RemediationError) -> Self {
        match e {
            RemediationError::Read { source, .. } => CisgapError::Io(source),
            RemediationError::Invalid { origin, reason } => CisgapError::Parse {
                path: origin,
                reason,
            },
        }
    }
}

/// Templates for one control (or the catalog defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_compliant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<String>,
}

impl TemplatePair {
    fn overlay(&mut self, other: TemplatePair) {
        if other.non_compliant.is_some() {
            self.non_compliant = other.non_compliant;
        }
        if other.missing.is_some() {
            self.missing = other.missing;
        }
    }
}

/// Data-defined mapping from control name to remediation templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemediationCatalog {
    #[serde(default)]
    pub defaults: TemplatePair,
    #[serde(default)]
    pub controls: IndexMap<String, TemplatePair>,
}

impl RemediationCatalog {
    /// The catalog shipped with cisgap.
    pub fn builtin() -> Result<Self, RemediationError> {
        Self::from_yaml_str(BUILTIN_CATALOG, "<builtin>")
    }

    /// Parse a catalog from YAML. `origin` names the source in errors.
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, RemediationError> {
        serde_yaml::from_str(yaml).map_err(|e| RemediationError::Invalid {
            origin: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a catalog from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self, RemediationError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| RemediationError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&yaml, &path.display().to_string())?;
        tracing::debug!(
            path = %path.display(),
            controls = catalog.controls.len(),
            "loaded remediation catalog"
        );
        Ok(catalog)
    }

    /// Layer `other` on top of `self`. Templates present in `other` win;
    /// controls only in `other` are appended.
    pub fn merge(mut self, other: RemediationCatalog) -> Self {
        self.defaults.overlay(other.defaults);
        for (name, pair) in other.controls {
            self.controls.entry(name).or_default().overlay(pair);
        }
        self
    }

    /// Template for a non-compliant control.
    pub fn non_compliant_template(&self, control: &str) -> &str {
        self.controls
            .get(control)
            .and_then(|p| p.non_compliant.as_deref())
            .or(self.defaults.non_compliant.as_deref())
            .unwrap_or(GENERIC_NON_COMPLIANT)
    }

    /// Template for a missing control.
    pub fn missing_template(&self, control: &str) -> &str {
        self.controls
            .get(control)
            .and_then(|p| p.missing.as_deref())
            .or(self.defaults.missing.as_deref())
            .unwrap_or(GENERIC_MISSING)
    }

    /// One recommendation per non-compliant control, then one per missing
    /// control, each in input order.
    pub fn recommend(
        &self,
        non_compliant: &[NonCompliantControl],
        missing: &[String],
    ) -> Vec<Recommendation> {
        let mut out = Vec::with_capacity(non_compliant.len() + missing.len());

        for item in non_compliant {
            let vars = TemplateVars {
                control: &item.control,
                expected: Some(&item.expected),
                current: &item.current,
            };
            out.push(Recommendation {
                control: item.control.clone(),
                recommendation: render(self.non_compliant_template(&item.control), &vars),
            });
        }

        for control in missing {
            let vars = TemplateVars {
                control,
                expected: None,
                current: cisgap_core::MISSING,
            };
            let template = self.missing_template(control);
            if template.contains("{expected}") {
                tracing::warn!(
                    control = %control,
                    "missing-control template uses {{expected}}, which has no value for missing controls"
                );
            }
            out.push(Recommendation {
                control: control.clone(),
                recommendation: render(template, &vars),
            });
        }

        tracing::debug!(count = out.len(), "generated recommendations");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nc(control: &str, expected: &str, current: &str) -> NonCompliantControl {
        NonCompliantControl {
            control: control.into(),
            expected: expected.into(),
            current: current.into(),
        }
    }

    #[test]
    fn builtin_catalog_parses() {
        let catalog = RemediationCatalog::builtin().unwrap();
        assert_eq!(catalog.controls.len(), 4);
        assert_eq!(
            catalog.defaults.non_compliant.as_deref(),
            Some(GENERIC_NON_COMPLIANT)
        );
        assert_eq!(catalog.defaults.missing.as_deref(), Some(GENERIC_MISSING));
        assert!(catalog
            .non_compliant_template("Disable LOAD DATA LOCAL INFILE")
            .contains("load-infile=0"));
        assert!(catalog.missing_template("Encryption").contains("TLS"));
    }

    #[test]
    fn lookup_is_exact_match() {
        let catalog = RemediationCatalog::builtin().unwrap();
        assert_eq!(catalog.missing_template("encryption"), GENERIC_MISSING);
        assert_eq!(
            catalog.non_compliant_template("Error limit"),
            GENERIC_NON_COMPLIANT
        );
    }

    #[test]
    fn entry_without_matching_kind_falls_back() {
        // Encryption only has a missing template.
        let catalog = RemediationCatalog::builtin().unwrap();
        let recs = catalog.recommend(&[nc("Encryption", "implemented", "partial")], &[]);
        assert_eq!(
            recs[0].recommendation,
            "Update Encryption configuration from partial to implemented"
        );
    }

    #[test]
    fn empty_catalog_uses_generic_messages() {
        let catalog = RemediationCatalog::default();
        let recs = catalog.recommend(&[nc("A", "1", "2")], &["B".to_string()]);
        assert_eq!(recs[0].recommendation, "Update A configuration from 2 to 1");
        assert_eq!(
            recs[1].recommendation,
            "Implement B according to CIS benchmark guidelines"
        );
    }

    #[test]
    fn merge_overrides_and_extends() {
        let user = RemediationCatalog::from_yaml_str(
            r#"
controls:
  Error Limit:
    non_compliant: "Set max_connect_errors to {expected}"
  Audit Log:
    missing: "Enable the audit_log plugin"
"#,
            "user.yaml",
        )
        .unwrap();
        let catalog = RemediationCatalog::builtin().unwrap().merge(user);

        assert_eq!(
            catalog.non_compliant_template("Error Limit"),
            "Set max_connect_errors to {expected}"
        );
        assert_eq!(catalog.missing_template("Audit Log"), "Enable the audit_log plugin");
        // Untouched builtin entries survive.
        assert!(catalog.missing_template("Encryption").contains("TLS"));
        // Defaults survive when the overlay has none.
        assert_eq!(catalog.missing_template("Other"), GENERIC_MISSING);
    }

    #[test]
    fn merge_overrides_defaults() {
        let user = RemediationCatalog::from_yaml_str(
            "defaults:\n  missing: \"Add {control} to the baseline\"\n",
            "user.yaml",
        )
        .unwrap();
        let catalog = RemediationCatalog::builtin().unwrap().merge(user);
        assert_eq!(catalog.missing_template("X"), "Add {control} to the baseline");
        assert_eq!(catalog.non_compliant_template("X"), GENERIC_NON_COMPLIANT);
    }

    #[test]
    fn missing_template_keeps_expected_placeholder() {
        let catalog = RemediationCatalog::from_yaml_str(
            "controls:\n  Audit Log:\n    missing: \"Enable {control} (target {expected})\"\n",
            "user.yaml",
        )
        .unwrap();
        let recs = catalog.recommend(&[], &["Audit Log".to_string()]);
        assert_eq!(recs[0].recommendation, "Enable Audit Log (target {expected})");
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        let err = RemediationCatalog::from_yaml_str("controls: [1, 2", "bad.yaml").unwrap_err();
        assert!(matches!(err, RemediationError::Invalid { .. }));
        assert!(err.to_string().contains("bad.yaml"));
        let core: CisgapError = err.into();
        assert!(matches!(core, CisgapError::Parse { .. }));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(
            &path,
            "controls:\n  Encryption:\n    missing: \"Require SSL on all accounts\"\n",
        )
        .unwrap();
        let catalog = RemediationCatalog::from_path(&path).unwrap();
        assert_eq!(
            catalog.missing_template("Encryption"),
            "Require SSL on all accounts"
        );
    }

    #[test]
    fn from_path_missing_file() {
        let err = RemediationCatalog::from_path(Path::new("/nonexistent/catalog.yaml"))
            .unwrap_err();
        assert!(matches!(err, RemediationError::Read { .. }));
    }
}
