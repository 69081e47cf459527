//! # cisgap-remediation — Recommendation Generator
//!
//! Produces one remediation message per non-compliant or missing control.
//!
//! Messages come from a [`RemediationCatalog`]: a YAML document mapping
//! control names to message templates, with generic fallbacks for controls
//! the catalog does not know. A built-in catalog covering the MySQL example
//! controls is compiled in; operators can layer their own catalog on top of
//! it without touching code.
//!
//! ## Template Syntax
//!
//! `{control}`, `{expected}` and `{current}` are replaced with the control's
//! name and values. Any other `{...}` sequence is left as written. Missing
//! controls have no expected value, so `{expected}` stays as written in
//! `missing` templates.

pub mod catalog;
pub mod template;

pub use catalog::{RemediationCatalog, RemediationError, TemplatePair};

use cisgap_core::NonCompliantControl;
use serde::{Deserialize, Serialize};

/// A remediation message for one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub control: String,
    pub recommendation: String,
}

/// Generate recommendations with the built-in catalog.
///
/// Non-compliant controls come first, then missing controls, each in input
/// order. Never fails: unknown controls get the generic message.
pub fn recommend(non_compliant: &[NonCompliantControl], missing: &[String]) -> Vec<Recommendation> {
    let catalog = RemediationCatalog::builtin().unwrap_or_else(|e| {
        tracing::error!("built-in remediation catalog is invalid, using generic messages: {e}");
        RemediationCatalog::default()
    });
    catalog.recommend(non_compliant, missing)
}
