//! # Control Classification
//!
//! Partitions a [`ControlSet`] into compliant, non-compliant, and missing
//! buckets and computes the compliance score.
//!
//! ## Rule
//!
//! Applied per control, in this order:
//!
//! 1. `current == expected`, or both are `"implemented"` → compliant.
//! 2. `current == "missing"` → missing.
//! 3. Otherwise → non-compliant.
//!
//! Rule 1 is evaluated first, so a control expected to be `"missing"` that is
//! currently `"missing"` is compliant.
//!
//! ## Score
//!
//! `100 * compliant / total` at full `f64` precision. Rounding to two
//! decimals happens only when the score is displayed. An empty control set
//! scores `0.0` with empty buckets.

use serde::{Deserialize, Serialize};

use crate::control::{Control, ControlSet, IMPLEMENTED, MISSING};

/// Classification bucket for a single control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    /// Current value satisfies the benchmark.
    Compliant,
    /// Current value differs from the benchmark.
    NonCompliant,
    /// The baseline does not address the control.
    Missing,
}

impl ComplianceStatus {
    /// Classify one control.
    pub fn of(control: &Control<'_>) -> Self {
        let both_implemented = control.current == IMPLEMENTED && control.expected == IMPLEMENTED;
        if control.current == control.expected || both_implemented {
            Self::Compliant
        } else if control.current == MISSING {
            Self::Missing
        } else {
            Self::NonCompliant
        }
    }

    /// Human-readable label used in reports and charts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::NonCompliant => "Non-Compliant",
            Self::Missing => "Missing",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A control whose current value does not match the benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonCompliantControl {
    pub control: String,
    pub expected: String,
    pub current: String,
}

/// Outcome of classifying a control set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Names of compliant controls, in input order.
    pub compliant: Vec<String>,
    /// Non-compliant controls with their expected and current values.
    pub non_compliant: Vec<NonCompliantControl>,
    /// Names of missing controls, in input order.
    pub missing: Vec<String>,
    /// Percentage of compliant controls, 0–100.
    pub score: f64,
    /// Number of controls classified.
    pub total: usize,
}

/// Count and share of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketShare {
    pub status: ComplianceStatus,
    pub count: usize,
    pub percent: f64,
}

/// Per-bucket counts and percentages of a [`ClassificationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub compliant: BucketShare,
    pub non_compliant: BucketShare,
    pub missing: BucketShare,
    pub total: usize,
}

impl Breakdown {
    /// Buckets in display order.
    pub fn shares(&self) -> [BucketShare; 3] {
        [self.compliant, self.non_compliant, self.missing]
    }
}

impl ClassificationResult {
    /// Result for an empty control set.
    pub fn empty() -> Self {
        Self {
            compliant: Vec::new(),
            non_compliant: Vec::new(),
            missing: Vec::new(),
            score: 0.0,
            total: 0,
        }
    }

    /// Bucket of a named control, if it was classified.
    pub fn status_of(&self, name: &str) -> Option<ComplianceStatus> {
        if self.compliant.iter().any(|c| c == name) {
            Some(ComplianceStatus::Compliant)
        } else if self.non_compliant.iter().any(|c| c.control == name) {
            Some(ComplianceStatus::NonCompliant)
        } else if self.missing.iter().any(|c| c == name) {
            Some(ComplianceStatus::Missing)
        } else {
            None
        }
    }

    pub fn count(&self, status: ComplianceStatus) -> usize {
        match status {
            ComplianceStatus::Compliant => self.compliant.len(),
            ComplianceStatus::NonCompliant => self.non_compliant.len(),
            ComplianceStatus::Missing => self.missing.len(),
        }
    }

    pub fn breakdown(&self) -> Breakdown {
        let share = |status| {
            let count = self.count(status);
            BucketShare {
                status,
                count,
                percent: percentage(count, self.total),
            }
        };
        Breakdown {
            compliant: share(ComplianceStatus::Compliant),
            non_compliant: share(ComplianceStatus::NonCompliant),
            missing: share(ComplianceStatus::Missing),
            total: self.total,
        }
    }
}

/// Classify every control in `controls` and compute the compliance score.
pub fn classify(controls: &ControlSet) -> ClassificationResult {
    let mut result = ClassificationResult::empty();

    for control in controls.iter() {
        match ComplianceStatus::of(&control) {
            ComplianceStatus::Compliant => result.compliant.push(control.name.to_string()),
            ComplianceStatus::Missing => result.missing.push(control.name.to_string()),
            ComplianceStatus::NonCompliant => result.non_compliant.push(NonCompliantControl {
                control: control.name.to_string(),
                expected: control.expected.to_string(),
                current: control.current.to_string(),
            }),
        }
    }

    result.total = controls.len();
    result.score = percentage(result.compliant.len(), result.total);

    tracing::debug!(
        total = result.total,
        compliant = result.compliant.len(),
        non_compliant = result.non_compliant.len(),
        missing = result.missing.len(),
        score = result.score,
        "classified control set"
    );

    result
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}
