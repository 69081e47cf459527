//! # cisgap-core — Foundational Types for cisgap
//!
//! Defines the control model and the one piece of decision logic in the
//! toolchain: classifying every control of a baseline as compliant,
//! non-compliant, or missing relative to a CIS benchmark, and scoring the
//! result.
//!
//! ## Key Design Principles
//!
//! 1. **Controls are strings.** Expected and current values are free-form
//!    and compared by exact string equality. No numeric coercion.
//!
//! 2. **Stages exchange values.** [`classify()`] is a pure function of a
//!    [`ControlSet`]; its [`ClassificationResult`] is handed to the
//!    remediation and report crates by reference. There is no session
//!    object and no "must call X before Y" ordering.
//!
//! 3. **One error taxonomy.** [`CisgapError`] is the error every other
//!    crate converts into at the binary boundary.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cisgap-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod classify;
pub mod control;
pub mod dataset;
pub mod error;

pub use classify::{
    classify, Breakdown, BucketShare, ClassificationResult, ComplianceStatus, NonCompliantControl,
};
pub use control::{Control, ControlSet, ControlValues, IMPLEMENTED, MISSING};
pub use dataset::example_controls;
pub use error::CisgapError;
