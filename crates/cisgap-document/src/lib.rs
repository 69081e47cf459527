//! # cisgap-document — Document Loading and Control Extraction
//!
//! Turns the two input documents (a security baseline and a CIS benchmark)
//! into a [`ControlSet`](cisgap_core::ControlSet):
//!
//! - [`loader`] extracts plain text from PDF, DOCX, TXT and CSV files,
//!   dispatching on the file extension.
//! - [`extract`] reads `name: value` style settings out of that text and
//!   pairs benchmark expectations with baseline values.
//!
//! Extraction is line-oriented and deliberately simple. It recognizes
//! settings written one per line; prose is skipped or, at worst, shows up
//! as a benchmark control the baseline does not address.

pub mod extract;
pub mod loader;

pub use extract::{extract_controls, parse_settings, Setting};
pub use loader::{display_name, load, DocumentError, DocumentFormat, LoadedDocument};
