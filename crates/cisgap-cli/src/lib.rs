//! # cisgap-cli — Command-Line Interface
//!
//! Provides the `cisgap` binary.
//!
//! ## Subcommands
//!
//! - `cisgap analyze`: Load a baseline and a CIS benchmark, classify every
//!   control, and write the HTML report and chart.
//! - `cisgap report`: Re-render the report from a saved analysis.
//! - `cisgap controls`: Print the control set extracted from two documents.
//!
//! ```bash
//! cisgap analyze --baseline mysql_baseline.docx --benchmark CIS_MySQL_8.0.pdf
//! cisgap analyze --baseline b.txt --benchmark cis.pdf --save-results run.json
//! cisgap report --results run.json --output-dir reports/
//! ```
//!
//! ## Crate Policy
//!
//! - Argument structs and handlers live together, one module per subcommand.
//! - Handlers return an exit code; errors propagate as `anyhow::Error` with
//!   the typed [`CisgapError`](cisgap_core::CisgapError) kept as the root
//!   cause so `main` can map it to an exit code.

pub mod analyze;
pub mod config;
pub mod controls;
pub mod pipeline;
pub mod prompt;
pub mod report;

use std::path::{Path, PathBuf};

/// Resolve a path that may be relative to a base directory.
///
/// Absolute paths are returned as-is. Relative paths are joined onto `base`
/// when the result exists, and otherwise left relative to the current
/// directory.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let based = base.join(path);
    if based.exists() {
        based
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_path_absolute_path_returned_as_is() {
        let result = resolve_path(Path::new("/abs/catalog.yaml"), Path::new("/base"));
        assert_eq!(result, PathBuf::from("/abs/catalog.yaml"));
    }

    #[test]
    fn resolve_path_relative_exists_under_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("catalog.yaml"), b"{}").unwrap();
        let result = resolve_path(Path::new("catalog.yaml"), dir.path());
        assert_eq!(result, dir.path().join("catalog.yaml"));
    }

    #[test]
    fn resolve_path_relative_missing_under_base() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_path(Path::new("nope.yaml"), dir.path());
        assert_eq!(result, PathBuf::from("nope.yaml"));
    }
}
