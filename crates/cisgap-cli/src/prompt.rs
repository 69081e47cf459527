//! Interactive path prompt used when an input document is not given on the
//! command line. An empty answer (or end of input) cancels the run.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use cisgap_core::CisgapError;

/// Ask for a path on `output` and read the answer from `input`.
pub fn prompt_path<R: BufRead, W: Write>(
    what: &str,
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf, CisgapError> {
    write!(output, "Please select the {what} (path, empty to cancel): ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Err(CisgapError::NoSelection {
            what: what.to_string(),
        });
    }
    Ok(PathBuf::from(answer))
}

/// Use `given` when present, otherwise prompt for it.
pub fn path_or_prompt<R: BufRead, W: Write>(
    given: Option<&PathBuf>,
    what: &str,
    input: &mut R,
    output: &mut W,
) -> Result<PathBuf, CisgapError> {
    match given {
        Some(path) => Ok(path.clone()),
        None => prompt_path(what, input, output),
    }
}
