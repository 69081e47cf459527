//! # Control Extraction
//!
//! Reads settings out of document text and pairs them into a
//! [`ControlSet`].
//!
//! ## Line Format
//!
//! One setting per line, name and value separated by the first of `=`, `:`,
//! tab, or `,` found on the line (checked in that order). Separators inside
//! double quotes do not count, so quoted CSV fields may contain commas:
//!
//! ```text
//! # MySQL hardening baseline
//! Error Limit = 10
//! Disable LOAD DATA LOCAL INFILE: 1
//! "Server-Side Scripting","enabled"
//! "Bind Address, IPv4",127.0.0.1
//! ```
//!
//! Blank lines, `#` comments, a CSV header row whose first column is
//! `control`, and lines whose name or value is empty or implausibly long are
//! skipped. When a name repeats (case-insensitively) the first occurrence
//! wins.

use std::collections::HashMap;
use std::collections::HashSet;

use cisgap_core::{ControlSet, MISSING};

const SEPARATORS: [char; 4] = ['=', ':', '\t', ','];
const MAX_NAME_LEN: usize = 120;
const MAX_VALUE_LEN: usize = 80;

/// A `name → value` pair read from one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub name: String,
    pub value: String,
}

/// Parse every recognizable setting in `text`, in document order.
pub fn parse_settings(text: &str) -> Vec<Setting> {
    let mut seen = HashSet::new();
    let mut settings = Vec::new();

    for line in text.lines() {
        let Some(setting) = parse_line(line) else {
            continue;
        };
        if seen.insert(setting.name.to_lowercase()) {
            settings.push(setting);
        }
    }
    settings
}

fn parse_line(line: &str) -> Option<Setting> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (name, value) = SEPARATORS
        .iter()
        .find_map(|sep| split_outside_quotes(line, *sep))?;
    let name = unquote(name);
    let value = unquote(value);

    if name.is_empty()
        || value.is_empty()
        || name.chars().count() > MAX_NAME_LEN
        || value.chars().count() > MAX_VALUE_LEN
        || name.eq_ignore_ascii_case("control")
    {
        return None;
    }

    Some(Setting {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Split at the first `sep` that is not inside a double-quoted span.
fn split_outside_quotes(line: &str, sep: char) -> Option<(&str, &str)> {
    let mut quoted = false;
    for (i, ch) in line.char_indices() {
        if ch == '"' {
            quoted = !quoted;
        } else if ch == sep && !quoted {
            return Some((&line[..i], &line[i + sep.len_utf8()..]));
        }
    }
    None
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(s)
}

/// Build a control set from baseline and benchmark text.
///
/// Every benchmark setting is a control: its value is the expected value and
/// the baseline's value for the same name (case-insensitive) is the current
/// value, or `"missing"` when the baseline does not mention it. Controls
/// follow benchmark order and keep the benchmark's spelling of the name.
pub fn extract_controls(baseline_text: &str, benchmark_text: &str) -> ControlSet {
    let baseline: HashMap<String, String> = parse_settings(baseline_text)
        .into_iter()
        .map(|s| (s.name.to_lowercase(), s.value))
        .collect();
    let benchmark = parse_settings(benchmark_text);

    let mut controls = ControlSet::new();
    let mut matched = HashSet::new();
    for setting in benchmark {
        let key = setting.name.to_lowercase();
        let current = match baseline.get(&key) {
            Some(value) => {
                matched.insert(key);
                value.clone()
            }
            None => MISSING.to_string(),
        };
        controls.insert(setting.name, setting.value, current);
    }

    let unmatched = baseline.keys().filter(|k| !matched.contains(*k)).count();
    if unmatched > 0 {
        tracing::debug!(unmatched, "baseline settings without a benchmark counterpart ignored");
    }
    tracing::info!(controls = controls.len(), "extracted controls");

    controls
}
