//! # Controls
//!
//! A control is a named security configuration check with an expected value
//! (from the benchmark) and a current value (from the baseline). A
//! [`ControlSet`] keeps controls in insertion order, which is the order
//! they are displayed in the report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel value for a control that is in place.
pub const IMPLEMENTED: &str = "implemented";

/// Sentinel value for a control the baseline does not address.
pub const MISSING: &str = "missing";

/// Expected and current state of a single control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlValues {
    /// Value the CIS benchmark requires.
    pub expected: String,
    /// Value the baseline currently has.
    pub current: String,
}

impl ControlValues {
    pub fn new(expected: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            current: current.into(),
        }
    }
}

/// A borrowed view of one entry of a [`ControlSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control<'a> {
    pub name: &'a str,
    pub expected: &'a str,
    pub current: &'a str,
}

/// Insertion-ordered mapping of control name to its values.
///
/// Names are unique keys. Re-inserting a name replaces its values but keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlSet {
    controls: IndexMap<String, ControlValues>,
}

impl ControlSet {
    /// Create an empty control set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a control. Returns the previous values, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        expected: impl Into<String>,
        current: impl Into<String>,
    ) -> Option<ControlValues> {
        self.controls
            .insert(name.into(), ControlValues::new(expected, current))
    }

    pub fn get(&self, name: &str) -> Option<&ControlValues> {
        self.controls.get(name)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Iterate controls in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Control<'_>> {
        self.controls.iter().map(|(name, v)| Control {
            name,
            expected: &v.expected,
            current: &v.current,
        })
    }
}

impl<N, E, C> FromIterator<(N, E, C)> for ControlSet
where
    N: Into<String>,
    E: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, E, C)>>(iter: I) -> Self {
        let mut set = ControlSet::new();
        for (name, expected, current) in iter {
            set.insert(name, expected, current);
        }
        set
    }
}
