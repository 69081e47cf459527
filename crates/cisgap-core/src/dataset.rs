//! Built-in example control set (MySQL hardening against the CIS benchmark).

use crate::control::{ControlSet, IMPLEMENTED, MISSING};

/// The seven-control example dataset used by `cisgap analyze --example-dataset`.
pub fn example_controls() -> ControlSet {
    [
        ("Strong Password Policy", IMPLEMENTED, IMPLEMENTED),
        ("Access Control", IMPLEMENTED, IMPLEMENTED),
        ("Disable LOAD DATA LOCAL INFILE", "0", "1"),
        ("Error Limit", "3", "10"),
        ("User Management", IMPLEMENTED, IMPLEMENTED),
        ("Server-Side Scripting", "disabled", "enabled"),
        ("Encryption", IMPLEMENTED, MISSING),
    ]
    .into_iter()
    .collect()
}
