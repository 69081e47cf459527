//! Placeholder substitution for remediation templates.
//!
//! Substitution is single-pass: text inserted for one placeholder is never
//! scanned again, so a control named `{current}` renders literally.
//!
//! A missing control has no expected value. `{expected}` is left as written
//! in its template.

/// Values available to a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub control: &'a str,
    /// `None` for missing controls.
    pub expected: Option<&'a str>,
    pub current: &'a str,
}

impl TemplateVars<'_> {
    fn lookup(&self, key: &str) -> Option<&str> {
        match key {
            "control" => Some(self.control),
            "expected" => self.expected,
            "current" => Some(self.current),
            _ => None,
        }
    }
}

/// Render `template`, replacing known `{name}` placeholders.
pub fn render(template: &str, vars: &TemplateVars<'_>) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('}') {
            Some(close) => match vars.lookup(&tail[1..close]) {
                Some(value) => {
                    out.push_str(value);
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            },
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
