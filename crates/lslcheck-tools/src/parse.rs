//! lslint output parsing.
//!
//! lslint reports findings on stdout and stderr as lines like:
//!
//! ```text
//! ERROR:: (  12,  5): syntax error
//!  WARN:: ( 103, 22): variable `foo' declared but never used
//! TOTAL:: Errors: 1  Warnings: 1
//! ```

use crate::{Diagnostic, Location, Severity};
use regex::Regex;
use std::path::Path;

/// Parse combined lslint output into diagnostics for `file`.
///
/// Non-matching lines (the `TOTAL::` summary, chatter) are skipped. Line and
/// column numbers are kept 1-based as lslint reports them.
pub fn parse_output(text: &str, file: &Path) -> Vec<Diagnostic> {
    let re = Regex::new(
        r"(?mi)^\s*(?P<sev>warn|error)::\s*\(\s*(?P<line>\d+),\s*(?P<col>\d+)\s*\):\s?(?P<msg>.*)$",
    )
    .unwrap();

    re.captures_iter(text)
        .filter_map(|cap| {
            let line = cap["line"].parse().ok()?;
            let column = cap["col"].parse().ok()?;
            let severity = if cap["sev"].eq_ignore_ascii_case("error") {
                Severity::Error
            } else {
                Severity::Warning
            };
            Some(Diagnostic {
                tool: "lslint".to_string(),
                message: cap["msg"].trim_end().to_string(),
                severity,
                location: Location::new(file, line, column),
                note: None,
            })
        })
        .collect()
}
