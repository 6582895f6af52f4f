//! mcpp invocation and line-marker scanning.
//!
//! Scripts written for viewer preprocessors use `#include` and `#define`;
//! lslint only understands plain LSL. Running mcpp first yields a single
//! expanded stream, with `#line` markers at every include boundary. Those
//! markers are what [`crate::LineMap`] uses to translate lslint's line
//! numbers back to the files the user actually edits.

use crate::tool::{ResolvedTool, ToolError};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// When to run the preprocessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreprocessMode {
    /// Preprocess only sources that contain a preprocessor directive.
    #[default]
    Auto,
    /// Always preprocess.
    On,
    /// Never preprocess.
    Off,
}

/// A configured mcpp instance.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    tool: ResolvedTool,
    include_dirs: Vec<PathBuf>,
    extra_args: Vec<String>,
}

impl Preprocessor {
    pub fn new(tool: ResolvedTool) -> Self {
        Self {
            tool,
            include_dirs: Vec::new(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_include_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.include_dirs = dirs;
        self
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn tool(&self) -> &ResolvedTool {
        &self.tool
    }

    /// Run mcpp over `source` and return the expanded stream.
    ///
    /// mcpp reports directive problems on stderr and may exit nonzero while
    /// still producing usable output; only nonzero with an empty stream is
    /// treated as failure.
    pub fn run(&self, source: &Path) -> Result<String, ToolError> {
        let mut cmd = Command::new(&self.tool.path);
        cmd.arg("-W").arg("0");
        for dir in &self.include_dirs {
            cmd.arg("-I").arg(dir);
        }
        cmd.args(&self.extra_args);
        cmd.arg(source);

        let output = cmd.output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if stdout.trim().is_empty() && !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ToolError::ExecutionFailed(format!(
                "mcpp: {}",
                stderr.trim()
            )));
        }

        Ok(stdout.into_owned())
    }
}

/// A line marker in the expanded stream: the next stream line after
/// `stream_line` is line `source_line` of `file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    /// 1-based line of the marker in the expanded stream.
    pub stream_line: usize,
    /// Line number the marker names.
    pub source_line: usize,
    /// File the marker names.
    pub file: PathBuf,
}

/// Scan an expanded stream for line markers, in order.
///
/// Accepts both the `#line 10 "file"` form and the short `# 10 "file"` form
/// GCC-style preprocessors emit.
pub fn scan_directives(stream: &str) -> Vec<Checkpoint> {
    let re = Regex::new(r#"^\s*#\s*(?:line\s+)?(\d+)\s+"([^"]*)""#).unwrap();

    stream
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let cap = re.captures(line)?;
            Some(Checkpoint {
                stream_line: idx + 1,
                source_line: cap[1].parse().ok()?,
                file: PathBuf::from(&cap[2]),
            })
        })
        .collect()
}

/// Does this source use the preprocessor at all?
///
/// LSL itself has no `#` statements, so any directive line means the script
/// was written for a preprocessor.
pub fn has_directives(source: &str) -> bool {
    let re = Regex::new(
        r"^\s*#\s*(include|define|undef|if|ifdef|ifndef|elif|else|endif|pragma|warning|error)\b",
    )
    .unwrap();
    source.lines().any(|line| re.is_match(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_both_marker_forms() {
        let stream = "\
#line 1 \"main.lsl\"
integer x;
# 1 \"lib.lsl\"
say();
#line 3 \"main.lsl\"
";
        let cps = scan_directives(stream);
        assert_eq!(cps.len(), 3);
        assert_eq!(cps[0].stream_line, 1);
        assert_eq!(cps[0].source_line, 1);
        assert_eq!(cps[0].file, Path::new("main.lsl"));
        assert_eq!(cps[1].stream_line, 3);
        assert_eq!(cps[1].file, Path::new("lib.lsl"));
        assert_eq!(cps[2].source_line, 3);
    }

    #[test]
    fn ignores_non_marker_lines() {
        let stream = "integer x = 1; // #line 5 \"fake\"\n#define FOO 1\n";
        assert!(scan_directives(stream).is_empty());
    }

    #[test]
    fn detects_directives() {
        assert!(has_directives("#include \"lib.lsl\"\ndefault {}\n"));
        assert!(has_directives("  #define FOO 1\n"));
        assert!(has_directives("#ifdef DEBUG\n#endif\n"));
        assert!(!has_directives("default { state_entry() {} }\n"));
        // A marker-looking string inside a line of code is not a directive.
        assert!(!has_directives("string s = \"#include\";\n"));
    }
}
