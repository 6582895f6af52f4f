//! The lint pipeline: preprocess, invoke, parse, remap.

use crate::preprocess::{self, PreprocessMode, Preprocessor};
use crate::remap::LineMap;
use crate::tool::{ResolvedTool, ToolError};
use crate::{Diagnostic, Severity, parse_output};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of linting one file.
#[derive(Debug, Clone)]
pub struct LintOutcome {
    /// File the outcome is for.
    pub file: PathBuf,
    /// Diagnostics found, in original-source numbering.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the source went through mcpp first.
    pub preprocessed: bool,
    /// Whether the pipeline ran; diagnostics may still be present on success.
    pub success: bool,
    /// Pipeline failure message, if any.
    pub error: Option<String>,
}

impl LintOutcome {
    pub fn success(file: impl Into<PathBuf>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            file: file.into(),
            diagnostics,
            preprocessed: false,
            success: true,
            error: None,
        }
    }

    pub fn failure(file: impl Into<PathBuf>, error: impl ToString) -> Self {
        Self {
            file: file.into(),
            diagnostics: Vec::new(),
            preprocessed: false,
            success: false,
            error: Some(error.to_string()),
        }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

/// Orchestrates lslint and the optional preprocessor.
pub struct Linter {
    lslint: ResolvedTool,
    preprocessor: Option<Preprocessor>,
    mode: PreprocessMode,
    extra_args: Vec<String>,
}

impl Linter {
    pub fn new(lslint: ResolvedTool) -> Self {
        Self {
            lslint,
            preprocessor: None,
            mode: PreprocessMode::default(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = Some(preprocessor);
        self
    }

    pub fn with_mode(mut self, mode: PreprocessMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn lslint(&self) -> &ResolvedTool {
        &self.lslint
    }

    fn wants_preprocess(&self, source: &str) -> bool {
        match self.mode {
            PreprocessMode::On => true,
            PreprocessMode::Off => false,
            PreprocessMode::Auto => preprocess::has_directives(source),
        }
    }

    /// Lint a file on disk.
    pub fn lint_file(&self, path: &Path) -> Result<LintOutcome, ToolError> {
        let source = std::fs::read_to_string(path)?;

        if self.wants_preprocess(&source) {
            match &self.preprocessor {
                Some(pp) => {
                    let stream = pp.run(path)?;
                    let map = LineMap::from_stream(&stream);
                    let mut diagnostics = self.lint_stream(&stream, path)?;
                    for diag in &mut diagnostics {
                        map.remap(diag, path);
                    }
                    let mut outcome = LintOutcome::success(path, diagnostics);
                    outcome.preprocessed = true;
                    return Ok(outcome);
                }
                None if self.mode == PreprocessMode::On => {
                    return Err(ToolError::NotFound("mcpp".to_string()));
                }
                // Auto without mcpp: lint the raw source and let lslint
                // complain about the directives.
                None => {}
            }
        }

        let diagnostics = self.run_lslint(path, path)?;
        Ok(LintOutcome::success(path, diagnostics))
    }

    /// Lint in-memory source text, reporting locations under `display`.
    pub fn lint_source(&self, source: &str, display: &Path) -> Result<LintOutcome, ToolError> {
        let tmp = write_temp(source)?;

        if self.wants_preprocess(source) {
            match &self.preprocessor {
                Some(pp) => {
                    let stream = pp.run(tmp.path())?;
                    let map = LineMap::from_stream(&stream);
                    let mut diagnostics = self.lint_stream(&stream, display)?;
                    for diag in &mut diagnostics {
                        // Markers name the tempfile for top-level text; those
                        // locations keep the display path from parsing.
                        map.remap(diag, tmp.path());
                    }
                    let mut outcome = LintOutcome::success(display, diagnostics);
                    outcome.preprocessed = true;
                    return Ok(outcome);
                }
                None if self.mode == PreprocessMode::On => {
                    return Err(ToolError::NotFound("mcpp".to_string()));
                }
                None => {}
            }
        }

        let diagnostics = self.run_lslint(tmp.path(), display)?;
        Ok(LintOutcome::success(display, diagnostics))
    }

    /// Write an expanded stream to a tempfile and lint it.
    fn lint_stream(&self, stream: &str, display: &Path) -> Result<Vec<Diagnostic>, ToolError> {
        let tmp = write_temp(stream)?;
        self.run_lslint(tmp.path(), display)
    }

    fn run_lslint(&self, target: &Path, display: &Path) -> Result<Vec<Diagnostic>, ToolError> {
        let output = Command::new(&self.lslint.path)
            .args(&self.extra_args)
            .arg(target)
            .output()?;

        // lslint exits nonzero whenever it finds anything; parsed output is
        // the signal, not the status. It also splits findings across stdout
        // and stderr, so both are scanned.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(parse_output(&text, display))
    }
}

/// lslint keys on the file extension, so temp files keep a `.lsl` suffix.
fn write_temp(contents: &str) -> Result<tempfile::NamedTempFile, ToolError> {
    let mut tmp = tempfile::Builder::new()
        .prefix("lslcheck-")
        .suffix(".lsl")
        .tempfile()?;
    tmp.write_all(contents.as_bytes())?;
    Ok(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;
    use crate::tool::ToolSpec;

    fn fake_linter(mode: PreprocessMode) -> Linter {
        let lslint = ResolvedTool {
            spec: ToolSpec::lslint(),
            path: PathBuf::from("/nonexistent/lslint"),
        };
        Linter::new(lslint).with_mode(mode)
    }

    #[test]
    fn auto_mode_keys_on_directives() {
        let linter = fake_linter(PreprocessMode::Auto);
        assert!(linter.wants_preprocess("#include \"lib.lsl\"\n"));
        assert!(!linter.wants_preprocess("default { state_entry() {} }\n"));
    }

    #[test]
    fn explicit_modes_ignore_source() {
        assert!(fake_linter(PreprocessMode::On).wants_preprocess("default {}"));
        assert!(!fake_linter(PreprocessMode::Off).wants_preprocess("#include \"x\""));
    }

    #[test]
    fn on_mode_without_mcpp_is_an_error() {
        let linter = fake_linter(PreprocessMode::On);
        let err = linter.lint_source("default {}", Path::new("a.lsl")).unwrap_err();
        assert!(matches!(err, ToolError::NotFound(name) if name == "mcpp"));
    }

    #[test]
    fn outcome_counts_by_severity() {
        let diags = vec![
            Diagnostic::error("lslint", "e1", Location::new("a.lsl", 1, 1)),
            Diagnostic::error("lslint", "e2", Location::new("a.lsl", 2, 1)),
            Diagnostic::warning("lslint", "w1", Location::new("a.lsl", 3, 1)),
        ];
        let outcome = LintOutcome::success("a.lsl", diags);
        assert_eq!(outcome.error_count(), 2);
        assert_eq!(outcome.warning_count(), 1);
        assert!(outcome.success);
    }

    #[test]
    fn failure_outcome_carries_message() {
        let outcome = LintOutcome::failure("a.lsl", "lslint not found");
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("lslint not found"));
        assert_eq!(outcome.error_count(), 0);
    }
}
