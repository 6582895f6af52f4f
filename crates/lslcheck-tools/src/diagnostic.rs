//! Diagnostic types shared across the pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Severity levels lslint reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// `ERROR::` lines. The script will not compile.
    Error,
    /// `WARN::` lines.
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    /// Convert to SARIF level string.
    pub fn to_sarif_level(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Source location of a diagnostic. lslint counts lines and columns from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File path (relative or absolute).
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

/// A single diagnostic from a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Which tool produced this diagnostic.
    pub tool: String,
    /// Human-readable message.
    pub message: String,
    /// Severity level.
    pub severity: Severity,
    /// Location in source.
    pub location: Location,
    /// Extra context, e.g. "in file lib.lsl" for diagnostics that were
    /// remapped into an included file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Diagnostic {
    pub fn error(tool: &str, message: &str, location: Location) -> Self {
        Self {
            tool: tool.to_string(),
            message: message.to_string(),
            severity: Severity::Error,
            location,
            note: None,
        }
    }

    pub fn warning(tool: &str, message: &str, location: Location) -> Self {
        Self {
            tool: tool.to_string(),
            message: message.to_string(),
            severity: Severity::Warning,
            location,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
