//! External binary description, resolution, and probing.

use regex::Regex;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Oldest lslint whose output format and check set we rely on.
pub const LSLINT_MIN_VERSION: &str = "0.4.2";

/// Error type for tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("tool execution failed: {0}")]
    ExecutionFailed(String),
    #[error("failed to parse tool output: {0}")]
    ParseError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Static description of an external binary we drive.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Binary name as found on PATH.
    pub name: &'static str,
    /// Arguments that make the binary print its version.
    pub version_args: &'static [&'static str],
    /// URL to tool website.
    pub website: &'static str,
}

impl ToolSpec {
    /// The lslint linter.
    pub fn lslint() -> Self {
        Self {
            name: "lslint",
            version_args: &["-V"],
            website: "https://github.com/Makopo/lslint",
        }
    }

    /// The mcpp C preprocessor.
    pub fn mcpp() -> Self {
        Self {
            name: "mcpp",
            version_args: &["-v"],
            website: "https://mcpp.sourceforge.net/",
        }
    }

    /// Resolve the binary to a concrete path.
    ///
    /// An explicit configured path wins; otherwise the name is looked up on
    /// PATH. No further guessing.
    pub fn resolve(&self, override_path: Option<&Path>) -> Result<ResolvedTool, ToolError> {
        if let Some(path) = override_path {
            if path.is_file() {
                return Ok(ResolvedTool {
                    spec: self.clone(),
                    path: path.to_path_buf(),
                });
            }
            return Err(ToolError::NotFound(format!(
                "{}: configured path {} does not exist",
                self.name,
                path.display()
            )));
        }

        which::which(self.name)
            .map(|path| ResolvedTool {
                spec: self.clone(),
                path,
            })
            .map_err(|_| ToolError::NotFound(self.name.to_string()))
    }
}

/// A tool spec bound to the executable actually in use.
#[derive(Debug, Clone)]
pub struct ResolvedTool {
    pub spec: ToolSpec,
    pub path: PathBuf,
}

impl ResolvedTool {
    /// Run the version probe and return its combined output.
    ///
    /// mcpp prints its banner to stderr and exits nonzero without an input
    /// file, so neither stream nor status is trusted alone.
    fn probe(&self) -> Option<String> {
        let output = Command::new(&self.path)
            .args(self.spec.version_args)
            .output()
            .ok()?;
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Some(text)
    }

    /// Check if the binary answers its version probe at all.
    pub fn is_available(&self) -> bool {
        self.probe().is_some()
    }

    /// Get the tool version, if the probe output contains one.
    pub fn version(&self) -> Option<String> {
        extract_version(&self.probe()?)
    }

    /// Does the installed version meet `minimum`?
    ///
    /// Returns `None` when no version could be extracted; unknown is not
    /// treated as too old.
    pub fn meets_minimum(&self, minimum: &str) -> Option<bool> {
        let version = self.version()?;
        Some(version_cmp(&version, minimum) != Ordering::Less)
    }
}

/// First `x.y.z` token in probe output.
pub fn extract_version(text: &str) -> Option<String> {
    let re = Regex::new(r"\d+\.\d+\.\d+").unwrap();
    re.find(text).map(|m| m.as_str().to_string())
}

/// Compare dotted version strings numerically.
pub fn version_cmp(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<u32> = a.split('.').filter_map(|p| p.parse().ok()).collect();
    let b_parts: Vec<u32> = b.split('.').filter_map(|p| p.parse().ok()).collect();

    for (ap, bp) in a_parts.iter().zip(b_parts.iter()) {
        match ap.cmp(bp) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a_parts.len().cmp(&b_parts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extracts_version_from_banner() {
        assert_eq!(
            extract_version("lslint v0.4.2 (build 2016-01-01)"),
            Some("0.4.2".to_string())
        );
        assert_eq!(
            extract_version("MCPP V.2.7.2 (2008/11) compiled by GCC"),
            Some("2.7.2".to_string())
        );
        assert_eq!(extract_version("no version here"), None);
    }

    #[test]
    fn version_ordering() {
        assert_eq!(version_cmp("0.4.2", "0.4.2"), Ordering::Equal);
        assert_eq!(version_cmp("0.4.1", "0.4.2"), Ordering::Less);
        assert_eq!(version_cmp("0.10.0", "0.4.2"), Ordering::Greater);
        assert_eq!(version_cmp("1.0", "1.0.0"), Ordering::Less);
    }

    #[test]
    fn resolve_prefers_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let exe = dir.path().join("lslint");
        let mut file = std::fs::File::create(&exe).unwrap();
        file.write_all(b"").unwrap();

        let resolved = ToolSpec::lslint().resolve(Some(&exe)).unwrap();
        assert_eq!(resolved.path, exe);
    }

    #[test]
    fn resolve_rejects_missing_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = ToolSpec::lslint().resolve(Some(&missing)).unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }
}
