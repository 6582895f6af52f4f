//! Tools command - report external tool status.

use crate::config::Config;
use crate::output::{OutputFormat, OutputFormatter};
use lslcheck_tools::{LSLINT_MIN_VERSION, ToolSpec, version_cmp};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Write;

/// Tool info for the tools listing.
#[derive(Debug, Serialize)]
pub struct ToolListItem {
    pub name: String,
    pub path: Option<String>,
    pub available: bool,
    pub version: Option<String>,
    /// None when no minimum applies or the version is unknown.
    pub meets_minimum: Option<bool>,
    pub website: String,
}

/// Result of the tools command.
#[derive(Debug, Serialize)]
pub struct ToolsResult {
    pub tools: Vec<ToolListItem>,
}

impl OutputFormatter for ToolsResult {
    fn format_text(&self) -> String {
        let mut out = String::from("External tools:\n\n");
        for tool in &self.tools {
            let status = if tool.available { "✓" } else { "✗" };
            let ver = tool.version.as_deref().unwrap_or("not installed");
            writeln!(out, "  {} {} - {}", status, tool.name, ver).unwrap();
            if let Some(path) = &tool.path {
                writeln!(out, "    Path: {}", path).unwrap();
            }
            if tool.meets_minimum == Some(false) {
                writeln!(
                    out,
                    "    Too old: {} or newer is required",
                    LSLINT_MIN_VERSION
                )
                .unwrap();
            }
            writeln!(out, "    Website: {}", tool.website).unwrap();
            writeln!(out).unwrap();
        }
        out
    }
}

fn probe(spec: ToolSpec, override_path: Option<&std::path::Path>, minimum: Option<&str>) -> ToolListItem {
    match spec.resolve(override_path) {
        Ok(tool) => {
            let version = tool.version();
            let meets_minimum = match (&version, minimum) {
                (Some(v), Some(min)) => Some(version_cmp(v, min) != Ordering::Less),
                _ => None,
            };
            ToolListItem {
                name: spec.name.to_string(),
                path: Some(tool.path.display().to_string()),
                available: version.is_some(),
                version,
                meets_minimum,
                website: spec.website.to_string(),
            }
        }
        Err(_) => ToolListItem {
            name: spec.name.to_string(),
            path: None,
            available: false,
            version: None,
            meets_minimum: None,
            website: spec.website.to_string(),
        },
    }
}

/// Report lslint/mcpp resolution state.
pub fn cmd_tools(config: &Config, format: &OutputFormat) -> i32 {
    let tools = vec![
        probe(
            ToolSpec::lslint(),
            config.lslint.path.as_deref(),
            Some(LSLINT_MIN_VERSION),
        ),
        probe(ToolSpec::mcpp(), config.mcpp.path.as_deref(), None),
    ];

    let result = ToolsResult { tools };
    result.print(format);

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_listing_marks_missing_tools() {
        let result = ToolsResult {
            tools: vec![ToolListItem {
                name: "lslint".to_string(),
                path: None,
                available: false,
                version: None,
                meets_minimum: None,
                website: "https://github.com/Makopo/lslint".to_string(),
            }],
        };
        let text = result.format_text();
        assert!(text.contains("✗ lslint - not installed"));
        assert!(text.contains("Website: https://github.com/Makopo/lslint"));
    }

    #[test]
    fn text_listing_flags_old_versions() {
        let result = ToolsResult {
            tools: vec![ToolListItem {
                name: "lslint".to_string(),
                path: Some("/usr/bin/lslint".to_string()),
                available: true,
                version: Some("0.4.0".to_string()),
                meets_minimum: Some(false),
                website: String::new(),
            }],
        };
        let text = result.format_text();
        assert!(text.contains("✓ lslint - 0.4.0"));
        assert!(text.contains("Too old"));
    }
}
