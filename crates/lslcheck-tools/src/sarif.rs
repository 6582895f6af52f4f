//! SARIF 2.1.0 output format.
//!
//! SARIF (Static Analysis Results Interchange Format) is a standard format
//! for static analysis tool output. Supported by GitHub, VS Code, and many
//! CI systems.

use crate::Diagnostic;
use serde::Serialize;
use std::collections::HashMap;

/// SARIF 2.1.0 report.
#[derive(Debug, Serialize)]
pub struct SarifReport {
    #[serde(rename = "$schema")]
    pub schema: &'static str,
    pub version: &'static str,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifDriver {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information_uri: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: SarifArtifactLocation,
    pub region: SarifRegion,
}

#[derive(Debug, Serialize)]
pub struct SarifArtifactLocation {
    pub uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRegion {
    pub start_line: usize,
    pub start_column: usize,
}

impl SarifReport {
    /// Create a SARIF report from diagnostics.
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Self {
        // Group diagnostics by tool
        let mut by_tool: HashMap<&str, Vec<&Diagnostic>> = HashMap::new();
        for d in diagnostics {
            by_tool.entry(&d.tool).or_default().push(d);
        }

        let runs = by_tool
            .into_iter()
            .map(|(tool_name, diags)| {
                let results = diags
                    .iter()
                    .map(|d| {
                        // The remap note is context a SARIF consumer would
                        // otherwise lose; fold it into the message text.
                        let text = match &d.note {
                            Some(note) => format!("{} ({})", d.message, note),
                            None => d.message.clone(),
                        };
                        SarifResult {
                            level: d.severity.to_sarif_level().to_string(),
                            message: SarifMessage { text },
                            locations: vec![SarifLocation {
                                physical_location: SarifPhysicalLocation {
                                    artifact_location: SarifArtifactLocation {
                                        uri: d.location.file.display().to_string(),
                                    },
                                    region: SarifRegion {
                                        start_line: d.location.line,
                                        start_column: d.location.column,
                                    },
                                },
                            }],
                        }
                    })
                    .collect();

                SarifRun {
                    tool: SarifTool {
                        driver: SarifDriver {
                            name: tool_name.to_string(),
                            version: None,
                            information_uri: None,
                        },
                    },
                    results,
                }
            })
            .collect();

        SarifReport {
            schema: "https://json.schemastore.org/sarif-2.1.0.json",
            version: "2.1.0",
            runs,
        }
    }
}
