//! Check command - lint targets and print diagnostics.

use crate::config::Config;
use crate::output::OutputFormat;
use crate::walk;
use clap::Args;
use lslcheck_tools::{
    LintOutcome, Linter, PreprocessMode, Preprocessor, SarifReport, Severity, ToolError, ToolSpec,
};
use nu_ansi_term::Color::{Red, Yellow};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Files or directories to lint (directories expand to *.lsl / *.ossl)
    pub targets: Vec<PathBuf>,

    /// Root directory for config discovery (defaults to current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Preprocessor mode: auto, on, or off
    #[arg(long, value_name = "MODE")]
    pub preprocess: Option<String>,

    /// Output SARIF 2.1.0 instead of the regular format
    #[arg(long)]
    pub sarif: bool,
}

/// Resolve tools per config and assemble the pipeline.
pub fn build_linter(config: &Config, mode: PreprocessMode) -> Result<Linter, ToolError> {
    let lslint = ToolSpec::lslint().resolve(config.lslint.path.as_deref())?;
    let mut linter = Linter::new(lslint)
        .with_args(config.lslint.args().to_vec())
        .with_mode(mode);

    if mode != PreprocessMode::Off {
        match ToolSpec::mcpp().resolve(config.mcpp.path.as_deref()) {
            Ok(tool) => {
                let preprocessor = Preprocessor::new(tool)
                    .with_include_dirs(config.mcpp.include_dirs().to_vec())
                    .with_extra_args(config.mcpp.args().to_vec());
                linter = linter.with_preprocessor(preprocessor);
            }
            Err(e) if mode == PreprocessMode::On => return Err(e),
            // Auto with no mcpp installed: lint raw.
            Err(_) => {}
        }
    }

    Ok(linter)
}

fn parse_mode(s: &str) -> Option<PreprocessMode> {
    match s {
        "auto" => Some(PreprocessMode::Auto),
        "on" | "always" => Some(PreprocessMode::On),
        "off" | "never" => Some(PreprocessMode::Off),
        _ => None,
    }
}

/// Run lslint over the expanded targets.
pub fn cmd_check(args: &CheckArgs, format: &OutputFormat, config: &Config) -> i32 {
    let mode = args
        .preprocess
        .as_deref()
        .and_then(parse_mode)
        .unwrap_or_else(|| config.mcpp.mode());

    let linter = match build_linter(config, mode) {
        Ok(linter) => linter,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Install lslint (and mcpp for preprocessing), or set [lslint]/[mcpp] path in .lslcheck.toml.");
            return 1;
        }
    };

    let targets = if args.targets.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.targets.clone()
    };
    let files = walk::expand_targets(&targets);

    if files.is_empty() {
        if format.is_json() {
            println!("{{\"files\": [], \"diagnostics\": []}}");
        } else {
            eprintln!("No LSL files found.");
        }
        return 0;
    }

    let outcomes: Vec<LintOutcome> = files
        .par_iter()
        .map(|file| match linter.lint_file(file) {
            Ok(outcome) => outcome,
            Err(e) => LintOutcome::failure(file, e),
        })
        .collect();

    print_outcomes(&outcomes, args.sarif, format);

    let had_errors = outcomes
        .iter()
        .any(|o| !o.success || o.error_count() > 0);
    if had_errors { 1 } else { 0 }
}

fn print_outcomes(outcomes: &[LintOutcome], sarif: bool, format: &OutputFormat) {
    let diagnostics: Vec<_> = outcomes
        .iter()
        .flat_map(|o| o.diagnostics.clone())
        .collect();

    if sarif {
        let report = SarifReport::from_diagnostics(&diagnostics);
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
        return;
    }

    if format.is_json() {
        let output = serde_json::json!({
            "files": outcomes.iter().map(|o| {
                serde_json::json!({
                    "file": o.file,
                    "success": o.success,
                    "preprocessed": o.preprocessed,
                    "error_count": o.error_count(),
                    "warning_count": o.warning_count(),
                    "error": o.error,
                })
            }).collect::<Vec<_>>(),
            "diagnostics": diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
        return;
    }

    let use_colors = format.use_colors();

    for outcome in outcomes {
        if let Some(err) = &outcome.error {
            eprintln!("{}: {}", outcome.file.display(), err);
        }

        for diag in &outcome.diagnostics {
            let severity_str = diag.severity.as_str();
            let severity_display = if use_colors {
                match diag.severity {
                    Severity::Error => Red.bold().paint(severity_str).to_string(),
                    Severity::Warning => Yellow.paint(severity_str).to_string(),
                }
            } else {
                severity_str.to_string()
            };

            println!(
                "{}:{}:{}: {}: {}",
                diag.location.file.display(),
                diag.location.line,
                diag.location.column,
                severity_display,
                diag.message
            );

            if let Some(note) = &diag.note {
                println!("  note: {}", note);
            }
        }
    }

    let total_errors: usize = outcomes.iter().map(|o| o.error_count()).sum();
    let total_warnings: usize = outcomes.iter().map(|o| o.warning_count()).sum();

    if total_errors > 0 || total_warnings > 0 {
        eprintln!();
        eprintln!(
            "Found {} error(s) and {} warning(s)",
            total_errors, total_warnings
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_strings() {
        assert_eq!(parse_mode("auto"), Some(PreprocessMode::Auto));
        assert_eq!(parse_mode("on"), Some(PreprocessMode::On));
        assert_eq!(parse_mode("always"), Some(PreprocessMode::On));
        assert_eq!(parse_mode("off"), Some(PreprocessMode::Off));
        assert_eq!(parse_mode("sometimes"), None);
    }
}
