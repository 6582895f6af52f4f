//! Target expansion: turn CLI arguments into a list of lintable files.

use std::path::{Path, PathBuf};

/// Extensions lslint handles (LSL and the OpenSim dialect).
pub const LSL_EXTENSIONS: &[&str] = &["lsl", "ossl"];

pub fn has_lsl_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| LSL_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Expand targets into lintable files.
///
/// Directories are walked gitignore-aware and filtered to LSL extensions;
/// explicitly named files pass through untouched, whatever their extension.
pub fn expand_targets(targets: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for target in targets {
        if target.is_dir() {
            for result in ignore::WalkBuilder::new(target).build() {
                let Ok(entry) = result else { continue };
                if entry.file_type().is_some_and(|t| t.is_file())
                    && has_lsl_extension(entry.path())
                {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(target.clone());
        }
    }

    files.sort();
    files.dedup();
    files
}
