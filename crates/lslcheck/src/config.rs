//! Configuration system for lslcheck.
//!
//! Loads config from:
//! 1. Global: ~/.config/lslcheck/config.toml
//! 2. Per-project: .lslcheck.toml at the lint root (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [lslint]
//! path = "/opt/lslint/bin/lslint"   # override PATH lookup
//! args = []                          # extra lslint arguments
//!
//! [mcpp]
//! mode = "auto"                      # "auto", "on", or "off"
//! include_dirs = ["include"]         # passed as -I
//! args = []                          # extra mcpp arguments
//!
//! [pretty]
//! enabled = true                     # auto-enable when TTY (default: auto)
//! colors = "auto"                    # "auto", "always", or "never"
//! ```

use crate::output::PrettyConfig;
use lslcheck_tools::PreprocessMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// lslint settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LslintConfig {
    /// Explicit path to the lslint binary. Default: PATH lookup.
    pub path: Option<PathBuf>,
    /// Extra arguments passed before the file name.
    pub args: Option<Vec<String>>,
}

impl LslintConfig {
    pub fn args(&self) -> &[String] {
        self.args.as_deref().unwrap_or(&[])
    }

    fn merge(self, other: Self) -> Self {
        Self {
            path: other.path.or(self.path),
            args: other.args.or(self.args),
        }
    }
}

/// mcpp preprocessor settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct McppConfig {
    /// Explicit path to the mcpp binary. Default: PATH lookup.
    pub path: Option<PathBuf>,
    /// Extra arguments.
    pub args: Option<Vec<String>>,
    /// Include search directories, passed as -I.
    pub include_dirs: Option<Vec<PathBuf>>,
    /// When to preprocess. Default: auto.
    pub mode: Option<PreprocessMode>,
}

impl McppConfig {
    pub fn args(&self) -> &[String] {
        self.args.as_deref().unwrap_or(&[])
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        self.include_dirs.as_deref().unwrap_or(&[])
    }

    pub fn mode(&self) -> PreprocessMode {
        self.mode.unwrap_or_default()
    }

    fn merge(self, other: Self) -> Self {
        Self {
            path: other.path.or(self.path),
            args: other.args.or(self.args),
            include_dirs: other.include_dirs.or(self.include_dirs),
            mode: other.mode.or(self.mode),
        }
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub lslint: LslintConfig,
    pub mcpp: McppConfig,
    pub pretty: PrettyConfig,
}

impl Config {
    /// Load configuration for a lint root.
    ///
    /// Loads global config from ~/.config/lslcheck/config.toml,
    /// then merges with per-project config from .lslcheck.toml.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::load_file(&global_path) {
                config = config.merge(global);
            }
        }

        let project_path = root.join(".lslcheck.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    fn merge(self, other: Self) -> Self {
        Self {
            lslint: self.lslint.merge(other.lslint),
            mcpp: self.mcpp.merge(other.mcpp),
            pretty: self.pretty.merge(other.pretty),
        }
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("lslcheck").join("config.toml"))
    }

    /// Load config from a file path.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        toml::from_str(&content).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.lslint.path, None);
        assert!(config.lslint.args().is_empty());
        assert_eq!(config.mcpp.mode(), PreprocessMode::Auto);
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".lslcheck.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
[lslint]
path = "/opt/lslint/bin/lslint"
args = ["-u"]

[mcpp]
mode = "off"
"#
        )
        .unwrap();

        let config = Config::load(dir.path());
        assert_eq!(
            config.lslint.path,
            Some(PathBuf::from("/opt/lslint/bin/lslint"))
        );
        assert_eq!(config.lslint.args(), ["-u".to_string()]);
        assert_eq!(config.mcpp.mode(), PreprocessMode::Off);
    }

    #[test]
    fn test_partial_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".lslcheck.toml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
[mcpp]
include_dirs = ["include", "shared"]
"#
        )
        .unwrap();

        let config = Config::load(dir.path());
        // Unspecified sections keep their defaults.
        assert_eq!(config.lslint.path, None);
        assert_eq!(config.mcpp.mode(), PreprocessMode::Auto);
        assert_eq!(
            config.mcpp.include_dirs(),
            [PathBuf::from("include"), PathBuf::from("shared")]
        );
    }

    #[test]
    fn test_merge_preserves_explicit_values() {
        let global = Config {
            mcpp: McppConfig {
                mode: Some(PreprocessMode::On),
                ..Default::default()
            },
            ..Default::default()
        };
        let project = Config {
            mcpp: McppConfig {
                include_dirs: Some(vec![PathBuf::from("include")]),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = global.merge(project);
        // mode comes from global, include_dirs from project.
        assert_eq!(merged.mcpp.mode(), PreprocessMode::On);
        assert_eq!(merged.mcpp.include_dirs(), [PathBuf::from("include")]);
    }
}
