//! Command-line flags.

use anyhow::{Context, Result};
use clap::Parser;
use schematic_builder::config::BuilderOptions;
use std::path::{Path, PathBuf};

/// Compile a schematics project and stage a publishable package.
#[derive(Debug, Parser)]
#[command(name = "schematic-build", version, about)]
pub struct Cli {
    /// Path to the tsconfig, relative to the workspace root
    #[arg(long = "ts-config", short = 'p', value_name = "PATH")]
    pub ts_config: Option<String>,

    /// File pattern to stage alongside package.json (repeatable)
    #[arg(long = "files", short = 'f', value_name = "PATTERN")]
    pub files: Vec<String>,

    /// JSON options file, e.g. `{"tsConfig": "...", "files": [...]}`
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Workspace root [default: the current directory]
    #[arg(long, value_name = "DIR")]
    pub workspace_root: Option<PathBuf>,

    /// Directory the compiler runs in and patterns resolve against
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Compiler executable
    #[arg(long, default_value = "tsc", value_name = "PROGRAM")]
    pub tsc: String,

    /// Print the build report as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Merges the options file, if any, with the flags.
    ///
    /// `--ts-config` replaces the file's value; `--files` are appended.
    pub fn builder_options(&self) -> Result<BuilderOptions> {
        let mut options = match self.options {
            Some(ref path) => read_options(path)?,
            None => BuilderOptions::default(),
        };
        if let Some(ref ts_config) = self.ts_config {
            options.ts_config = Some(ts_config.clone());
        }
        options.files.extend(self.files.iter().cloned());
        Ok(options)
    }

    /// Returns `(workspace_root, current_directory)`.
    pub fn directories(&self) -> Result<(PathBuf, PathBuf)> {
        let cwd = match self.cwd {
            Some(ref dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to read the current directory")?,
        };
        let root = self.workspace_root.clone().unwrap_or_else(|| cwd.clone());
        Ok((root, cwd))
    }
}

fn read_options(path: &Path) -> Result<BuilderOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;
    BuilderOptions::from_json_str(&content)
        .with_context(|| format!("Failed to parse options file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_only() {
        let cli = Cli::parse_from([
            "schematic-build",
            "--ts-config",
            "tsconfig.lib.json",
            "--files",
            "README.md",
            "-f",
            "src/**/*.json",
        ]);

        let options = cli.builder_options().unwrap();
        assert_eq!(options.ts_config.as_deref(), Some("tsconfig.lib.json"));
        assert_eq!(options.files, vec!["README.md", "src/**/*.json"]);
        assert_eq!(cli.tsc, "tsc");
        assert!(!cli.json);
    }

    #[test]
    fn test_options_file_merged_with_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"tsConfig": "tsconfig.json", "files": ["README.md"]}"#).unwrap();

        let cli = Cli::parse_from([
            "schematic-build",
            "--options",
            path.to_str().unwrap(),
            "--files",
            "LICENSE",
        ]);

        let options = cli.builder_options().unwrap();
        assert_eq!(options.ts_config.as_deref(), Some("tsconfig.json"));
        assert_eq!(options.files, vec!["README.md", "LICENSE"]);
    }

    #[test]
    fn test_missing_options_file() {
        let cli = Cli::parse_from(["schematic-build", "--options", "/nonexistent/options.json"]);
        let err = cli.builder_options().unwrap_err();
        assert!(err.to_string().contains("Failed to read options file"));
    }

    #[test]
    fn test_workspace_root_defaults_to_cwd() {
        let cli = Cli::parse_from(["schematic-build", "--cwd", "/work/lib"]);
        let (root, cwd) = cli.directories().unwrap();
        assert_eq!(root, PathBuf::from("/work/lib"));
        assert_eq!(cwd, PathBuf::from("/work/lib"));
    }
}
