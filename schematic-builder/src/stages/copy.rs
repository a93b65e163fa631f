//! Staging project files into the output directory.
//!
//! Patterns are resolved against the current directory. A match lands at
//! its path relative to the pattern's static base, the leading segments
//! that contain no glob characters, so `src/assets/**/*.json` copies
//! `src/assets/a/b.json` to `<out>/a/b.json` and `README.md` to
//! `<out>/README.md`. A literal directory copies everything beneath it.
//! Wildcards never match dotfiles; name them literally to stage them.
//! Patterns prefixed with `!` exclude matches.

use super::{Stage, StageContext};
use crate::core::StageKind;
use crate::errors::{BuilderError, BuilderResult};
use async_trait::async_trait;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;

const GLOB_CHARS: [char; 3] = ['*', '?', '['];

/// Copies every file matched by `patterns` into `output_dir`.
///
/// Returns the destination paths in copy order. A literal path that does
/// not exist is an error; a glob that matches nothing is not.
pub async fn copy_project_files(
    patterns: &[String],
    output_dir: &Path,
    cwd: &Path,
) -> BuilderResult<Vec<PathBuf>> {
    let (excludes, includes): (Vec<&String>, Vec<&String>) =
        patterns.iter().partition(|p| p.starts_with('!'));

    let excludes = excludes
        .into_iter()
        .map(|p| {
            let raw = p.trim_start_matches('!');
            Pattern::new(raw.trim_start_matches("./")).map_err(|source| BuilderError::Pattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect::<BuilderResult<Vec<_>>>()?;

    let mut copied = Vec::new();
    for pattern in includes {
        for (from, relative) in expand(pattern, cwd)? {
            if is_excluded(&from, cwd, &excludes) {
                debug!(file = %from.display(), "Excluded from copy");
                continue;
            }

            let to = output_dir.join(&relative);
            copy_file(&from, &to).await?;
            copied.push(to);
        }
    }

    Ok(copied)
}

/// Expands one include pattern to `(source, path relative to its base)` pairs.
///
/// A literal directory expands to every file beneath it, based at the
/// directory itself.
fn expand(pattern: &str, cwd: &Path) -> BuilderResult<Vec<(PathBuf, PathBuf)>> {
    let pattern = pattern.trim_start_matches("./");
    let base = static_base(pattern);

    if base == Path::new(pattern) {
        let from = cwd.join(pattern);
        if !from.exists() {
            return Err(BuilderError::MissingSource { path: from });
        }
        if from.is_dir() {
            let full_pattern = format!("{}/**/*", Pattern::escape(&from.to_string_lossy()));
            return glob_files(pattern, &full_pattern, &from);
        }
        let name = from
            .file_name()
            .map_or_else(|| PathBuf::from(pattern), PathBuf::from);
        return Ok(vec![(from, name)]);
    }

    let full_pattern = cwd
        .join(pattern)
        .to_string_lossy()
        .replacen(&*cwd.to_string_lossy(), &Pattern::escape(&cwd.to_string_lossy()), 1);
    glob_files(pattern, &full_pattern, &cwd.join(&base))
}

/// Files matching `full_pattern`, each paired with its path relative to `base_dir`.
fn glob_files(
    pattern: &str,
    full_pattern: &str,
    base_dir: &Path,
) -> BuilderResult<Vec<(PathBuf, PathBuf)>> {
    let entries = glob::glob_with(full_pattern, match_options()).map_err(|source| {
        BuilderError::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        let from = entry.map_err(|err| BuilderError::Read {
            path: err.path().to_path_buf(),
            source: err.into(),
        })?;
        if from.is_dir() {
            continue;
        }
        let relative = from
            .strip_prefix(base_dir)
            .map_or_else(|_| from.clone(), Path::to_path_buf);
        matches.push((from, relative));
    }

    if matches.is_empty() {
        debug!(pattern = %pattern, "Pattern matched no files");
    }
    Ok(matches)
}

/// The leading segments of `pattern` that contain no glob characters.
fn static_base(pattern: &str) -> PathBuf {
    if !pattern.contains(GLOB_CHARS) {
        return PathBuf::from(pattern);
    }
    Path::new(pattern)
        .components()
        .take_while(|c| !c.as_os_str().to_string_lossy().contains(GLOB_CHARS))
        .collect()
}

fn is_excluded(path: &Path, cwd: &Path, excludes: &[Pattern]) -> bool {
    let relative = path.strip_prefix(cwd).unwrap_or(path);
    excludes
        .iter()
        .any(|p| p.matches_path_with(relative, match_options()))
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

async fn copy_file(from: &Path, to: &Path) -> BuilderResult<()> {
    if let Some(parent) = to.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| BuilderError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::copy(from, to)
        .await
        .map_err(|source| BuilderError::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        })?;
    debug!(from = %from.display(), to = %to.display(), "Copied file");
    Ok(())
}

/// Stage that copies the manifest and configured files.
#[derive(Debug, Clone)]
pub struct CopyStage {
    output_dir: PathBuf,
}

impl CopyStage {
    /// Creates a copy stage targeting `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl Stage for CopyStage {
    fn kind(&self) -> StageKind {
        StageKind::Copy
    }

    async fn execute(&self, ctx: &StageContext<'_>) -> BuilderResult<()> {
        let copied = copy_project_files(
            ctx.options().files(),
            &self.output_dir,
            ctx.builder().current_directory(),
        )
        .await?;
        debug!(count = copied.len(), "Copied project files");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_static_base() {
        assert_eq!(static_base("README.md"), PathBuf::from("README.md"));
        assert_eq!(static_base("src/assets/**/*.json"), PathBuf::from("src/assets"));
        assert_eq!(static_base("*.md"), PathBuf::new());
    }

    #[tokio::test]
    async fn test_copy_literal_files() {
        let cwd = tempfile::tempdir().unwrap();
        let out = cwd.path().join("dist");
        write(cwd.path(), "package.json", "{}");
        write(cwd.path(), "docs/README.md", "# readme");

        let copied = copy_project_files(&patterns(&["package.json", "docs/README.md"]), &out, cwd.path())
            .await
            .unwrap();

        assert_eq!(copied, vec![out.join("package.json"), out.join("README.md")]);
        assert_eq!(std::fs::read_to_string(out.join("README.md")).unwrap(), "# readme");
    }

    #[tokio::test]
    async fn test_copy_glob_preserves_structure() {
        let cwd = tempfile::tempdir().unwrap();
        let out = cwd.path().join("dist");
        write(cwd.path(), "src/schematics/collection.json", "{}");
        write(cwd.path(), "src/schematics/ng-add/schema.json", "{}");
        write(cwd.path(), "src/schematics/ng-add/index.ts", "");

        copy_project_files(&patterns(&["src/schematics/**/*.json"]), &out, cwd.path())
            .await
            .unwrap();

        assert!(out.join("collection.json").is_file());
        assert!(out.join("ng-add/schema.json").is_file());
        assert!(!out.join("ng-add/index.ts").exists());
    }

    #[tokio::test]
    async fn test_copy_excludes() {
        let cwd = tempfile::tempdir().unwrap();
        let out = cwd.path().join("dist");
        write(cwd.path(), "README.md", "");
        write(cwd.path(), "CHANGELOG.md", "");

        copy_project_files(&patterns(&["*.md", "!CHANGELOG.md"]), &out, cwd.path())
            .await
            .unwrap();

        assert!(out.join("README.md").is_file());
        assert!(!out.join("CHANGELOG.md").exists());
    }

    #[tokio::test]
    async fn test_wildcards_skip_dotfiles() {
        let cwd = tempfile::tempdir().unwrap();
        let out = cwd.path().join("dist");
        write(cwd.path(), "README.md", "");
        write(cwd.path(), ".npmrc", "//registry.npmjs.org/:_authToken=secret");
        write(cwd.path(), "src/.env", "TOKEN=secret");
        write(cwd.path(), "src/index.d.ts", "");

        let copied = copy_project_files(&patterns(&["*", "src/**/*"]), &out, cwd.path())
            .await
            .unwrap();

        assert_eq!(copied, vec![out.join("README.md"), out.join("index.d.ts")]);
        assert!(!out.join(".npmrc").exists());
        assert!(!out.join(".env").exists());
    }

    #[tokio::test]
    async fn test_literal_dotfile_is_copied() {
        let cwd = tempfile::tempdir().unwrap();
        let out = cwd.path().join("dist");
        write(cwd.path(), ".npmignore", "src/");

        copy_project_files(&patterns(&[".npmignore"]), &out, cwd.path())
            .await
            .unwrap();

        assert!(out.join(".npmignore").is_file());
    }

    #[tokio::test]
    async fn test_literal_directory_copies_contents() {
        let cwd = tempfile::tempdir().unwrap();
        let out = cwd.path().join("dist");
        write(cwd.path(), "schematics/collection.json", "{}");
        write(cwd.path(), "schematics/ng-add/schema.json", "{}");

        let mut copied = copy_project_files(&patterns(&["schematics"]), &out, cwd.path())
            .await
            .unwrap();
        copied.sort();

        assert_eq!(
            copied,
            vec![out.join("collection.json"), out.join("ng-add/schema.json")]
        );
        assert!(out.join("ng-add/schema.json").is_file());
    }

    #[tokio::test]
    async fn test_missing_literal_fails() {
        let cwd = tempfile::tempdir().unwrap();
        let err = copy_project_files(&patterns(&["LICENSE"]), &cwd.path().join("dist"), cwd.path())
            .await
            .unwrap_err();

        assert!(matches!(err, BuilderError::MissingSource { .. }));
    }

    #[tokio::test]
    async fn test_empty_glob_is_not_an_error() {
        let cwd = tempfile::tempdir().unwrap();
        let copied = copy_project_files(&patterns(&["assets/**/*.png"]), &cwd.path().join("dist"), cwd.path())
            .await
            .unwrap();

        assert!(copied.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_pattern() {
        let cwd = tempfile::tempdir().unwrap();
        let err = copy_project_files(&patterns(&["src/[*.json"]), &cwd.path().join("dist"), cwd.path())
            .await
            .unwrap_err();

        assert!(matches!(err, BuilderError::Pattern { .. }));
    }
}
