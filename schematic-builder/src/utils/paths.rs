//! Lexical path helpers.

use std::path::{Component, Path, PathBuf};

/// Joins `path` onto `base` and normalises the result.
///
/// An absolute `path` replaces `base`. `.` segments are dropped and `..`
/// pops the previous segment without touching the filesystem, so the
/// result is stable whether or not the target exists.
#[must_use]
pub fn resolve(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    normalize(&base.join(path))
}

/// Removes `.` and `..` segments lexically.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root.
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Directory containing `path`, or `path` itself when it has no parent.
#[must_use]
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_relative() {
        assert_eq!(
            resolve(Path::new("/workspace"), "dist"),
            PathBuf::from("/workspace/dist")
        );
    }

    #[test]
    fn test_resolve_dot_segments() {
        assert_eq!(
            resolve(Path::new("/workspace/libs/a"), "./../../dist/a"),
            PathBuf::from("/workspace/dist/a")
        );
    }

    #[test]
    fn test_resolve_absolute_replaces_base() {
        assert_eq!(
            resolve(Path::new("/workspace"), "/tmp/out"),
            PathBuf::from("/tmp/out")
        );
    }

    #[test]
    fn test_parent_at_root() {
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_leading_parent_kept_for_relative() {
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("tsconfig.json")), Path::new("."));
        assert_eq!(parent_dir(Path::new("/ws/tsconfig.json")), Path::new("/ws"));
    }
}
