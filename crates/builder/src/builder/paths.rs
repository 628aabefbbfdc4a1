//! Project root and build directory resolution.

use anyhow::{bail, Context, Result};
use std::path::{Component, Path, PathBuf};

/// Resolved locations for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub build_dir: PathBuf,
}

impl ProjectPaths {
    /// Resolve the build directory against `root`. Absolute values are kept as-is.
    ///
    /// Both paths are normalised lexically. A build directory that is the
    /// project root or one of its ancestors is rejected.
    pub fn new(root: PathBuf, build_dir: &Path) -> Result<Self> {
        let root = normalize(&root);
        let build_dir = normalize(&root.join(build_dir));

        if root.starts_with(&build_dir) {
            bail!(
                "Build directory {} must not contain the project root {}",
                build_dir.display(),
                root.display()
            );
        }
        Ok(Self { root, build_dir })
    }

    /// Whether the build directory lies strictly below the project root.
    pub fn build_dir_in_root(&self) -> bool {
        self.build_dir != self.root && self.build_dir.starts_with(&self.root)
    }
}

/// Drop `.` components and fold `..` into its parent without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// Repository root, derived from this crate's location at `<repo>/crates/builder`.
pub fn repo_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .context("builder is expected at <repo>/crates/builder")
}

/// Project root: `explicit` made absolute, or the repository root.
pub fn project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => std::path::absolute(dir)
            .with_context(|| format!("Failed to resolve project dir {}", dir.display())),
        None => repo_root(),
    }
}

/// Create the build directory and missing parents. Existing directories are reused.
pub fn ensure_build_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        log::debug!("reusing build directory {}", dir.display());
        return Ok(());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create build directory {}", dir.display()))?;
    log::info!("created build directory {}", dir.display());
    Ok(())
}

/// Fail unless the build directory has been configured.
pub fn require_build_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!(
            "Build directory {} not found. Run: editor-builder configure",
            dir.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_relative_build_dir_joins_root() {
        let paths = ProjectPaths::new(PathBuf::from("/proj"), Path::new("build")).unwrap();
        assert_eq!(paths.build_dir, PathBuf::from("/proj/build"));
        assert!(paths.build_dir_in_root());
    }

    #[test]
    fn test_absolute_build_dir_is_kept() {
        let paths = ProjectPaths::new(PathBuf::from("/proj"), Path::new("/tmp/out")).unwrap();
        assert_eq!(paths.build_dir, PathBuf::from("/tmp/out"));
        assert!(!paths.build_dir_in_root());
    }

    #[test]
    fn test_build_dir_is_normalized() {
        let paths =
            ProjectPaths::new(PathBuf::from("/proj"), Path::new("./out/../build/.")).unwrap();
        assert_eq!(paths.build_dir, PathBuf::from("/proj/build"));
    }

    #[test]
    fn test_build_dir_escaping_root_is_outside() {
        let paths = ProjectPaths::new(PathBuf::from("/proj"), Path::new("../sibling")).unwrap();
        assert_eq!(paths.build_dir, PathBuf::from("/sibling"));
        assert!(!paths.build_dir_in_root());
    }

    #[test]
    fn test_normalize_stops_at_filesystem_root() {
        assert_eq!(normalize(Path::new("/proj/../../x")), PathBuf::from("/x"));
        assert_eq!(normalize(Path::new("../a/./b/..")), PathBuf::from("../a"));
    }

    #[test]
    fn test_root_and_ancestors_rejected_as_build_dir() {
        for dir in [".", "", "..", "build/..", "/"] {
            let err = ProjectPaths::new(PathBuf::from("/proj"), Path::new(dir)).unwrap_err();
            assert!(err.to_string().contains("must not contain the project root"), "{dir}");
        }
    }

    #[test]
    fn test_repo_root_contains_workspace_manifest() {
        let root = repo_root().unwrap();
        assert!(root.join("crates/builder/Cargo.toml").exists());
    }

    #[test]
    fn test_project_root_is_absolute() {
        let root = project_root(Some(Path::new("some/relative"))).unwrap();
        assert!(root.is_absolute());
    }

    #[test]
    fn test_ensure_build_dir_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/build");

        ensure_build_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_build_dir_keeps_contents() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("build");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("CMakeCache.txt"), "cached").unwrap();

        ensure_build_dir(&dir).unwrap();
        assert_eq!(std::fs::read_to_string(dir.join("CMakeCache.txt")).unwrap(), "cached");
    }

    #[test]
    fn test_ensure_build_dir_rejects_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("build");
        std::fs::write(&path, "not a directory").unwrap();

        assert!(ensure_build_dir(&path).is_err());
    }

    #[test]
    fn test_require_build_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(require_build_dir(&tmp.path().join("build")).is_err());
        assert!(require_build_dir(tmp.path()).is_ok());
    }
}
