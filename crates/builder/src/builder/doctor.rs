//! Toolchain preflight checks.

use super::config::BuildConfig;
use super::paths::ProjectPaths;
use anyhow::{bail, Result};
use std::path::Path;

/// Outcome of a single check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Check {
    pub ok: bool,
    pub message: String,
}

impl Check {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

fn program(name: &str) -> Check {
    match which::which(name) {
        Ok(path) => Check::pass(format!("{name} ({})", path.display())),
        Err(_) => Check::fail(format!("missing `{name}` in PATH")),
    }
}

/// Collect all checks for the given setup.
pub fn checks(config: &BuildConfig, paths: &ProjectPaths) -> Vec<Check> {
    let mut checks = vec![program(&config.cmake)];

    if config.generator.eq_ignore_ascii_case("ninja") {
        checks.push(program("ninja"));
    }

    let lists = paths.root.join("CMakeLists.txt");
    checks.push(if lists.is_file() {
        Check::pass(lists.display().to_string())
    } else {
        Check::fail(format!("missing {}", lists.display()))
    });

    if let Some(prefix) = &config.prefix_path {
        checks.push(if Path::new(prefix).is_dir() {
            Check::pass(format!("prefix path {prefix}"))
        } else {
            Check::fail(format!("missing prefix path: {prefix}"))
        });
    }

    checks
}

pub fn run(config: &BuildConfig, paths: &ProjectPaths) -> Result<()> {
    let mut ok = true;
    for check in checks(config, paths) {
        if check.ok {
            eprintln!("[OK] {}", check.message);
        } else {
            eprintln!("[FAIL] {}", check.message);
            ok = false;
        }
    }

    if !ok {
        bail!("doctor checks failed");
    }
    Ok(())
}
