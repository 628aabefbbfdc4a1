//! Toolchain configuration.
//!
//! Values are resolved in three layers: built-in defaults, an optional
//! `builder.json` at the project root, then command-line overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE: &str = "builder.json";

/// Default Qt installation (MinGW kit).
pub const DEFAULT_PREFIX_PATH: &str = "C:/Qt/6.9.1/mingw_64";

/// Resolved toolchain settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Program used for both the configure and the build step
    pub cmake: String,
    /// CMake generator (`-G`)
    pub generator: String,
    /// `CMAKE_PREFIX_PATH`, omitted when `None`
    pub prefix_path: Option<String>,
    /// `CMAKE_CXX_STANDARD`, omitted when `None`
    pub cxx_standard: Option<u32>,
    /// Output directory; relative paths are joined onto the project root
    pub build_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            cmake: "cmake".to_string(),
            generator: "Ninja".to_string(),
            prefix_path: Some(DEFAULT_PREFIX_PATH.to_string()),
            cxx_standard: Some(20),
            build_dir: PathBuf::from("build"),
        }
    }
}

/// Command-line overrides. `None` leaves the loaded value alone.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub cmake: Option<String>,
    pub generator: Option<String>,
    pub prefix_path: Option<Option<String>>,
    pub cxx_standard: Option<Option<u32>>,
    pub build_dir: Option<PathBuf>,
}

impl BuildConfig {
    /// Parse a config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Load the config for a project.
    ///
    /// An explicit path must exist. Without one, `<root>/builder.json` is
    /// used when present and the defaults otherwise.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("loading config from {}", path.display());
            return Self::from_file(path);
        }

        let default_path = root.join(CONFIG_FILE);
        if default_path.is_file() {
            log::debug!("loading config from {}", default_path.display());
            Self::from_file(&default_path)
        } else {
            log::debug!("no {CONFIG_FILE} in {}, using defaults", root.display());
            Ok(Self::default())
        }
    }

    /// Apply command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(cmake) = overrides.cmake {
            self.cmake = cmake;
        }
        if let Some(generator) = overrides.generator {
            self.generator = generator;
        }
        if let Some(prefix_path) = overrides.prefix_path {
            self.prefix_path = prefix_path;
        }
        if let Some(cxx_standard) = overrides.cxx_standard {
            self.cxx_standard = cxx_standard;
        }
        if let Some(build_dir) = overrides.build_dir {
            self.build_dir = build_dir;
        }
        self
    }
}
