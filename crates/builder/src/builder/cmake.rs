//! CMake command construction for the configure and build steps.

use super::config::BuildConfig;
use super::paths::ProjectPaths;
use std::process::Command;

/// Builds the two CMake invocations for a project.
#[derive(Clone, Debug)]
pub struct CmakeBuilder<'a> {
    config: &'a BuildConfig,
    paths: &'a ProjectPaths,
}

impl<'a> CmakeBuilder<'a> {
    pub fn new(config: &'a BuildConfig, paths: &'a ProjectPaths) -> Self {
        Self { config, paths }
    }

    /// `cmake -S <root> -B <build> -G <generator> [-D...]`
    pub fn configure(&self) -> Command {
        let mut cmd = Command::new(&self.config.cmake);
        cmd.arg("-S")
            .arg(&self.paths.root)
            .arg("-B")
            .arg(&self.paths.build_dir)
            .arg("-G")
            .arg(&self.config.generator);

        if let Some(prefix) = &self.config.prefix_path {
            cmd.arg(format!("-DCMAKE_PREFIX_PATH={prefix}"));
        }
        if let Some(standard) = self.config.cxx_standard {
            cmd.arg(format!("-DCMAKE_CXX_STANDARD={standard}"));
        }
        cmd
    }

    /// `cmake --build <build>`
    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.config.cmake);
        cmd.arg("--build").arg(&self.paths.build_dir);
        cmd
    }
}
