//! Build orchestration for the editor.
//!
//! Structure:
//! - `config` - Toolchain settings (defaults, `builder.json`, CLI overrides)
//! - `paths` - Project root and build directory resolution
//! - `cmake` - Configure and build command construction
//! - `exec` - Subprocess execution with relayed output
//! - `doctor` - Toolchain preflight checks

pub mod cmake;
pub mod config;
pub mod doctor;
pub mod exec;
pub mod paths;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use cmake::CmakeBuilder;
use config::BuildConfig;
use exec::CommandRunner;
use paths::ProjectPaths;

/// Printed as the last stdout line of a successful build.
pub const SUCCESS_MESSAGE: &str = "Build completed successfully!";

/// Build commands for the CLI.
#[derive(Subcommand, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildCommands {
    /// Configure and build (default)
    #[default]
    All,
    /// Generate build files only
    Configure,
    /// Build an already configured output directory
    Build,
    /// Remove the build output directory
    Clean,
    /// Check that the toolchain is available
    Doctor,
    /// Print the resolved configuration as JSON
    Config,
}

/// Generate build files into the output directory, creating it if needed.
pub fn configure(
    config: &BuildConfig,
    paths: &ProjectPaths,
    runner: &mut dyn CommandRunner,
) -> Result<()> {
    paths::ensure_build_dir(&paths.build_dir)?;

    println!("Generating build files...");
    log::info!(
        "configuring {} into {}",
        paths.root.display(),
        paths.build_dir.display()
    );
    exec::run_step(runner, &mut CmakeBuilder::new(config, paths).configure())
}

/// Run the build driver on a configured output directory.
pub fn build(
    config: &BuildConfig,
    paths: &ProjectPaths,
    runner: &mut dyn CommandRunner,
) -> Result<()> {
    paths::require_build_dir(&paths.build_dir)?;

    println!("Building project...");
    log::info!("building {}", paths.build_dir.display());
    exec::run_step(runner, &mut CmakeBuilder::new(config, paths).build())
}

/// Configure, then build. The build step only runs after a successful configure.
pub fn build_all(
    config: &BuildConfig,
    paths: &ProjectPaths,
    runner: &mut dyn CommandRunner,
) -> Result<()> {
    configure(config, paths, runner)?;
    build(config, paths, runner)?;

    println!("{SUCCESS_MESSAGE}");
    Ok(())
}

/// Remove the build output directory. Only directories below the project root are removed.
pub fn clean(paths: &ProjectPaths) -> Result<()> {
    let dir = &paths.build_dir;
    if !paths.build_dir_in_root() {
        bail!(
            "Refusing to clean {}: not inside the project root {}",
            dir.display(),
            paths.root.display()
        );
    }
    if dir.exists() {
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove {}", dir.display()))?;
        println!("Cleaned: {}", dir.display());
    } else {
        println!("Nothing to clean at {}", dir.display());
    }
    Ok(())
}

/// Print the resolved configuration and paths.
pub fn show_config(config: &BuildConfig, paths: &ProjectPaths) -> Result<()> {
    let report = serde_json::json!({
        "project_dir": paths.root,
        "build_dir": paths.build_dir,
        "config": config,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
