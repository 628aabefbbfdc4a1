//! # Editor Builder
//!
//! Configure and build the Qt code editor with CMake.
//!
//! ## Usage
//!
//! ```bash
//! editor-builder              # Configure + build (same as `all`)
//! editor-builder configure    # Generate build files into build/
//! editor-builder build        # Build an already configured tree
//! editor-builder clean        # Remove build/
//! editor-builder doctor       # Check cmake, ninja and the Qt prefix
//! editor-builder config       # Show the resolved settings
//! ```
//!
//! Settings come from `builder.json` in the project root when present and
//! can be overridden per run, e.g. `--prefix-path /opt/Qt/6.9.1/gcc_64`.

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

mod builder;

use builder::config::{BuildConfig, Overrides};
use builder::exec::SystemRunner;
use builder::paths::{self, ProjectPaths};
use builder::BuildCommands;

#[derive(Parser)]
#[command(name = "editor-builder", about = "Configure and build the Qt code editor")]
struct Cli {
    #[command(subcommand)]
    command: Option<BuildCommands>,

    /// Project root (defaults to the repository root)
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    /// Config file (defaults to <project>/builder.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Build output directory, relative to the project root
    #[arg(long, global = true)]
    build_dir: Option<PathBuf>,

    /// CMake executable
    #[arg(long, global = true)]
    cmake: Option<String>,

    /// CMake generator
    #[arg(long, short = 'G', global = true)]
    generator: Option<String>,

    /// CMAKE_PREFIX_PATH (Qt installation)
    #[arg(long, global = true, conflicts_with = "no_prefix_path")]
    prefix_path: Option<String>,

    /// Do not pass CMAKE_PREFIX_PATH
    #[arg(long, global = true)]
    no_prefix_path: bool,

    /// CMAKE_CXX_STANDARD
    #[arg(long, global = true, conflicts_with = "no_cxx_standard")]
    cxx_standard: Option<u32>,

    /// Do not pass CMAKE_CXX_STANDARD
    #[arg(long, global = true)]
    no_cxx_standard: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            cmake: self.cmake.clone(),
            generator: self.generator.clone(),
            prefix_path: if self.no_prefix_path {
                Some(None)
            } else {
                self.prefix_path.clone().map(Some)
            },
            cxx_standard: if self.no_cxx_standard {
                Some(None)
            } else {
                self.cxx_standard.map(Some)
            },
            build_dir: self.build_dir.clone(),
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = paths::project_root(cli.project_dir.as_deref())?;
    let config = BuildConfig::load(&root, cli.config.as_deref())?.with_overrides(cli.overrides());
    let paths = ProjectPaths::new(root, &config.build_dir)?;
    log::debug!("project root: {}", paths.root.display());
    log::debug!("build dir: {}", paths.build_dir.display());

    let mut runner = SystemRunner;
    match cli.command.unwrap_or_default() {
        BuildCommands::All => builder::build_all(&config, &paths, &mut runner)?,
        BuildCommands::Configure => builder::configure(&config, &paths, &mut runner)?,
        BuildCommands::Build => builder::build(&config, &paths, &mut runner)?,
        BuildCommands::Clean => builder::clean(&paths)?,
        BuildCommands::Doctor => builder::doctor::run(&config, &paths)?,
        BuildCommands::Config => builder::show_config(&config, &paths)?,
    }

    Ok(())
}
