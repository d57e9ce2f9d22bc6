use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(name = "diwire")]
#[command(bin_name = "diwire")]
#[command(about = "Generates Swinject dependency-injection registration code")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Discover Swift sources and write `dependencies.generated.swift`.
    Generate(GenerateArgs),
    /// Generate shell completion scripts.
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Treat the project as a Swift Package Manager layout
    /// (`Sources/<target-name>`) rather than an Xcode project layout, where
    /// the default source root is `--project-path` itself.
    #[arg(long)]
    pub is_package: bool,

    /// Build target name. Falls back to the `TARGET_NAME` environment
    /// variable, which Xcode populates automatically inside a Run Script
    /// build phase.
    #[arg(long)]
    pub target_name: Option<String>,

    /// Project root directory. Falls back to the `PROJECT_DIR` environment
    /// variable.
    #[arg(long)]
    pub project_path: Option<PathBuf>,

    /// Source root to scan for `.swift` files, relative to `--project-path`
    /// unless absolute. Repeatable. A root ending in `/**` expands to every
    /// directory literally named `Sources` found anywhere beneath the
    /// prefix. Defaults to the layout implied by `--is-package` when
    /// omitted.
    #[arg(long = "package-sources-path")]
    pub package_sources_path: Vec<String>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}
