use std::env;
use std::fs;
use std::path::PathBuf;

use diwire_core::Config;

use crate::cli::GenerateArgs;
use crate::discover;
use crate::error::{CliError, Result};
use crate::ui;

/// Fixed output filename; not part of the core's contract, a collaborator
/// sentinel only.
const OUTPUT_FILE_NAME: &str = "dependencies.generated.swift";

pub fn run(args: GenerateArgs) -> Result<()> {
    let target_name = args
        .target_name
        .or_else(|| env::var("TARGET_NAME").ok())
        .ok_or(CliError::MissingArgument("target-name"))?;

    let project_path = args
        .project_path
        .or_else(|| env::var("PROJECT_DIR").ok().map(PathBuf::from))
        .ok_or(CliError::MissingArgument("project-path"))?;

    ui::status(format!("Discovering sources under {}", project_path.display()));
    let roots = discover::resolve_roots(&project_path, &target_name, args.is_package, &args.package_sources_path);
    let sources = discover::read_sources(&roots)?;
    if sources.is_empty() {
        ui::warn("no .swift source files found under the resolved roots");
    } else {
        ui::status(format!("Found {} source file(s)", sources.len()));
    }

    let config = Config::default();
    let generated = diwire_core::generate_from_sources(&sources, &config)?;

    let output_path = project_path.join(OUTPUT_FILE_NAME);
    fs::write(&output_path, generated)?;
    ui::success(format!("Wrote {}", output_path.display()));

    Ok(())
}
