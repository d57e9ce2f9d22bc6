mod cli;
mod commands;
mod discover;
mod error;
mod ui;

use clap::{CommandFactory, Parser};
use clap_complete::generate as generate_completions;
use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(err) = run() {
        ui::error(err.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate_completions(args.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
