mod check;
mod completions;
mod generate;
mod stages;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use stages::StagesCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for hookgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "hookgen")]
#[command(version)]
#[command(about = "Generate services through a pipeline of plugin-hooked stages")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run().await,
            Commands::Check(cmd) => cmd.run(),
            Commands::Stages(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and write the generated files
    Generate(GenerateCommand),

    /// Validate hookgen.toml and show the registered hooks
    Check(CheckCommand),

    /// List the stage catalogue, or the sequence for a manifest
    Stages(StagesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
