use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use hookgen_manifest::Manifest;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to hookgen.toml (defaults to ./hookgen.toml)
    #[arg(short, long, default_value = "hookgen.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub async fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();

        let report = ops::generate(
            &manifest,
            GenerateOptions {
                config_path: &self.config,
                output_dir: &self.output,
                dry_run: self.dry_run,
            },
        )
        .await?;

        report.render(&mut TerminalOutput::new());

        if !report.is_completed() {
            std::process::exit(1);
        }
        Ok(())
    }
}
